//! Reusable option-label presets offered by the editor.

use serde::Serialize;

use crate::error::StoreError;

/// A named list of option labels that can be applied to a question at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionGroup {
    pub id: usize,
    pub labels: Vec<String>,
}

/// All known groups plus the selected one. Group ids are their positions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OptionGroupState {
    pub selected_id: usize,
    pub groups: Vec<OptionGroup>,
}

impl OptionGroupState {
    /// Build groups from label presets. The second preset starts selected
    /// when there is one.
    pub fn from_defaults(presets: &[Vec<String>]) -> Self {
        let groups = presets
            .iter()
            .enumerate()
            .map(|(id, labels)| OptionGroup {
                id,
                labels: labels.clone(),
            })
            .collect::<Vec<_>>();
        let selected_id = if groups.len() > 1 { 1 } else { 0 };
        Self {
            selected_id,
            groups,
        }
    }

    pub fn selected(&self) -> Option<&OptionGroup> {
        self.groups.get(self.selected_id)
    }

    pub fn select(&mut self, id: usize) -> Result<(), StoreError> {
        if id >= self.groups.len() {
            return Err(StoreError::NotFound {
                kind: "option group",
                id: id.to_string(),
            });
        }
        self.selected_id = id;
        Ok(())
    }

    /// Append a group and select it. Returns the new group id.
    pub fn add(&mut self, labels: Vec<String>) -> usize {
        let id = self.groups.len();
        self.groups.push(OptionGroup { id, labels });
        self.selected_id = id;
        id
    }
}
