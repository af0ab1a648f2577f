//! Intents the editor view sends to the store
//!
//! Each intent is one user-level request. The store applies it completely or
//! not at all.

use serde::{Deserialize, Serialize};

use super::AlertLevel;
use crate::error::StoreError;
use crate::model::{BlockId, ItemType, QuestionFlags, QuestionId};

/// Item type named by an intent.
///
/// Names outside the known kinds still parse so the store can reject the one
/// intent that carries them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    Known(ItemType),
    Unknown(String),
}

impl ItemKind {
    /// The known item type, or `InvalidItemType` for `operation`
    pub fn resolve(self, operation: &'static str) -> Result<ItemType, StoreError> {
        match self {
            ItemKind::Known(item_type) => Ok(item_type),
            ItemKind::Unknown(name) => Err(StoreError::invalid_item_type(name, operation)),
        }
    }
}

impl From<ItemType> for ItemKind {
    fn from(item_type: ItemType) -> Self {
        ItemKind::Known(item_type)
    }
}

impl From<String> for ItemKind {
    fn from(name: String) -> Self {
        match name.parse() {
            Ok(item_type) => ItemKind::Known(item_type),
            Err(_) => ItemKind::Unknown(name),
        }
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Known(item_type) => item_type.as_str().to_string(),
            ItemKind::Unknown(name) => name,
        }
    }
}

/// Data for a question dropped into a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    /// Block the question lands in
    #[serde(alias = "parentID")]
    pub parent_id: BlockId,
    #[serde(alias = "qtext", default)]
    pub text: String,
    #[serde(default, alias = "config")]
    pub flags: QuestionFlags,
}

/// All intents the store accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    // ========== Session ==========
    /// Reset option groups, read the saved list and install the initial survey
    Load,
    /// Start over from the initial survey
    Clear,
    /// Undo the last recorded change
    UndoSurvey,

    // ========== Structure ==========
    /// Add a block at the top level, or under `target_id`
    BlockDropped {
        #[serde(default)]
        target_id: Option<BlockId>,
    },
    QuestionDropped {
        question: QuestionDraft,
    },
    OptionAdded {
        question_id: QuestionId,
        text: String,
    },
    /// Add every label of the selected option group to a question
    OptionGroupDropped {
        question_id: QuestionId,
    },
    ToggleParam {
        item_type: ItemKind,
        item_id: String,
        property: String,
    },
    /// Duplicate a block or question next to the original
    ItemCopy {
        item_type: ItemKind,
        item_id: String,
    },
    ItemDelete {
        item_type: ItemKind,
        item_id: String,
    },
    SaveEditText {
        text: String,
        question_id: QuestionId,
    },
    SaveFreeText {
        text: String,
        question_id: QuestionId,
    },
    MoveQuestion {
        question_id: QuestionId,
        block_id: BlockId,
    },
    /// Drag-reorder within a sibling list
    ReorderItem {
        item_id: String,
        final_index: usize,
        item_type: ItemKind,
    },

    // ========== Persistence ==========
    SaveSurvey {
        title: String,
    },
    /// Replace the document with raw survey JSON
    LoadSurvey {
        data: serde_json::Value,
    },

    // ========== View State ==========
    ToggleModal {
        item_type: ItemKind,
        #[serde(default)]
        drop_target_id: Option<String>,
    },
    ToggleLoadModal,
    ShowAlert {
        message: String,
        #[serde(default)]
        level: AlertLevel,
    },
    ScrollToItem {
        id: String,
    },
    UpdateOptionGroupSelection {
        id: usize,
    },
    AddOptionGroup {
        labels: Vec<String>,
    },
}

impl Intent {
    /// Stable name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Load => "load",
            Intent::Clear => "clear",
            Intent::UndoSurvey => "undo_survey",
            Intent::BlockDropped { .. } => "block_dropped",
            Intent::QuestionDropped { .. } => "question_dropped",
            Intent::OptionAdded { .. } => "option_added",
            Intent::OptionGroupDropped { .. } => "option_group_dropped",
            Intent::ToggleParam { .. } => "toggle_param",
            Intent::ItemCopy { .. } => "item_copy",
            Intent::ItemDelete { .. } => "item_delete",
            Intent::SaveEditText { .. } => "save_edit_text",
            Intent::SaveFreeText { .. } => "save_free_text",
            Intent::MoveQuestion { .. } => "move_question",
            Intent::ReorderItem { .. } => "reorder_item",
            Intent::SaveSurvey { .. } => "save_survey",
            Intent::LoadSurvey { .. } => "load_survey",
            Intent::ToggleModal { .. } => "toggle_modal",
            Intent::ToggleLoadModal => "toggle_load_modal",
            Intent::ShowAlert { .. } => "show_alert",
            Intent::ScrollToItem { .. } => "scroll_to_item",
            Intent::UpdateOptionGroupSelection { .. } => "update_option_group_selection",
            Intent::AddOptionGroup { .. } => "add_option_group",
        }
    }
}
