//! Undo history of prior survey values.

use std::collections::VecDeque;

use crate::error::StoreError;
use crate::model::Survey;

/// LIFO stack of survey snapshots, pushed before a mutation.
///
/// With a limit set, the oldest snapshot is dropped once the stack is full.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<Survey>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `limit` snapshots; zero means unbounded.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: (limit > 0).then_some(limit),
        }
    }

    pub fn push(&mut self, survey: Survey) {
        self.entries.push_back(survey);
        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
    }

    pub fn pop(&mut self) -> Result<Survey, StoreError> {
        self.entries.pop_back().ok_or(StoreError::EmptyHistory)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
