//! Typed identifiers for survey nodes and the id generator.
//!
//! Ids are plain strings on the wire (`b_12`, `q_7`, `o_3`) so documents
//! authored elsewhere load unchanged. Generated ids come from a single
//! monotonic counter that is advanced past every numeric suffix seen in a
//! loaded document, so a generated id never collides with an existing one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Survey;

/// The three kinds of node a survey document is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Block,
    Question,
    Option,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Block => "block",
            ItemType::Question => "question",
            ItemType::Option => "option",
        }
    }

    /// Prefix used for generated ids of this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            ItemType::Block => "b",
            ItemType::Question => "q",
            ItemType::Option => "o",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an item type name is not one of the known kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item type: {0}")]
pub struct ParseItemTypeError(pub String);

impl FromStr for ItemType {
    type Err = ParseItemTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "block" => Ok(ItemType::Block),
            "question" => Ok(ItemType::Question),
            "option" => Ok(ItemType::Option),
            _ => Err(ParseItemTypeError(s.to_string())),
        }
    }
}

macro_rules! node_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

node_id!(
    /// Identifier of a block, unique within a survey
    BlockId
);
node_id!(
    /// Identifier of a question, unique within a survey
    QuestionId
);
node_id!(
    /// Identifier of an answer option, unique within a survey
    OptionId
);

/// Produces fresh, collision-free node ids.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    fn next_raw(&mut self, kind: ItemType) -> String {
        let n = self.next;
        self.next += 1;
        format!("{}_{}", kind.prefix(), n)
    }

    pub fn block_id(&mut self) -> BlockId {
        BlockId(self.next_raw(ItemType::Block))
    }

    pub fn question_id(&mut self) -> QuestionId {
        QuestionId(self.next_raw(ItemType::Question))
    }

    pub fn option_id(&mut self) -> OptionId {
        OptionId(self.next_raw(ItemType::Option))
    }

    /// Advance the counter past every `<prefix>_<n>` id in the survey.
    pub fn observe(&mut self, survey: &Survey) {
        for id in survey.all_ids() {
            if let Some(n) = numeric_suffix(id) {
                self.next = self.next.max(n.saturating_add(1));
            }
        }
    }

    /// The number the next generated id will carry
    pub fn peek(&self) -> u64 {
        self.next
    }
}

fn numeric_suffix(id: &str) -> Option<u64> {
    let (prefix, suffix) = id.split_once('_')?;
    if !matches!(prefix, "b" | "q" | "o") {
        return None;
    }
    suffix.parse().ok()
}
