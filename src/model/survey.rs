//! Survey document nodes.

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::{BlockId, IdGenerator, OptionId, QuestionId};
use super::ModelError;

/// Root of a survey document: an ordered list of top-level blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    /// Synthetic identity assigned at creation
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Default for Survey {
    fn default() -> Self {
        Self::new()
    }
}

impl Survey {
    /// Create an empty survey with a fresh identity
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            blocks: Vec::new(),
        }
    }

    /// Copy a template survey under a new identity
    pub fn from_template(template: &Survey) -> Self {
        Self {
            id: Uuid::new_v4(),
            blocks: template.blocks.clone(),
        }
    }

    /// Parse and validate a survey from JSON.
    pub fn from_json(value: serde_json::Value) -> Result<Self, SurveyParseError> {
        let survey: Survey = serde_json::from_value(value)?;
        survey.validate()?;
        Ok(survey)
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Plain derived structs with string keys always serialize
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Failure to turn raw JSON into a valid survey.
#[derive(Debug, thiserror::Error)]
pub enum SurveyParseError {
    #[error("invalid survey JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A grouping node holding questions and nested blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(default)]
    pub randomizable: bool,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub subblocks: Vec<Block>,
}

impl Block {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            randomizable: false,
            questions: Vec::new(),
            subblocks: Vec::new(),
        }
    }

    /// Flip a named boolean property. Returns false for unknown names.
    pub fn toggle(&mut self, property: &str) -> bool {
        match property {
            "randomizable" => {
                self.randomizable = !self.randomizable;
                true
            }
            _ => false,
        }
    }

    /// Deep copy with fresh ids for this block and everything below it.
    pub fn duplicate(&self, ids: &mut IdGenerator) -> Block {
        Block {
            id: ids.block_id(),
            randomizable: self.randomizable,
            questions: self.questions.iter().map(|q| q.duplicate(ids)).collect(),
            subblocks: self.subblocks.iter().map(|b| b.duplicate(ids)).collect(),
        }
    }
}

/// Behavioral flags a question is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionFlags {
    pub exclusive: bool,
    pub ordered: bool,
    pub freetext: bool,
}

impl Default for QuestionFlags {
    fn default() -> Self {
        Self {
            exclusive: true,
            ordered: false,
            freetext: false,
        }
    }
}

/// A prompt with its answer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(alias = "qtext", default)]
    pub text: String,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    #[serde(default = "default_exclusive")]
    pub exclusive: bool,
    #[serde(default)]
    pub ordered: bool,
    #[serde(default)]
    pub freetext: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text: Option<FreeText>,
}

fn default_exclusive() -> bool {
    true
}

impl Question {
    pub fn new(id: QuestionId, text: impl Into<String>) -> Self {
        Self::with_flags(id, text, QuestionFlags::default())
    }

    pub fn with_flags(id: QuestionId, text: impl Into<String>, flags: QuestionFlags) -> Self {
        Self {
            id,
            text: text.into(),
            options: Vec::new(),
            exclusive: flags.exclusive,
            ordered: flags.ordered,
            freetext: flags.freetext,
            free_text: None,
        }
    }

    /// Flip a named boolean property. Returns false for unknown names.
    pub fn toggle(&mut self, property: &str) -> bool {
        let flag = match property {
            "exclusive" => &mut self.exclusive,
            "ordered" => &mut self.ordered,
            "freetext" => &mut self.freetext,
            _ => return false,
        };
        *flag = !*flag;
        true
    }

    /// Configure free-text input from the editor's text field.
    ///
    /// `#{...}` sets a validation pattern, anything else non-empty sets the
    /// default value, and an empty string clears the configuration.
    pub fn set_free_text(&mut self, text: &str) -> Result<(), ModelError> {
        self.free_text = FreeText::parse(text)?;
        self.freetext = true;
        Ok(())
    }

    /// Deep copy with fresh ids for the question and its options.
    pub fn duplicate(&self, ids: &mut IdGenerator) -> Question {
        Question {
            id: ids.question_id(),
            options: self
                .options
                .iter()
                .map(|o| AnswerOption::new(ids.option_id(), o.text.clone()))
                .collect(),
            ..self.clone()
        }
    }
}

/// Free-text answer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeText {
    /// Pre-filled answer
    Default(String),
    /// Regular expression the answer must match
    Pattern(String),
}

impl FreeText {
    fn parse(text: &str) -> Result<Option<Self>, ModelError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        match text.strip_prefix("#{").and_then(|rest| rest.strip_suffix('}')) {
            Some(pattern) => {
                Regex::new(pattern).map_err(|e| ModelError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                })?;
                Ok(Some(FreeText::Pattern(pattern.to_string())))
            }
            None => Ok(Some(FreeText::Default(text.to_string()))),
        }
    }
}

/// A selectable answer choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: OptionId,
    #[serde(alias = "otext", default)]
    pub text: String,
}

impl AnswerOption {
    pub fn new(id: OptionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}
