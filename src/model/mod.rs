//! Survey document model
//!
//! A survey is a tree of blocks holding questions holding answer options.
//! Values are immutable by convention: every structural operation returns a
//! new `Survey`, which is what lets the store keep prior values for undo.

mod error;
pub mod ids;
mod lookup;
mod ops;
mod survey;

pub use error::ModelError;
pub use ids::{BlockId, IdGenerator, ItemType, OptionId, ParseItemTypeError, QuestionId};
pub use lookup::SurveyIndex;
pub use ops::{copy_block, copy_question};
pub use survey::{
    AnswerOption, Block, FreeText, Question, QuestionFlags, Survey, SurveyParseError,
};
