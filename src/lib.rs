pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod runtime;
pub mod store;
pub mod util;

pub use config::Config;
pub use data::{AppStateStore, Database, KeyValueStore, MemoryStore, SavedSurvey, SavedSurveyStore};
pub use error::StoreError;
pub use model::{AnswerOption, Block, BlockId, ItemType, OptionId, Question, QuestionId, Survey};
pub use runtime::{EditorHandle, EditorRuntime};
pub use store::{AlertLevel, AppState, Intent, ItemKind, SurveyStore};
