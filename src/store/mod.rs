//! Editor state container
//!
//! Intents go in through `SurveyStore::dispatch`; observers get the aggregate
//! `AppState` after each one, and side effects are queued for the runtime.

mod alert;
mod dispatcher;
mod effect;
mod history;
mod intent;
mod observer;
mod option_group;
mod state;

pub use alert::{AlertLevel, AlertState};
pub use dispatcher::SurveyStore;
pub use effect::Effect;
pub use history::History;
pub use intent::{Intent, ItemKind, QuestionDraft};
pub use observer::{Observer, Observers, SubscriptionId};
pub use option_group::{OptionGroup, OptionGroupState};
pub use state::{AppState, ModalState};
