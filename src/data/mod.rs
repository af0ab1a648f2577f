//! Data persistence layer for the survey editor
//!
//! This module provides SQLite-based key-value storage and the saved survey list.

mod app_state;
mod database;
mod error;
mod migrations;
mod saved_survey;

pub use app_state::{AppStateStore, KeyValueStore, MemoryStore};
pub use database::Database;
pub use error::PersistenceError;
pub use saved_survey::{SavedSurvey, SavedSurveyStore};
