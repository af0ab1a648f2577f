//! Integration tests for the survey editor
//!
//! These tests verify that multiple components work together correctly.

#[path = "../common/mod.rs"]
pub mod common;

pub mod alert_timer;
pub mod cli;
pub mod document_properties;
pub mod editing_flow;
