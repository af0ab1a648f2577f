//! Shared test utilities for the survey editor
//!
//! This module provides common helpers for integration tests:
//! - Fixed timestamps and survey identities
//! - Temporary databases and sample surveys

#![allow(dead_code)]
