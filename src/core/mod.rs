//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - The comma-separated item parser
//! - The Fisher–Yates shuffle
//! - The presentation model (Snapshot) and its renderers
//! - One-time terminal style setup
//! - Input-surface error types

pub mod error;
pub mod model;
pub mod parse;
pub mod render;
pub mod shuffle;
pub mod style;
