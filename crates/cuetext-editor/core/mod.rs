//! Core types and structures for the subtitle engine
//!
//! This module contains the fundamental building blocks:
//! - `TimedDocument` and `Cue`: the parsed subtitle model
//! - `TimePoint`, `TimeDelta` and `TimedRange` for cue timing
//! - Error types for engine operations

pub mod document;
pub mod errors;
pub mod time;

// Re-export commonly used types
pub use document::{Cue, CueMeta, TimedDocument};
pub use errors::{Result, SubtitleError};
pub use time::{TimeDelta, TimePoint, TimedRange};
