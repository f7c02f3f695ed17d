//! Subtitle document engine: parse, edit, shift, serialize
//!
//! `cuetext-editor` is the editing core of a subtitle editor. It parses
//! heterogeneous subtitle formats (SubRip, WebVTT, ASS) into one unified
//! timed-text model, supports cursor-accurate search and replace over a
//! flattened view of the document, applies bulk or range-bounded timeline
//! shifts, and serializes back to the source format structurally intact.
//! The GUI shell, playback and undo history live in collaborators; this
//! crate is synchronous and single-writer by design.
//!
//! # Example
//!
//! ```
//! use cuetext_editor::formats::FormatRegistry;
//! use cuetext_editor::sessions::SubtitleSession;
//! use cuetext_editor::utils::{search, shift_all};
//! use cuetext_editor::core::TimePoint;
//!
//! let registry = FormatRegistry::with_default_formats();
//! let source = "1\n00:00:01,000 --> 00:00:02,000\nHello World\n";
//! let mut session = SubtitleSession::from_source("srt", source, &registry).unwrap();
//!
//! // Find text at an absolute offset in the flattened view
//! let view = session.text_view();
//! let hit = search(view.text(), "World", false, false).unwrap();
//! assert!(hit.success);
//! assert_eq!(hit.cursor_start, 6);
//!
//! // Re-time the whole document to start at 00:00:05
//! shift_all(session.document_mut(), TimePoint::from_millis(5_000)).unwrap();
//! assert!(session.serialize(&registry).unwrap().contains("00:00:05,000"));
//! ```

pub mod core;
pub mod formats;
pub mod sessions;
pub mod utils;

pub use crate::core::{
    Cue, CueMeta, Result, SubtitleError, TimeDelta, TimePoint, TimedDocument, TimedRange,
};
pub use crate::formats::{FormatRegistry, SubtitleFormat};
pub use crate::sessions::SubtitleSession;
pub use crate::utils::{CharSpan, DisplayMode, DocumentTextView, SearchOutcome};
