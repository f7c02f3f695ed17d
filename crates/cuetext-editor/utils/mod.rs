//! Editing utilities over a parsed document: flattened text views,
//! search/replace, and timeline shifting.

pub mod search;
pub mod timeline;
pub mod view;

pub use search::{replace, search, SearchOutcome};
pub use timeline::{shift_all, shift_range, CharSpan};
pub use view::{render_document, rendered_len, CursorLocation, DisplayMode, DocumentTextView, LineSpan};
