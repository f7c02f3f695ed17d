//! Flattened text views of a document
//!
//! `DocumentTextView` is a derived value: the compact newline-joined
//! rendering of every cue's text lines, plus the byte-offset span of each
//! display line. It is recomputed from the document whenever search or
//! replace needs consistent offsets, never the source of truth. The
//! running cursor advances by `line length + 1` per line, which is the
//! exact accounting the search engine uses, so offsets agree by
//! construction.

use crate::core::{Cue, TimedDocument};
use crate::formats::SubtitleFormat;

/// Rendering mode for document display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Text lines only; the offset space used for search/replace targets
    #[default]
    Compact,
    /// Format-defined structural rendering, read-only display
    Full,
}

/// Byte span of one display line within the compact flattening
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// Index of the owning cue
    pub cue: usize,
    /// Line index within the owning cue
    pub line: usize,
    /// Byte offset of the line start in the flattened text
    pub start: usize,
    /// Byte length of the line, excluding its separator
    pub len: usize,
}

/// Location of a cursor offset within the document structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorLocation {
    /// Index of the owning cue
    pub cue: usize,
    /// Line index within the owning cue
    pub line: usize,
    /// Byte column within the line (equal to the line length when the
    /// offset sits on the separator)
    pub column: usize,
}

/// Derived compact flattening of a `TimedDocument` with offset bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentTextView {
    text: String,
    spans: Vec<LineSpan>,
}

impl DocumentTextView {
    /// Flatten a document into its compact text view
    #[must_use]
    pub fn build(doc: &TimedDocument) -> Self {
        let mut text = String::new();
        let mut spans = Vec::with_capacity(doc.total_display_lines());
        let mut cursor = 0;
        for (cue_idx, cue) in doc.cues().iter().enumerate() {
            for (line_idx, line) in cue.lines.iter().enumerate() {
                spans.push(LineSpan {
                    cue: cue_idx,
                    line: line_idx,
                    start: cursor,
                    len: line.len(),
                });
                text.push_str(line);
                text.push('\n');
                cursor += line.len() + 1;
            }
        }
        Self { text, spans }
    }

    /// The flattened text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Per-line byte spans in display order
    #[must_use]
    pub fn spans(&self) -> &[LineSpan] {
        &self.spans
    }

    /// Map a byte offset back to its owning cue, line and column.
    ///
    /// A line owns `start ..= start + len`; the separator byte resolves
    /// to the line it terminates. Offsets past the end return `None`.
    #[must_use]
    pub fn locate(&self, offset: usize) -> Option<CursorLocation> {
        let idx = self
            .spans
            .partition_point(|span| span.start + span.len < offset);
        let span = self.spans.get(idx)?;
        (offset >= span.start).then_some(CursorLocation {
            cue: span.cue,
            line: span.line,
            column: offset - span.start,
        })
    }
}

/// Rendered byte length of one cue under a display mode, including the
/// separator that follows each emitted line.
#[must_use]
pub fn rendered_len(cue: &Cue, mode: DisplayMode, format: &dyn SubtitleFormat) -> usize {
    match mode {
        DisplayMode::Compact => cue.compact_len(),
        DisplayMode::Full => format.render_cue(cue).len() + 1,
    }
}

/// Render a whole document under a display mode.
#[must_use]
pub fn render_document(doc: &TimedDocument, mode: DisplayMode, format: &dyn SubtitleFormat) -> String {
    match mode {
        DisplayMode::Compact => DocumentTextView::build(doc).text,
        DisplayMode::Full => {
            let mut out = String::new();
            for cue in doc.cues() {
                out.push_str(&format.render_cue(cue));
                out.push('\n');
            }
            out
        }
    }
}
