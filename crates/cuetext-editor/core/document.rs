//! Cue and document model
//!
//! A `TimedDocument` is an ordered collection of `Cue`s in file order;
//! file order is the one invariant every mutating operation preserves
//! (time order is not assumed to be monotonic). Each cue carries its
//! time range, one or more text lines and format-opaque metadata that
//! lets the owning format serialize it back structurally.

use crate::core::time::TimedRange;

/// Format-opaque per-cue metadata, carried through parse and serialize.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CueMeta {
    /// No format-specific payload
    #[default]
    None,
    /// SubRip: the block index as parsed from the source
    Srt { index: usize },
    /// WebVTT: optional cue identifier and settings string after the arrow
    WebVtt {
        id: Option<String>,
        settings: Option<String>,
    },
    /// ASS event fields other than timing and text
    Ass {
        kind: String,
        layer: u32,
        style: String,
        name: String,
        margin_l: u32,
        margin_r: u32,
        margin_v: u32,
        effect: String,
    },
}

/// One subtitle entry: a time range plus one or more text lines.
///
/// `lines` is never empty for a cue produced by a parser; formats reject
/// blocks with no text instead of emitting hollow cues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub range: TimedRange,
    pub lines: Vec<String>,
    pub meta: CueMeta,
}

impl Cue {
    /// Create a cue with no format metadata
    #[must_use]
    pub fn new(range: TimedRange, lines: Vec<String>) -> Self {
        Self {
            range,
            lines,
            meta: CueMeta::None,
        }
    }

    /// Attach format metadata
    #[must_use]
    pub fn with_meta(mut self, meta: CueMeta) -> Self {
        self.meta = meta;
        self
    }

    /// The cue's text lines joined by a single line separator
    #[must_use]
    pub fn compact_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Byte length of this cue in the compact flattening: every display
    /// line contributes its length plus one separator.
    #[must_use]
    pub fn compact_len(&self) -> usize {
        self.lines.iter().map(|line| line.len() + 1).sum()
    }
}

/// Ordered collection of cues representing one parsed subtitle file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimedDocument {
    /// Format-opaque document preamble (e.g. everything before an ASS
    /// `[Events]` section). `None` for formats without one.
    pub header: Option<String>,
    cues: Vec<Cue>,
}

impl TimedDocument {
    /// Create an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from cues in file order
    #[must_use]
    pub fn from_cues(cues: Vec<Cue>) -> Self {
        Self { header: None, cues }
    }

    /// Cues in file order
    #[must_use]
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Mutable access to cues; callers must preserve file order
    pub fn cues_mut(&mut self) -> &mut [Cue] {
        &mut self.cues
    }

    /// Number of cues
    #[must_use]
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Check if the document has no cues
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// First cue in file order, if any
    #[must_use]
    pub fn first(&self) -> Option<&Cue> {
        self.cues.first()
    }

    /// Append a cue at the end of the document
    pub fn push(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    /// Insert a cue at a document position
    pub fn insert(&mut self, index: usize, cue: Cue) {
        self.cues.insert(index, cue);
    }

    /// Remove and return the cue at a document position
    pub fn remove(&mut self, index: usize) -> Cue {
        self.cues.remove(index)
    }

    /// Total number of display lines across all cues
    #[must_use]
    pub fn total_display_lines(&self) -> usize {
        self.cues.iter().map(|cue| cue.lines.len()).sum()
    }

    /// Overwrite one display line of the compact rendering with new text.
    ///
    /// `row` is 1-indexed over the flattened line list. The owning cue is
    /// the first whose running line count reaches `row`; the line within
    /// it sits at index `sort - row`, addressing lines from the end of the
    /// cue's list. Out-of-range rows (including 0) are a silent no-op
    /// returning `false`.
    pub fn replace_display_line(&mut self, row: usize, text: impl Into<String>) -> bool {
        let counts: Vec<usize> = self.cues.iter().map(|cue| cue.lines.len()).collect();
        match locate_display_line(&counts, row) {
            Some((cue_idx, line_idx)) => {
                self.cues[cue_idx].lines[line_idx] = text.into();
                true
            }
            None => false,
        }
    }
}

/// Map a 1-indexed display row to `(cue index, line index within cue)`.
///
/// The line index is `sort - row` where `sort` is the running line count
/// after the owning cue. For the first cue with `sort >= row` and `row >= 1`
/// this always lands inside the cue's line list.
fn locate_display_line(counts: &[usize], row: usize) -> Option<(usize, usize)> {
    if row == 0 {
        return None;
    }
    let mut sort = 0;
    for (cue_idx, count) in counts.iter().enumerate() {
        sort += count;
        if row <= sort {
            return Some((cue_idx, sort - row));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::{TimePoint, TimedRange};

    fn cue(lines: &[&str]) -> Cue {
        Cue::new(
            TimedRange::new(TimePoint::from_millis(0), TimePoint::from_millis(1000)),
            lines.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn compact_text_and_len() {
        let c = cue(&["hello", "world!"]);
        assert_eq!(c.compact_text(), "hello\nworld!");
        // 5 + 1 + 6 + 1
        assert_eq!(c.compact_len(), 13);
    }

    #[test]
    fn locate_single_line_cues() {
        // One line per cue: inner index is always 0
        let counts = [1, 1, 1];
        assert_eq!(locate_display_line(&counts, 1), Some((0, 0)));
        assert_eq!(locate_display_line(&counts, 2), Some((1, 0)));
        assert_eq!(locate_display_line(&counts, 3), Some((2, 0)));
    }

    #[test]
    fn locate_multi_line_cues_addresses_from_end() {
        // Cue 0 has two lines: row 1 maps to its second line, row 2 to its
        // first. This mirrors the observed editor behavior exactly.
        let counts = [2, 3];
        assert_eq!(locate_display_line(&counts, 1), Some((0, 1)));
        assert_eq!(locate_display_line(&counts, 2), Some((0, 0)));
        assert_eq!(locate_display_line(&counts, 3), Some((1, 2)));
        assert_eq!(locate_display_line(&counts, 4), Some((1, 1)));
        assert_eq!(locate_display_line(&counts, 5), Some((1, 0)));
    }

    #[test]
    fn locate_boundaries() {
        let counts = [2, 3];
        assert_eq!(locate_display_line(&counts, 0), None);
        assert_eq!(locate_display_line(&counts, 6), None);
        assert_eq!(locate_display_line(&[], 1), None);
    }

    #[test]
    fn replace_display_line_edits_owner() {
        let mut doc = TimedDocument::from_cues(vec![cue(&["a", "b"]), cue(&["c"])]);
        assert!(doc.replace_display_line(3, "C"));
        assert_eq!(doc.cues()[1].lines, vec!["C"]);

        assert!(doc.replace_display_line(2, "A"));
        assert_eq!(doc.cues()[0].lines, vec!["A", "b"]);
    }

    #[test]
    fn replace_display_line_out_of_range_is_noop() {
        let mut doc = TimedDocument::from_cues(vec![cue(&["a"])]);
        let before = doc.clone();
        assert!(!doc.replace_display_line(0, "x"));
        assert!(!doc.replace_display_line(2, "x"));
        assert_eq!(doc, before);
    }

    #[test]
    fn order_is_stable_under_line_edit() {
        let mut doc = TimedDocument::from_cues(vec![cue(&["a"]), cue(&["b"]), cue(&["c"])]);
        doc.replace_display_line(2, "B");
        let texts: Vec<String> = doc.cues().iter().map(Cue::compact_text).collect();
        assert_eq!(texts, vec!["a", "B", "c"]);
    }
}
