//! Bulk and range-bounded timeline shifting
//!
//! Both operations compute one signed delta from the requested new start
//! of the document's first cue and apply it in place. Validation happens
//! before any mutation: a shift that would push any affected cue below
//! midnight fails with `TimeOutOfRange` and leaves the document intact.

use crate::core::{Result, SubtitleError, TimeDelta, TimePoint, TimedDocument, TimedRange};
use crate::formats::SubtitleFormat;
use crate::utils::view::{rendered_len, DisplayMode};

/// A contiguous character span in the rendered document text, used to
/// select the cues a partial shift applies to. Both bounds are compared
/// inclusively against cumulative rendered lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSpan {
    pub start: usize,
    pub end: usize,
}

impl CharSpan {
    /// Create a span over `start..=end`
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Shift every cue so the first cue starts at `new_begin`.
///
/// The delta `new_begin - first.start` is applied uniformly to every
/// cue's start and end.
///
/// # Errors
/// `EmptyDocument` when the document has no cues; `TimeOutOfRange` when
/// any shifted endpoint would precede midnight (nothing is mutated).
pub fn shift_all(doc: &mut TimedDocument, new_begin: TimePoint) -> Result<()> {
    let first = doc.first().ok_or(SubtitleError::EmptyDocument)?;
    let delta = TimeDelta::between(new_begin, first.range.start);
    if delta.is_zero() {
        return Ok(());
    }
    let shifted = shifted_ranges(doc.cues().iter().map(|cue| cue.range), delta)?;
    for (cue, range) in doc.cues_mut().iter_mut().zip(shifted) {
        cue.range = range;
    }
    Ok(())
}

/// Shift only the cues whose rendered text falls inside `span`.
///
/// The delta is computed exactly as in [`shift_all`]. Cues are walked in
/// order accumulating each cue's rendered length under `mode`; a cue is
/// included once the cumulative length reaches `span.start`, and the walk
/// stops at the first cue whose cumulative length exceeds `span.end`.
/// A selection that touches a cue's rendered text even partially thereby
/// selects the whole cue.
///
/// # Errors
/// `EmptyDocument` when the document has no cues; `TimeOutOfRange` when
/// any selected cue's shifted endpoint would precede midnight (nothing
/// is mutated).
pub fn shift_range(
    doc: &mut TimedDocument,
    new_begin: TimePoint,
    span: CharSpan,
    mode: DisplayMode,
    format: &dyn SubtitleFormat,
) -> Result<()> {
    let first = doc.first().ok_or(SubtitleError::EmptyDocument)?;
    let delta = TimeDelta::between(new_begin, first.range.start);

    let mut selected = Vec::new();
    let mut sort = 0;
    for (idx, cue) in doc.cues().iter().enumerate() {
        sort += rendered_len(cue, mode, format);
        if sort > span.end {
            break;
        }
        if sort >= span.start {
            selected.push(idx);
        }
    }

    if delta.is_zero() || selected.is_empty() {
        return Ok(());
    }
    let shifted = shifted_ranges(selected.iter().map(|&idx| doc.cues()[idx].range), delta)?;
    let cues = doc.cues_mut();
    for (&idx, range) in selected.iter().zip(shifted) {
        cues[idx].range = range;
    }
    Ok(())
}

/// Compute shifted copies of every range, failing before any is applied.
fn shifted_ranges(
    ranges: impl Iterator<Item = TimedRange>,
    delta: TimeDelta,
) -> Result<Vec<TimedRange>> {
    ranges
        .map(|mut range| {
            range.shift(delta)?;
            Ok(range)
        })
        .collect()
}
