//! Timeline shifting against parsed documents
//!
//! Covers the uniform-delta property of whole-document shifts and the
//! cumulative-rendered-length selection rule of range-bounded shifts.

use cuetext_editor::formats::srt::SrtFormat;
use cuetext_editor::utils::{rendered_len, shift_all, shift_range, CharSpan, DisplayMode};
use cuetext_editor::*;
use pretty_assertions::assert_eq;

const SAMPLE_SRT: &str = "1\n00:00:01,000 --> 00:00:02,000\nabcdefghi\n\n2\n00:00:03,000 --> 00:00:04,000\n1234567\n\n3\n00:00:05,000 --> 00:00:06,000\ntrailer\n\n";

fn document() -> TimedDocument {
    FormatRegistry::with_default_formats()
        .parse("srt", SAMPLE_SRT)
        .unwrap()
}

fn starts_ms(doc: &TimedDocument) -> Vec<u64> {
    doc.cues().iter().map(|c| c.range.start.as_millis()).collect()
}

// ===== Whole-document shifts =====

#[test]
fn test_shift_all_uniform_delta_property() {
    let mut doc = document();
    let old_starts = starts_ms(&doc);
    shift_all(&mut doc, TimePoint::from_millis(2_500)).unwrap();

    let delta = 2_500 - old_starts[0];
    for (old, new) in old_starts.iter().zip(starts_ms(&doc)) {
        assert_eq!(new - old, delta);
    }
}

#[test]
fn test_shift_all_idempotent_at_current_start() {
    let mut doc = document();
    let before = doc.clone();
    let current = doc.cues()[0].range.start;
    shift_all(&mut doc, current).unwrap();
    assert_eq!(doc, before);
}

#[test]
fn test_shift_all_empty_document_fails() {
    let mut doc = TimedDocument::new();
    assert!(matches!(
        shift_all(&mut doc, TimePoint::from_millis(0)),
        Err(SubtitleError::EmptyDocument)
    ));
}

#[test]
fn test_shift_all_below_midnight_is_atomic_failure() {
    let mut doc = document();
    // A cue earlier than the first one makes a shift-to-zero underflow
    doc.cues_mut()[2].range =
        TimedRange::new(TimePoint::from_millis(100), TimePoint::from_millis(200));
    let failed = shift_all(&mut doc, TimePoint::from_millis(0)).unwrap_err();
    assert!(matches!(failed, SubtitleError::TimeOutOfRange { .. }));
    // Nothing was mutated, including the cues that could have shifted
    assert_eq!(starts_ms(&doc), vec![1_000, 3_000, 100]);
}

#[test]
fn test_shift_past_24_hours_keeps_large_timestamps() {
    let mut doc = document();
    let day_ms = 24 * 60 * 60 * 1_000;
    shift_all(&mut doc, TimePoint::from_millis(day_ms)).unwrap();
    let serialized = FormatRegistry::with_default_formats()
        .serialize("srt", &doc)
        .unwrap();
    assert!(serialized.contains("24:00:00,000 --> 24:00:01,000"));
}

// ===== Range-bounded shifts =====

#[test]
fn test_shift_range_selection_by_cumulative_length() {
    let mut doc = document();
    let format = SrtFormat::new();
    // Compact lengths: 10, 8, 8. Cumulative 10 lies in [5, 12]; cumulative
    // 18 exceeds 12, so only the first cue is selected.
    assert_eq!(
        rendered_len(&doc.cues()[0], DisplayMode::Compact, &format),
        10
    );
    shift_range(
        &mut doc,
        TimePoint::from_millis(2_000),
        CharSpan::new(5, 12),
        DisplayMode::Compact,
        &format,
    )
    .unwrap();
    assert_eq!(starts_ms(&doc), vec![2_000, 3_000, 5_000]);
}

#[test]
fn test_shift_range_cues_before_selection_unshifted() {
    let mut doc = document();
    let format = SrtFormat::new();
    // Select the middle cue only: cumulative lengths 10, 18, 26
    shift_range(
        &mut doc,
        TimePoint::from_millis(1_500),
        CharSpan::new(11, 18),
        DisplayMode::Compact,
        &format,
    )
    .unwrap();
    // Delta comes from the document's first cue: +500ms
    assert_eq!(starts_ms(&doc), vec![1_000, 3_500, 5_000]);
}

#[test]
fn test_shift_range_full_mode_uses_structural_lengths() {
    let mut doc = document();
    let format = SrtFormat::new();
    // Select only the first cue by ending the span exactly at its full
    // rendered length
    let first_len = rendered_len(&doc.cues()[0], DisplayMode::Full, &format);
    shift_range(
        &mut doc,
        TimePoint::from_millis(1_200),
        CharSpan::new(0, first_len),
        DisplayMode::Full,
        &format,
    )
    .unwrap();
    assert_eq!(starts_ms(&doc), vec![1_200, 3_000, 5_000]);
}

#[test]
fn test_shift_range_whole_span_equals_shift_all() {
    let mut ranged = document();
    let mut whole = document();
    let format = SrtFormat::new();
    shift_range(
        &mut ranged,
        TimePoint::from_millis(4_000),
        CharSpan::new(0, usize::MAX),
        DisplayMode::Compact,
        &format,
    )
    .unwrap();
    shift_all(&mut whole, TimePoint::from_millis(4_000)).unwrap();
    assert_eq!(ranged, whole);
}
