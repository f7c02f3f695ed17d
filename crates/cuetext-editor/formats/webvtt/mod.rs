//! WebVTT format support.
//!
//! Requires the `WEBVTT` header line; `NOTE`, `STYLE` and `REGION` blocks
//! are skipped. Cue identifiers and the settings string after the arrow
//! are preserved in cue metadata. Timestamps accept the optional-hours
//! short form on input and always serialize as `HH:MM:SS.mmm`.

use crate::core::{Cue, CueMeta, Result, SubtitleError, TimePoint, TimedDocument, TimedRange};
use crate::formats::{FormatInfo, SubtitleFormat};
use once_cell::sync::Lazy;
use regex::Regex;

static TIMESTAMP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(\d{1,4}):)?(\d{2}):(\d{2})\.(\d{3})$").unwrap());

static INFO: FormatInfo = FormatInfo {
    name: "WebVTT",
    extensions: &["vtt"],
    supports_styling: true,
    supports_positioning: true,
};

/// WebVTT format handler
#[derive(Debug, Default)]
pub struct WebVttFormat;

impl WebVttFormat {
    /// Create a new WebVTT format handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Format a time point as `HH:MM:SS.mmm`
    fn format_time(time: TimePoint) -> String {
        let (h, m, s, ms) = time.components();
        format!("{h:02}:{m:02}:{s:02}.{ms:03}")
    }

    /// Parse a `HH:MM:SS.mmm` or `MM:SS.mmm` timestamp
    fn parse_timestamp(text: &str, line_no: usize) -> Result<TimePoint> {
        let caps = TIMESTAMP_REGEX.captures(text.trim()).ok_or_else(|| {
            SubtitleError::malformed(line_no, format!("invalid timestamp: {text}"))
        })?;
        // The hours group is optional in the short form
        let num = |idx: usize| -> Result<u64> {
            match caps.get(idx) {
                None => Ok(0),
                Some(m) => m.as_str().parse().map_err(|_| {
                    SubtitleError::malformed(
                        line_no,
                        format!("time component out of range: {}", m.as_str()),
                    )
                }),
            }
        };
        TimePoint::from_components(num(1)?, num(2)?, num(3)?, num(4)?)
            .map_err(|_| SubtitleError::malformed(line_no, "invalid timestamp components"))
    }

    /// Parse a cue timing line, returning the range and any settings text
    fn parse_timing(line: &str, line_no: usize) -> Result<(TimedRange, Option<String>)> {
        let (left, right) = line.split_once("-->").ok_or_else(|| {
            SubtitleError::malformed(line_no, format!("expected cue timing line: {line}"))
        })?;
        let start = Self::parse_timestamp(left, line_no)?;

        let mut right_parts = right.trim().splitn(2, char::is_whitespace);
        let end_text = right_parts.next().unwrap_or_default();
        let end = Self::parse_timestamp(end_text, line_no)?;
        let settings = right_parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok((TimedRange::new(start, end), settings))
    }
}

impl SubtitleFormat for WebVttFormat {
    fn info(&self) -> &FormatInfo {
        &INFO
    }

    fn parse(&self, source: &str) -> Result<TimedDocument> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let lines: Vec<&str> = source.lines().collect();

        if lines.first().map_or(true, |l| !l.trim_start().starts_with("WEBVTT")) {
            return Err(SubtitleError::malformed(1, "missing WEBVTT header"));
        }

        let mut cues = Vec::new();
        let mut i = 1;
        while i < lines.len() {
            if lines[i].trim().is_empty() {
                i += 1;
                continue;
            }

            // Non-cue blocks are skipped wholesale
            let first = lines[i].trim_start();
            if first.starts_with("NOTE") || first.starts_with("STYLE") || first.starts_with("REGION")
            {
                while i < lines.len() && !lines[i].trim().is_empty() {
                    i += 1;
                }
                continue;
            }

            let block_start = i;

            // Optional identifier line before the timing line
            let mut id = None;
            if !lines[i].contains("-->") {
                id = Some(lines[i].trim().to_string());
                i += 1;
                if i >= lines.len() || !lines[i].contains("-->") {
                    return Err(SubtitleError::malformed(
                        block_start + 1,
                        "cue identifier not followed by a timing line",
                    ));
                }
            }

            let (range, settings) = Self::parse_timing(lines[i], i + 1)?;
            i += 1;

            let mut text = Vec::new();
            while i < lines.len() && !lines[i].trim().is_empty() {
                text.push(lines[i].to_string());
                i += 1;
            }
            if text.is_empty() {
                return Err(SubtitleError::malformed(block_start + 1, "cue has no text"));
            }

            cues.push(Cue::new(range, text).with_meta(CueMeta::WebVtt { id, settings }));
        }

        Ok(TimedDocument::from_cues(cues))
    }

    fn serialize(&self, doc: &TimedDocument) -> String {
        let mut out = String::from("WEBVTT\n\n");
        for cue in doc.cues() {
            let (id, settings) = match &cue.meta {
                CueMeta::WebVtt { id, settings } => (id.as_deref(), settings.as_deref()),
                _ => (None, None),
            };
            if let Some(id) = id {
                out.push_str(id);
                out.push('\n');
            }
            out.push_str(&Self::format_time(cue.range.start));
            out.push_str(" --> ");
            out.push_str(&Self::format_time(cue.range.end));
            if let Some(settings) = settings {
                out.push(' ');
                out.push_str(settings);
            }
            out.push('\n');
            for line in &cue.lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    fn render_cue(&self, cue: &Cue) -> String {
        let mut out = String::new();
        if let CueMeta::WebVtt { id: Some(id), .. } = &cue.meta {
            out.push_str(id);
            out.push('\n');
        }
        out.push_str(&Self::format_time(cue.range.start));
        out.push_str(" --> ");
        out.push_str(&Self::format_time(cue.range.end));
        if let CueMeta::WebVtt {
            settings: Some(settings),
            ..
        } = &cue.meta
        {
            out.push(' ');
            out.push_str(settings);
        }
        out.push('\n');
        out.push_str(&cue.compact_text());
        out
    }
}
