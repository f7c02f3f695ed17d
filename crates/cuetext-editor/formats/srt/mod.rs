//! SRT (SubRip) format support.
//!
//! Blocks of `index? / HH:MM:SS,mmm --> HH:MM:SS,mmm / text+ / blank`.
//! The parsed block index is preserved in cue metadata and reused on
//! serialization; documents built programmatically get positional
//! numbering.

use crate::core::{Cue, CueMeta, Result, SubtitleError, TimePoint, TimedDocument, TimedRange};
use crate::formats::{FormatInfo, SubtitleFormat};
use once_cell::sync::Lazy;
use regex::Regex;

static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2}),(\d{3})\s*-->\s*(\d{2,}):(\d{2}):(\d{2}),(\d{3})$")
        .unwrap()
});

static INFO: FormatInfo = FormatInfo {
    name: "SRT",
    extensions: &["srt"],
    supports_styling: true,
    supports_positioning: false,
};

/// SubRip format handler
#[derive(Debug, Default)]
pub struct SrtFormat;

impl SrtFormat {
    /// Create a new SRT format handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Format a time point as `HH:MM:SS,mmm`
    fn format_time(time: TimePoint) -> String {
        let (h, m, s, ms) = time.components();
        format!("{h:02}:{m:02}:{s:02},{ms:03}")
    }

    /// Parse one `HH:MM:SS,mmm --> HH:MM:SS,mmm` line
    fn parse_timing(line: &str, line_no: usize) -> Result<TimedRange> {
        let caps = TIMING_REGEX.captures(line.trim()).ok_or_else(|| {
            SubtitleError::malformed(line_no, format!("invalid timing line: {line}"))
        })?;
        let start = time_from_captures(&caps, 1, line_no)?;
        let end = time_from_captures(&caps, 5, line_no)?;
        Ok(TimedRange::new(start, end))
    }
}

/// Build a time point from four consecutive capture groups
fn time_from_captures(caps: &regex::Captures<'_>, first: usize, line_no: usize) -> Result<TimePoint> {
    let num = |idx: usize| -> Result<u64> {
        let text = caps.get(idx).map_or("", |m| m.as_str());
        text.parse().map_err(|_| {
            SubtitleError::malformed(line_no, format!("time component out of range: {text}"))
        })
    };
    TimePoint::from_components(num(first)?, num(first + 1)?, num(first + 2)?, num(first + 3)?)
        .map_err(|_| SubtitleError::malformed(line_no, "invalid timestamp components"))
}

impl SubtitleFormat for SrtFormat {
    fn info(&self) -> &FormatInfo {
        &INFO
    }

    fn parse(&self, source: &str) -> Result<TimedDocument> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let lines: Vec<&str> = source.lines().collect();
        let mut cues = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            if lines[i].trim().is_empty() {
                i += 1;
                continue;
            }
            let block_start = i;

            // Optional index line before the timing line
            let mut parsed_index = None;
            if !lines[i].contains("-->") {
                let index = lines[i].trim().parse::<usize>().map_err(|_| {
                    SubtitleError::malformed(
                        i + 1,
                        format!("expected cue index or timing line: {}", lines[i]),
                    )
                })?;
                parsed_index = Some(index);
                i += 1;
                if i >= lines.len() {
                    return Err(SubtitleError::malformed(
                        lines.len(),
                        "unexpected end of file after cue index",
                    ));
                }
            }

            let range = Self::parse_timing(lines[i], i + 1)?;
            i += 1;

            let mut text = Vec::new();
            while i < lines.len() && !lines[i].trim().is_empty() {
                text.push(lines[i].to_string());
                i += 1;
            }
            if text.is_empty() {
                return Err(SubtitleError::malformed(block_start + 1, "cue has no text"));
            }

            let index = parsed_index.unwrap_or(cues.len() + 1);
            cues.push(Cue::new(range, text).with_meta(CueMeta::Srt { index }));
        }

        Ok(TimedDocument::from_cues(cues))
    }

    fn serialize(&self, doc: &TimedDocument) -> String {
        let mut out = String::new();
        for (pos, cue) in doc.cues().iter().enumerate() {
            let index = match cue.meta {
                CueMeta::Srt { index } => index,
                _ => pos + 1,
            };
            out.push_str(&index.to_string());
            out.push('\n');
            out.push_str(&Self::format_time(cue.range.start));
            out.push_str(" --> ");
            out.push_str(&Self::format_time(cue.range.end));
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
        let timing = format!(
            "{} --> {}",
            Self::format_time(cue.range.start),
            Self::format_time(cue.range.end)
        );
        match cue.meta {
            CueMeta::Srt { index } => format!("{index}\n{timing}\n{}", cue.compact_text()),
            _ => format!("{timing}\n{}", cue.compact_text()),
        }
    }
}
