//! ASS (Advanced SubStation Alpha) format support.
//!
//! Everything before the `[Events]` section is preserved verbatim as the
//! document header (a minimal header is synthesized when a document has
//! none). Events carry their kind (`Dialogue`/`Comment`), layer, style,
//! name, margins and effect in cue metadata; `\N` separates text lines.
//! The events `Format:` line is honored for field order.

use crate::core::{Cue, CueMeta, Result, SubtitleError, TimePoint, TimedDocument, TimedRange};
use crate::formats::{FormatInfo, SubtitleFormat};
use once_cell::sync::Lazy;
use regex::Regex;

static TIMESTAMP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d{2}):(\d{2})\.(\d{2})$").unwrap());

static INFO: FormatInfo = FormatInfo {
    name: "ASS",
    extensions: &["ass", "ssa"],
    supports_styling: true,
    supports_positioning: true,
};

const DEFAULT_FIELDS: [&str; 10] = [
    "Layer", "Start", "End", "Style", "Name", "MarginL", "MarginR", "MarginV", "Effect", "Text",
];

const DEFAULT_HEADER: &str = "[Script Info]\nScriptType: v4.00+\n\n[V4+ Styles]\nFormat: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\nStyle: Default,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H80000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1\n\n";

/// ASS/SSA format handler
#[derive(Debug, Default)]
pub struct AssFormat;

impl AssFormat {
    /// Create a new ASS format handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Format a time point as `H:MM:SS.cc`
    fn format_time(time: TimePoint) -> String {
        let (h, m, s, ms) = time.components();
        format!("{h}:{m:02}:{s:02}.{:02}", ms / 10)
    }

    /// Parse a `H:MM:SS.cc` timestamp
    fn parse_time(text: &str, line_no: usize) -> Result<TimePoint> {
        let caps = TIMESTAMP_REGEX.captures(text.trim()).ok_or_else(|| {
            SubtitleError::malformed(line_no, format!("invalid timestamp: {text}"))
        })?;
        let num = |idx: usize| -> Result<u64> {
            let text = caps.get(idx).map_or("", |m| m.as_str());
            text.parse().map_err(|_| {
                SubtitleError::malformed(line_no, format!("time component out of range: {text}"))
            })
        };
        TimePoint::from_components(num(1)?, num(2)?, num(3)?, num(4)? * 10)
            .map_err(|_| SubtitleError::malformed(line_no, "invalid timestamp components"))
    }

    /// Parse one event line's value against the section's field order
    fn parse_event(kind: &str, value: &str, fields: &[String], line_no: usize) -> Result<Cue> {
        let parts: Vec<&str> = value.splitn(fields.len(), ',').collect();
        if parts.len() != fields.len() {
            return Err(SubtitleError::malformed(
                line_no,
                format!("event has {} fields, expected {}", parts.len(), fields.len()),
            ));
        }

        let field = |name: &str| -> &str {
            fields
                .iter()
                .position(|f| f.eq_ignore_ascii_case(name))
                .map_or("", |idx| parts[idx].trim())
        };

        let start = Self::parse_time(field("Start"), line_no)?;
        let end = Self::parse_time(field("End"), line_no)?;
        let lines: Vec<String> = field("Text").split("\\N").map(str::to_string).collect();

        Ok(Cue::new(TimedRange::new(start, end), lines).with_meta(CueMeta::Ass {
            kind: kind.to_string(),
            layer: field("Layer").parse().unwrap_or(0),
            style: field("Style").to_string(),
            name: field("Name").to_string(),
            margin_l: field("MarginL").parse().unwrap_or(0),
            margin_r: field("MarginR").parse().unwrap_or(0),
            margin_v: field("MarginV").parse().unwrap_or(0),
            effect: field("Effect").to_string(),
        }))
    }

    /// Write one event line for a cue
    fn event_line(cue: &Cue) -> String {
        let text = cue.lines.join("\\N");
        let timing = format!(
            "{},{}",
            Self::format_time(cue.range.start),
            Self::format_time(cue.range.end)
        );
        match &cue.meta {
            CueMeta::Ass {
                kind,
                layer,
                style,
                name,
                margin_l,
                margin_r,
                margin_v,
                effect,
            } => format!(
                "{kind}: {layer},{timing},{style},{name},{margin_l},{margin_r},{margin_v},{effect},{text}"
            ),
            _ => format!("Dialogue: 0,{timing},Default,,0,0,0,,{text}"),
        }
    }
}

impl SubtitleFormat for AssFormat {
    fn info(&self) -> &FormatInfo {
        &INFO
    }

    fn parse(&self, source: &str) -> Result<TimedDocument> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let lines: Vec<&str> = source.lines().collect();

        // Everything before [Events] is the opaque document header
        let events_at = lines
            .iter()
            .position(|line| line.trim().eq_ignore_ascii_case("[Events]"))
            .ok_or_else(|| {
                SubtitleError::malformed(lines.len().max(1), "missing [Events] section")
            })?;

        let header = if events_at == 0 {
            None
        } else {
            let mut header = lines[..events_at].join("\n");
            header.push('\n');
            Some(header)
        };

        let mut fields: Vec<String> = DEFAULT_FIELDS.iter().map(|s| s.to_string()).collect();
        let mut cues = Vec::new();

        for (offset, raw) in lines[events_at + 1..].iter().enumerate() {
            let line_no = events_at + 2 + offset;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            // A new section ends the events block
            if line.starts_with('[') && line.ends_with(']') {
                break;
            }
            if let Some(value) = line.strip_prefix("Format:") {
                fields = value.split(',').map(|s| s.trim().to_string()).collect();
                continue;
            }
            let (kind, value) = line.split_once(':').ok_or_else(|| {
                SubtitleError::malformed(line_no, format!("unexpected line in [Events]: {line}"))
            })?;
            if !kind.eq_ignore_ascii_case("Dialogue") && !kind.eq_ignore_ascii_case("Comment") {
                return Err(SubtitleError::malformed(
                    line_no,
                    format!("unexpected event kind: {kind}"),
                ));
            }
            cues.push(Self::parse_event(kind, value.trim_start(), &fields, line_no)?);
        }

        let mut doc = TimedDocument::from_cues(cues);
        doc.header = header;
        Ok(doc)
    }

    fn serialize(&self, doc: &TimedDocument) -> String {
        let mut out = String::new();
        match &doc.header {
            Some(header) => out.push_str(header),
            None => out.push_str(DEFAULT_HEADER),
        }
        if !out.ends_with("\n\n") {
            out.push('\n');
        }
        out.push_str("[Events]\n");
        out.push_str("Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n");
        for cue in doc.cues() {
            out.push_str(&Self::event_line(cue));
            out.push('\n');
        }
        out
    }

    fn render_cue(&self, cue: &Cue) -> String {
        Self::event_line(cue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_ASS: &str = "[Script Info]\nTitle: Sample\nScriptType: v4.00+\n\n[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\nDialogue: 0,0:00:01.00,0:00:05.00,Default,,0,0,0,,Hello World\nDialogue: 0,0:00:06.50,0:00:09.00,Default,,0,0,0,,First line\\NSecond line\nComment: 0,0:00:10.00,0:00:11.00,Default,,0,0,0,,editor note\n";

    #[test]
    fn parse_sample() {
        let doc = AssFormat::new().parse(SAMPLE_ASS).unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.cues()[0].lines, vec!["Hello World"]);
        assert_eq!(doc.cues()[1].lines, vec!["First line", "Second line"]);
        assert_eq!(doc.cues()[1].range.start, TimePoint::from_millis(6_500));
        assert!(matches!(
            &doc.cues()[2].meta,
            CueMeta::Ass { kind, .. } if kind == "Comment"
        ));
        assert_eq!(
            doc.header.as_deref(),
            Some("[Script Info]\nTitle: Sample\nScriptType: v4.00+\n\n")
        );
    }

    #[test]
    fn parse_requires_events_section() {
        let err = AssFormat::new().parse("[Script Info]\nTitle: x\n").unwrap_err();
        assert!(matches!(err, SubtitleError::Malformed { .. }));
    }

    #[test]
    fn parse_rejects_bad_field_count() {
        let source = "[Events]\nDialogue: 0,0:00:01.00,0:00:02.00\n";
        let err = AssFormat::new().parse(source).unwrap_err();
        assert!(matches!(err, SubtitleError::Malformed { line: 2, .. }));
    }

    #[test]
    fn parse_rejects_overflowing_hours() {
        let source =
            "[Events]\nDialogue: 0,99999999999999999:00:00.00,0:00:02.00,Default,,0,0,0,,Hi\n";
        let err = AssFormat::new().parse(source).unwrap_err();
        assert!(matches!(err, SubtitleError::Malformed { line: 2, .. }));
    }

    #[test]
    fn parse_honors_custom_format_line() {
        let source = "[Events]\nFormat: Start, End, Text\nDialogue: 0:00:01.00,0:00:02.00,Short form\n";
        let doc = AssFormat::new().parse(source).unwrap();
        assert_eq!(doc.cues()[0].lines, vec!["Short form"]);
        assert_eq!(doc.cues()[0].range.start, TimePoint::from_millis(1_000));
    }

    #[test]
    fn parse_stops_at_next_section() {
        let source = "[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\nDialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,One\n[Fonts]\nnot an event\n";
        let doc = AssFormat::new().parse(source).unwrap();
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn serialize_roundtrip() {
        let format = AssFormat::new();
        let doc = format.parse(SAMPLE_ASS).unwrap();
        assert_eq!(format.serialize(&doc), SAMPLE_ASS);
    }

    #[test]
    fn serialize_without_header_synthesizes_one() {
        let format = AssFormat::new();
        let doc = format.parse("[Events]\nDialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,Hi\n").unwrap();
        let out = format.serialize(&doc);
        assert!(out.starts_with("[Script Info]\n"));
        assert!(out.contains("Style: Default,"));
        assert!(out.ends_with("Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,Hi\n"));
    }

    #[test]
    fn centisecond_precision() {
        let time = AssFormat::parse_time("1:02:03.45", 1).unwrap();
        assert_eq!(time.as_millis(), 3_723_450);
        assert_eq!(AssFormat::format_time(time), "1:02:03.45");
    }

    #[test]
    fn empty_text_becomes_single_empty_line() {
        let source = "[Events]\nDialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,\n";
        let doc = AssFormat::new().parse(source).unwrap();
        assert_eq!(doc.cues()[0].lines, vec![String::new()]);
    }
}
