//! Format parsing and serialization for subtitle files.
//!
//! Each supported format implements the `SubtitleFormat` trait; a
//! `FormatRegistry` dispatches on the file-extension tag supplied by the
//! caller. Parsing is strict: a structurally invalid source fails the
//! whole load with a line-numbered `Malformed` error instead of silently
//! dropping cues. Serialization is canonical: round-trips are structural,
//! not byte-identical to non-canonical input.

use crate::core::{Cue, Result, SubtitleError, TimedDocument};
use std::fmt;

/// Metadata about a subtitle format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatInfo {
    /// Format name (e.g. "SRT", "WebVTT", "ASS")
    pub name: &'static str,
    /// File extensions handled by this format
    pub extensions: &'static [&'static str],
    /// Whether this format supports styling
    pub supports_styling: bool,
    /// Whether this format supports positioning
    pub supports_positioning: bool,
}

/// Parser/serializer pair for one subtitle format.
pub trait SubtitleFormat: fmt::Debug + Send + Sync {
    /// Get information about this format
    fn info(&self) -> &FormatInfo;

    /// Check if this format handles the given file extension
    fn can_handle(&self, extension: &str) -> bool {
        self.info()
            .extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Parse decoded source text into a document.
    ///
    /// # Errors
    /// `Malformed` with a 1-indexed line number on structural violations;
    /// no partial document is ever returned.
    fn parse(&self, source: &str) -> Result<TimedDocument>;

    /// Serialize a document back to this format's canonical text
    fn serialize(&self, doc: &TimedDocument) -> String;

    /// Render one cue in this format's full structural display form
    fn render_cue(&self, cue: &Cue) -> String;
}

/// Registry mapping format tags to their implementations.
#[derive(Debug, Default)]
pub struct FormatRegistry {
    formats: Vec<Box<dyn SubtitleFormat>>,
}

impl FormatRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in formats registered
    #[must_use]
    pub fn with_default_formats() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(srt::SrtFormat::new()));
        registry.register(Box::new(webvtt::WebVttFormat::new()));
        registry.register(Box::new(ass::AssFormat::new()));
        registry
    }

    /// Register a format implementation
    pub fn register(&mut self, format: Box<dyn SubtitleFormat>) {
        self.formats.push(format);
    }

    /// Find the format for a file-extension tag.
    ///
    /// # Errors
    /// `UnsupportedFormat` if no registered format matches.
    pub fn find(&self, tag: &str) -> Result<&dyn SubtitleFormat> {
        self.formats
            .iter()
            .find(|format| format.can_handle(tag))
            .map(AsRef::as_ref)
            .ok_or_else(|| SubtitleError::UnsupportedFormat(tag.to_string()))
    }

    /// Parse source text using the format registered for `tag`
    pub fn parse(&self, tag: &str, source: &str) -> Result<TimedDocument> {
        self.find(tag)?.parse(source)
    }

    /// Serialize a document using the format registered for `tag`
    pub fn serialize(&self, tag: &str, doc: &TimedDocument) -> Result<String> {
        Ok(self.find(tag)?.serialize(doc))
    }

    /// All supported extensions, sorted and deduplicated
    #[must_use]
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<&'static str> = self
            .formats
            .iter()
            .flat_map(|format| format.info().extensions.iter().copied())
            .collect();
        extensions.sort_unstable();
        extensions.dedup();
        extensions
    }
}

// Individual format modules
pub mod ass;
pub mod srt;
pub mod webvtt;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_dispatch_is_case_insensitive() {
        let registry = FormatRegistry::with_default_formats();
        assert_eq!(registry.find("srt").unwrap().info().name, "SRT");
        assert_eq!(registry.find("SRT").unwrap().info().name, "SRT");
        assert_eq!(registry.find("Vtt").unwrap().info().name, "WebVTT");
        assert_eq!(registry.find("ass").unwrap().info().name, "ASS");
        assert_eq!(registry.find("ssa").unwrap().info().name, "ASS");
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        let registry = FormatRegistry::with_default_formats();
        let err = registry.find("sub").unwrap_err();
        assert_eq!(err, SubtitleError::UnsupportedFormat("sub".to_string()));
    }

    #[test]
    fn empty_registry_supports_nothing() {
        let registry = FormatRegistry::new();
        assert!(registry.supported_extensions().is_empty());
        assert!(registry.find("srt").is_err());
    }

    #[test]
    fn supported_extensions_sorted() {
        let registry = FormatRegistry::with_default_formats();
        let extensions = registry.supported_extensions();
        assert!(extensions.contains(&"srt"));
        assert!(extensions.contains(&"vtt"));
        assert!(extensions.contains(&"ass"));
        let mut sorted = extensions.clone();
        sorted.sort_unstable();
        assert_eq!(extensions, sorted);
    }
}
