//! Editing sessions: one open subtitle file and its parsed document
//!
//! A `SubtitleSession` owns exactly one `TimedDocument` together with the
//! file identity, declared character encoding and format tag it came
//! from. Collaborators (a GUI shell, a batch tool) hand it raw bytes and
//! a format tag and get the document back; all editing goes through the
//! document and the utilities in [`crate::utils`]. Saving reports its
//! outcome through a completion callback invoked exactly once per write
//! attempt, never by propagating an I/O panic into the caller.

use crate::core::{Result, SubtitleError, TimedDocument};
use crate::formats::FormatRegistry;
use crate::utils::view::{render_document, DisplayMode, DocumentTextView};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One open subtitle document plus its source identity.
#[derive(Debug)]
pub struct SubtitleSession {
    document: TimedDocument,
    path: Option<PathBuf>,
    encoding: String,
    format_tag: String,
}

impl SubtitleSession {
    /// Open a subtitle file, dispatching on its extension.
    ///
    /// The declared `encoding` is recorded on the session; byte decoding
    /// itself is UTF-8 with lossy fallback (see [`decode`]).
    ///
    /// # Errors
    /// `Io` when the file cannot be read, `UnsupportedFormat` when the
    /// extension has no registered parser, or any parse error from the
    /// format itself.
    pub fn open(
        path: impl AsRef<Path>,
        encoding: &str,
        registry: &FormatRegistry,
    ) -> Result<Self> {
        let path = path.as_ref();
        let tag = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| SubtitleError::UnsupportedFormat(path.display().to_string()))?;
        let bytes = std::fs::read(path).map_err(|e| SubtitleError::io(e.to_string()))?;
        let source = decode(&bytes, encoding);

        let started = Instant::now();
        let document = registry.parse(&tag, &source)?;
        debug!(
            "parsed {} as {}: {} cues in {:?}",
            path.display(),
            tag,
            document.len(),
            started.elapsed()
        );

        Ok(Self {
            document,
            path: Some(path.to_path_buf()),
            encoding: encoding.to_string(),
            format_tag: tag,
        })
    }

    /// Create a session from already-decoded source text, with no file
    /// identity attached.
    ///
    /// # Errors
    /// `UnsupportedFormat` for an unknown tag, or any parse error.
    pub fn from_source(tag: &str, source: &str, registry: &FormatRegistry) -> Result<Self> {
        let document = registry.parse(tag, source)?;
        Ok(Self {
            document,
            path: None,
            encoding: "UTF-8".to_string(),
            format_tag: tag.to_ascii_lowercase(),
        })
    }

    /// The parsed document
    #[must_use]
    pub fn document(&self) -> &TimedDocument {
        &self.document
    }

    /// Mutable access for editing operations
    pub fn document_mut(&mut self) -> &mut TimedDocument {
        &mut self.document
    }

    /// The source file path, if the session was opened from disk
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The declared character encoding
    #[must_use]
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// The format tag the session parses and serializes with
    #[must_use]
    pub fn format_tag(&self) -> &str {
        &self.format_tag
    }

    /// Build the flattened compact view used for search and replace
    #[must_use]
    pub fn text_view(&self) -> DocumentTextView {
        DocumentTextView::build(&self.document)
    }

    /// Render the document for display under the given mode.
    ///
    /// # Errors
    /// `UnsupportedFormat` if the session's tag is no longer registered.
    pub fn display(&self, mode: DisplayMode, registry: &FormatRegistry) -> Result<String> {
        let format = registry.find(&self.format_tag)?;
        Ok(render_document(&self.document, mode, format))
    }

    /// Serialize the document back to its source format.
    ///
    /// # Errors
    /// `UnsupportedFormat` if the session's tag is no longer registered.
    pub fn serialize(&self, registry: &FormatRegistry) -> Result<String> {
        registry.serialize(&self.format_tag, &self.document)
    }

    /// Write the serialized document to the session's path.
    ///
    /// `on_result` is invoked exactly once with the outcome; failures
    /// (no path, serialization, I/O) are reported as `false` and logged,
    /// never propagated.
    pub fn save(&self, registry: &FormatRegistry, on_result: impl FnOnce(bool)) {
        let outcome = self.write_to_path(self.path.as_deref(), registry);
        if let Err(e) = &outcome {
            warn!("failed to save subtitle: {e}");
        }
        on_result(outcome.is_ok());
    }

    /// Write the serialized document to an explicit path, updating the
    /// session's file identity on success. Callback semantics match
    /// [`SubtitleSession::save`].
    pub fn save_as(
        &mut self,
        path: impl AsRef<Path>,
        registry: &FormatRegistry,
        on_result: impl FnOnce(bool),
    ) {
        let path = path.as_ref();
        let outcome = self.write_to_path(Some(path), registry);
        match &outcome {
            Ok(()) => self.path = Some(path.to_path_buf()),
            Err(e) => warn!("failed to save subtitle to {}: {e}", path.display()),
        }
        on_result(outcome.is_ok());
    }

    fn write_to_path(&self, path: Option<&Path>, registry: &FormatRegistry) -> Result<()> {
        let path = path.ok_or_else(|| SubtitleError::io("session has no file path"))?;
        let serialized = self.serialize(registry)?;
        std::fs::write(path, serialized.as_bytes()).map_err(|e| SubtitleError::io(e.to_string()))
    }
}

/// Decode raw file bytes. Strict UTF-8 is tried first; anything else is
/// decoded lossily with a warning, so a wrongly declared encoding never
/// aborts a load.
fn decode(bytes: &[u8], encoding: &str) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            warn!("input is not valid UTF-8 (declared {encoding}); decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
