//! In-process converter built on `htmd`.

use std::path::Path;

use tracing::{debug, instrument};

use mdtoolkit_shared::ConversionError;

use crate::Converter;

/// Tags dropped entirely instead of being rendered.
const SKIPPED_TAGS: &[&str] = &["script", "style", "iframe", "noscript", "svg"];

/// Converts HTML to Markdown without spawning a process.
///
/// Sources must be UTF-8; anything else is reported as an encoding failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinConverter;

impl BuiltinConverter {
    /// Convert an HTML string to Markdown.
    pub fn convert_str(&self, html: &str) -> Result<String, ConversionError> {
        let converter = htmd::HtmlToMarkdown::builder()
            .skip_tags(SKIPPED_TAGS.to_vec())
            .build();

        converter
            .convert(html)
            .map_err(|e| ConversionError::Backend(format!("htmd conversion failed: {e}")))
    }
}

impl Converter for BuiltinConverter {
    fn name(&self) -> &str {
        "builtin"
    }

    #[instrument(skip(self))]
    fn convert(&self, source: &Path, destination: &Path) -> Result<(), ConversionError> {
        let html =
            std::fs::read_to_string(source).map_err(|e| ConversionError::io(source, e))?;

        let mut markdown = self.convert_str(&html)?;
        if !markdown.ends_with('\n') {
            markdown.push('\n');
        }

        std::fs::write(destination, &markdown)
            .map_err(|e| ConversionError::io(destination, e))?;

        debug!(bytes = markdown.len(), "wrote markdown");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mdt-builtin-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn converts_headings_and_paragraphs() {
        let md = BuiltinConverter
            .convert_str("<h1>Guide</h1><p>Hello <strong>world</strong></p>")
            .unwrap();
        assert!(md.contains("Guide"));
        assert!(md.contains("**world**"));
    }

    #[test]
    fn drops_script_content() {
        let md = BuiltinConverter
            .convert_str("<p>Visible</p><script>var hidden = 1;</script>")
            .unwrap();
        assert!(md.contains("Visible"));
        assert!(!md.contains("hidden"));
    }

    #[test]
    fn converts_file_to_file() {
        let dir = temp_dir();
        let source = dir.join("page.html");
        let destination = dir.join("page.md");
        std::fs::write(&source, "<html><body><p>Body text</p></body></html>").unwrap();

        BuiltinConverter.convert(&source, &destination).unwrap();

        let written = std::fs::read_to_string(&destination).unwrap();
        assert!(written.contains("Body text"));
        assert!(written.ends_with('\n'));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn non_utf8_source_is_encoding_error() {
        let dir = temp_dir();
        let source = dir.join("latin1.html");
        std::fs::write(&source, [0x3c, 0x70, 0x3e, 0xe9, 0xff, 0x3c]).unwrap();

        let err = BuiltinConverter
            .convert(&source, &dir.join("latin1.md"))
            .unwrap_err();
        assert!(matches!(err, ConversionError::Encoding { .. }));
        assert!(!dir.join("latin1.md").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_source_is_io_error() {
        let dir = temp_dir();
        let err = BuiltinConverter
            .convert(&dir.join("absent.html"), &dir.join("absent.md"))
            .unwrap_err();
        assert!(matches!(err, ConversionError::Io { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
