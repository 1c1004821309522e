//! Document text extraction.
//!
//! Plain text is read directly; PDF and DOCX parsing is delegated to
//! the shiva transformer crates and the result regenerated as plain
//! text for the analyzer.

use crate::errors::{Error, Result};
use bytes::Bytes;
use shiva::core::TransformerTrait;
use std::fs;
use std::path::Path;

/// Extract the text content of a document, dispatching on extension.
pub fn extract_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" => read_plain_text(path),
        "pdf" => extract_with_transformer::<shiva::pdf::Transformer>(path),
        "docx" | "doc" => extract_with_transformer::<shiva::docx::Transformer>(path),
        "" => Err(Error::validation(
            "extension",
            "file has no extension; supported formats are .txt, .pdf, .docx",
        )),
        other => Err(Error::validation(
            "extension",
            format!("unsupported file format: .{other}"),
        )),
    }
}

fn read_plain_text(path: &Path) -> Result<String> {
    // Lossy decode keeps partially mis-encoded exports usable.
    let raw = fs::read(path)?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

fn extract_with_transformer<T: TransformerTrait>(path: &Path) -> Result<String> {
    let data = Bytes::from(fs::read(path)?);

    let document = T::parse(&data)
        .map_err(|e| Error::parse(path, format!("failed to parse document: {e}")))?;
    let rendered = shiva::text::Transformer::generate(&document)
        .map_err(|e| Error::parse(path, format!("failed to render document text: {e}")))?;

    Ok(String::from_utf8_lossy(&rendered).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = extract_text(Path::new("/nonexistent/input.txt")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
        assert!(err.to_string().contains("/nonexistent/input.txt"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        writeln!(file, "cells").unwrap();
        let err = extract_text(file.path()).unwrap_err();
        assert!(err.to_string().contains(".xlsx"), "unexpected error: {err}");
    }

    #[test]
    fn plain_text_is_read_verbatim() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "The permit must be obtained.").unwrap();
        let text = extract_text(file.path()).unwrap();
        assert_eq!(text, "The permit must be obtained.");
    }

    #[test]
    fn garbage_pdf_surfaces_a_parse_error() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        write!(file, "not a pdf at all").unwrap();
        let err = extract_text(file.path()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "got: {err}");
    }
}
