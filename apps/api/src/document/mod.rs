//! Résumé text extraction.
//!
//! The file type is decided by extension (`.pdf`, `.docx`, case-insensitive).
//! PDF text comes from `pdf-extract`, DOCX paragraphs from `docx-rs`.
//! `export` goes the other way and renders generated text as a PDF.

mod docx;
pub mod export;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("This file contains no text.")]
    NoText,

    #[error("Unreadable document: {0}")]
    Unreadable(String),
}

/// Supported résumé formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractError> {
        let lower = file_name.trim().to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(DocumentKind::Pdf)
        } else if lower.ends_with(".docx") {
            Ok(DocumentKind::Docx)
        } else {
            let ext = lower.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
            Err(ExtractError::UnsupportedType(ext.to_string()))
        }
    }
}

/// Extracts plain text from an uploaded résumé.
///
/// Blocking: callers on the async runtime should go through `spawn_blocking`.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    let text = match DocumentKind::from_file_name(file_name)? {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Unreadable(format!("PDF '{file_name}': {e}")))?,
        DocumentKind::Docx => docx::extract_paragraphs(bytes)?.join("\n"),
    };

    if text.trim().is_empty() {
        return Err(ExtractError::NoText);
    }
    Ok(text)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::{Cursor, Write};

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

    const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

    const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"></Relationships>"#;

    /// Builds a minimal DOCX package whose body holds the given raw paragraph XML.
    pub fn docx_with_body(body_xml: &str) -> Vec<u8> {
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:wps="http://schemas.microsoft.com/office/word/2010/wordprocessingShape"><w:body>{body_xml}<w:sectPr/></w:body></w:document>"#
        );
        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", PACKAGE_RELS),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS),
            ("word/document.xml", document.as_str()),
        ];

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        for (name, content) in parts {
            writer.start_file(name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        docx_with_body(&body)
    }

    pub fn pdf_with_text(text: &str) -> Vec<u8> {
        super::export::render_pdf("resume", text).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension_is_case_insensitive() {
        assert_eq!(
            DocumentKind::from_file_name("CV.PDF").unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::from_file_name("resume.Docx").unwrap(),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        match extract_text("resume.txt", b"plain text") {
            Err(ExtractError::UnsupportedType(ext)) => assert_eq!(ext, "txt"),
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
        assert!(matches!(
            extract_text("resume", b"x"),
            Err(ExtractError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_docx_paragraphs_joined_with_newlines() {
        let bytes = fixtures::docx_with_paragraphs(&["Jane Doe", "Senior Engineer"]);
        let text = extract_text("resume.docx", &bytes).unwrap();
        assert_eq!(text, "Jane Doe\nSenior Engineer");
    }

    #[test]
    fn test_whitespace_only_docx_has_no_text() {
        let bytes = fixtures::docx_with_paragraphs(&["   ", ""]);
        assert!(matches!(
            extract_text("resume.docx", &bytes),
            Err(ExtractError::NoText)
        ));
    }

    #[test]
    fn test_corrupt_docx_is_unreadable() {
        assert!(matches!(
            extract_text("resume.docx", b"definitely not a zip archive"),
            Err(ExtractError::Unreadable(_))
        ));
    }

    #[test]
    fn test_pdf_text_is_extracted() {
        let bytes = fixtures::pdf_with_text("Jane Doe\nSenior Rust Engineer");
        let text = extract_text("Jane_Doe.PDF", &bytes).unwrap();
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Senior Rust Engineer"));
    }

    #[test]
    fn test_corrupt_pdf_is_unreadable() {
        assert!(matches!(
            extract_text("resume.pdf", b"%PDF-1.4 truncated garbage"),
            Err(ExtractError::Unreadable(_))
        ));
    }
}
