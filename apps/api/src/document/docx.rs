//! DOCX paragraph text via `docx-rs`.
//!
//! Only top-level body paragraphs count. Tables, headers, footers and text
//! boxes are skipped. Runs are concatenated, `<w:tab/>` becomes a tab and
//! `<w:br/>` a newline.

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, Run, RunChild};

use super::ExtractError;

/// Returns one string per body paragraph, in document order.
pub fn extract_paragraphs(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| ExtractError::Unreadable(format!("DOCX: {e}")))?;

    Ok(docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect())
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&paragraph.children, &mut text);
    text
}

fn push_children(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, text),
            ParagraphChild::Hyperlink(link) => push_children(&link.children, text),
            _ => {}
        }
    }
}

fn push_run(run: &Run, text: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}
