//! Plain text to PDF for downloads.
//!
//! A4, Courier 11pt, 5mm line height, 10mm side margins. Long lines wrap on
//! word boundaries. Characters outside Latin-1 are replaced with `?`.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;
const FONT_SIZE_PT: f32 = 11.0;
const LINE_HEIGHT_MM: f32 = 5.0;
/// Courier glyphs are 0.6em wide: 11pt * 0.6 = 6.6pt = 2.328mm, so 190mm fits 81.
const CHARS_PER_LINE: usize = 81;

#[derive(Debug, Error)]
#[error("PDF rendering failed: {0}")]
pub struct ExportError(String);

/// Renders `text` as a paginated PDF.
pub fn render_pdf(title: &str, text: &str) -> Result<Vec<u8>, ExportError> {
    let lines = wrap_lines(&to_latin1(text), CHARS_PER_LINE);
    let lines_per_page =
        ((PAGE_HEIGHT_MM - MARGIN_MM - BOTTOM_MARGIN_MM) / LINE_HEIGHT_MM) as usize;

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| ExportError(format!("{e:?}")))?;

    for (index, chunk) in lines.chunks(lines_per_page.max(1)).enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1")
        };
        let layer = doc.get_page(page).get_layer(layer);

        for (row, line) in chunk.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM * (row as f32 + 1.0);
            layer.use_text(line.as_str(), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(baseline), &font);
        }
    }

    doc.save_to_bytes().map_err(|e| ExportError(format!("{e:?}")))
}

/// Latin-1 with replacement, so the builtin font can encode every character.
fn to_latin1(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\t' => ' ',
            c if (c as u32) < 0x100 => c,
            _ => '?',
        })
        .collect()
}

/// Greedy word wrap. Words longer than `width` are split.
fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for source in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;
        for word in source.split(' ') {
            let mut word: Vec<char> = word.chars().collect();
            let sep = usize::from(line_len > 0);
            if line_len + sep + word.len() <= width {
                if sep == 1 {
                    line.push(' ');
                }
                line.extend(word.iter());
                line_len += sep + word.len();
                continue;
            }
            if line_len > 0 {
                out.push(std::mem::take(&mut line));
                line_len = 0;
            }
            while word.len() > width {
                let rest = word.split_off(width);
                out.push(word.into_iter().collect());
                word = rest;
            }
            line_len = word.len();
            line.extend(word);
        }
        out.push(line);
    }
    out
}
