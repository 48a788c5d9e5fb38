//! Content-stream text extraction.
//!
//! Recovers a plain-text rendition of a PDF page by walking its decoded
//! content stream: text-showing operators contribute characters, text
//! positioning operators break lines. This is deliberately simple — the
//! report pages this service handles carry an embedded text layer, and the
//! pipeline only needs line structure, not glyph geometry.

use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};

use super::error::DocumentError;

/// Extracts the text of a single page as newline-separated lines.
pub fn extract_page_text(doc: &Document, page_id: ObjectId) -> Result<String, DocumentError> {
    let content_bytes = doc.get_page_content(page_id)?;
    let content = Content::decode(&content_bytes)?;

    let mut text = String::new();

    for operation in &content.operations {
        match operation.operator.as_str() {
            // Text showing operators
            "Tj" | "TJ" | "'" | "\"" => {
                for operand in &operation.operands {
                    if let Some(s) = decode_text_object(operand) {
                        text.push_str(&s);
                    }
                }
            }
            // Text positioning starts a fresh line
            "Td" | "TD" | "T*" | "Tm" => {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }

    Ok(text)
}

/// Decodes a string-bearing PDF object into UTF-8 text.
///
/// Handles UTF-16BE strings (BOM-prefixed) and falls back to treating bytes
/// as Latin-1, which covers PDFDocEncoding for the character set these
/// reports use. `TJ` arrays mix strings with kerning numbers; the numbers
/// are ignored.
fn decode_text_object(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => {
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let utf16: Vec<u16> = bytes[2..]
                    .chunks_exact(2)
                    .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
                    .collect();
                String::from_utf16(&utf16).ok()
            } else {
                Some(bytes.iter().map(|&b| b as char).collect())
            }
        }
        Object::Array(items) => {
            let mut result = String::new();
            for item in items {
                if let Some(s) = decode_text_object(item) {
                    result.push_str(&s);
                }
            }
            if result.is_empty() {
                None
            } else {
                Some(result)
            }
        }
        _ => None,
    }
}

/// Splits extracted report text into lines under the fixed line policy:
/// trailing whitespace is trimmed, fully blank lines are dropped, and
/// leading whitespace is preserved so character column offsets survive.
pub fn split_report_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end())
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}
