//! Report table layout location.
//!
//! The report's first page carries a column header row naming the code
//! column. Locating that row, and the character span of the code label
//! within it, fixes where every data row below it is expected to carry its
//! code.

use std::ops::Range;

/// Label of the code column in the report header.
const CODE_COLUMN_LABEL: &str = "LO";

/// Tokens that must co-occur with the code label for a line to count as the
/// header row. The report header also names the payment-method columns, so
/// requiring one of these rules out incidental `LO` matches in body text.
const PAYMENT_MARKERS: &[&str] = &["Cash", "Check"];

/// Header detection is bounded to the top of the page; a report whose
/// header is not within this window has no extractable table.
const HEADER_SCAN_WINDOW: usize = 40;

/// Location of the code column within the report table.
///
/// Computed once per document from the header row and read-only afterwards.
/// `code_column` is a half-open character range in the header line; data
/// rows are expected to carry their code within (or overlapping) this span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Index of the header row within the report lines.
    pub header_line_index: usize,
    /// Half-open character span of the code column label.
    pub code_column: Range<usize>,
}

/// Scans report lines for the table header row.
///
/// Looks at the first [`HEADER_SCAN_WINDOW`] lines for one containing the
/// code label as a whole token together with a payment-method marker. The
/// code column span is the label token expanded to whitespace boundaries.
///
/// Returns `None` when no header is found. That is a normal outcome, not an
/// error: downstream extraction yields zero records and the caller surfaces
/// it as a "no data found" validation failure.
pub fn locate_layout(lines: &[String]) -> Option<Layout> {
    for (index, line) in lines.iter().take(HEADER_SCAN_WINDOW).enumerate() {
        if !PAYMENT_MARKERS.iter().any(|marker| line.contains(marker)) {
            continue;
        }

        if let Some(code_column) = label_token_span(line) {
            tracing::debug!(
                header_line_index = index,
                column_start = code_column.start,
                column_end = code_column.end,
                "located report header"
            );
            return Some(Layout {
                header_line_index: index,
                code_column,
            });
        }
    }

    tracing::debug!("no report header found within scan window");
    None
}

/// Finds the code label as a whole whitespace-delimited token and returns
/// its character span.
fn label_token_span(line: &str) -> Option<Range<usize>> {
    let mut offset = 0;
    for token in line.split_whitespace() {
        // split_whitespace loses offsets; recover them with find from the
        // previous token's end, which is exact for non-overlapping tokens.
        let start = line[offset..].find(token)? + offset;
        let end = start + token.len();
        offset = end;

        if token == CODE_COLUMN_LABEL {
            return Some(start..end);
        }
    }
    None
}
