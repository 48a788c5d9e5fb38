//! Report row extraction.
//!
//! Walks the lines below the located header and recovers one `(code,
//! raw line)` record per valid data row. Extraction is deliberately
//! conservative: it stops at the first end-of-table marker, skips lines too
//! short to be data rows, and validates every candidate code before
//! emitting a record.

use once_cell::sync::Lazy;
use regex::Regex;

use super::layout::Layout;

/// Inclusive range of valid code values.
const CODE_MIN: u32 = 0;
const CODE_MAX: u32 = 800;

/// Lines shorter than this (after trimming) cannot be data rows and are
/// skipped without counting toward the extraction cap.
const MIN_ROW_LENGTH: usize = 10;

/// Phrases that mark the end of the report table. Everything at and below
/// the first line containing one of these is boilerplate (totals, signature
/// block, page footer) and is never scanned for records.
const END_OF_TABLE_MARKERS: &[&str] = &["total", "signature", "please remit", "page "];

static CODE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}$").expect("valid regex"));

/// One extracted report row.
///
/// `raw_line` is the unmodified source line the code was recovered from;
/// it is rendered verbatim on the group's cover page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub code: String,
    pub raw_line: String,
}

/// Extracts records from the lines below the header row.
///
/// At most `cap` valid rows are read; the cap bounds the scan on malformed
/// documents where boilerplate below the table resembles data rows.
/// Candidate codes are recovered by the column-position strategy: the
/// header's code column span is clamped to the row, then expanded to the
/// whitespace-delimited token overlapping it. Candidates failing the code
/// format check are logged and skipped without aborting the batch.
pub fn extract_records(lines: &[String], layout: &Layout, cap: usize) -> Vec<Record> {
    let mut records = Vec::new();

    for line in lines.iter().skip(layout.header_line_index + 1) {
        if records.len() >= cap {
            break;
        }

        if is_end_of_table(line) {
            tracing::debug!(%line, "end-of-table marker reached");
            break;
        }

        if line.trim().len() < MIN_ROW_LENGTH {
            continue;
        }

        let Some(candidate) = code_at_column(line, &layout.code_column) else {
            tracing::debug!(%line, "no code token under header column");
            continue;
        };

        if !is_valid_code(&candidate) {
            tracing::debug!(%candidate, %line, "rejected code candidate");
            continue;
        }

        records.push(Record {
            code: candidate,
            raw_line: line.clone(),
        });
    }

    records
}

fn is_end_of_table(line: &str) -> bool {
    let lowered = line.to_lowercase();
    END_OF_TABLE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Recovers the candidate code token overlapping the header column span.
///
/// The span is clamped to the line, then extended left and right to
/// whitespace boundaries, so a 3-digit code sitting slightly off the
/// 2-character `LO` label column is still recovered whole.
fn code_at_column(line: &str, column: &std::ops::Range<usize>) -> Option<String> {
    let bytes = line.as_bytes();
    if column.start >= bytes.len() {
        return None;
    }

    let mut start = column.start;
    let mut end = column.end.min(bytes.len());

    // The clamped span may sit entirely in padding whitespace; shrink it to
    // the first non-blank byte before expanding, or give up.
    while start < end && bytes[start].is_ascii_whitespace() {
        start += 1;
    }
    if start >= end {
        return None;
    }

    while start > 0 && !bytes[start - 1].is_ascii_whitespace() {
        start -= 1;
    }
    while end < bytes.len() && !bytes[end].is_ascii_whitespace() {
        end += 1;
    }

    let token = line.get(start..end)?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Code format predicate: exactly three decimal digits, value 000-800.
pub fn is_valid_code(candidate: &str) -> bool {
    if !CODE_PATTERN.is_match(candidate) {
        return false;
    }
    match candidate.parse::<u32>() {
        Ok(value) => (CODE_MIN..=CODE_MAX).contains(&value),
        Err(_) => false,
    }
}
