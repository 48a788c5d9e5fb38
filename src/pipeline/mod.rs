//! The record-extraction and document-assembly pipeline.
//!
//! Linear flow for one request: parse the source PDF, extract the first
//! page's text, locate the table layout, pull out report rows, group them
//! by code, compose one output document per group, and package everything
//! into a single archive. Composition per group is independent; the archive
//! is the one serialization point and is written in ascending code order.

pub mod date_code;
pub mod groups;
pub mod layout;
pub mod records;

pub use date_code::derive_date_code;
pub use groups::group_records;
pub use layout::{locate_layout, Layout};
pub use records::{extract_records, Record};

use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::archive::{package_archive, ArchiveError};
use crate::document::{DocumentComposer, DocumentError, SourceDocument};

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Document processing error")]
    Document {
        #[from]
        source: DocumentError,
    },

    #[error("No report rows found in document")]
    NoRecords,

    #[error("Archive packaging error")]
    Archive {
        #[from]
        source: ArchiveError,
    },
}

/// Result of a successful split.
#[derive(Debug)]
pub struct SplitOutcome {
    /// `MMDDYY` date code used in output file names.
    pub date_code: String,
    /// Output file names, in ascending code order.
    pub file_names: Vec<String>,
    /// Number of distinct codes found.
    pub group_count: usize,
    /// The finished ZIP archive.
    pub archive: Vec<u8>,
}

/// Runs the whole pipeline on one source document.
///
/// `cap` bounds the number of valid report rows extracted.
///
/// # Errors
///
/// - [`SplitError::NoRecords`] when no table header is found or the table
///   has no valid rows — a validation outcome the caller reports to the
///   user, not a server fault.
/// - [`SplitError::Document`] on unreadable input or a failed page copy;
///   the request is aborted whole, partial archives are never produced.
/// - [`SplitError::Archive`] on container write failure.
#[instrument(skip(bytes), fields(input_len = bytes.len()))]
pub fn split_document(bytes: &[u8], cap: usize) -> Result<SplitOutcome, SplitError> {
    let source = SourceDocument::load(bytes)?;
    let lines = source.first_page_lines()?;

    let date_code = derive_date_code(&lines.join("\n"));

    let records = match locate_layout(&lines) {
        Some(layout) => extract_records(&lines, &layout, cap),
        None => Vec::new(),
    };

    if records.is_empty() {
        return Err(SplitError::NoRecords);
    }

    let groups = group_records(records);
    debug!(group_count = groups.len(), "grouped report rows");

    let composer = DocumentComposer::new(&source);
    let mut entries = Vec::with_capacity(groups.len());
    for (code, group_lines) in &groups {
        let document = composer.compose(code, group_lines)?;
        entries.push((format!("{date_code}-{code}.pdf"), document));
    }

    let archive = package_archive(&entries)?;

    let file_names: Vec<String> = entries.into_iter().map(|(name, _)| name).collect();
    info!(
        group_count = groups.len(),
        file_count = file_names.len(),
        archive_len = archive.len(),
        "split complete"
    );

    Ok(SplitOutcome {
        date_code,
        group_count: groups.len(),
        file_names,
        archive,
    })
}
