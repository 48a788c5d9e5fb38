//! ZIP packaging of composed documents.

use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Failed to write archive entry {name}")]
    Entry {
        name: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to write archive entry {name}")]
    EntryIo {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to finalize archive")]
    Finalize {
        #[from]
        source: zip::result::ZipError,
    },
}

/// Packages named byte buffers into a single deflated ZIP archive.
///
/// Entries are written in the order given, which the caller keeps in
/// ascending code order so archive contents are reproducible. On any write
/// failure the whole archive is discarded; no partial container is ever
/// returned.
pub fn package_archive(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    for (name, bytes) in entries {
        writer
            .start_file(name.as_str(), options)
            .map_err(|source| ArchiveError::Entry {
                name: name.clone(),
                source,
            })?;
        writer
            .write_all(bytes)
            .map_err(|source| ArchiveError::EntryIo {
                name: name.clone(),
                source,
            })?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}
