pub mod archive;
pub mod document;
pub mod pipeline;
pub mod server;
pub mod utils;

pub use archive::{package_archive, ArchiveError};
pub use document::{DocumentComposer, DocumentError, SourceDocument};
pub use pipeline::{split_document, SplitError, SplitOutcome};
pub use server::{create_app, start_server};
