use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to load PDF content")]
    PdfLoadError {
        #[source]
        source: lopdf::Error,
    },

    #[error("Document has no pages")]
    EmptyDocument,

    #[error("Failed to copy page {page_number} from source document")]
    PageCopyError {
        page_number: u32,
        #[source]
        source: lopdf::Error,
    },

    #[error("Failed to assemble output document: {message}")]
    CompositionError { message: String },
}

impl From<lopdf::Error> for DocumentError {
    fn from(source: lopdf::Error) -> Self {
        DocumentError::PdfLoadError { source }
    }
}
