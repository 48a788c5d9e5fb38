pub mod compose;
pub mod error;
pub mod text;

pub use compose::DocumentComposer;
pub use error::DocumentError;

use lopdf::{Document, ObjectId};

/// A parsed source PDF.
///
/// Wraps the `lopdf` document model and exposes the two capabilities the
/// pipeline needs: text extraction from the report page and structural
/// access to pages for verbatim copying. The underlying document is never
/// mutated.
#[derive(Debug)]
pub struct SourceDocument {
    doc: Document,
}

impl SourceDocument {
    /// Parses a PDF from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::PdfLoadError`] if the bytes are not a valid
    /// PDF, and [`DocumentError::EmptyDocument`] if the PDF has no pages.
    pub fn load(bytes: &[u8]) -> Result<Self, DocumentError> {
        let doc =
            Document::load_mem(bytes).map_err(|source| DocumentError::PdfLoadError { source })?;

        if doc.get_pages().is_empty() {
            return Err(DocumentError::EmptyDocument);
        }

        Ok(Self { doc })
    }

    /// Returns the number of pages in the document.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Extracts the text of the given 1-indexed page.
    pub fn page_text(&self, page_number: u32) -> Result<String, DocumentError> {
        let page_id = self.page_id(page_number)?;
        text::extract_page_text(&self.doc, page_id)
    }

    /// Extracts the first page's text split into report lines under the
    /// fixed line policy (see [`text::split_report_lines`]).
    pub fn first_page_lines(&self) -> Result<Vec<String>, DocumentError> {
        let text = self.page_text(1)?;
        Ok(text::split_report_lines(&text))
    }

    pub(crate) fn inner(&self) -> &Document {
        &self.doc
    }

    pub(crate) fn page_id(&self, page_number: u32) -> Result<ObjectId, DocumentError> {
        self.doc
            .get_pages()
            .get(&page_number)
            .copied()
            .ok_or(DocumentError::EmptyDocument)
    }
}
