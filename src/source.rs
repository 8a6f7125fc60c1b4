//! Document source collaborators.
//!
//! The pipeline never decodes PDFs itself. It consumes any type implementing
//! [`DocumentSource`]: an ordered sequence of pages, each exposing plain text
//! with the original horizontal spacing preserved. Image-only or otherwise
//! undecodable pages report `None` and contribute zero lines; only a failure
//! to read the document at all is an error.

use crate::error::ExtractError;

/// An ordered sequence of report pages.
pub trait DocumentSource {
    /// Number of pages in document order.
    fn page_count(&self) -> usize;

    /// Plain text of one page, preserving original horizontal spacing.
    ///
    /// Returns `Ok(None)` for an image-only or undecodable page (treated as
    /// zero lines, not an error).
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Decode`] when the document itself cannot be
    /// read; processing of that document stops with no partial output.
    fn page_text(&self, index: usize) -> Result<Option<String>, ExtractError>;
}

/// An in-memory document made of already-decoded page texts.
///
/// This is the built-in source for callers that run their own PDF text layer,
/// and the workhorse of the test suite.
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    pages: Vec<String>,
}

impl TextDocument {
    /// Creates a document from decoded page texts, one string per page.
    #[must_use]
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Creates a single-page document from one block of text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            pages: vec![text.to_string()],
        }
    }
}

impl DocumentSource for TextDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<Option<String>, ExtractError> {
        Ok(self.pages.get(index).cloned())
    }
}
