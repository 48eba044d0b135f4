use std::panic;

use crate::error::{ParseError, Result};
use crate::parser::text::DocumentText;

/// Anything that can turn raw document bytes into per-page text.
pub trait TextSource: Sync {
    fn page_texts(&self, bytes: &[u8], source_name: &str) -> Result<Vec<String>>;

    fn document_text(&self, bytes: &[u8], source_name: &str) -> Result<DocumentText> {
        let pages = self.page_texts(bytes, source_name)?;
        tracing::debug!(source = source_name, pages = pages.len(), "text extracted");
        Ok(DocumentText::from_pages(pages))
    }
}

/// pdf-extract backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextService;

impl TextSource for PdfTextService {
    fn page_texts(&self, bytes: &[u8], source_name: &str) -> Result<Vec<String>> {
        // pdf-extract panics on some malformed inputs instead of returning an error.
        match panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes)) {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(ParseError::extraction(source_name, e)),
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "pdf-extract panicked".to_string());
                Err(ParseError::extraction(source_name, message))
            }
        }
    }
}
