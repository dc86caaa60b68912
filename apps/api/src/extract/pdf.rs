//! PDF text extraction, a thin wrapper over the `pdf-extract` crate.

use super::ExtractError;

/// Extracts the text of every page and joins the pages with a single space.
/// Pages that yield no text contribute an empty string. Encrypted or
/// malformed PDFs surface the library error unchanged.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(join_pages(&pages))
}

pub(crate) fn join_pages(pages: &[String]) -> String {
    pages.join(" ")
}
