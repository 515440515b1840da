pub mod client;
pub mod document;
pub mod extract;

pub use client::{OcrClient, OcrConfig};
pub use document::OcrDocument;
pub use extract::extract_attributes_from_ocr;

use anyhow::{Context, Result};
use std::path::Path;

use crate::scoring::AttributeTriple;

/// High-level function: screenshot file → status via the OCR endpoint.
pub fn read_status_from_image(client: &OcrClient, image_path: &Path) -> Result<AttributeTriple> {
    let bytes = std::fs::read(image_path)
        .with_context(|| format!("Failed to read image: {}", image_path.display()))?;
    let doc = client.analyze(&bytes)?;
    Ok(extract_attributes_from_ocr(&doc)?)
}

/// Loads a saved OCR response and extracts the status from it.
pub fn read_status_from_response(response_path: &Path) -> Result<AttributeTriple> {
    let body = std::fs::read_to_string(response_path)
        .with_context(|| format!("Failed to read OCR response: {}", response_path.display()))?;
    let doc = client::parse_response(&body)?;
    Ok(extract_attributes_from_ocr(&doc)?)
}
