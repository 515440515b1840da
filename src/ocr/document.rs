//! Response body of the image analysis (read) API.

use serde::{Deserialize, Serialize};

/// Whole OCR result for one image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrDocument {
    #[serde(default)]
    pub model_version: String,
    pub metadata: ImageMetadata,
    pub read_result: ReadResult,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadResult {
    #[serde(default)]
    pub blocks: Vec<OcrBlock>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrBlock {
    #[serde(default)]
    pub lines: Vec<OcrLine>,
}

/// Represents a line of OCR text with its bounding polygon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrLine {
    pub text: String,
    #[serde(default)]
    pub bounding_polygon: Vec<Point>,
    #[serde(default)]
    pub words: Vec<OcrWord>,
}

/// Represents a single word from OCR with confidence score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrWord {
    pub text: String,
    #[serde(default)]
    pub bounding_polygon: Vec<Point>,
    #[serde(default)]
    pub confidence: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Vertical extent `(min_y, max_y)` of a polygon, `None` when it has no points.
pub fn vertical_span(polygon: &[Point]) -> Option<(i32, i32)> {
    let min_y = polygon.iter().map(|p| p.y).min()?;
    let max_y = polygon.iter().map(|p| p.y).max()?;
    Some((min_y, max_y))
}

impl OcrDocument {
    /// Parses a provider response body.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// Lines of the first block. Later blocks are not used.
    pub fn first_block_lines(&self) -> Option<&[OcrLine]> {
        self.read_result.blocks.first().map(|b| b.lines.as_slice())
    }
}
