use regex::Regex;

use super::document::{OcrDocument, OcrLine, vertical_span};
use crate::error::{EvalError, Result};
use crate::log;
use crate::scoring::AttributeTriple;

/// Pattern marking a status row: the growth percentage shown at the end of
/// each of the Vo/Da/Vi rows, e.g. `12%`.
const MARKER_PATTERN: &str = r"[0-9]+%";

/// A line worth inspecting for status values.
const VALUE_LINE_PATTERN: &str = r"[0-9]{2,4}";

/// A word that is a status value on its own (not part of `12%` or `12345`).
const VALUE_WORD_PATTERN: &str = r"^[0-9]{2,4}$";

/// Vertical extent of a status row label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PositionMarker {
    min_y: i32,
    max_y: i32,
}

/// A standalone number and where it was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CandidateValue {
    value: u32,
    min_y: i32,
    max_y: i32,
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| EvalError::ExtractionFailed(format!("bad pattern {}: {}", pattern, e)))
}

/// Collects row markers, sorted top to bottom by their lower edge.
fn find_markers(lines: &[OcrLine], marker: &Regex) -> Vec<PositionMarker> {
    let mut markers: Vec<PositionMarker> = lines
        .iter()
        .filter(|line| marker.is_match(&line.text))
        .filter_map(|line| vertical_span(&line.bounding_polygon))
        .map(|(min_y, max_y)| PositionMarker { min_y, max_y })
        .collect();

    // Emission order of the provider is not visual order
    markers.sort_by_key(|m| m.max_y);
    markers
}

/// Collects standalone 2-4 digit words in scan order.
fn find_candidates(
    lines: &[OcrLine],
    value_line: &Regex,
    value_word: &Regex,
) -> Vec<CandidateValue> {
    let mut candidates = Vec::new();

    for line in lines {
        if !value_line.is_match(&line.text) {
            continue;
        }
        for word in &line.words {
            if !value_word.is_match(&word.text) {
                continue;
            }
            let Some((min_y, max_y)) = vertical_span(&word.bounding_polygon) else {
                continue;
            };
            // At most 4 digits, cannot overflow
            let Ok(value) = word.text.parse::<u32>() else {
                continue;
            };
            candidates.push(CandidateValue {
                value,
                min_y,
                max_y,
            });
        }
    }

    candidates
}

/// Both edges of the candidate lie strictly within `gap` of the marker's.
fn is_aligned(marker: &PositionMarker, candidate: &CandidateValue, gap: i32) -> bool {
    (candidate.min_y - marker.min_y).abs() < gap && (candidate.max_y - marker.max_y).abs() < gap
}

/// Reads vocal/dance/visual from a status screenshot's OCR result.
///
/// Rows are located by their percentage label, then every standalone number
/// whose box lines up vertically (within 1% of the image height) is assigned
/// to that row. The topmost row is vocal, then dance, then visual. When more
/// than one number lines up with a row, the last one in scan order is kept.
///
/// Unmatched slots are 0. Returns an error if no row label or no number is
/// found at all.
pub fn extract_attributes_from_ocr(doc: &OcrDocument) -> Result<AttributeTriple> {
    let marker_regex = compile(MARKER_PATTERN)?;
    let value_line_regex = compile(VALUE_LINE_PATTERN)?;
    let value_word_regex = compile(VALUE_WORD_PATTERN)?;

    let lines = doc
        .first_block_lines()
        .ok_or_else(|| EvalError::ExtractionFailed("OCR result has no text block".to_string()))?;

    let markers = find_markers(lines, &marker_regex);
    let candidates = find_candidates(lines, &value_line_regex, &value_word_regex);

    if markers.is_empty() || candidates.is_empty() {
        return Err(EvalError::ExtractionFailed(format!(
            "found {} status rows and {} numbers",
            markers.len(),
            candidates.len()
        )));
    }

    let gap = i32::try_from(doc.metadata.height / 100).unwrap_or(i32::MAX);

    let mut result = AttributeTriple::default();
    for (index, marker) in markers.iter().enumerate() {
        for candidate in &candidates {
            if !is_aligned(marker, candidate, gap) {
                continue;
            }
            match index {
                0 => result.vocal = candidate.value,
                1 => result.dance = candidate.value,
                2 => result.visual = candidate.value,
                _ => {}
            }
        }
    }

    log(&format!(
        "Status from OCR: Vo {} / Da {} / Vi {} ({} rows, {} numbers, gap {}px)",
        result.vocal,
        result.dance,
        result.visual,
        markers.len(),
        candidates.len(),
        gap
    ));

    Ok(result)
}
