//! Final exam score → evaluation points.
//!
//! The contribution is piecewise linear with diminishing rates. Rates are
//! kept as integer percentages so both directions stay exact.

use crate::error::{EvalError, Result};

/// One linear piece: scores above `lower` earn `rate_percent`% on top of
/// `base`, the contribution accumulated up to `lower`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub lower: u64,
    pub rate_percent: u64,
    pub base: u64,
}

/// Pieces in ascending order. Each `base` equals the previous piece's value
/// at its upper bound.
pub static SEGMENTS: [Segment; 6] = [
    Segment { lower: 0, rate_percent: 30, base: 0 },
    Segment { lower: 5000, rate_percent: 15, base: 1500 },
    Segment { lower: 10000, rate_percent: 8, base: 2250 },
    Segment { lower: 20000, rate_percent: 4, base: 3050 },
    Segment { lower: 30000, rate_percent: 2, base: 3450 },
    Segment { lower: 40000, rate_percent: 1, base: 3650 },
];

/// Evaluation points earned by a final exam score.
pub fn exam_score_contribution(exam_score: u64) -> Result<u64> {
    if exam_score == 0 {
        return Err(EvalError::InvalidInput(
            "exam score must be greater than 0".to_string(),
        ));
    }

    // Pieces cover (lower, next.lower]
    let segment = SEGMENTS
        .iter()
        .rev()
        .find(|s| exam_score > s.lower)
        .unwrap_or(&SEGMENTS[0]);

    Ok(segment.base + (exam_score - segment.lower) * segment.rate_percent / 100)
}

/// Smallest exam score whose contribution is at least `points`.
///
/// Returns 0 for `points == 0`. Fails when the score would not fit in a `u64`.
pub fn exam_score_for_contribution(points: u64) -> Result<u64> {
    if points == 0 {
        return Ok(0);
    }

    // Inverse pieces cover (base, next.base]
    let segment = SEGMENTS
        .iter()
        .rev()
        .find(|s| points > s.base)
        .unwrap_or(&SEGMENTS[0]);

    (points - segment.base)
        .checked_mul(100)
        .map(|scaled| scaled.div_ceil(segment.rate_percent))
        .and_then(|above| segment.lower.checked_add(above))
        .ok_or_else(|| {
            EvalError::InvalidInput(format!("{} exam points cannot be reached", points))
        })
}
