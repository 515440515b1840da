use serde::{Deserialize, Serialize};

use super::attributes::{AttributeTriple, attribute_score};
use super::config::{GameMode, Position, ScoringConfig};
use super::exam::{exam_score_contribution, exam_score_for_contribution};
use crate::error::Result;

/// Everything needed to compute the final evaluation of one produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResultInput {
    pub mode: GameMode,
    pub position: Position,
    /// Status before the final exam placement bonus
    pub attributes: AttributeTriple,
    pub exam_score: u64,
}

/// Fixed evaluation points for the final exam placement.
pub fn position_bonus_points(config: &ScoringConfig, position: Position) -> u64 {
    position
        .table_index()
        .map_or(0, |i| config.position_points[i])
}

/// Status bonus added to each of vocal/dance/visual for the placement.
pub fn position_status_bonus(config: &ScoringConfig, position: Position) -> u32 {
    position.table_index().map_or(0, |i| config.status_bonus[i])
}

/// Applies the placement status bonus and caps each status at `ceiling`.
pub fn apply_bonus_and_clamp(
    config: &ScoringConfig,
    attrs: &AttributeTriple,
    position: Position,
    ceiling: u32,
) -> AttributeTriple {
    attrs.with_bonus_clamped(position_status_bonus(config, position), ceiling)
}

/// Evaluation points that do not depend on the exam score.
fn fixed_points(
    config: &ScoringConfig,
    attrs: &AttributeTriple,
    position: Position,
    mode: GameMode,
) -> u64 {
    let clamped = apply_bonus_and_clamp(config, attrs, position, config.ceiling(mode));
    attribute_score(&clamped).saturating_add(position_bonus_points(config, position))
}

/// Final evaluation: placement points + status points + exam points.
pub fn compute_final_result(config: &ScoringConfig, input: &FinalResultInput) -> Result<u64> {
    let exam_points = exam_score_contribution(input.exam_score)?;
    Ok(fixed_points(config, &input.attributes, input.position, input.mode)
        .saturating_add(exam_points))
}

/// Minimum final exam score reaching `target_rank`, or 0 when status and
/// placement already reach it.
pub fn required_exam_score(
    config: &ScoringConfig,
    target_rank: &str,
    attrs: &AttributeTriple,
    position: Position,
    mode: GameMode,
) -> Result<u64> {
    let threshold = config.rank_threshold(target_rank)?;
    let remaining = threshold.saturating_sub(fixed_points(config, attrs, position, mode));
    exam_score_for_contribution(remaining)
}
