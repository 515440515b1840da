//! Final evaluation scoring.
//!
//! This module provides:
//! - Scoring tables (rank thresholds, placement bonuses, status ceilings)
//! - Status bonus, clamping and status points
//! - The piecewise-linear exam score contribution and its inverse
//! - The evaluation report shown to the player

pub mod attributes;
pub mod config;
pub mod engine;
pub mod exam;
pub mod report;

pub use attributes::{AttributeTriple, attribute_score};
pub use config::{GameMode, Position, RankThreshold, ScoringConfig};
pub use engine::{
    FinalResultInput, apply_bonus_and_clamp, compute_final_result, position_bonus_points,
    position_status_bonus, required_exam_score,
};
pub use exam::{exam_score_contribution, exam_score_for_contribution};
pub use report::{EvaluationReport, RankRequirement, evaluate, render_text};
