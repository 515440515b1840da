//! Scoring tables.
//!
//! Rank thresholds, placement bonuses and status ceilings differ between
//! game revisions, so all of them are data rather than literals. The defaults
//! match the current Pro/Master produce rules.

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};

/// Difficulty of the produce. Selects the status ceiling.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// プロ
    #[default]
    Pro,
    /// マスター
    Master,
}

/// Final exam placement.
///
/// Only 1st to 3rd carry a bonus; anything else is `Unplaced`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    First,
    Second,
    Third,
    Unplaced,
}

impl Position {
    /// Maps a numeric placement (1-based) to a position. Total: out-of-range
    /// numbers, including 0, become `Unplaced`.
    pub fn from_number(n: u32) -> Self {
        match n {
            1 => Position::First,
            2 => Position::Second,
            3 => Position::Third,
            _ => Position::Unplaced,
        }
    }

    /// Index into the per-position tables.
    pub fn table_index(self) -> Option<usize> {
        match self {
            Position::First => Some(0),
            Position::Second => Some(1),
            Position::Third => Some(2),
            Position::Unplaced => None,
        }
    }
}

/// Largest rank threshold whose required exam score still fits in a `u64`.
pub const MAX_RANK_THRESHOLD: u64 = u64::MAX / 100;

/// A named rank and the final evaluation needed to reach it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankThreshold {
    pub label: String,
    pub threshold: u64,
}

impl RankThreshold {
    fn new(label: &str, threshold: u64) -> Self {
        Self {
            label: label.to_string(),
            threshold,
        }
    }
}

/// Status ceiling per game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CeilingConfig {
    pub pro: u32,
    pub master: u32,
}

impl Default for CeilingConfig {
    fn default() -> Self {
        Self {
            pro: 1500,
            master: 1800,
        }
    }
}

/// Complete scoring configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Ranks in ascending prestige order (A, A+, S, S+)
    pub rank_thresholds: Vec<RankThreshold>,
    /// Fixed evaluation points for 1st, 2nd and 3rd place
    pub position_points: [u64; 3],
    /// Per-status bonus for 1st, 2nd and 3rd place, added before clamping.
    /// Older revisions only rewarded 1st place: `[30, 0, 0]`.
    pub status_bonus: [u32; 3],
    pub ceilings: CeilingConfig,
    /// Exam score assumed when none is given
    pub reference_exam_score: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            rank_thresholds: vec![
                RankThreshold::new("A", 10000),
                RankThreshold::new("A+", 11500),
                RankThreshold::new("S", 13000),
                RankThreshold::new("S+", 14500),
            ],
            position_points: [1700, 900, 500],
            status_bonus: [30, 15, 0],
            ceilings: CeilingConfig::default(),
            reference_exam_score: 10000,
        }
    }
}

impl ScoringConfig {
    /// Status ceiling for the given mode.
    pub fn ceiling(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Pro => self.ceilings.pro,
            GameMode::Master => self.ceilings.master,
        }
    }

    /// Looks up the threshold of a rank label.
    pub fn rank_threshold(&self, label: &str) -> Result<u64> {
        self.rank_thresholds
            .iter()
            .find(|rank| rank.label == label)
            .map(|rank| rank.threshold)
            .ok_or_else(|| EvalError::UnknownRank(label.to_string()))
    }

    /// Checks the rank table: non-empty, unique labels, strictly increasing
    /// thresholds no larger than [`MAX_RANK_THRESHOLD`].
    pub fn validate(&self) -> Result<()> {
        if self.rank_thresholds.is_empty() {
            return Err(EvalError::InvalidConfig("rank table is empty".to_string()));
        }
        for (i, rank) in self.rank_thresholds.iter().enumerate() {
            if rank.label.is_empty() {
                return Err(EvalError::InvalidConfig(format!(
                    "rank #{} has an empty label",
                    i + 1
                )));
            }
            if self.rank_thresholds[..i].iter().any(|r| r.label == rank.label) {
                return Err(EvalError::InvalidConfig(format!(
                    "rank {} is listed twice",
                    rank.label
                )));
            }
        }
        for pair in self.rank_thresholds.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(EvalError::InvalidConfig(format!(
                    "rank {} ({}) must be above {} ({})",
                    pair[1].label, pair[1].threshold, pair[0].label, pair[0].threshold
                )));
            }
        }
        if let Some(top) = self.rank_thresholds.last()
            && top.threshold > MAX_RANK_THRESHOLD
        {
            return Err(EvalError::InvalidConfig(format!(
                "rank {} ({}) is above the largest reachable threshold {}",
                top.label, top.threshold, MAX_RANK_THRESHOLD
            )));
        }
        if self.ceilings.pro == 0 || self.ceilings.master == 0 {
            return Err(EvalError::InvalidConfig(
                "status ceilings must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
