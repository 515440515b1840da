//! Evaluation report: the final result plus the exam score each rank needs.

use serde::Serialize;

use super::attributes::AttributeTriple;
use super::config::{GameMode, Position, ScoringConfig};
use super::engine::{
    FinalResultInput, apply_bonus_and_clamp, compute_final_result, required_exam_score,
};
use crate::error::{EvalError, Result};

/// Requirement for a single rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankRequirement {
    pub label: String,
    pub threshold: u64,
    /// Minimum final exam score, 0 when already reached
    pub required_exam_score: u64,
    /// Exam score still missing on top of the evaluated one
    pub shortfall: u64,
}

/// Result of evaluating one produce.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub mode: GameMode,
    pub position: Position,
    pub attributes: AttributeTriple,
    /// Status after placement bonus and ceiling
    pub effective_attributes: AttributeTriple,
    pub exam_score: u64,
    pub final_result: u64,
    /// Most prestigious rank first
    pub ranks: Vec<RankRequirement>,
}

/// Validates the input and builds the full report.
pub fn evaluate(config: &ScoringConfig, input: &FinalResultInput) -> Result<EvaluationReport> {
    let ceiling = config.ceiling(input.mode);
    input.attributes.validate(ceiling)?;
    if input.exam_score == 0 {
        return Err(EvalError::InvalidInput(
            "exam score must be greater than 0".to_string(),
        ));
    }

    let final_result = compute_final_result(config, input)?;

    let mut ranks = Vec::with_capacity(config.rank_thresholds.len());
    for rank in config.rank_thresholds.iter().rev() {
        let required = required_exam_score(
            config,
            &rank.label,
            &input.attributes,
            input.position,
            input.mode,
        )?;
        ranks.push(RankRequirement {
            label: rank.label.clone(),
            threshold: rank.threshold,
            required_exam_score: required,
            shortfall: required.saturating_sub(input.exam_score),
        });
    }

    Ok(EvaluationReport {
        mode: input.mode,
        position: input.position,
        attributes: input.attributes,
        effective_attributes: apply_bonus_and_clamp(
            config,
            &input.attributes,
            input.position,
            ceiling,
        ),
        exam_score: input.exam_score,
        final_result,
        ranks,
    })
}

/// Renders the report as a plain text table.
pub fn render_text(report: &EvaluationReport) -> String {
    let mut out = String::new();
    let eff = &report.effective_attributes;
    out.push_str(&format!(
        "Status: Vo {} / Da {} / Vi {} (after bonus: {} / {} / {})\n",
        report.attributes.vocal,
        report.attributes.dance,
        report.attributes.visual,
        eff.vocal,
        eff.dance,
        eff.visual
    ));
    out.push_str(&format!(
        "Final exam score {} -> final evaluation {}\n\n",
        report.exam_score, report.final_result
    ));
    out.push_str(&format!(
        "{:<6}{:>10}{:>16}{:>12}\n",
        "Rank", "Needed", "Exam score", "Shortfall"
    ));
    for rank in &report.ranks {
        out.push_str(&format!(
            "{:<6}{:>10}{:>16}{:>12}\n",
            rank.label, rank.threshold, rank.required_exam_score, rank.shortfall
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> FinalResultInput {
        FinalResultInput {
            mode: GameMode::Pro,
            position: Position::First,
            attributes: AttributeTriple::new(1100, 1100, 1100),
            exam_score: 10000,
        }
    }

    #[test]
    fn test_evaluate_sample() {
        let config = ScoringConfig::default();
        let report = evaluate(&config, &sample_input()).unwrap();

        assert_eq!(report.final_result, 11747);
        assert_eq!(report.effective_attributes, AttributeTriple::new(1130, 1130, 1130));

        let labels: Vec<&str> = report.ranks.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["S+", "S", "A+", "A"]);

        let a = report.ranks.iter().find(|r| r.label == "A").unwrap();
        assert_eq!(a.required_exam_score, 1677);
        assert_eq!(a.shortfall, 0);
    }

    #[test]
    fn test_shortfall_against_exam_score() {
        let config = ScoringConfig::default();
        let report = evaluate(&config, &sample_input()).unwrap();
        // S+ needs 14500 - 9497 = 5003 exam points, beyond 40000
        let s_plus = &report.ranks[0];
        assert_eq!(s_plus.required_exam_score, 40000 + 1353 * 100);
        assert_eq!(s_plus.shortfall, s_plus.required_exam_score - 10000);
    }

    #[test]
    fn test_shortfall_follows_given_exam_score() {
        let config = ScoringConfig::default();
        let input = FinalResultInput {
            exam_score: 30000,
            ..sample_input()
        };
        let report = evaluate(&config, &input).unwrap();
        assert_eq!(report.final_result, 9497 + 3450);

        // S needs 3503 exam points: 30000 + 53 * 50
        let s = report.ranks.iter().find(|r| r.label == "S").unwrap();
        assert_eq!(s.required_exam_score, 32650);
        assert_eq!(s.shortfall, 2650);

        let a_plus = report.ranks.iter().find(|r| r.label == "A+").unwrap();
        assert_eq!(a_plus.shortfall, 0);
    }

    #[test]
    fn test_evaluate_rejects_status_over_ceiling() {
        let config = ScoringConfig::default();
        let input = FinalResultInput {
            attributes: AttributeTriple::new(1600, 1100, 1100),
            ..sample_input()
        };
        assert!(matches!(
            evaluate(&config, &input),
            Err(EvalError::InvalidInput(_))
        ));

        let master = FinalResultInput {
            mode: GameMode::Master,
            ..input
        };
        assert!(evaluate(&config, &master).is_ok());
    }

    #[test]
    fn test_evaluate_rejects_zero_exam_score() {
        let config = ScoringConfig::default();
        let input = FinalResultInput {
            exam_score: 0,
            ..sample_input()
        };
        assert!(evaluate(&config, &input).is_err());
    }

    #[test]
    fn test_render_text_lists_every_rank() {
        let config = ScoringConfig::default();
        let report = evaluate(&config, &sample_input()).unwrap();
        let text = render_text(&report);
        assert!(text.contains("final evaluation 11747"));
        for label in ["S+", "S", "A+", "A"] {
            assert!(text.lines().any(|l| l.starts_with(label)));
        }
        assert!(text.contains("1677"));
    }

    #[test]
    fn test_report_serializes() {
        let config = ScoringConfig::default();
        let report = evaluate(&config, &sample_input()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["final_result"], 11747);
        assert_eq!(json["mode"], "pro");
        assert_eq!(json["position"], "first");
        assert_eq!(json["ranks"][3]["required_exam_score"], 1677);
    }
}
