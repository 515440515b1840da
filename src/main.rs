//! Gakumas Final Evaluation CLI
//!
//! Computes the final evaluation of a produce and the final exam score needed
//! for each rank, optionally reading the status from a screenshot.

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use gakumas_final_eval::config::{self, AppConfig};
use gakumas_final_eval::ocr::{self, OcrClient};
use gakumas_final_eval::scoring::{
    AttributeTriple, EvaluationReport, FinalResultInput, GameMode, Position, evaluate, render_text,
};
use gakumas_final_eval::{log, paths};

#[derive(Parser)]
#[command(name = "gakumas-final-eval")]
#[command(about = "Final evaluation calculator for Gakumas produces", version)]
struct Cli {
    /// Load config from file instead of the default locations
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the final evaluation and required exam scores
    Evaluate {
        #[command(flatten)]
        status: StatusArgs,
        #[command(flatten)]
        exam: ExamArgs,
    },
    /// Read the status from a saved OCR response (JSON)
    Extract {
        /// OCR response file
        response: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read the status from a screenshot via the OCR endpoint, then evaluate
    Scan {
        /// Screenshot taken before the final exam
        image: PathBuf,
        /// Values used for any status the screenshot does not show
        #[command(flatten)]
        prior: PriorStatusArgs,
        #[command(flatten)]
        exam: ExamArgs,
    },
    /// Write the default config file
    Config {
        /// Output path
        #[arg(long, value_name = "FILE", default_value = "config.json")]
        write_default: PathBuf,
    },
}

#[derive(Args)]
struct StatusArgs {
    #[arg(long)]
    vocal: u32,
    #[arg(long)]
    dance: u32,
    #[arg(long)]
    visual: u32,
}

#[derive(Args)]
struct PriorStatusArgs {
    #[arg(long, default_value_t = 0)]
    vocal: u32,
    #[arg(long, default_value_t = 0)]
    dance: u32,
    #[arg(long, default_value_t = 0)]
    visual: u32,
}

#[derive(Args)]
struct ExamArgs {
    /// Final exam placement (1-3, anything else counts as unplaced)
    #[arg(long, default_value_t = 1)]
    position: u32,
    #[arg(long, value_enum, default_value_t = GameMode::Pro)]
    mode: GameMode,
    /// Final exam score (defaults to `scoring.reference_exam_score`)
    #[arg(long)]
    exam_score: Option<u64>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl ExamArgs {
    fn to_input(&self, attributes: AttributeTriple) -> FinalResultInput {
        FinalResultInput {
            mode: self.mode,
            position: Position::from_number(self.position),
            attributes,
            exam_score: self
                .exam_score
                .unwrap_or_else(|| config::get_config().scoring.reference_exam_score),
        }
    }
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = panic_info
            .location()
            .map(|loc| format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_default();
        log(&format!("[PANIC]{} {}", location, msg));
    }));

    let cli = Cli::parse();

    if let Err(e) = paths::ensure_directories() {
        eprintln!("Warning: could not create logs directory: {}", e);
    }

    config::init_config(cli.config.as_deref())?;

    match cli.command {
        Command::Evaluate { status, exam } => {
            let attributes = AttributeTriple::new(status.vocal, status.dance, status.visual);
            run_evaluate(&exam, attributes)
        }
        Command::Extract { response, json } => {
            let status = ocr::read_status_from_response(&response)?;
            print_status(&status, json)
        }
        Command::Scan { image, prior, exam } => {
            let client = OcrClient::from_config(&config::get_config().ocr)?;
            let extracted = ocr::read_status_from_image(&client, &image)?;
            let prior = AttributeTriple::new(prior.vocal, prior.dance, prior.visual);
            let attributes = prior.overlay(extracted);
            if attributes.filled_slots() < 3 {
                return Err(anyhow!(
                    "Status incomplete after OCR (Vo {} / Da {} / Vi {}); pass the missing values with --vocal/--dance/--visual",
                    attributes.vocal,
                    attributes.dance,
                    attributes.visual
                ));
            }
            run_evaluate(&exam, attributes)
        }
        Command::Config { write_default } => {
            AppConfig::save_default(&write_default)?;
            log(&format!("Default config written to {}", write_default.display()));
            Ok(())
        }
    }
}

fn run_evaluate(exam: &ExamArgs, attributes: AttributeTriple) -> Result<()> {
    let input = exam.to_input(attributes);
    let report = evaluate(&config::get_config().scoring, &input)?;
    print_report(&report, exam.json)
}

fn print_report(report: &EvaluationReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render_text(report));
    }
    Ok(())
}

fn print_status(status: &AttributeTriple, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(status)?);
    } else {
        println!(
            "Vo {} / Da {} / Vi {}",
            status.vocal, status.dance, status.visual
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::try_parse_from([
            "gakumas-final-eval",
            "evaluate",
            "--vocal",
            "1100",
            "--dance",
            "1200",
            "--visual",
            "1300",
            "--position",
            "2",
            "--mode",
            "master",
            "--exam-score",
            "15000",
        ])
        .unwrap();

        let Command::Evaluate { status, exam } = cli.command else {
            panic!("expected evaluate");
        };
        let input = exam.to_input(AttributeTriple::new(status.vocal, status.dance, status.visual));
        assert_eq!(input.attributes, AttributeTriple::new(1100, 1200, 1300));
        assert_eq!(input.position, Position::Second);
        assert_eq!(input.mode, GameMode::Master);
        assert_eq!(input.exam_score, 15000);
    }

    #[test]
    fn test_evaluate_requires_status() {
        assert!(
            Cli::try_parse_from(["gakumas-final-eval", "evaluate", "--vocal", "1100"]).is_err()
        );
    }

    #[test]
    fn test_parse_scan_with_prior() {
        let cli = Cli::try_parse_from([
            "gakumas-final-eval",
            "--config",
            "my.json",
            "scan",
            "shot.png",
            "--dance",
            "1000",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("my.json")));
        let Command::Scan { image, prior, exam } = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(image, PathBuf::from("shot.png"));
        assert_eq!((prior.vocal, prior.dance, prior.visual), (0, 1000, 0));
        assert_eq!(exam.position, 1);
        assert_eq!(exam.mode, GameMode::Pro);
        assert!(!exam.json);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Cli::try_parse_from([
            "gakumas-final-eval",
            "evaluate",
            "--vocal",
            "1",
            "--dance",
            "1",
            "--visual",
            "1",
            "--mode",
            "legend",
        ])
        .is_err());
    }
}
