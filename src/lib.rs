//! Gakumas Final Evaluation
//!
//! Predicts the end-of-produce evaluation from a character's status, the
//! final exam placement and the final exam score, and answers how many exam
//! points each rank needs. Status values can be read from a screenshot
//! through an OCR provider.

pub mod config;
pub mod error;
pub mod ocr;
pub mod paths;
pub mod scoring;

pub use error::EvalError;

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

/// Logs a message to stderr and, when the logs directory exists, to the log
/// file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    eprint!("{}", line);
    let logs_dir = paths::get_logs_dir();
    if !logs_dir.is_dir() {
        return;
    }
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(logs_dir.join("gakumas_final_eval.log"))
    {
        let _ = file.write_all(line.as_bytes());
    }
}
