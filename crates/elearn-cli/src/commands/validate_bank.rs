//! The `elearn validate-bank` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use elearn_core::question_bank::{parse_question_bank, validate_question_bank};
use elearn_store::load_config_from;

pub fn execute(bank_path: Option<PathBuf>, config_path: Option<&Path>) -> Result<()> {
    let bank_path = match bank_path {
        Some(path) => path,
        None => load_config_from(config_path)?.question_bank_path,
    };
    let bank = parse_question_bank(&bank_path)?;

    for pool in &bank.courses {
        println!(
            "Question pool: {} ({} questions)",
            pool.name,
            pool.questions.len()
        );
    }

    let warnings = validate_question_bank(&bank);
    for w in &warnings {
        println!("  [{}] WARNING: {}", w.course, w.message);
    }

    if warnings.is_empty() {
        println!("All question pools valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
