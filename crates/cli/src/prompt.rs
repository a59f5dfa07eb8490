//! Interactive directory prompt

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Ask for the directory to watch on stdin
pub fn ask_directory() -> Result<PathBuf> {
    print!("Directory to watch: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read directory from stdin")?;

    parse_answer(&answer).context("No directory given")
}

/// Trim whitespace and surrounding quotes (pasted or drag-and-dropped paths)
fn parse_answer(answer: &str) -> Option<PathBuf> {
    let trimmed = answer.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}
