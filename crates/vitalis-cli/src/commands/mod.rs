pub mod account;
pub mod analyze;
pub mod chat;
pub mod dashboard;
pub mod export;
pub mod predict;
pub mod theme;
pub mod topic;

use anyhow::{Context, Result};
use rustyline::DefaultEditor;

/// Reads one line from the terminal.
pub fn prompt(label: &str) -> Result<String> {
    let mut editor = DefaultEditor::new().context("Failed to open terminal")?;
    let line = editor
        .readline(label)
        .with_context(|| format!("No input for {}", label.trim_end_matches([':', ' '])))?;
    Ok(line.trim().to_string())
}
