pub mod check;
pub mod graph;
pub mod paths;
pub mod resolve;

use std::path::Path;

use colored::Colorize;
use fabula_core::{LintWarning, Story};

/// Read and validate a story file.
fn load_story(path: &Path) -> Result<Story, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let story = Story::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))?;

    tracing::info!(
        title = story.title(),
        rules = story.rules().len(),
        "loaded story"
    );
    Ok(story)
}

/// Print lint warnings to stderr.
fn print_warnings(warnings: &[LintWarning]) {
    for warning in warnings {
        eprintln!("  {} {warning}", "warning:".yellow().bold());
    }
    if !warnings.is_empty() {
        eprintln!(
            "  {} warning{}",
            warnings.len(),
            if warnings.len() == 1 { "" } else { "s" },
        );
    }
}

/// The story title, or the file name when the story has none.
fn display_title(story: &Story, path: &Path) -> String {
    if story.title().is_empty() {
        path.display().to_string()
    } else {
        story.title().to_string()
    }
}
