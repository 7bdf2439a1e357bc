use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use fabula_core::Interaction;
use fabula_engine::{Coverage, ExploreConfig, Explorer};

pub fn run(path: &Path, max_states: usize, strict: bool) -> Result<(), String> {
    let story = super::load_story(path)?;

    let warnings = story.lint();
    super::print_warnings(&warnings);

    let exploration = Explorer::new(story.rules())
        .with_config(ExploreConfig::default().with_max_states(max_states))
        .explore(&story.initial_world());
    let coverage = Coverage::of(story.rules(), &exploration);

    println!("  {}", super::display_title(&story, path).bold());
    println!(
        "  {} rules, {} states, {} paths",
        story.rules().len(),
        coverage.states,
        coverage.paths
    );
    if coverage.endings.is_empty() {
        println!("  No endings reached.");
    } else {
        println!("  endings: {}", coverage.endings.join(", "));
    }
    if coverage.truncated {
        println!(
            "  {}",
            format!("exploration stopped after {max_states} states").yellow()
        );
    }

    if !coverage.unreachable.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Rule", "Summary", "Interaction"]);

        for id in &coverage.unreachable {
            if let Some(rule) = story.rules().get(*id) {
                table.add_row(vec![
                    id.to_string(),
                    rule.summary.clone(),
                    describe(&rule.interaction),
                ]);
            }
        }

        println!();
        println!("{table}");
        println!(
            "  {} unreachable rule{}",
            coverage.unreachable.len(),
            if coverage.unreachable.len() == 1 { "" } else { "s" },
        );
    }

    if warnings.is_empty() && coverage.is_complete() {
        println!("  All checks passed.");
        return Ok(());
    }

    if strict {
        let mut problems = Vec::new();
        if !warnings.is_empty() {
            problems.push(format!("{} lint warning(s)", warnings.len()));
        }
        if !coverage.unreachable.is_empty() {
            problems.push(format!("{} unreachable rule(s)", coverage.unreachable.len()));
        }
        if coverage.truncated {
            problems.push("exploration truncated".to_string());
        }
        return Err(format!("check failed: {}", problems.join(", ")));
    }

    Ok(())
}

fn describe(interaction: &Interaction) -> String {
    match interaction {
        Interaction::WithId(id) => id.to_string(),
        Interaction::WithAnyItem => "any item".to_string(),
        Interaction::WithAnyLocation => "any location".to_string(),
        Interaction::WithAnyCharacter => "any character".to_string(),
        Interaction::WithAnything => "anything".to_string(),
    }
}
