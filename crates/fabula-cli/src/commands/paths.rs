use std::path::Path;

use fabula_core::Rule;
use fabula_engine::explore;

pub fn run(path: &Path) -> Result<(), String> {
    let story = super::load_story(path)?;
    let exploration = explore(&story.initial_world(), story.rules());

    if exploration.paths.is_empty() {
        println!("  No path reaches an ending.");
        return Ok(());
    }

    for story_path in &exploration.paths {
        let names: Vec<&str> = story_path
            .nodes()
            .into_iter()
            .filter_map(|id| exploration.graph.node(id))
            .map(|node| node.label.name.as_str())
            .collect();
        let ending = story_path
            .last_node()
            .and_then(|id| id.rule())
            .and_then(|id| story.rules().get(id))
            .and_then(Rule::ending)
            .map(|label| format!(" [{label}]"))
            .unwrap_or_default();

        println!("  {}{ending}", names.join(" -> "));
    }

    println!();
    println!(
        "  {} path{}",
        exploration.paths.len(),
        if exploration.paths.len() == 1 { "" } else { "s" },
    );

    Ok(())
}
