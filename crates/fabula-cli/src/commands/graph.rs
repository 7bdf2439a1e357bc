use std::path::Path;

use fabula_engine::{Exploration, explore};

pub fn run(path: &Path, format: &str, output: Option<&Path>) -> Result<(), String> {
    let story = super::load_story(path)?;
    let exploration = explore(&story.initial_world(), story.rules());

    let content = match format {
        "dot" => exploration.graph.to_dot(),
        "json" => export_json(&exploration)?,
        _ => {
            return Err(format!(
                "unsupported format: \"{format}\". Use: dot, json"
            ));
        }
    };

    if let Some(out) = output {
        std::fs::write(out, &content)
            .map_err(|e| format!("cannot write to {}: {e}", out.display()))?;
        println!("  Wrote {}", out.display());
    } else {
        print!("{content}");
    }

    Ok(())
}

fn export_json(exploration: &Exploration) -> Result<String, String> {
    let export = serde_json::json!({
        "nodes": exploration.graph.nodes(),
        "edges": exploration.graph.edges(),
        "paths": exploration.paths,
        "endings": exploration.endings,
    });

    let mut json = serde_json::to_string_pretty(&export)
        .map_err(|e| format!("JSON serialization error: {e}"))?;
    json.push('\n');
    Ok(json)
}
