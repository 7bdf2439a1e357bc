use std::path::Path;

use colored::Colorize;
use fabula_core::{EntityId, WorldState};
use fabula_engine::{Resolution, candidates, resolve, specificity};

pub fn run(path: &Path, ids: &[String]) -> Result<(), String> {
    let story = super::load_story(path)?;
    let mut world = story.initial_world();

    for (step, id) in ids.iter().enumerate() {
        let trigger = EntityId::new(id.as_str());
        let available = world.interactables().contains(&trigger);

        let considered = candidates(&world, &trigger, story.rules());
        let Resolution { world: next, rule } = resolve(&world, &trigger, story.rules());

        let marker = if available {
            String::new()
        } else {
            format!(" {}", "(not available here)".dimmed())
        };
        match rule.and_then(|rule_id| story.rules().get(rule_id).map(|r| (rule_id, r))) {
            Some((rule_id, matched)) => {
                println!(
                    "  {}. {}{marker} -> rule {rule_id}: {}",
                    step + 1,
                    id.bold(),
                    matched.summary
                );
                if let Some(narrative) = &matched.narrative {
                    println!("     {}", narrative.italic());
                }
            }
            None => println!("  {}. {}{marker} -> default action", step + 1, id.bold()),
        }
        if considered.len() > 1 {
            let scores: Vec<String> = considered
                .iter()
                .filter_map(|id| {
                    story
                        .rules()
                        .get(*id)
                        .map(|r| format!("rule {id} ({})", specificity(r)))
                })
                .collect();
            println!("     {}", format!("candidates: {}", scores.join(", ")).dimmed());
        }

        world = next;
    }

    println!();
    print_world(&world);
    Ok(())
}

fn list<'a>(ids: impl Iterator<Item = &'a EntityId>) -> String {
    let names: Vec<&str> = ids.map(EntityId::as_str).collect();
    if names.is_empty() {
        "—".to_string()
    } else {
        names.join(", ")
    }
}

fn print_world(world: &WorldState) {
    let location = world
        .current_location
        .as_ref()
        .map_or("—", |id| id.as_str());
    let scene = if world.current_scene.is_empty() {
        "—"
    } else {
        world.current_scene.as_str()
    };

    println!("  location:  {location}");
    println!("  scene:     {scene}");
    println!("  present:   {}", list(world.present()));
    println!("  inventory: {}", list(world.inventory()));
    if let Some(ending) = &world.ending {
        println!("  ending:    {}", ending.green().bold());
    }
}
