use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::change::{Change, change_world};
use crate::entity::{Entities, EntityId};
use crate::error::{FabulaError, FabulaResult};
use crate::lint::{LintWarning, lint};
use crate::rule::{Rule, RuleBook, RuleId};
use crate::world::WorldState;

/// Story content as handed over by a loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDefinition {
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Declared character ids.
    #[serde(default)]
    pub characters: Vec<EntityId>,
    /// Declared item ids.
    #[serde(default)]
    pub items: Vec<EntityId>,
    /// Declared location ids.
    #[serde(default)]
    pub locations: Vec<EntityId>,
    /// Changes that set up the starting world.
    #[serde(default)]
    pub start: Vec<Change>,
    /// The rule table. Between equally specific rules the later one wins.
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl StoryDefinition {
    /// Parse a definition from JSON.
    pub fn from_json(json: &str) -> FabulaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Validated, immutable story content.
#[derive(Debug, Clone)]
pub struct Story {
    title: String,
    characters: Vec<EntityId>,
    items: Vec<EntityId>,
    locations: Vec<EntityId>,
    start: Vec<Change>,
    rules: RuleBook,
}

impl Story {
    /// Validate a definition.
    ///
    /// Fails when an id is declared twice or a rule has no summary.
    pub fn new(definition: StoryDefinition) -> FabulaResult<Self> {
        let mut seen = HashSet::new();
        for id in definition
            .characters
            .iter()
            .chain(&definition.items)
            .chain(&definition.locations)
        {
            if !seen.insert(id) {
                return Err(FabulaError::DuplicateId(id.clone()));
            }
        }

        for (index, rule) in definition.rules.iter().enumerate() {
            if rule.summary.trim().is_empty() {
                return Err(FabulaError::EmptyRuleSummary(RuleId::from_index(index)));
            }
        }

        Ok(Self {
            title: definition.title,
            characters: definition.characters,
            items: definition.items,
            locations: definition.locations,
            start: definition.start,
            rules: RuleBook::new(definition.rules),
        })
    }

    /// Parse and validate a story from JSON.
    pub fn from_json(json: &str) -> FabulaResult<Self> {
        Self::new(StoryDefinition::from_json(json)?)
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Declared character ids.
    pub fn characters(&self) -> &[EntityId] {
        &self.characters
    }

    /// Declared item ids.
    pub fn items(&self) -> &[EntityId] {
        &self.items
    }

    /// Declared location ids.
    pub fn locations(&self) -> &[EntityId] {
        &self.locations
    }

    /// The changes that set up the starting world.
    pub fn start(&self) -> &[Change] {
        &self.start
    }

    /// The rule table.
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// The world before the player's first interaction.
    pub fn initial_world(&self) -> WorldState {
        let entities = Entities::initialize(&self.characters, &self.items, &self.locations);
        change_world(&self.start, WorldState::new(entities))
    }

    /// Report references to undeclared or wrong-kind ids.
    pub fn lint(&self) -> Vec<LintWarning> {
        lint(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::Interaction;

    const HARRY: &str = r#"{
        "title": "The Marsh",
        "characters": ["Harry"],
        "items": ["NoteFromHarry"],
        "locations": ["Garden", "Marsh"],
        "start": [
            { "set_current_location": "Garden" },
            { "move_character_to_location": { "character": "Harry", "location": "Garden" } },
            { "load_scene": "learnOfMystery" }
        ],
        "rules": [
            {
                "summary": "get note from harry",
                "interaction": { "with_id": "Harry" },
                "conditions": [{ "current_scene_is": "learnOfMystery" }],
                "changes": [{ "move_item_to_inventory": "NoteFromHarry" }],
                "narrative": "Harry hands you a crumpled note."
            }
        ]
    }"#;

    #[test]
    fn parse_story() {
        let story = Story::from_json(HARRY).unwrap();
        assert_eq!(story.title(), "The Marsh");
        assert_eq!(story.characters(), &[EntityId::from("Harry")]);
        assert_eq!(story.rules().len(), 1);
        assert_eq!(story.start().len(), 3);
    }

    #[test]
    fn initial_world_applies_start() {
        let world = Story::from_json(HARRY).unwrap().initial_world();
        assert_eq!(world.current_location, Some("Garden".into()));
        assert_eq!(world.current_scene, "learnOfMystery");
        assert!(world.history.is_empty());
        assert!(world.ending.is_none());
        assert_eq!(
            world.interactables(),
            vec![EntityId::from("Harry"), EntityId::from("Garden")]
        );
    }

    #[test]
    fn duplicate_ids_rejected() {
        let definition = StoryDefinition {
            characters: vec!["Key".into()],
            items: vec!["Key".into()],
            ..StoryDefinition::default()
        };
        let err = Story::new(definition).unwrap_err();
        assert!(matches!(err, FabulaError::DuplicateId(id) if id.as_str() == "Key"));
    }

    #[test]
    fn empty_summary_rejected() {
        let definition = StoryDefinition {
            rules: vec![
                Rule::new("fine", Interaction::WithAnything),
                Rule::new("  ", Interaction::WithAnything),
            ],
            ..StoryDefinition::default()
        };
        let err = Story::new(definition).unwrap_err();
        assert_eq!(err.to_string(), "rule 2 has an empty summary");
    }

    #[test]
    fn malformed_json_rejected() {
        let err = Story::from_json("{ \"rules\": 3 }").unwrap_err();
        assert!(matches!(err, FabulaError::Parse(_)));
    }
}
