use std::fmt;

use serde::{Deserialize, Serialize};

use crate::change::Change;
use crate::condition::{Condition, conditions_hold};
use crate::entity::EntityId;
use crate::interaction::Interaction;
use crate::world::WorldState;

/// Stable identifier of a rule: its 1-based position in the rule table.
///
/// `0` is never a rule id; graph consumers use it for the story's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(u32);

impl RuleId {
    /// The id of the rule at `index` in declaration order.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Position of the rule in declaration order.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// The raw numeric id.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A conditional narrative response to a player interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Short name of the rule, used to label graph nodes.
    pub summary: String,
    /// Which triggering entities the rule responds to.
    pub interaction: Interaction,
    /// All of these must hold for the rule to fire.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Applied to the world when the rule fires.
    #[serde(default)]
    pub changes: Vec<Change>,
    /// Narrative text shown to the player. Never inspected by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

impl Rule {
    /// Create a rule with no conditions and no changes.
    pub fn new(summary: impl Into<String>, interaction: Interaction) -> Self {
        Self {
            summary: summary.into(),
            interaction,
            conditions: Vec::new(),
            changes: Vec::new(),
            narrative: None,
        }
    }

    /// Add a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add a change.
    pub fn with_change(mut self, change: Change) -> Self {
        self.changes.push(change);
        self
    }

    /// Set the narrative text.
    pub fn with_narrative(mut self, narrative: impl Into<String>) -> Self {
        self.narrative = Some(narrative.into());
        self
    }

    /// True if the rule responds to `trigger` and all its conditions hold.
    pub fn matches(&self, world: &WorldState, trigger: &EntityId) -> bool {
        self.interaction.matches(world, trigger) && conditions_hold(world, &self.conditions)
    }

    /// True if any condition scopes this rule to a scene.
    pub fn is_scene_specific(&self) -> bool {
        self.conditions.iter().any(Condition::is_scene_condition)
    }

    /// The ending label this rule declares, if any.
    ///
    /// With several endings in one change list the earliest listed one is
    /// what the world ends up with.
    pub fn ending(&self) -> Option<&str> {
        self.changes.iter().find_map(|change| match change {
            Change::EndStory(label) => Some(label.as_str()),
            _ => None,
        })
    }
}

/// The ordered rule table of a story.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBook {
    rules: Vec<Rule>,
}

impl RuleBook {
    /// Create a rule book. Rule ids follow the order of `rules`.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Look up a rule by id.
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        if id.get() == 0 {
            return None;
        }
        self.rules.get(id.index())
    }

    /// Iterate over all rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .map(|(index, rule)| (RuleId::from_index(index), rule))
    }

    /// All rule ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = RuleId> + '_ {
        (0..self.rules.len()).map(RuleId::from_index)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for RuleBook {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
