//! Core types for Fabula: entities, world state, conditions, and rules.
//!
//! This crate defines the declarative content of an interactive story and
//! the pure functions that update a world state. It performs no I/O and has
//! no notion of rule selection; see `fabula-engine` for resolution and
//! state-space exploration.

/// World updates and the change-list fold.
pub mod change;
/// Conditions a rule places on the world.
pub mod condition;
/// Entity identifiers, kinds, and per-entity state.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Interaction matchers that select which triggers a rule answers.
pub mod interaction;
/// Static checks over story content.
pub mod lint;
/// Rules and the ordered rule table.
pub mod rule;
/// Story definitions and validated stories.
pub mod story;
/// The immutable world state and its observable projection.
pub mod world;

/// Re-export change types.
pub use change::{Change, change_world};
/// Re-export condition types.
pub use condition::{Condition, conditions_hold};
/// Re-export entity types.
pub use entity::{CharacterPlacement, Entities, EntityId, EntityKind, EntityState, ItemPlacement};
/// Re-export error types.
pub use error::{FabulaError, FabulaResult};
/// Re-export interaction matchers.
pub use interaction::Interaction;
/// Re-export lint types.
pub use lint::{LintWarning, Site};
/// Re-export rule types.
pub use rule::{Rule, RuleBook, RuleId};
/// Re-export story types.
pub use story::{Story, StoryDefinition};
/// Re-export world types.
pub use world::{Observation, WorldState};
