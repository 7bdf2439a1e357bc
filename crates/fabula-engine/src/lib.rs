//! Rule resolution and state-space exploration for Fabula stories.
//!
//! The [`resolver`] picks the single rule that answers an interaction and
//! applies it. The [`explorer`] drives the resolver over every reachable
//! world state and assembles a [`StoryGraph`] of rules and endings plus the
//! distinct paths through it.

/// Coverage of a rule table by an exploration.
pub mod analysis;
/// Configuration types for exploration runs.
pub mod config;
/// Exhaustive exploration of reachable world states.
pub mod explorer;
/// The narrative graph and its DOT rendering.
pub mod graph;
/// Specificity-weighted rule selection.
pub mod resolver;

/// Re-export of [`analysis::Coverage`].
pub use analysis::Coverage;
/// Re-export of [`config::ExploreConfig`].
pub use config::ExploreConfig;
/// Re-exports of the explorer entry points and results.
pub use explorer::{Exploration, Explorer, Transition, explore};
/// Re-exports of graph types.
pub use graph::{Edge, Node, NodeId, NodeLabel, StoryGraph, StoryPath};
/// Re-exports of resolver functions.
pub use resolver::{Resolution, candidates, default_changes, resolve, select, specificity};
