use fabula_core::{RuleBook, RuleId};
use serde::Serialize;

use crate::explorer::Exploration;

/// Which parts of a rule table an exploration reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coverage {
    /// Rules that fired at least once, in declaration order.
    pub reached: Vec<RuleId>,
    /// Rules that never fired, in declaration order.
    pub unreachable: Vec<RuleId>,
    /// Ending labels reached.
    pub endings: Vec<String>,
    /// Number of distinct paths to an ending.
    pub paths: usize,
    /// Number of distinct states expanded.
    pub states: usize,
    /// True if the exploration hit its state cap, in which case
    /// `unreachable` may list rules that are in fact reachable.
    pub truncated: bool,
}

impl Coverage {
    /// Compare `rules` against what `exploration` found.
    pub fn of(rules: &RuleBook, exploration: &Exploration) -> Self {
        let (reached, unreachable): (Vec<RuleId>, Vec<RuleId>) = rules
            .ids()
            .partition(|id| exploration.graph.contains_node((*id).into()));

        Self {
            reached,
            unreachable,
            endings: exploration.endings.iter().cloned().collect(),
            paths: exploration.paths.len(),
            states: exploration.states_visited,
            truncated: exploration.truncated,
        }
    }

    /// True if every rule was reached by a complete exploration.
    pub fn is_complete(&self) -> bool {
        self.unreachable.is_empty() && !self.truncated
    }
}
