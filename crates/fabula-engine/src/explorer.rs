//! Exhaustive depth-first exploration of the reachable world states.
//!
//! Every interactable of every reachable state is resolved. States are
//! compared by their [`Observation`], so two worlds that differ only in
//! history or in off-screen bookkeeping are explored once.

use std::collections::{BTreeSet, HashSet};

use fabula_core::{EntityId, Observation, RuleBook, RuleId, WorldState};
use serde::Serialize;

use crate::config::ExploreConfig;
use crate::graph::{Edge, Node, NodeId, StoryGraph, StoryPath};
use crate::resolver::{Resolution, resolve};

/// One resolve call made during exploration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// The world before the interaction.
    pub from: WorldState,
    /// The interacted entity.
    pub trigger: EntityId,
    /// The world after the interaction.
    pub to: WorldState,
    /// The rule that fired, if any.
    pub rule: Option<RuleId>,
}

/// Everything an exploration found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exploration {
    /// Rules and endings reached, with the interactions between them.
    pub graph: StoryGraph,
    /// Distinct paths from `Begin` to an ending, in discovery order.
    pub paths: Vec<StoryPath>,
    /// Labels of every ending reached.
    pub endings: BTreeSet<String>,
    /// Number of distinct observable states expanded.
    pub states_visited: usize,
    /// True if the state cap stopped the search early.
    pub truncated: bool,
    /// Every resolve call, when recording was enabled.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<Transition>,
}

/// Runs explorations over a rule table.
#[derive(Debug, Clone)]
pub struct Explorer<'a> {
    rules: &'a RuleBook,
    config: ExploreConfig,
}

struct Accumulator {
    visited: HashSet<Observation>,
    graph: StoryGraph,
    paths: Vec<StoryPath>,
    seen_paths: HashSet<StoryPath>,
    endings: BTreeSet<String>,
    truncated: bool,
    transitions: Vec<Transition>,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            visited: HashSet::new(),
            graph: StoryGraph::new(),
            paths: Vec::new(),
            seen_paths: HashSet::new(),
            endings: BTreeSet::new(),
            truncated: false,
            transitions: Vec::new(),
        }
    }

    /// Mark `world` as visited. Returns false if it was seen before or the
    /// state cap is reached.
    fn visit(&mut self, world: &WorldState, config: &ExploreConfig) -> bool {
        let observation = world.observe();
        if self.visited.contains(&observation) {
            return false;
        }
        if config.is_full(self.visited.len()) {
            self.truncated = true;
            return false;
        }
        self.visited.insert(observation)
    }

    fn add_path(&mut self, path: StoryPath) {
        if self.seen_paths.insert(path.clone()) {
            self.paths.push(path);
        }
    }

    fn finish(self) -> Exploration {
        Exploration {
            graph: self.graph,
            paths: self.paths,
            endings: self.endings,
            states_visited: self.visited.len(),
            truncated: self.truncated,
            transitions: self.transitions,
        }
    }
}

impl<'a> Explorer<'a> {
    /// Create an explorer with the default (unlimited) configuration.
    pub fn new(rules: &'a RuleBook) -> Self {
        Self {
            rules,
            config: ExploreConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ExploreConfig) -> Self {
        self.config = config;
        self
    }

    /// Explore every state reachable from `initial`.
    pub fn explore(&self, initial: &WorldState) -> Exploration {
        tracing::debug!(rules = self.rules.len(), "exploring story");

        let mut acc = Accumulator::new();
        self.walk(&[], initial, NodeId::BEGIN, &mut acc);
        let exploration = acc.finish();

        if exploration.truncated {
            tracing::warn!(
                max_states = self.config.max_states,
                "exploration stopped at the state limit"
            );
        }
        tracing::debug!(
            states = exploration.states_visited,
            nodes = exploration.graph.nodes().len(),
            edges = exploration.graph.edges().len(),
            paths = exploration.paths.len(),
            "exploration finished"
        );
        exploration
    }

    fn rule_node(&self, rule: RuleId, terminal: bool) -> Node {
        let summary = self
            .rules
            .get(rule)
            .map(|r| r.summary.as_str())
            .unwrap_or_default();
        Node::rule(rule, summary, terminal)
    }

    fn walk(&self, path: &[Edge], world: &WorldState, last: NodeId, acc: &mut Accumulator) {
        for trigger in world.interactables() {
            let Resolution { world: next, rule } = resolve(world, &trigger, self.rules);

            if self.config.record_transitions {
                acc.transitions.push(Transition {
                    from: world.clone(),
                    trigger: trigger.clone(),
                    to: next.clone(),
                    rule,
                });
            }

            match (rule, &next.ending) {
                (Some(rule), Some(ending)) => {
                    let edge = Edge::new(last, rule.into(), trigger.as_str());
                    let mut edges = path.to_vec();
                    edges.push(edge.clone());
                    acc.add_path(StoryPath { edges });
                    acc.graph.add_edge(edge);
                    acc.graph.add_node(self.rule_node(rule, true));
                    acc.endings.insert(ending.clone());
                }
                (Some(rule), None) => {
                    if !acc.visit(&next, &self.config) {
                        continue;
                    }
                    let edge = Edge::new(last, rule.into(), trigger.as_str());
                    acc.graph.add_edge(edge.clone());
                    acc.graph.add_node(self.rule_node(rule, false));
                    let mut edges = path.to_vec();
                    edges.push(edge);
                    self.walk(&edges, &next, rule.into(), acc);
                }
                (None, _) => {
                    if !acc.visit(&next, &self.config) {
                        continue;
                    }
                    self.walk(path, &next, last, acc);
                }
            }
        }
    }
}

/// Explore `initial` under `rules` with the default configuration.
pub fn explore(initial: &WorldState, rules: &RuleBook) -> Exploration {
    Explorer::new(rules).explore(initial)
}
