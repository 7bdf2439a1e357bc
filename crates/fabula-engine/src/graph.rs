//! The narrative graph produced by exploration.

use std::fmt::Write as _;

use fabula_core::RuleId;
use serde::Serialize;

/// Identifier of a graph node.
///
/// Rule nodes share the numeric value of their [`RuleId`]; `0` is the
/// synthetic start node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// The start of every path.
    pub const BEGIN: NodeId = NodeId(0);

    /// The raw numeric id.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The rule this node stands for, or `None` for [`NodeId::BEGIN`].
    pub fn rule(self) -> Option<RuleId> {
        match self.0 {
            0 => None,
            n => Some(RuleId::from_index(n as usize - 1)),
        }
    }
}

impl From<RuleId> for NodeId {
    fn from(id: RuleId) -> Self {
        Self(id.get())
    }
}

/// Display data of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NodeLabel {
    /// The rule summary, or `Begin`.
    pub name: String,
    /// True if reaching this node ends the story.
    pub terminal: bool,
}

/// A node of the narrative graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Node {
    /// Node identifier.
    pub id: NodeId,
    /// Display data.
    pub label: NodeLabel,
}

impl Node {
    /// The synthetic start node.
    pub fn begin() -> Self {
        Self {
            id: NodeId::BEGIN,
            label: NodeLabel {
                name: "Begin".to_string(),
                terminal: false,
            },
        }
    }

    /// The node for a rule.
    pub fn rule(id: RuleId, summary: impl Into<String>, terminal: bool) -> Self {
        Self {
            id: id.into(),
            label: NodeLabel {
                name: summary.into(),
                terminal,
            },
        }
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// Source node.
    pub from: NodeId,
    /// Target node.
    pub to: NodeId,
    /// The interaction that led here. Cosmetic only.
    pub label: String,
}

impl Edge {
    /// Create an edge.
    pub fn new(from: NodeId, to: NodeId, label: impl Into<String>) -> Self {
        Self {
            from,
            to,
            label: label.into(),
        }
    }
}

/// Rules and endings connected by the interactions that reach them.
///
/// Nodes and edges keep insertion order and are never duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl StoryGraph {
    /// A graph containing only the start node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::begin()],
            edges: Vec::new(),
        }
    }

    /// Add a node unless an equal one is present. Returns true if added.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.nodes.contains(&node) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Add an edge unless an equal one is present. Returns true if added.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if self.edges.contains(&edge) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// All nodes in insertion order, starting with [`NodeId::BEGIN`].
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// True if a node with this id is present.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Render the graph in Graphviz DOT syntax.
    ///
    /// Terminal nodes are drawn as double octagons.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph story {\n");

        for node in &self.nodes {
            let shape = if node.label.terminal {
                ", shape=doubleoctagon"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "    {} [label=\"{}\"{shape}];",
                node.id.get(),
                escape(&node.label.name)
            );
        }
        for edge in &self.edges {
            let _ = writeln!(
                out,
                "    {} -> {} [label=\"{}\"];",
                edge.from.get(),
                edge.to.get(),
                escape(&edge.label)
            );
        }

        out.push_str("}\n");
        out
    }
}

impl Default for StoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// One way through the story: edges from [`NodeId::BEGIN`] to an ending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StoryPath {
    /// The edges in travel order.
    pub edges: Vec<Edge>,
}

impl StoryPath {
    /// The visited nodes, starting with the first edge's source.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.edges.first().map(|e| e.from).into_iter().collect();
        nodes.extend(self.edges.iter().map(|e| e.to));
        nodes
    }

    /// The node the path ends in.
    pub fn last_node(&self) -> Option<NodeId> {
        self.edges.last().map(|e| e.to)
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True if the path has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
