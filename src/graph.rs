//! Abstract graph description and DOT serialization
//!
//! Two-phase rendering: project the stage set into a complete,
//! in-memory graph description (nodes with styles, strict-deduplicated
//! directed edges), then hand its DOT form once to the rendering
//! engine. Keeps the engine behind a single textual interface.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::VizError;
use crate::stage::StageSet;

/// Node styling: source stages are visually highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStyle {
    Default,
    Source,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub name: String,
    pub style: NodeStyle,
}

/// A directed edge, oriented consumer → producer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

/// Finished graph description, ready for the rendering engine.
///
/// One node per distinct stage name, one edge per (stage, parent) pair,
/// identical edges collapsed. Node and edge order follow stage
/// encounter order, which seeds the layout deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageGraph {
    pub title: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Edge>,
}

impl StageGraph {
    /// Project a stage set into a graph description.
    ///
    /// The first record seen for a name creates that name's node and
    /// fixes its style; later records with the same name only
    /// contribute edges. A parent name absent from the node lookup
    /// table is a fatal dangling reference: the traversal observed an
    /// input whose producer never resolved to a rendered stage.
    pub fn from_stages(title: &str, stages: &StageSet) -> Result<Self, VizError> {
        let mut nodes: Vec<GraphNode> = Vec::with_capacity(stages.len());
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(stages.len());
        let mut edges: Vec<Edge> = Vec::new();
        let mut edge_seen: HashSet<Edge> = HashSet::new();

        for stage in stages.iter() {
            if !index.contains_key(stage.name.as_str()) {
                let style = if stage.is_source() {
                    NodeStyle::Source
                } else {
                    NodeStyle::Default
                };
                index.insert(stage.name.as_str(), nodes.len());
                nodes.push(GraphNode {
                    name: stage.name.clone(),
                    style,
                });
            }

            for parent in &stage.parents {
                if !index.contains_key(parent.as_str()) {
                    return Err(VizError::DanglingParent {
                        stage: stage.name.clone(),
                        parent: parent.clone(),
                    });
                }
                let edge = Edge {
                    from: stage.name.clone(),
                    to: parent.clone(),
                };
                if edge_seen.insert(edge.clone()) {
                    edges.push(edge);
                }
            }
        }

        Ok(Self {
            title: title.to_string(),
            nodes,
            edges,
        })
    }

    pub fn source_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.style == NodeStyle::Source)
            .count()
    }

    /// Serialize as a strict Graphviz digraph, rank flow right-to-left
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("strict digraph \"{}\" {{\n", escape_dot(&self.title)));
        out.push_str("  rankdir=RL;\n");
        out.push_str("  node [fontname=\"Helvetica\", fontsize=11, shape=box];\n\n");

        for node in &self.nodes {
            match node.style {
                NodeStyle::Source => out.push_str(&format!(
                    "  \"{}\" [style=filled, fillcolor=green];\n",
                    escape_dot(&node.name)
                )),
                NodeStyle::Default => {
                    out.push_str(&format!("  \"{}\";\n", escape_dot(&node.name)))
                }
            }
        }

        out.push('\n');

        for edge in &self.edges {
            out.push_str(&format!(
                "  \"{}\" -> \"{}\";\n",
                escape_dot(&edge.from),
                escape_dot(&edge.to)
            ));
        }

        out.push_str("}\n");
        out
    }
}

fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
