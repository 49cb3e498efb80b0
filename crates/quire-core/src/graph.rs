//! Knowledge-graph derivation from paper metadata
//!
//! Pure and deterministic: the same paper list always yields structurally
//! identical node and edge sequences, so a force-directed layout consumer
//! can diff successive builds and tests can assert on emission order.
//!
//! Author overlap is O(n²) over paper pairs. That is deliberate at library
//! scale; the exact pairwise policy is part of the contract and must not be
//! silently replaced with an approximation or a size cap.

use serde::{Deserialize, Serialize};

use quire_domain::Paper;

/// Id of the single hub node representing the active workspace.
pub const HUB_NODE_ID: &str = "center";

const HUB_WEIGHT: u32 = 5;
const PAPER_WEIGHT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Hub,
    Paper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    #[serde(rename = "membership")]
    Membership,
    #[serde(rename = "shared-author")]
    SharedAuthor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// `"center"` for the hub, the paper id rendered as decimal otherwise.
    pub id: String,
    pub label: String,
    pub weight: u32,
    pub kind: NodeKind,
    /// Raw author string for display on paper nodes; `None` on the hub.
    pub authors: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Derive the workspace graph from the current paper collection.
///
/// Emission order for a fixed input: hub node, paper nodes in input order,
/// membership edges in input order, then shared-author edges for pairs
/// (i, j) with i < j in input order.
pub fn build_graph(papers: &[Paper], hub_label: &str) -> Graph {
    let mut nodes = Vec::with_capacity(papers.len() + 1);
    let mut edges = Vec::new();

    nodes.push(GraphNode {
        id: HUB_NODE_ID.to_string(),
        label: hub_label.to_string(),
        weight: HUB_WEIGHT,
        kind: NodeKind::Hub,
        authors: None,
    });

    for paper in papers {
        nodes.push(GraphNode {
            id: paper.id.to_string(),
            label: paper.title.clone(),
            weight: PAPER_WEIGHT,
            kind: NodeKind::Paper,
            authors: Some(paper.authors.clone()),
        });
        edges.push(GraphEdge {
            source: HUB_NODE_ID.to_string(),
            target: paper.id.to_string(),
            kind: EdgeKind::Membership,
        });
    }

    // Token sets are computed once per paper; empty tokens are already
    // dropped, so whitespace-only author fields can never match.
    let token_sets: Vec<_> = papers.iter().map(|p| p.author_tokens()).collect();
    for i in 0..papers.len() {
        for j in (i + 1)..papers.len() {
            if token_sets[i].intersection(&token_sets[j]).next().is_some() {
                edges.push(GraphEdge {
                    source: papers[i].id.to_string(),
                    target: papers[j].id.to_string(),
                    kind: EdgeKind::SharedAuthor,
                });
            }
        }
    }

    Graph { nodes, edges }
}
