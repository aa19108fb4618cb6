use serde::Serialize;

use crate::{
    graph::{BlockKind, DocumentGraph},
    render::TextFormat,
};

/// Snapshot of a built outline for testing.
#[derive(Debug, Serialize)]
pub struct Snap {
    /// Nodes in depth-first order.
    pub nodes: Vec<NodeSnap>,
}

/// Snapshot of a single node for testing.
#[derive(Debug, Serialize)]
pub struct NodeSnap {
    /// Nesting depth in the forest, 0 for roots.
    pub depth: usize,
    pub kind: BlockKind,
    pub level: u32,
    /// Dot-joined address (e.g., "0.1").
    pub address: String,
    /// Dot-joined governing heading address, paragraphs only.
    pub heading_item: Option<String>,
    pub label: Option<String>,
    /// Plain-text rendering.
    pub text: String,
}

impl NodeSnap {
    /// One outline line: `H2 0.1 Title` or `P1 0 ^0.1 [a)] Body`.
    pub fn line(&self) -> String {
        let mut line = "  ".repeat(self.depth);
        match self.kind {
            BlockKind::Heading => line.push_str(&format!("H{} {}", self.level, self.address)),
            BlockKind::Paragraph => line.push_str(&format!(
                "P{} {} ^{}",
                self.level,
                self.address,
                self.heading_item.as_deref().unwrap_or("-")
            )),
        }
        if let Some(label) = &self.label {
            line.push_str(&format!(" [{label}]"));
        }
        if !self.text.is_empty() {
            line.push(' ');
            line.push_str(&self.text);
        }
        line
    }
}

impl Snap {
    pub fn lines(&self) -> Vec<String> {
        self.nodes.iter().map(NodeSnap::line).collect()
    }

    /// All lines joined with newlines.
    pub fn outline(&self) -> String {
        self.lines().join("\n")
    }
}

/// Converts a built graph into a snapshot, depth-first.
pub fn normalize(graph: &DocumentGraph) -> Snap {
    let nodes = graph
        .walk()
        .into_iter()
        .map(|(depth, node)| NodeSnap {
            depth,
            kind: node.kind(),
            level: node.level(),
            address: node.address().to_string(),
            heading_item: node.heading_item().map(ToString::to_string),
            label: node.numbering_label().map(str::to_string),
            text: node.render(TextFormat::Plain).to_string(),
        })
        .collect();

    Snap { nodes }
}
