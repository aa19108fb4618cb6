//! # Document graph
//!
//! The outline forest built from classified blocks. Nodes live in an arena
//! ([`DocumentGraph::nodes`]) in document order and refer to each other by
//! [`NodeId`]: `parent`, `previous` and `next` are plain handles and
//! `children` is an ordered handle list.
//!
//! ## Modules
//!
//! - [`builder`] - single forward pass that places each block
//! - [`snapshot`] - structural invariant checks and a normalized outline view

pub mod builder;
pub mod snapshot;

#[cfg(test)]
mod tests;

use std::fmt;

use docgraph_config::ElementKind;
use serde::Serialize;

use crate::{
    numbering::NumberingDescriptor,
    render::{RenderCache, TextFormat},
    richtext::InlineSpan,
};

pub use builder::{ClassifiedBlock, GraphBuilder};

/// Handle of a node in a [`DocumentGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Positional path of a node, relative to its root list or heading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Address(Vec<u32>);

impl Address {
    pub fn root() -> Self {
        Address(vec![0])
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Address of a first child: this address with `0` appended.
    pub fn first_child(&self) -> Self {
        let mut path = self.0.clone();
        path.push(0);
        Address(path)
    }

    /// Address of the next sibling: last component incremented.
    pub fn next_sibling(&self) -> Self {
        let mut path = self.0.clone();
        if let Some(last) = path.last_mut() {
            *last += 1;
        }
        Address(path)
    }
}

impl From<Vec<u32>> for Address {
    fn from(path: Vec<u32>) -> Self {
        Address(path)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockKind {
    Heading,
    Paragraph,
}

impl From<ElementKind> for BlockKind {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Heading => BlockKind::Heading,
            ElementKind::Paragraph => BlockKind::Paragraph,
        }
    }
}

/// One classified heading or paragraph placed in the outline.
#[derive(Debug, Clone)]
pub struct BlockNode {
    id: NodeId,
    kind: BlockKind,
    style: String,
    level: u32,
    content: Vec<InlineSpan>,
    rendered: RenderCache,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    previous: Option<NodeId>,
    next: Option<NodeId>,
    address: Address,
    heading_item: Option<Address>,
    numbering: Option<NumberingDescriptor>,
    label: Option<String>,
}

impl BlockNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn is_heading(&self) -> bool {
        self.kind == BlockKind::Heading
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    /// Hierarchy level within the node's category, always at least 1.
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn content(&self) -> &[InlineSpan] {
        &self.content
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Address of the governing heading. Always `None` for headings.
    pub fn heading_item(&self) -> Option<&Address> {
        self.heading_item.as_ref()
    }

    pub fn numbering(&self) -> Option<&NumberingDescriptor> {
        self.numbering.as_ref()
    }

    /// The list marker text, e.g. `2.b)`, once an index is known.
    pub fn numbering_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Text in `format`, rendered on first access.
    pub fn render(&self, format: TextFormat) -> &str {
        self.rendered.get_or_render(&self.content, format)
    }

    /// `0.1.2` for headings, `(<heading address>)\nP_<address>` for paragraphs.
    pub fn identifier(&self) -> String {
        match self.kind {
            BlockKind::Heading => self.address.to_string(),
            BlockKind::Paragraph => {
                let heading = self
                    .heading_item
                    .as_ref()
                    .map_or_else(|| "NONE".to_string(), Address::to_string);
                format!("({heading})\nP_{}", self.address)
            }
        }
    }
}

/// The built outline: an arena of nodes plus the ordered root list.
#[derive(Debug, Clone, Default)]
pub struct DocumentGraph {
    nodes: Vec<BlockNode>,
    roots: Vec<NodeId>,
}

impl DocumentGraph {
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn root_nodes(&self) -> impl Iterator<Item = &BlockNode> + '_ {
        self.roots.iter().map(|id| &self.nodes[id.index()])
    }

    /// All classified nodes in document order.
    pub fn nodes(&self) -> &[BlockNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&BlockNode> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &BlockNode> + '_ {
        self.node(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|child| &self.nodes[child.index()])
    }

    pub fn parent(&self, id: NodeId) -> Option<&BlockNode> {
        self.node(id)?.parent.and_then(|p| self.node(p))
    }

    /// Walks the `next` chain from the first node.
    pub fn reading_order(&self) -> ReadingOrder<'_> {
        ReadingOrder {
            graph: self,
            cursor: self.nodes.first().map(|n| n.id),
        }
    }

    /// Depth-first walk of the forest, yielding each node with its depth.
    pub fn walk(&self) -> Vec<(usize, &BlockNode)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, NodeId)> = self.roots.iter().rev().map(|id| (0, *id)).collect();
        while let Some((depth, id)) = stack.pop() {
            let node = &self.nodes[id.index()];
            out.push((depth, node));
            stack.extend(node.children.iter().rev().map(|c| (depth + 1, *c)));
        }
        out
    }
}

impl std::ops::Index<NodeId> for DocumentGraph {
    type Output = BlockNode;

    fn index(&self, id: NodeId) -> &BlockNode {
        &self.nodes[id.index()]
    }
}

pub struct ReadingOrder<'a> {
    graph: &'a DocumentGraph,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for ReadingOrder<'a> {
    type Item = &'a BlockNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.graph.node(self.cursor?)?;
        self.cursor = node.next;
        Some(node)
    }
}
