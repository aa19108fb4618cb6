use std::cmp::Ordering;

use crate::{
    numbering::{NumberingDescriptor, NumberingOrigin, format_label},
    render::RenderCache,
    richtext::InlineSpan,
};

use super::{Address, BlockKind, BlockNode, DocumentGraph, NodeId};

/// A block that passed classification and is ready for placement.
#[derive(Debug, Clone)]
pub struct ClassifiedBlock {
    pub kind: BlockKind,
    /// Hierarchy level, at least 1.
    pub level: u32,
    pub style: String,
    pub content: Vec<InlineSpan>,
    pub numbering: Option<NumberingDescriptor>,
}

/// Outcome of comparing an anchor node with the block being placed.
#[derive(Debug, Clone, Copy)]
enum Step {
    Child,
    Sibling,
    /// Retry with the anchor's parent.
    Backtrack(NodeId),
}

/// Builds the outline in one forward pass.
///
/// Each pushed block is compared against the previously placed one. When
/// the new block closes the current subtree the builder walks up parent
/// links in a loop until it finds where the block belongs.
pub struct GraphBuilder {
    nodes: Vec<BlockNode>,
    roots: Vec<NodeId>,
    current: Option<NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![],
            roots: vec![],
            current: None,
        }
    }

    pub fn push(&mut self, block: ClassifiedBlock) {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(BlockNode {
            id,
            kind: block.kind,
            style: block.style,
            level: block.level,
            content: block.content,
            rendered: RenderCache::default(),
            parent: None,
            children: vec![],
            previous: None,
            next: None,
            address: Address::root(),
            heading_item: None,
            numbering: block.numbering,
            label: None,
        });

        let Some(current) = self.current.replace(id) else {
            self.roots.push(id);
            self.restart_numbering(id);
            log::trace!("placed first block {} at root [0]", self.describe(id));
            return;
        };

        self.nodes[current.index()].next = Some(id);
        self.nodes[id.index()].previous = Some(current);
        self.place(current, id);
    }

    /// Completes the outline and renders each numbered node's label.
    ///
    /// A label whose index the numeral cannot express (a letter list
    /// starting at 0, a Roman counter past 3999) is left unset.
    pub fn finish(mut self) -> DocumentGraph {
        for node in &mut self.nodes {
            if let Some(descriptor) = &node.numbering
                && let Some(index) = descriptor.index()
            {
                match format_label(descriptor, index) {
                    Ok(label) => node.label = Some(label),
                    Err(e) => log::warn!(
                        "no label for block #{} at [{}]: {e}",
                        node.id.0,
                        node.address
                    ),
                }
            }
        }

        log::debug!(
            "built outline with {} nodes and {} roots",
            self.nodes.len(),
            self.roots.len()
        );
        DocumentGraph {
            nodes: self.nodes,
            roots: self.roots,
        }
    }

    fn place(&mut self, current: NodeId, pending: NodeId) {
        let mut anchor = current;
        loop {
            match self.step(anchor, pending) {
                Step::Child => return self.attach_child(anchor, pending),
                Step::Sibling => return self.attach_sibling(anchor, pending),
                Step::Backtrack(parent) => {
                    log::debug!(
                        "{} closes {}, backtracking to {}",
                        self.describe(pending),
                        self.describe(anchor),
                        self.describe(parent)
                    );
                    anchor = parent;
                }
            }
        }
    }

    fn step(&self, anchor: NodeId, pending: NodeId) -> Step {
        let a = &self.nodes[anchor.index()];
        let p = &self.nodes[pending.index()];

        match (a.kind, p.kind) {
            (BlockKind::Heading, BlockKind::Paragraph) => Step::Child,
            // A heading cannot live inside a paragraph subtree; find the
            // heading (or root) that governs it.
            (BlockKind::Paragraph, BlockKind::Heading) => match a.parent {
                Some(parent) => Step::Backtrack(parent),
                None => Step::Sibling,
            },
            _ => match a.level.cmp(&p.level) {
                Ordering::Less => Step::Child,
                Ordering::Equal => Step::Sibling,
                Ordering::Greater => match a.parent {
                    Some(parent) if self.nodes[parent.index()].kind == a.kind => {
                        Step::Backtrack(parent)
                    }
                    // Top of a paragraph run under a heading, or a root
                    _ => Step::Sibling,
                },
            },
        }
    }

    fn attach_child(&mut self, anchor: NodeId, pending: NodeId) {
        let a = &self.nodes[anchor.index()];
        let kind = self.nodes[pending.index()].kind;

        // Backtracking past a skipped level can land on an anchor that
        // already has children of this kind; the block then follows them.
        let last_of_kind = a
            .children
            .iter()
            .rev()
            .find(|child| self.nodes[child.index()].kind == kind)
            .copied();
        if let Some(sibling) = last_of_kind {
            log::debug!(
                "{} follows existing child {} of {}",
                self.describe(pending),
                self.describe(sibling),
                self.describe(anchor)
            );
            return self.attach_sibling(sibling, pending);
        }

        let (address, heading_item) = match (a.kind, kind) {
            (BlockKind::Heading, BlockKind::Paragraph) => {
                (Address::root(), Some(a.address.clone()))
            }
            (BlockKind::Paragraph, BlockKind::Paragraph) => {
                (a.address.first_child(), a.heading_item.clone())
            }
            (_, BlockKind::Heading) => (a.address.first_child(), None),
        };

        self.nodes[anchor.index()].children.push(pending);
        let node = &mut self.nodes[pending.index()];
        node.parent = Some(anchor);
        node.address = address;
        node.heading_item = heading_item;
        self.restart_numbering(pending);

        log::trace!(
            "placed {} as first child of {}",
            self.describe(pending),
            self.describe(anchor)
        );
    }

    fn attach_sibling(&mut self, anchor: NodeId, pending: NodeId) {
        let a = &self.nodes[anchor.index()];
        let address = a.address.next_sibling();
        let parent = a.parent;
        let heading_item = match self.nodes[pending.index()].kind {
            BlockKind::Paragraph => a.heading_item.clone(),
            BlockKind::Heading => None,
        };
        let previous_index = a.numbering.as_ref().and_then(NumberingDescriptor::index);

        match parent {
            Some(parent) => self.nodes[parent.index()].children.push(pending),
            None => self.roots.push(pending),
        }
        let node = &mut self.nodes[pending.index()];
        node.parent = parent;
        node.address = address;
        node.heading_item = heading_item;
        self.continue_numbering(pending, previous_index);

        log::trace!(
            "placed {} as sibling of {}",
            self.describe(pending),
            self.describe(anchor)
        );
    }

    fn restart_numbering(&mut self, id: NodeId) {
        self.assign_index(id, |descriptor| descriptor.start());
    }

    /// Continues the anchor's count, or restarts when the anchor had none.
    fn continue_numbering(&mut self, id: NodeId, previous: Option<u32>) {
        self.assign_index(id, |descriptor| {
            previous.map_or(descriptor.start(), |index| index + 1)
        });
    }

    fn assign_index(&mut self, id: NodeId, index_of: impl FnOnce(&NumberingDescriptor) -> u32) {
        // Detected markers keep the value printed in the text
        if let Some(descriptor) = &mut self.nodes[id.index()].numbering
            && descriptor.origin() != NumberingOrigin::DetectedMarker
        {
            let index = index_of(descriptor);
            descriptor.set_index(index);
        }
    }

    fn describe(&self, id: NodeId) -> String {
        let node = &self.nodes[id.index()];
        let tag = match node.kind {
            BlockKind::Heading => 'H',
            BlockKind::Paragraph => 'P',
        };
        format!("#{} {tag}{} [{}]", id.0, node.level, node.address)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
