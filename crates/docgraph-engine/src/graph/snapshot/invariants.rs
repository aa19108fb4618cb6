use crate::graph::{Address, BlockKind, BlockNode, DocumentGraph, NodeId};

/// Validates builder output invariants.
///
/// Asserts that:
/// - The `next` chain visits every node once, in document order, and
///   `previous` mirrors it
/// - Every node is either a root without parent or listed exactly once in
///   its parent's children
/// - Adjacent roots, and adjacent same-kind children, have consecutive
///   addresses
/// - The first child of each kind starts at the expected address
/// - A paragraph's `heading_item` is its nearest heading ancestor's address
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(graph: &DocumentGraph) {
    let nodes = graph.nodes();

    let chain: Vec<NodeId> = graph.reading_order().map(BlockNode::id).collect();
    let arena: Vec<NodeId> = nodes.iter().map(BlockNode::id).collect();
    assert_eq!(chain, arena, "reading-order chain does not follow document order");
    if let Some(first) = nodes.first() {
        assert!(
            first.previous().is_none(),
            "first node has a previous link: {:?}",
            first.previous()
        );
    }
    for pair in nodes.windows(2) {
        assert_eq!(
            pair[1].previous(),
            Some(pair[0].id()),
            "previous link of {:?} does not mirror next",
            pair[1].id()
        );
    }

    let mut placements = vec![0usize; nodes.len()];
    for root in graph.roots() {
        placements[root.index()] += 1;
        assert!(
            graph[*root].parent().is_none(),
            "root {root:?} has a parent"
        );
    }
    for node in nodes {
        for child in node.children() {
            placements[child.index()] += 1;
            assert_eq!(
                graph[*child].parent(),
                Some(node.id()),
                "child {child:?} of {:?} points at another parent",
                node.id()
            );
        }
    }
    for (index, count) in placements.iter().enumerate() {
        assert_eq!(*count, 1, "node #{index} is placed {count} times");
    }

    check_siblings(graph, graph.roots(), true);
    for node in nodes {
        check_siblings(graph, node.children(), false);
        check_first_children(graph, node);

        assert_eq!(
            node.heading_item(),
            governing_heading(graph, node),
            "wrong heading_item for {:?} at [{}]",
            node.id(),
            node.address()
        );
    }
}

fn check_siblings(graph: &DocumentGraph, siblings: &[NodeId], mixed_kinds: bool) {
    for pair in siblings.windows(2) {
        let (a, b) = (&graph[pair[0]], &graph[pair[1]]);
        if mixed_kinds || a.kind() == b.kind() {
            assert_eq!(
                b.address(),
                &a.address().next_sibling(),
                "sibling {:?} does not follow {:?}",
                b.id(),
                a.id()
            );
        }
    }
}

fn check_first_children(graph: &DocumentGraph, node: &BlockNode) {
    for kind in [BlockKind::Heading, BlockKind::Paragraph] {
        let Some(first) = node
            .children()
            .iter()
            .map(|id| &graph[*id])
            .find(|child| child.kind() == kind)
        else {
            continue;
        };
        let expected = if node.is_heading() && kind == BlockKind::Paragraph {
            Address::root()
        } else {
            node.address().first_child()
        };
        assert_eq!(
            first.address(),
            &expected,
            "first {kind:?} child of {:?} has the wrong address",
            node.id()
        );
    }
}

fn governing_heading<'a>(graph: &'a DocumentGraph, node: &BlockNode) -> Option<&'a Address> {
    if node.is_heading() {
        return None;
    }
    let mut cursor = node.parent();
    while let Some(id) = cursor {
        let ancestor = &graph[id];
        if ancestor.is_heading() {
            return Some(ancestor.address());
        }
        cursor = ancestor.parent();
    }
    None
}
