//! Unit tests for outline construction.
//!
//! Blocks are pushed straight into the builder; classification and
//! numbering resolution are covered by the pipeline tests.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::{
    graph::{
        Address, BlockKind, ClassifiedBlock, DocumentGraph, GraphBuilder, NodeId,
        snapshot::{self, normalize},
    },
    numbering::{
        LevelFormat, ListReference, NumberingDescriptor, NumberingOrigin, NumeralType,
    },
    richtext::{ContentRun, InlineSpan},
};

fn block(kind: BlockKind, level: u32, text: &str) -> ClassifiedBlock {
    ClassifiedBlock {
        kind,
        level,
        style: match kind {
            BlockKind::Heading => format!("heading {level}"),
            BlockKind::Paragraph => format!("body {level}"),
        },
        content: vec![InlineSpan::Run(ContentRun::plain(text))],
        numbering: None,
    }
}

fn h(level: u32, text: &str) -> ClassifiedBlock {
    block(BlockKind::Heading, level, text)
}

fn p(level: u32, text: &str) -> ClassifiedBlock {
    block(BlockKind::Paragraph, level, text)
}

fn numbered(mut block: ClassifiedBlock, descriptor: NumberingDescriptor) -> ClassifiedBlock {
    block.numbering = Some(descriptor);
    block
}

fn decimal_item() -> NumberingDescriptor {
    NumberingDescriptor::new(
        &ListReference::new("1", 0),
        LevelFormat::new(NumeralType::Decimal, "%1.", 1),
        NumberingOrigin::ListDefinition,
    )
}

fn letter_subitem() -> NumberingDescriptor {
    NumberingDescriptor::new(
        &ListReference::new("1", 1),
        LevelFormat::new(NumeralType::LowerLetter, "%1.%2)", 1),
        NumberingOrigin::ListDefinition,
    )
    .with_referenced(0, LevelFormat::new(NumeralType::Decimal, "%1.", 1))
}

fn build(blocks: impl IntoIterator<Item = ClassifiedBlock>) -> DocumentGraph {
    let mut builder = GraphBuilder::new();
    for block in blocks {
        builder.push(block);
    }
    let graph = builder.finish();
    snapshot::invariants(&graph);
    graph
}

fn outline(graph: &DocumentGraph) -> Vec<String> {
    normalize(graph).lines()
}

#[test]
fn empty_builder_yields_empty_graph() {
    let graph = build(Vec::<ClassifiedBlock>::new());
    assert!(graph.is_empty());
    assert!(graph.roots().is_empty());
    assert_eq!(graph.reading_order().count(), 0);
}

#[test]
fn paragraph_nests_under_heading() {
    let graph = build([h(1, "Intro"), p(1, "body"), h(1, "Next")]);

    assert_eq!(
        outline(&graph),
        vec!["H1 0 Intro", "  P1 0 ^0 body", "H1 1 Next"]
    );
    assert_eq!(graph.roots(), &[NodeId(0), NodeId(2)]);
}

#[test]
fn lower_heading_nests_and_higher_heading_closes() {
    let graph = build([h(1, "A"), h(2, "B"), h(1, "C")]);

    assert_eq!(outline(&graph), vec!["H1 0 A", "  H2 0.0 B", "H1 1 C"]);
}

#[test]
fn backtracks_through_nested_paragraphs_and_headings() {
    let graph = build([
        h(1, "A"),
        p(1, "a"),
        p(2, "b"),
        p(3, "c"),
        p(1, "d"),
        h(2, "B"),
        p(1, "e"),
        h(1, "C"),
    ]);

    insta::assert_snapshot!(normalize(&graph).outline(), @r"
    H1 0 A
      P1 0 ^0 a
        P2 0.0 ^0 b
          P3 0.0.0 ^0 c
      P1 1 ^0 d
      H2 0.0 B
        P1 0 ^0.0 e
    H1 1 C
    ");
}

#[rstest]
#[case::heading_1(h(1, "start"))]
#[case::heading_2(h(2, "start"))]
#[case::heading_3(h(3, "start"))]
#[case::paragraph_1(p(1, "start"))]
#[case::paragraph_2(p(2, "start"))]
#[case::paragraph_3(p(3, "start"))]
fn top_heading_after_start_block_is_second_root(#[case] start: ClassifiedBlock) {
    let graph = build([start, h(1, "top")]);

    assert_eq!(graph.roots().len(), 2);
    for root in graph.root_nodes() {
        assert_eq!(root.parent(), None);
        assert!(root.children().is_empty());
    }
    let (first, second) = (&graph[NodeId(0)], &graph[NodeId(1)]);
    assert_eq!(first.next(), Some(second.id()));
    assert_eq!(second.previous(), Some(first.id()));
    assert_eq!(second.address(), &Address::from(vec![1]));
}

#[test]
fn shallower_paragraph_under_heading_stays_under_heading() {
    let graph = build([h(1, "H"), p(2, "deep"), p(1, "shallow")]);

    assert_eq!(
        outline(&graph),
        vec!["H1 0 H", "  P2 0 ^0 deep", "  P1 1 ^0 shallow"]
    );
}

#[rstest]
#[case::heading_skips_a_level(
    vec![h(1, "A"), h(3, "X"), h(2, "Y")],
    vec!["H1 0 A", "  H3 0.0 X", "  H2 0.1 Y"]
)]
#[case::paragraph_skips_a_level(
    vec![h(1, "A"), p(1, "a"), p(3, "b"), p(2, "c")],
    vec!["H1 0 A", "  P1 0 ^0 a", "    P3 0.0 ^0 b", "    P2 0.1 ^0 c"]
)]
#[case::backtrack_then_shallower_heading(
    vec![h(1, "A"), h(2, "B"), h(4, "C"), h(3, "D"), h(2, "E")],
    vec!["H1 0 A", "  H2 0.0 B", "    H4 0.0.0 C", "    H3 0.0.1 D", "  H2 0.1 E"]
)]
fn skipped_level_follows_existing_children(
    #[case] blocks: Vec<ClassifiedBlock>,
    #[case] expected: Vec<&str>,
) {
    let graph = build(blocks);

    assert_eq!(outline(&graph), expected);
}

#[test]
fn numbering_continues_after_a_skipped_level() {
    let graph = build([
        h(1, "T"),
        numbered(p(1, "one"), decimal_item()),
        numbered(p(3, "deep"), decimal_item()),
        numbered(p(2, "middle"), decimal_item()),
    ]);

    assert_eq!(graph[NodeId(3)].parent(), Some(NodeId(1)));
    assert_eq!(graph[NodeId(1)].children(), &[NodeId(2), NodeId(3)]);
    let labels: Vec<Option<&str>> = graph.nodes().iter().map(|n| n.numbering_label()).collect();
    assert_eq!(labels, vec![None, Some("1."), Some("1."), Some("2.")]);
}

#[test]
fn unencodable_label_is_left_unset() {
    let from_zero = NumberingDescriptor::new(
        &ListReference::new("2", 0),
        LevelFormat::new(NumeralType::LowerLetter, "%1)", 0),
        NumberingOrigin::ListDefinition,
    );
    let graph = build([
        h(1, "T"),
        numbered(p(1, "zero"), from_zero.clone()),
        numbered(p(1, "one"), from_zero),
    ]);

    assert_eq!(graph.len(), 3);
    assert_eq!(graph[NodeId(1)].numbering().and_then(NumberingDescriptor::index), Some(0));
    assert_eq!(graph[NodeId(1)].numbering_label(), None);
    assert_eq!(graph[NodeId(2)].numbering_label(), Some("a)"));
}

#[test]
fn root_paragraphs_have_no_heading_item() {
    let graph = build([p(1, "a"), p(2, "b"), h(1, "H"), p(1, "c")]);

    assert_eq!(
        outline(&graph),
        vec!["P1 0 ^- a", "  P2 0.0 ^- b", "H1 1 H", "  P1 0 ^1 c"]
    );
    assert_eq!(graph[NodeId(1)].identifier(), "(NONE)\nP_0.0");
    assert_eq!(graph[NodeId(3)].identifier(), "(1)\nP_0");
    assert_eq!(graph[NodeId(2)].identifier(), "1");
}

#[test]
fn numbering_continues_across_siblings_and_restarts_in_children() {
    let graph = build([
        h(1, "T"),
        numbered(p(1, "one"), decimal_item()),
        numbered(p(1, "two"), decimal_item()),
        numbered(p(2, "sub a"), letter_subitem()),
        numbered(p(2, "sub b"), letter_subitem()),
        numbered(p(1, "three"), decimal_item()),
        p(1, "plain"),
        numbered(p(1, "again"), decimal_item()),
    ]);

    let labels: Vec<Option<&str>> = graph.nodes().iter().map(|n| n.numbering_label()).collect();
    assert_eq!(
        labels,
        vec![
            None,
            Some("1."),
            Some("2."),
            Some("1.a)"),
            Some("1.b)"),
            Some("3."),
            None,
            Some("1."),
        ]
    );
}

#[test]
fn detected_marker_index_is_kept() {
    let mut detected = NumberingDescriptor::new(
        &ListReference::new("1", 0),
        LevelFormat::new(NumeralType::Decimal, "%1.", 1),
        NumberingOrigin::DetectedMarker,
    );
    detected.set_index(7);

    let graph = build([
        h(1, "T"),
        numbered(p(1, "one"), decimal_item()),
        numbered(p(1, "seven"), detected),
        numbered(p(1, "after"), decimal_item()),
    ]);

    let indices: Vec<Option<u32>> = graph
        .nodes()
        .iter()
        .map(|n| n.numbering().and_then(NumberingDescriptor::index))
        .collect();
    assert_eq!(indices, vec![None, Some(1), Some(7), Some(8)]);
    assert_eq!(graph[NodeId(2)].numbering_label(), Some("7."));
}

#[test]
fn first_block_restarts_numbering() {
    let descriptor = NumberingDescriptor::new(
        &ListReference::new("9", 0),
        LevelFormat::new(NumeralType::UpperRoman, "%1", 4),
        NumberingOrigin::StyleDefinition,
    );
    let graph = build([numbered(p(1, "first"), descriptor)]);

    assert_eq!(graph[NodeId(0)].numbering_label(), Some("IV"));
}

#[test]
fn walk_and_children_follow_insertion_order() {
    let graph = build([h(1, "A"), p(1, "a"), h(2, "B"), p(1, "b"), h(2, "C")]);

    let children: Vec<&str> = graph
        .children(NodeId(0))
        .map(|n| n.style())
        .collect();
    assert_eq!(children, vec!["body 1", "heading 2", "heading 2"]);
    assert_eq!(graph.parent(NodeId(3)).map(|n| n.id()), Some(NodeId(2)));

    let depths: Vec<usize> = graph.walk().iter().map(|(depth, _)| *depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 2, 1]);
}

#[test]
fn deep_nesting_backtracks_without_recursion() {
    const DEPTH: u32 = 2_000;

    let mut builder = GraphBuilder::new();
    builder.push(h(1, "top"));
    for level in 1..=DEPTH {
        builder.push(p(level, "x"));
    }
    builder.push(h(1, "next"));
    let graph = builder.finish();

    assert_eq!(graph.roots().len(), 2);
    let last = &graph[NodeId(DEPTH + 1)];
    assert_eq!(last.address(), &Address::from(vec![1]));
    assert_eq!(last.parent(), None);
    assert_eq!(graph.reading_order().count(), DEPTH as usize + 2);
    assert_eq!(graph[NodeId(DEPTH)].address().depth(), DEPTH as usize);
}

#[test]
fn snapshot_serializes_for_external_diffing() {
    let graph = build([h(1, "Intro"), numbered(p(1, "body"), decimal_item())]);
    let json = serde_json::to_value(normalize(&graph)).unwrap();

    assert_eq!(json["nodes"][0]["kind"], "Heading");
    assert_eq!(json["nodes"][0]["heading_item"], serde_json::Value::Null);
    assert_eq!(json["nodes"][1]["depth"], 1);
    assert_eq!(json["nodes"][1]["address"], "0");
    assert_eq!(json["nodes"][1]["heading_item"], "0");
    assert_eq!(json["nodes"][1]["label"], "1.");
}
