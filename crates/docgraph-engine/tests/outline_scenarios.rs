use docgraph_config::StyleConfig;
use docgraph_engine::{
    BlockKind, BlockRecord, DocumentInput, NoNumbering, NodeId, StaticNumbering, TextFormat,
    build_document,
    graph::{Address, snapshot},
    numbering::NumeralType,
    render::render_spans,
    richtext::{ContentRun, InlineSpan, RawInline, RawRun, StyleFlags, assemble},
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

const STYLES: &str = r#"
[heading]
0 = ["test_h0", "test_undefined"]
1 = ["test_h1"]
2 = ["test_h2"]
3 = ["test_h3"]

[paragraph]
0 = ["test_p0", "test_undefined"]
1 = ["test_p1"]
2 = ["test_p2"]
3 = ["test_p3"]
"#;

fn styles() -> StyleConfig {
    StyleConfig::from_toml_str(STYLES).unwrap()
}

fn record(style: &str, text: &str) -> BlockRecord {
    BlockRecord {
        style_name: style.to_string(),
        content: vec![RawInline::Run(RawRun::plain(text))],
        list: None,
    }
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

#[test]
fn heading_paragraph_heading() {
    let records = [
        record("test_h1", "Intro"),
        record("test_p1", "body"),
        record("test_h1", "Next"),
    ];
    let graph = build_document(&records, &styles(), &NoNumbering).unwrap();
    snapshot::invariants(&graph);

    let roots: Vec<&Address> = graph.root_nodes().map(|n| n.address()).collect();
    assert_eq!(roots, vec![&Address::from(vec![0]), &Address::from(vec![1])]);
    let intro = &graph[NodeId(0)];
    assert_eq!(intro.children(), &[NodeId(1)]);
    assert_eq!(graph[NodeId(1)].address(), &Address::from(vec![0]));
}

#[test]
fn returning_to_top_heading_level_makes_a_root() {
    let records = [
        record("test_h1", "A"),
        record("test_h2", "B"),
        record("test_h1", "C"),
    ];
    let graph = build_document(&records, &styles(), &NoNumbering).unwrap();
    snapshot::invariants(&graph);

    let c = &graph[NodeId(2)];
    assert_eq!(c.parent(), None);
    assert_eq!(c.address(), &Address::from(vec![1]));
    assert!(graph[NodeId(1)].children().is_empty());
}

#[test]
fn split_word_runs_are_rejoined() {
    let spans = assemble(&[
        RawInline::Run(RawRun::plain("the cor")),
        RawInline::Run(RawRun::plain("ner")),
    ])
    .unwrap();

    let texts: Vec<String> = spans.iter().map(InlineSpan::text).collect();
    assert_eq!(texts, vec!["the", " ", "corner"]);
}

#[test]
fn adjacent_bold_words_share_delimiters() {
    let bold = StyleFlags {
        bold: true,
        ..StyleFlags::PLAIN
    };
    let spans = [
        InlineSpan::Run(ContentRun::new("a", bold)),
        InlineSpan::Run(ContentRun::new(" ", bold)),
        InlineSpan::Run(ContentRun::new("b", bold)),
    ];
    assert_eq!(render_spans(&spans, TextFormat::Markdown), "**a b**");
}

#[test]
fn letters_roll_over_after_z() {
    assert_eq!(NumeralType::LowerLetter.encode(27).unwrap(), "aa");
    assert_eq!(NumeralType::LowerLetter.decode("aa").unwrap(), 27);
}

#[rstest]
fn top_heading_after_start_block(
    #[values("test_h1", "test_h2", "test_h3", "test_p1", "test_p2", "test_p3")] start: &str,
) {
    let records = [record(start, "start"), record("test_h1", "top")];
    let graph = build_document(&records, &styles(), &NoNumbering).unwrap();
    snapshot::invariants(&graph);

    assert_eq!(graph.roots().len(), 2);
    for root in graph.root_nodes() {
        assert_eq!(root.parent(), None);
        assert!(root.children().is_empty());
    }
    assert_eq!(graph[NodeId(0)].next(), Some(NodeId(1)));
    assert_eq!(graph[NodeId(1)].previous(), Some(NodeId(0)));
}

#[rstest]
#[case("test_h0")]
#[case("test_p0")]
fn level_zero_start_block_is_dropped(#[case] start: &str) {
    let records = [record(start, "start"), record("test_h1", "top")];
    let graph = build_document(&records, &styles(), &NoNumbering).unwrap();

    assert_eq!(graph.roots().len(), 1);
    assert_eq!(graph[NodeId(0)].style(), "test_h1");
    assert_eq!(graph[NodeId(0)].previous(), None);
}

#[test]
fn report_fixture_outline() {
    let config = StyleConfig::from_toml_str(&fixture("styles.toml")).unwrap();
    let input: DocumentInput = serde_json::from_str(&fixture("report.json")).unwrap();
    let lists = StaticNumbering::from_records(&input.lists).unwrap();

    let graph = build_document(&input.blocks, &config, &lists).unwrap();
    snapshot::invariants(&graph);

    insta::assert_snapshot!(snapshot::normalize(&graph).outline(), @r"
    H1 0 Summary
      P1 0 ^0 Revenue grew strongly.
      P1 1 ^0 [1.] Sales
      P1 2 ^0 [2.] Costs
        P2 2.0 ^0 [1.a)] Staff
      H2 0.0 Details
        P1 0 ^0.0 See the appendix
    H1 1 Outlook
      P1 0 ^1 [iv)] Hiring
    ");
}

#[test]
fn report_fixture_renders_and_identifies_nodes() {
    let config = StyleConfig::from_toml_str(&fixture("styles.toml")).unwrap();
    let input: DocumentInput = serde_json::from_str(&fixture("report.json")).unwrap();
    let lists = StaticNumbering::from_records(&input.lists).unwrap();
    let graph = build_document(&input.blocks, &config, &lists).unwrap();

    let by_text = |text: &str| {
        graph
            .nodes()
            .iter()
            .find(|n| n.render(TextFormat::Plain) == text)
            .unwrap()
    };

    let revenue = by_text("Revenue grew strongly.");
    assert_eq!(revenue.render(TextFormat::Html), "Revenue grew <b>strongly</b>.");
    assert_eq!(revenue.render(TextFormat::Markdown), "Revenue grew **strongly**.");

    let see = by_text("See the appendix");
    assert_eq!(
        see.render(TextFormat::Html),
        r##"See <a href="#appendix">the appendix</a>"##
    );
    assert_eq!(see.identifier(), "(0.0)\nP_0");

    let staff = by_text("Staff");
    assert_eq!(staff.identifier(), "(0)\nP_2.0");
    assert_eq!(staff.kind(), BlockKind::Paragraph);
    assert_eq!(staff.level(), 2);

    let hiring = by_text("Hiring");
    assert_eq!(hiring.render(TextFormat::Markdown), "*Hiring*");
    assert_eq!(hiring.numbering().and_then(|n| n.index()), Some(4));
    assert_eq!(hiring.identifier(), "(1)\nP_0");

    let details = by_text("Details");
    assert_eq!(details.identifier(), "0.0");
}

#[test]
fn report_fixture_reading_order_skips_level_zero_blocks() {
    let config = StyleConfig::from_toml_str(&fixture("styles.toml")).unwrap();
    let input: DocumentInput = serde_json::from_str(&fixture("report.json")).unwrap();
    let lists = StaticNumbering::from_records(&input.lists).unwrap();
    let graph = build_document(&input.blocks, &config, &lists).unwrap();

    let order: Vec<String> = graph
        .reading_order()
        .map(|n| n.render(TextFormat::Plain).to_string())
        .collect();
    assert_eq!(
        order,
        vec![
            "Summary",
            "Revenue grew strongly.",
            "Sales",
            "Costs",
            "Staff",
            "Details",
            "See the appendix",
            "Outlook",
            "Hiring",
        ]
    );
}

const STREAM_STYLES: [&str; 8] = [
    "test_h1", "test_h2", "test_h3", "test_p1", "test_p2", "test_p3", "test_h0", "test_p0",
];

proptest! {
    #[test]
    fn any_style_stream_builds_a_consistent_outline(
        picks in proptest::collection::vec(0..STREAM_STYLES.len(), 1..60)
    ) {
        let records: Vec<BlockRecord> = picks
            .iter()
            .enumerate()
            .map(|(i, pick)| record(STREAM_STYLES[*pick], &format!("block {i}")))
            .collect();
        let graph = build_document(&records, &styles(), &NoNumbering).unwrap();
        snapshot::invariants(&graph);

        let classified = picks.iter().filter(|pick| **pick < 6).count();
        prop_assert_eq!(graph.reading_order().count(), classified);

        for pair in graph.nodes().windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            if before.kind() == BlockKind::Heading && after.kind() == BlockKind::Paragraph {
                prop_assert_eq!(after.parent(), Some(before.id()));
                prop_assert_eq!(after.address(), &Address::from(vec![0]));
                prop_assert_eq!(after.heading_item(), Some(before.address()));
            }
        }
    }

    #[test]
    fn plain_render_of_unstyled_text_is_verbatim(
        texts in proptest::collection::vec("[a-z ,.!-]{0,8}", 1..6)
    ) {
        let raw: Vec<RawInline> = texts.iter().map(|t| RawInline::Run(RawRun::plain(t.as_str()))).collect();
        let spans = assemble(&raw).unwrap();

        prop_assert_eq!(render_spans(&spans, TextFormat::Plain), texts.concat());
    }
}
