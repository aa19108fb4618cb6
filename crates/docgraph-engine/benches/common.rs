use docgraph_config::StyleConfig;
use docgraph_engine::{
    BlockRecord,
    numbering::{LevelFormat, ListReference, NumeralType, StaticNumbering},
    richtext::{RawInline, RawRun, StyleFlags},
};

#[allow(dead_code)]
pub fn styles() -> StyleConfig {
    StyleConfig::from_toml_str(
        r#"
[heading]
0 = ["Title"]
1 = ["Heading 1"]
2 = ["Heading 2"]
3 = ["Heading 3"]

[paragraph]
0 = ["Caption"]
1 = ["Body Text"]
2 = ["List 2"]
3 = ["List 3"]
"#,
    )
    .unwrap()
}

#[allow(dead_code)]
pub fn lists() -> StaticNumbering {
    StaticNumbering::new()
        .with_level("1", 0, LevelFormat::new(NumeralType::Decimal, "%1.", 1))
        .with_level("1", 1, LevelFormat::new(NumeralType::LowerLetter, "%1.%2)", 1))
        .with_level("1", 2, LevelFormat::new(NumeralType::LowerRoman, "(%3)", 1))
}

/// `sections` top-level headings, each with a nested run of numbered
/// paragraphs and a subsection.
#[allow(dead_code)]
pub fn generate_records(sections: usize) -> Vec<BlockRecord> {
    let bold = StyleFlags {
        bold: true,
        ..StyleFlags::PLAIN
    };
    let mut records = Vec::new();
    let text = |style: &str, text: &str| BlockRecord {
        style_name: style.to_string(),
        content: vec![
            RawInline::Run(RawRun::plain(text)),
            RawInline::Run(RawRun::new(" with some emphasised", bold)),
            RawInline::Run(RawRun::plain(" words.")),
        ],
        list: None,
    };

    for section in 0..sections {
        records.push(text("Heading 1", &format!("Section {section}")));
        records.push(text("Body Text", "Opening paragraph"));
        for (style, level) in [("Body Text", 0), ("List 2", 1), ("List 3", 2), ("List 2", 1)] {
            let mut item = text(style, "Item");
            item.list = Some(ListReference::new("1", level));
            records.push(item);
        }
        records.push(text("Caption", "Figure"));
        records.push(text("Heading 2", "Subsection"));
        records.push(text("Body Text", "Detail"));
        records.push(text("Heading 3", "Deeper"));
        records.push(text("Body Text", "Detail"));
    }
    records
}
