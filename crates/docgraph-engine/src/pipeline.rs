//! # Pipeline
//!
//! Reader-facing entry point: classify every block by style, assemble its
//! inline content, resolve its numbering and place it in the outline.

use docgraph_config::{Classification, StyleConfig};
use serde::{Deserialize, Serialize};

use crate::{
    error::DocGraphError,
    graph::{ClassifiedBlock, DocumentGraph, GraphBuilder},
    numbering::{ListLevelRecord, ListReference, NumberingResolver, NumberingSource},
    richtext::{RawInline, assemble},
};

/// One paragraph as delivered by a document reader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub style_name: String,
    /// Runs and hyperlinks in document order.
    #[serde(default)]
    pub content: Vec<RawInline>,
    /// List membership set directly on the paragraph.
    #[serde(default)]
    pub list: Option<ListReference>,
}

/// A whole document in serialized form: blocks plus list definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInput {
    #[serde(default)]
    pub blocks: Vec<BlockRecord>,
    #[serde(default)]
    pub lists: Vec<ListLevelRecord>,
}

/// Builds the outline for `records`.
///
/// Blocks whose style sits at level 0 are skipped. Any error aborts the
/// whole build; no partial graph is returned.
pub fn build_document(
    records: &[BlockRecord],
    config: &StyleConfig,
    source: &dyn NumberingSource,
) -> Result<DocumentGraph, DocGraphError> {
    if records.is_empty() {
        return Err(DocGraphError::EmptyDocument);
    }
    let resolver = NumberingResolver::new(source, config.numbering())?;

    let mut builder = GraphBuilder::new();
    let mut skipped = 0usize;
    for (position, record) in records.iter().enumerate() {
        let (kind, level) = match config.classify(&record.style_name) {
            Some(Classification::Classified { kind, level }) => (kind, level),
            Some(Classification::Unclassified) => {
                log::trace!(
                    "skipping block {position} with unclassified style {:?}",
                    record.style_name
                );
                skipped += 1;
                continue;
            }
            None => {
                return Err(DocGraphError::UndefinedStyle {
                    style: record.style_name.clone(),
                });
            }
        };

        let mut content = assemble(&record.content)?;
        let numbering =
            resolver.resolve_numbering(&record.style_name, record.list.as_ref(), &mut content)?;

        builder.push(ClassifiedBlock {
            kind: kind.into(),
            level,
            style: record.style_name.clone(),
            content,
            numbering,
        });
    }

    if skipped > 0 {
        log::debug!("skipped {skipped} of {} blocks at level 0", records.len());
    }
    Ok(builder.finish())
}
