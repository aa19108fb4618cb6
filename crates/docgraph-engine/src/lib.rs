//! # docgraph-engine
//!
//! Reconstructs the heading/paragraph outline of a word-processor document
//! from its flat list of styled paragraphs.
//!
//! ## Modules
//!
//! - [`richtext`] - styled atoms and hyperlinks assembled from raw runs
//! - [`render`] - HTML, Markdown and plain-text output for a block
//! - [`numbering`] - list labels from definitions or in-text markers
//! - [`graph`] - the outline forest and its builder
//! - [`pipeline`] - [`build_document`], the one-call entry point

pub mod error;
pub mod graph;
pub mod numbering;
pub mod pipeline;
pub mod render;
pub mod richtext;

pub use error::DocGraphError;
pub use graph::{Address, BlockKind, BlockNode, DocumentGraph, NodeId};
pub use numbering::{NoNumbering, NumberingSource, StaticNumbering};
pub use pipeline::{BlockRecord, DocumentInput, build_document};
pub use render::TextFormat;
