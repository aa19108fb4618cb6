use docgraph_config::ConfigError;

use crate::numbering::NumberingError;

#[derive(Debug, thiserror::Error)]
pub enum DocGraphError {
    #[error("Style `{style}` is not listed in the heading or paragraph tables")]
    UndefinedStyle { style: String },

    #[error("Document contains no blocks")]
    EmptyDocument,

    #[error("Hyperlink cannot have both an address and a fragment")]
    InvalidHyperlink,

    #[error("Unsupported text format `{0}`. Options are: html, markdown, plain")]
    UnsupportedTextFormat(String),

    #[error(transparent)]
    Numbering(#[from] NumberingError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
