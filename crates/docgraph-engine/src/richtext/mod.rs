//! # Rich text
//!
//! Styled text atoms for one block, built from the raw run and hyperlink
//! events a document reader emits.
//!
//! ## Modules
//!
//! - [`lexer`] - splits run text into whitespace, word and punctuation atoms
//! - [`assembly`] - tokenizes runs and repairs mid-word run splits

pub mod assembly;
pub mod lexer;

use serde::{Deserialize, Serialize};

use crate::error::DocGraphError;

pub use assembly::assemble;

/// One of the six character styles a [`ContentRun`] can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Italic,
    Bold,
    Underline,
    Strike,
    Superscript,
    Subscript,
}

impl Style {
    /// Wrapping order, innermost first.
    pub const ORDER: [Style; 6] = [
        Style::Italic,
        Style::Bold,
        Style::Underline,
        Style::Strike,
        Style::Superscript,
        Style::Subscript,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleFlags {
    pub italic: bool,
    pub bold: bool,
    pub underline: bool,
    pub strike: bool,
    pub superscript: bool,
    pub subscript: bool,
}

impl StyleFlags {
    pub const PLAIN: StyleFlags = StyleFlags {
        italic: false,
        bold: false,
        underline: false,
        strike: false,
        superscript: false,
        subscript: false,
    };

    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }

    pub fn has(&self, style: Style) -> bool {
        match style {
            Style::Italic => self.italic,
            Style::Bold => self.bold,
            Style::Underline => self.underline,
            Style::Strike => self.strike,
            Style::Superscript => self.superscript,
            Style::Subscript => self.subscript,
        }
    }

    /// Active styles in wrapping order, innermost first.
    pub fn active(self) -> impl DoubleEndedIterator<Item = Style> {
        Style::ORDER.into_iter().filter(move |style| self.has(*style))
    }
}

/// A text atom with its character styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRun {
    pub text: String,
    pub flags: StyleFlags,
}

impl ContentRun {
    pub fn new(text: impl Into<String>, flags: StyleFlags) -> Self {
        Self {
            text: text.into(),
            flags,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, StyleFlags::PLAIN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Points at an external address.
    External,
    /// Points at a bookmark inside the document.
    InternalAnchor,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    runs: Vec<ContentRun>,
    kind: LinkKind,
    target: String,
}

impl Hyperlink {
    /// Builds a link from its already-assembled runs.
    ///
    /// Empty strings count as unset. Setting both `address` and `fragment`
    /// fails with [`DocGraphError::InvalidHyperlink`].
    pub fn new(
        runs: Vec<ContentRun>,
        address: Option<&str>,
        fragment: Option<&str>,
    ) -> Result<Self, DocGraphError> {
        let address = address.filter(|a| !a.is_empty());
        let fragment = fragment.filter(|f| !f.is_empty());

        let (kind, target) = match (address, fragment) {
            (Some(_), Some(_)) => return Err(DocGraphError::InvalidHyperlink),
            (Some(address), None) => (LinkKind::External, address.to_string()),
            (None, Some(fragment)) => (LinkKind::InternalAnchor, format!("#{fragment}")),
            (None, None) => (LinkKind::None, "#".to_string()),
        };

        Ok(Self { runs, kind, target })
    }

    pub fn runs(&self) -> &[ContentRun] {
        &self.runs
    }

    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    /// Address, `#fragment`, or `#` when the link points nowhere.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub(crate) fn runs_mut(&mut self) -> &mut Vec<ContentRun> {
        &mut self.runs
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Run(ContentRun),
    Link(Hyperlink),
}

impl InlineSpan {
    /// Raw text of the span, without any link target.
    pub fn text(&self) -> String {
        match self {
            InlineSpan::Run(run) => run.text.clone(),
            InlineSpan::Link(link) => link.runs.iter().map(|r| r.text.as_str()).collect(),
        }
    }
}

/// Raw text run as emitted by a document reader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRun {
    pub text: String,
    #[serde(flatten)]
    pub flags: StyleFlags,
}

impl RawRun {
    pub fn new(text: impl Into<String>, flags: StyleFlags) -> Self {
        Self {
            text: text.into(),
            flags,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, StyleFlags::PLAIN)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHyperlink {
    pub runs: Vec<RawRun>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub fragment: String,
}

/// One ordered inline event of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawInline {
    Run(RawRun),
    Hyperlink(RawHyperlink),
}

/// Concatenated raw text of all runs, link text included, link targets excluded.
pub fn raw_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}
