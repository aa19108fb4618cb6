//! # Rendering
//!
//! Turns a block's inline spans into HTML, Markdown or plain text.
//!
//! ## Modules
//!
//! - [`html`] - tag-wrapped atoms with `<br>` line breaks
//! - [`markdown`] - `*`/`**`/`~~` delimiters, inline HTML for the rest
//! - [`plain`] - raw text

pub mod html;
pub mod markdown;
pub mod plain;

mod markup;

use std::{fmt, str::FromStr, sync::OnceLock};

use crate::{error::DocGraphError, richtext::InlineSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextFormat {
    Html,
    Markdown,
    Plain,
}

impl TextFormat {
    pub const ALL: [TextFormat; 3] = [TextFormat::Html, TextFormat::Markdown, TextFormat::Plain];

    pub fn name(&self) -> &'static str {
        match self {
            TextFormat::Html => "html",
            TextFormat::Markdown => "markdown",
            TextFormat::Plain => "plain",
        }
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextFormat {
    type Err = DocGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(TextFormat::Html),
            "markdown" | "md" => Ok(TextFormat::Markdown),
            "plain" | "text" => Ok(TextFormat::Plain),
            _ => Err(DocGraphError::UnsupportedTextFormat(s.to_string())),
        }
    }
}

pub fn render_spans(spans: &[InlineSpan], format: TextFormat) -> String {
    match format {
        TextFormat::Html => html::render(spans),
        TextFormat::Markdown => markdown::render(spans),
        TextFormat::Plain => plain::render(spans),
    }
}

/// Lazily rendered text, one slot per format.
#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    html: OnceLock<String>,
    markdown: OnceLock<String>,
    plain: OnceLock<String>,
}

impl RenderCache {
    fn slot(&self, format: TextFormat) -> &OnceLock<String> {
        match format {
            TextFormat::Html => &self.html,
            TextFormat::Markdown => &self.markdown,
            TextFormat::Plain => &self.plain,
        }
    }

    /// Renders `spans` on first access for `format`, then returns the stored text.
    pub fn get_or_render(&self, spans: &[InlineSpan], format: TextFormat) -> &str {
        self.slot(format).get_or_init(|| render_spans(spans, format))
    }

    pub fn is_rendered(&self, format: TextFormat) -> bool {
        self.slot(format).get().is_some()
    }
}
