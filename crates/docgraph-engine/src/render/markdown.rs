use crate::richtext::{Hyperlink, InlineSpan, LinkKind, Style};

use super::markup::{self, Dialect};

pub(crate) struct Markdown;

impl Dialect for Markdown {
    const DROP_EMPTY_PAIRS: bool = true;

    fn open(style: Style) -> &'static str {
        match style {
            Style::Italic => "*",
            Style::Bold => "**",
            Style::Strike => "~~",
            // No native syntax for these
            Style::Underline => "<u>",
            Style::Superscript => "<sup>",
            Style::Subscript => "<sub>",
        }
    }

    fn close(style: Style) -> &'static str {
        match style {
            Style::Italic => "*",
            Style::Bold => "**",
            Style::Strike => "~~",
            Style::Underline => "</u>",
            Style::Superscript => "</sup>",
            Style::Subscript => "</sub>",
        }
    }

    fn write_text(raw: &str, out: &mut String) {
        out.push_str(raw);
    }

    fn link(link: &Hyperlink, inner: &str) -> String {
        match link.kind() {
            LinkKind::External | LinkKind::InternalAnchor => {
                format!("[{inner}]({})", link.target())
            }
            LinkKind::None => inner.to_string(),
        }
    }
}

pub fn render(spans: &[InlineSpan]) -> String {
    markup::render::<Markdown>(spans)
}
