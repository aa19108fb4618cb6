use crate::richtext::{Hyperlink, InlineSpan, LinkKind, Style};

use super::markup::{self, Dialect};

pub(crate) struct Html;

impl Dialect for Html {
    const DROP_EMPTY_PAIRS: bool = false;

    fn open(style: Style) -> &'static str {
        match style {
            Style::Italic => "<i>",
            Style::Bold => "<b>",
            Style::Underline => "<u>",
            Style::Strike => "<strike>",
            Style::Superscript => "<sup>",
            Style::Subscript => "<sub>",
        }
    }

    fn close(style: Style) -> &'static str {
        match style {
            Style::Italic => "</i>",
            Style::Bold => "</b>",
            Style::Underline => "</u>",
            Style::Strike => "</strike>",
            Style::Superscript => "</sup>",
            Style::Subscript => "</sub>",
        }
    }

    fn write_text(raw: &str, out: &mut String) {
        let escaped = html_escape::encode_text(raw);
        out.push_str(&escaped.replace('\n', "<br>"));
    }

    fn link(link: &Hyperlink, inner: &str) -> String {
        match link.kind() {
            LinkKind::External | LinkKind::InternalAnchor => format!(
                "<a href=\"{}\">{inner}</a>",
                html_escape::encode_double_quoted_attribute(link.target())
            ),
            LinkKind::None => inner.to_string(),
        }
    }
}

pub fn render(spans: &[InlineSpan]) -> String {
    markup::render::<Html>(spans)
}
