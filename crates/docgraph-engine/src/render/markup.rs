//! Shared machinery for the two markup dialects.
//!
//! Rendering happens atom by atom, so two neighbouring bold words come out as
//! two separate bold spans. Instead of patching the finished string, content
//! is first lowered to a flat stream of [`Piece`]s, the stream is cleaned up,
//! and only then written out in the dialect's syntax.

use crate::richtext::{ContentRun, Hyperlink, InlineSpan, Style};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece {
    Open(Style),
    Close(Style),
    /// Unescaped run text.
    Text(String),
    /// Fully rendered hyperlink, never merged with its neighbours.
    Link(String),
}

impl Piece {
    fn is_blank(&self) -> bool {
        matches!(self, Piece::Text(text) if text.chars().all(char::is_whitespace))
    }
}

pub(crate) trait Dialect {
    /// Whether delimiter pairs enclosing only whitespace are dropped.
    const DROP_EMPTY_PAIRS: bool;

    fn open(style: Style) -> &'static str;
    fn close(style: Style) -> &'static str;
    fn write_text(raw: &str, out: &mut String);
    fn link(link: &Hyperlink, inner: &str) -> String;
}

pub(crate) fn render<D: Dialect>(spans: &[InlineSpan]) -> String {
    let mut pieces = Vec::new();
    for span in spans {
        match span {
            InlineSpan::Run(run) => push_run(&mut pieces, run),
            InlineSpan::Link(link) => {
                let inner = render_runs::<D>(link.runs());
                pieces.push(Piece::Link(D::link(link, &inner)));
            }
        }
    }
    finish::<D>(pieces)
}

fn render_runs<D: Dialect>(runs: &[ContentRun]) -> String {
    let mut pieces = Vec::new();
    for run in runs {
        push_run(&mut pieces, run);
    }
    finish::<D>(pieces)
}

fn finish<D: Dialect>(mut pieces: Vec<Piece>) -> String {
    if D::DROP_EMPTY_PAIRS {
        pieces = drop_empty_pairs(pieces);
    }
    pieces = merge_boundaries(pieces);
    write::<D>(&pieces)
}

fn push_run(pieces: &mut Vec<Piece>, run: &ContentRun) {
    pieces.extend(run.flags.active().rev().map(Piece::Open));
    pieces.push(Piece::Text(run.text.clone()));
    pieces.extend(run.flags.active().map(Piece::Close));
}

/// `Open(s) <blank> Close(s)` becomes `<blank>`.
pub(crate) fn drop_empty_pairs(pieces: Vec<Piece>) -> Vec<Piece> {
    cancel(pieces, |piece| match piece {
        Piece::Close(style) => Some(Piece::Open(*style)),
        _ => None,
    })
}

/// `Close(s) <blank> Open(s)` becomes `<blank>`, so adjacent spans of the same
/// style join into one span around the whitespace between them.
pub(crate) fn merge_boundaries(pieces: Vec<Piece>) -> Vec<Piece> {
    cancel(pieces, |piece| match piece {
        Piece::Open(style) => Some(Piece::Close(*style)),
        _ => None,
    })
}

/// Removes a piece together with its partner when only blank text separates
/// them. Working against the output stack means a removal can expose an
/// earlier partner, so one pass reaches the fixed point.
fn cancel(pieces: Vec<Piece>, partner_of: impl Fn(&Piece) -> Option<Piece>) -> Vec<Piece> {
    let mut out: Vec<Piece> = Vec::with_capacity(pieces.len());

    for piece in pieces {
        if let Some(partner) = partner_of(&piece) {
            let blank_start = out
                .iter()
                .rposition(|p| !p.is_blank())
                .map_or(0, |i| i + 1);
            if blank_start > 0 && out[blank_start - 1] == partner {
                out.remove(blank_start - 1);
                continue;
            }
        }
        out.push(piece);
    }

    out
}

fn write<D: Dialect>(pieces: &[Piece]) -> String {
    let mut out = String::new();
    for piece in pieces {
        match piece {
            Piece::Open(style) => out.push_str(D::open(*style)),
            Piece::Close(style) => out.push_str(D::close(*style)),
            Piece::Text(text) => D::write_text(text, &mut out),
            Piece::Link(rendered) => out.push_str(rendered),
        }
    }
    out
}
