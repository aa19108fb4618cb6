//! # Lexer - Splitting Run Text into Atoms
//!
//! Run text is broken into three kinds of atom using a [Logos] lexer:
//!
//! - a run of whitespace
//! - a maximal run of word characters (letters, numbers and `-`)
//! - any other single character
//!
//! Every byte of the input lands in exactly one atom, so concatenating the
//! atom texts gives back the input.
//!
//! [Logos]: https://docs.rs/logos

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomKind {
    #[regex(r"\s+")]
    Whitespace,

    #[regex(r"[\p{Alphabetic}\p{N}-]+")]
    Word,

    /// Punctuation or any other single character
    #[regex(r"[^\s\p{Alphabetic}\p{N}-]")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atom<'a> {
    pub kind: AtomKind,
    pub text: &'a str,
}

/// Lex the input into atoms, preserving order.
pub fn atoms(input: &str) -> Vec<Atom<'_>> {
    let mut out = Vec::new();
    let mut lexer = AtomKind::lexer(input);

    while let Some(result) = lexer.next() {
        // Anything the patterns miss is still kept as a single atom
        let kind = result.unwrap_or(AtomKind::Other);
        out.push(Atom {
            kind,
            text: lexer.slice(),
        });
    }

    out
}

/// True for characters that can be part of a [`AtomKind::Word`] atom.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-'
}
