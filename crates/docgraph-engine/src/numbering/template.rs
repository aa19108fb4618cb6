use std::fmt;

/// One piece of a list-level text template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    /// `%N` in the source text, stored as the zero-based level `N - 1`.
    Placeholder(u8),
}

/// Parsed list-level text such as `%1.%2)`.
///
/// `%1` through `%9` reference the counter of levels 0 through 8. Any other
/// `%` is kept as literal text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatTemplate {
    parts: Vec<TemplatePart>,
}

impl FormatTemplate {
    pub fn parse(text: &str) -> Self {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            let level = match (c, chars.peek()) {
                ('%', Some(d @ '1'..='9')) => Some(*d as u8 - b'1'),
                _ => None,
            };
            match level {
                Some(level) => {
                    chars.next();
                    if !literal.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(TemplatePart::Placeholder(level));
                }
                None => literal.push(c),
            }
        }
        if !literal.is_empty() {
            parts.push(TemplatePart::Literal(literal));
        }

        Self { parts }
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// Levels referenced by placeholders, in order of appearance.
    pub fn levels(&self) -> impl Iterator<Item = u8> + '_ {
        self.parts.iter().filter_map(|part| match part {
            TemplatePart::Placeholder(level) => Some(*level),
            TemplatePart::Literal(_) => None,
        })
    }

    pub fn references(&self, level: u8) -> bool {
        self.levels().any(|l| l == level)
    }

    /// Expands the template, asking `value_of` for each placeholder.
    pub fn expand<E>(&self, mut value_of: impl FnMut(u8) -> Result<String, E>) -> Result<String, E> {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => out.push_str(text),
                TemplatePart::Placeholder(level) => out.push_str(&value_of(*level)?),
            }
        }
        Ok(out)
    }
}

impl fmt::Display for FormatTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => f.write_str(text)?,
                TemplatePart::Placeholder(level) => write!(f, "%{}", level + 1)?,
            }
        }
        Ok(())
    }
}
