use std::collections::BTreeMap;

use docgraph_config::{MarkerPolicy, NumberingConfig};
use regex::Regex;

use super::{
    LevelFormat, ListReference, NumberingDescriptor, NumberingError, NumberingOrigin,
    NumberingSource, NumeralType, TemplatePart,
};
use crate::richtext::{ContentRun, InlineSpan, raw_text};

/// Catch-all for a referenced level with no configured marker format.
const ANY_NUMERAL: &str = r"[0-9A-Za-z]+";

/// A marker found at the start of a block's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedMarker {
    pub index: u32,
    /// Byte length of the marker plus trailing whitespace.
    pub len: usize,
}

#[derive(Debug)]
struct MarkerLevel {
    format: LevelFormat,
    matcher: Regex,
}

/// Fallback marker formats by indent level, with their detection patterns
/// compiled up front.
#[derive(Debug, Default)]
pub struct MarkerTable {
    levels: BTreeMap<u8, MarkerLevel>,
}

impl MarkerTable {
    pub fn from_config(config: &NumberingConfig) -> Result<Self, NumberingError> {
        let formats = config
            .markers
            .iter()
            .map(|marker| {
                let numeral = marker.numeral.parse::<NumeralType>()?;
                Ok((
                    marker.level,
                    LevelFormat::new(numeral, &marker.format, marker.start),
                ))
            })
            .collect::<Result<BTreeMap<_, _>, NumberingError>>()?;

        let mut levels = BTreeMap::new();
        for (&level, format) in &formats {
            let matcher = Regex::new(&marker_pattern(level, format, &formats))?;
            levels.insert(
                level,
                MarkerLevel {
                    format: format.clone(),
                    matcher,
                },
            );
        }

        Ok(Self { levels })
    }

    pub fn format(&self, level: u8) -> Option<&LevelFormat> {
        self.levels.get(&level).map(|l| &l.format)
    }

    /// Looks for the `level` marker at the start of `text`.
    ///
    /// Returns `Ok(None)` when no format is configured for the level or the
    /// text does not start with a marker.
    pub fn detect_marker(&self, level: u8, text: &str) -> Result<Option<DetectedMarker>, NumberingError> {
        let Some(marker) = self.levels.get(&level) else {
            return Ok(None);
        };
        let Some(caps) = marker.matcher.captures(text) else {
            return Ok(None);
        };
        let whole = caps.get(0).map_or(0, |m| m.end());

        let index = if marker.format.template.references(level) {
            match caps.get(1).filter(|m| !m.is_empty()) {
                Some(numeral) => marker.format.numeral.decode(numeral.as_str())?,
                None => return Ok(None),
            }
        } else if whole > 0 {
            // Literal-only templates such as a bullet glyph carry no value.
            marker.format.start
        } else {
            return Ok(None);
        };

        Ok(Some(DetectedMarker { index, len: whole }))
    }
}

/// `^` + template with the own level captured + trailing whitespace.
fn marker_pattern(level: u8, format: &LevelFormat, all: &BTreeMap<u8, LevelFormat>) -> String {
    let mut pattern = String::from("^");
    for part in format.template.parts() {
        match part {
            TemplatePart::Literal(text) => pattern.push_str(&regex::escape(text)),
            TemplatePart::Placeholder(l) if *l == level => {
                pattern.push('(');
                pattern.push_str(format.numeral.pattern());
                pattern.push(')');
            }
            TemplatePart::Placeholder(l) => {
                let other = all.get(l).map_or(ANY_NUMERAL, |f| f.numeral.pattern());
                pattern.push_str("(?:");
                pattern.push_str(other);
                pattern.push(')');
            }
        }
    }
    pattern.push_str(r"\s*");
    pattern
}

/// Resolves each block's numbering against list definitions, style list
/// formatting and configured marker formats, in that order.
pub struct NumberingResolver<'a> {
    source: &'a dyn NumberingSource,
    config: &'a NumberingConfig,
    markers: MarkerTable,
}

impl<'a> NumberingResolver<'a> {
    pub fn new(
        source: &'a dyn NumberingSource,
        config: &'a NumberingConfig,
    ) -> Result<Self, NumberingError> {
        Ok(Self {
            source,
            config,
            markers: MarkerTable::from_config(config)?,
        })
    }

    /// Numbering metadata for one block, or `None` for a block outside any list.
    ///
    /// When the marker is detected in the text it is stripped from `content`.
    pub fn resolve_numbering(
        &self,
        style: &str,
        list: Option<&ListReference>,
        content: &mut Vec<InlineSpan>,
    ) -> Result<Option<NumberingDescriptor>, NumberingError> {
        let style_list = self
            .config
            .styles
            .get(style)
            .map(|r| ListReference::new(r.list_id.clone(), r.level));

        let (reference, origin) = match (list, &style_list) {
            (Some(list), _) => (list.clone(), NumberingOrigin::ListDefinition),
            (None, Some(style_list)) => (style_list.clone(), NumberingOrigin::StyleDefinition),
            (None, None) => return Ok(None),
        };

        if let Some(descriptor) = self.lookup(&reference, origin) {
            return Ok(Some(descriptor));
        }
        if origin == NumberingOrigin::ListDefinition
            && let Some(style_list) = &style_list
            && let Some(descriptor) = self.lookup(style_list, NumberingOrigin::StyleDefinition)
        {
            return Ok(Some(descriptor));
        }

        let text = raw_text(content);
        let found = match self.markers.detect_marker(reference.level, &text) {
            Ok(Some(found)) => found,
            Ok(None) => {
                let missing = NumberingError::MarkerNotFound {
                    list_id: reference.list_id.clone(),
                    level: reference.level,
                    text,
                };
                return self.unresolved(&reference, missing);
            }
            // Matched the marker shape but the numeral does not decode
            Err(e) => return self.unresolved(&reference, e),
        };

        log::debug!(
            "detected marker for list {} level {}: index {}",
            reference.list_id,
            reference.level,
            found.index
        );
        strip_prefix(content, found.len);

        let format = self
            .markers
            .format(reference.level)
            .cloned()
            .unwrap_or_else(|| LevelFormat::fallback(reference.level));
        let mut descriptor = self.with_referenced_levels(
            NumberingDescriptor::new(&reference, format, NumberingOrigin::DetectedMarker),
            &reference,
        );
        descriptor.set_index(found.index);
        Ok(Some(descriptor))
    }

    /// Applies the missing-marker policy to a block whose marker could not
    /// be read.
    fn unresolved(
        &self,
        reference: &ListReference,
        error: NumberingError,
    ) -> Result<Option<NumberingDescriptor>, NumberingError> {
        match self.config.on_missing_marker {
            MarkerPolicy::Abort => Err(error),
            MarkerPolicy::Unnumbered => {
                log::warn!(
                    "leaving block in list {} level {} unnumbered: {error}",
                    reference.list_id,
                    reference.level
                );
                Ok(None)
            }
        }
    }

    fn lookup(&self, reference: &ListReference, origin: NumberingOrigin) -> Option<NumberingDescriptor> {
        let format = self
            .source
            .lookup_list_level(&reference.list_id, reference.level)?;
        Some(self.with_referenced_levels(
            NumberingDescriptor::new(reference, format, origin),
            reference,
        ))
    }

    fn with_referenced_levels(
        &self,
        mut descriptor: NumberingDescriptor,
        reference: &ListReference,
    ) -> NumberingDescriptor {
        let others: Vec<u8> = descriptor
            .template()
            .levels()
            .filter(|l| *l != reference.level)
            .collect();

        for level in others {
            let format = self
                .source
                .lookup_list_level(&reference.list_id, level)
                .or_else(|| self.markers.format(level).cloned())
                .unwrap_or_else(|| LevelFormat::fallback(level));
            descriptor = descriptor.with_referenced(level, format);
        }
        descriptor
    }
}

/// Removes the first `len` bytes of text from the leading spans.
fn strip_prefix(content: &mut Vec<InlineSpan>, mut len: usize) {
    let mut emptied = 0;
    for span in content.iter_mut() {
        if len == 0 {
            break;
        }
        let runs_left = match span {
            InlineSpan::Run(run) => {
                len = strip_run(run, len);
                !run.text.is_empty()
            }
            InlineSpan::Link(link) => {
                let runs = link.runs_mut();
                len = strip_runs(runs, len);
                !runs.is_empty()
            }
        };
        if runs_left {
            break;
        }
        emptied += 1;
    }
    content.drain(..emptied);
}

fn strip_runs(runs: &mut Vec<ContentRun>, mut len: usize) -> usize {
    let mut emptied = 0;
    for run in runs.iter_mut() {
        if len == 0 {
            break;
        }
        len = strip_run(run, len);
        if !run.text.is_empty() {
            break;
        }
        emptied += 1;
    }
    runs.drain(..emptied);
    len
}

fn strip_run(run: &mut ContentRun, len: usize) -> usize {
    if run.text.len() <= len {
        let rest = len - run.text.len();
        run.text.clear();
        rest
    } else {
        run.text.drain(..len);
        0
    }
}
