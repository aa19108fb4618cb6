//! # Numbering
//!
//! List-marker formats: numeral systems, level text templates, and the
//! resolution of a block's numbering from list definitions, style list
//! formatting, or the marker text itself.
//!
//! ## Modules
//!
//! - [`numeral`] - pattern/encode/decode per numeral system
//! - [`template`] - `%1.%2)`-style level text
//! - [`resolve`] - per-block resolution and in-text marker detection

pub mod numeral;
pub mod resolve;
pub mod template;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

pub use numeral::NumeralType;
pub use resolve::{DetectedMarker, MarkerTable, NumberingResolver};
pub use template::{FormatTemplate, TemplatePart};

#[derive(Debug, thiserror::Error)]
pub enum NumberingError {
    #[error("No list marker found for list {list_id} level {level} at the start of {text:?}")]
    MarkerNotFound {
        list_id: String,
        level: u8,
        text: String,
    },

    #[error("{value} cannot be written as a {numeral} numeral")]
    OutOfRange { numeral: NumeralType, value: u32 },

    #[error("{text:?} is not a valid {numeral} numeral")]
    Unparsable { numeral: NumeralType, text: String },

    #[error("Unknown numeral format `{0}`")]
    UnknownNumeral(String),

    #[error("Level text references level {level} which has no known format")]
    UnresolvedLevel { level: u8 },

    #[error("Invalid marker pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Which list level a block (or its style) belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListReference {
    pub list_id: String,
    #[serde(default)]
    pub level: u8,
}

impl ListReference {
    pub fn new(list_id: impl Into<String>, level: u8) -> Self {
        Self {
            list_id: list_id.into(),
            level,
        }
    }
}

/// Format of one level of a list definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFormat {
    pub numeral: NumeralType,
    pub template: FormatTemplate,
    pub start: u32,
}

impl LevelFormat {
    pub fn new(numeral: NumeralType, template: &str, start: u32) -> Self {
        Self {
            numeral,
            template: FormatTemplate::parse(template),
            start,
        }
    }

    /// Decimal `%N` format used when a referenced level is unknown.
    fn fallback(level: u8) -> Self {
        Self::new(NumeralType::Decimal, &format!("%{}", level + 1), 1)
    }
}

/// Where a block's numbering metadata came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingOrigin {
    ListDefinition,
    StyleDefinition,
    /// Parsed out of the block's own leading text.
    DetectedMarker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingDescriptor {
    list_id: String,
    level: u8,
    format: LevelFormat,
    referenced: BTreeMap<u8, LevelFormat>,
    origin: NumberingOrigin,
    index: Option<u32>,
}

impl NumberingDescriptor {
    pub fn new(reference: &ListReference, format: LevelFormat, origin: NumberingOrigin) -> Self {
        Self {
            list_id: reference.list_id.clone(),
            level: reference.level,
            format,
            referenced: BTreeMap::new(),
            origin,
            index: None,
        }
    }

    /// Records the format of another level the template refers to.
    pub fn with_referenced(mut self, level: u8, format: LevelFormat) -> Self {
        self.referenced.insert(level, format);
        self
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn numeral(&self) -> NumeralType {
        self.format.numeral
    }

    pub fn template(&self) -> &FormatTemplate {
        &self.format.template
    }

    pub fn start(&self) -> u32 {
        self.format.start
    }

    pub fn origin(&self) -> NumberingOrigin {
        self.origin
    }

    /// Sequence index, assigned during graph construction or decoded from
    /// a detected marker.
    pub fn index(&self) -> Option<u32> {
        self.index
    }

    pub fn referenced_level(&self, level: u8) -> Option<&LevelFormat> {
        self.referenced.get(&level)
    }

    pub(crate) fn set_index(&mut self, index: u32) {
        self.index = Some(index);
    }
}

/// Re-expands the descriptor's template with `index` at its own level and
/// each other referenced level at its start value.
pub fn format_label(descriptor: &NumberingDescriptor, index: u32) -> Result<String, NumberingError> {
    descriptor.template().expand(|level| {
        if level == descriptor.level {
            return descriptor.numeral().encode(index);
        }
        let other = descriptor
            .referenced_level(level)
            .ok_or(NumberingError::UnresolvedLevel { level })?;
        other.numeral.encode(other.start)
    })
}

/// Lookup of list definitions, keyed by list id and indent level.
pub trait NumberingSource {
    fn lookup_list_level(&self, list_id: &str, level: u8) -> Option<LevelFormat>;
}

/// A source with no list definitions at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNumbering;

impl NumberingSource for NoNumbering {
    fn lookup_list_level(&self, _list_id: &str, _level: u8) -> Option<LevelFormat> {
        None
    }
}

/// List definition level as it appears in serialized input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLevelRecord {
    pub list_id: String,
    #[serde(default)]
    pub level: u8,
    pub numeral: String,
    pub format: String,
    #[serde(default = "default_start")]
    pub start: u32,
}

fn default_start() -> u32 {
    1
}

/// In-memory list definitions.
#[derive(Debug, Clone, Default)]
pub struct StaticNumbering {
    levels: HashMap<(String, u8), LevelFormat>,
}

impl StaticNumbering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, list_id: impl Into<String>, level: u8, format: LevelFormat) -> Self {
        self.insert(list_id, level, format);
        self
    }

    pub fn insert(&mut self, list_id: impl Into<String>, level: u8, format: LevelFormat) {
        self.levels.insert((list_id.into(), level), format);
    }

    pub fn from_records(records: &[ListLevelRecord]) -> Result<Self, NumberingError> {
        let mut numbering = Self::new();
        for record in records {
            let numeral = record.numeral.parse::<NumeralType>()?;
            numbering.insert(
                record.list_id.clone(),
                record.level,
                LevelFormat::new(numeral, &record.format, record.start),
            );
        }
        Ok(numbering)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl NumberingSource for StaticNumbering {
    fn lookup_list_level(&self, list_id: &str, level: u8) -> Option<LevelFormat> {
        self.levels.get(&(list_id.to_string(), level)).cloned()
    }
}
