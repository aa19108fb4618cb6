//! # docgraph-config
//!
//! Style classification tables and numbering fallback settings.
//!
//! A document block only carries the name of its paragraph style. Which of
//! those names are headings, which are body paragraphs and at what outline
//! depth they sit is decided here, from two tables keyed by hierarchy level:
//!
//! ```toml
//! [heading]
//! 0 = ["Normal"]
//! 1 = ["Heading 1"]
//!
//! [paragraph]
//! 0 = ["Normal"]
//! 1 = ["Body Text"]
//! ```
//!
//! Level `0` lists styles that are recognised but deliberately left out of the
//! outline. Keys must be contiguous integers starting at `0` and every level
//! above `0` must name at least one style.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to parse config: {0}")]
    InlineParseError(#[from] toml::de::Error),

    #[error("Style table `{table}` has a non-integer level key `{key}`")]
    InvalidLevelKey { table: &'static str, key: String },

    #[error("Style table `{table}` is missing level {level}")]
    MissingLevel { table: &'static str, level: u32 },

    #[error("Style table `{table}` has no styles at level {level}")]
    EmptyLevel { table: &'static str, level: u32 },

    #[error("Marker format for indent level {level} is declared more than once")]
    DuplicateMarkerLevel { level: u8 },
}

/// Outline category of a classified block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Heading,
    Paragraph,
}

/// Result of looking a style name up in the two tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Classified { kind: ElementKind, level: u32 },
    /// Known style listed at level 0: kept out of the outline.
    Unclassified,
}

/// What to do when in-text marker detection finds nothing, or finds a
/// numeral it cannot decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerPolicy {
    /// Fail the whole build.
    #[default]
    Abort,
    /// Leave the block without numbering and carry on.
    Unnumbered,
}

/// List formatting attached to a paragraph style rather than to the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleListRef {
    pub list_id: String,
    #[serde(default)]
    pub level: u8,
}

/// Fallback marker format for one indent level, used for in-text detection.
///
/// `numeral` uses the list-format vocabulary (`decimal`, `lowerRoman`, ...);
/// it is validated by the engine before any block is processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerFormat {
    pub level: u8,
    pub numeral: String,
    pub format: String,
    #[serde(default = "default_start")]
    pub start: u32,
}

fn default_start() -> u32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberingConfig {
    pub on_missing_marker: MarkerPolicy,
    pub styles: BTreeMap<String, StyleListRef>,
    pub markers: Vec<MarkerFormat>,
}

impl NumberingConfig {
    pub fn marker_for_level(&self, level: u8) -> Option<&MarkerFormat> {
        self.markers.iter().find(|m| m.level == level)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for marker in &self.markers {
            if !seen.insert(marker.level) {
                return Err(ConfigError::DuplicateMarkerLevel {
                    level: marker.level,
                });
            }
        }
        Ok(())
    }
}

/// One validated style table. Index into `levels` is the hierarchy level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    levels: Vec<Vec<String>>,
    index: HashMap<String, u32>,
}

impl StyleTable {
    /// Validates a level map: contiguous from 0, every level above 0 non-empty.
    pub fn from_levels(
        table: &'static str,
        levels: BTreeMap<u32, Vec<String>>,
    ) -> Result<Self, ConfigError> {
        let mut ordered = Vec::with_capacity(levels.len());
        for (expected, (level, styles)) in (0u32..).zip(levels) {
            if level != expected {
                return Err(ConfigError::MissingLevel {
                    table,
                    level: expected,
                });
            }
            if level > 0 && styles.is_empty() {
                return Err(ConfigError::EmptyLevel { table, level });
            }
            ordered.push(styles);
        }
        if ordered.is_empty() {
            return Err(ConfigError::MissingLevel { table, level: 0 });
        }

        let mut index = HashMap::new();
        for (level, styles) in (0u32..).zip(&ordered) {
            for style in styles {
                // A style listed twice keeps its shallowest level.
                index.entry(style.clone()).or_insert(level);
            }
        }

        Ok(Self {
            levels: ordered,
            index,
        })
    }

    fn from_raw(
        table: &'static str,
        raw: BTreeMap<String, Vec<String>>,
    ) -> Result<Self, ConfigError> {
        let mut levels = BTreeMap::new();
        for (key, styles) in raw {
            let level = key
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidLevelKey {
                    table,
                    key: key.clone(),
                })?;
            levels.insert(level, styles);
        }
        Self::from_levels(table, levels)
    }

    pub fn level_of(&self, style: &str) -> Option<u32> {
        self.index.get(style).copied()
    }

    /// Deepest configured level.
    pub fn max_level(&self) -> u32 {
        self.levels.len().saturating_sub(1) as u32
    }

    pub fn styles_at(&self, level: u32) -> &[String] {
        self.levels
            .get(level as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn to_raw(&self) -> BTreeMap<String, Vec<String>> {
        (0u32..)
            .zip(&self.levels)
            .map(|(level, styles)| (level.to_string(), styles.clone()))
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RawStyleConfig {
    heading: BTreeMap<String, Vec<String>>,
    paragraph: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    numbering: NumberingConfig,
}

/// Validated style configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    heading: StyleTable,
    paragraph: StyleTable,
    numbering: NumberingConfig,
}

impl StyleConfig {
    pub fn new(
        heading: BTreeMap<u32, Vec<String>>,
        paragraph: BTreeMap<u32, Vec<String>>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            heading: StyleTable::from_levels("heading", heading)?,
            paragraph: StyleTable::from_levels("paragraph", paragraph)?,
            numbering: NumberingConfig::default(),
        })
    }

    pub fn with_numbering(mut self, numbering: NumberingConfig) -> Result<Self, ConfigError> {
        numbering.validate()?;
        self.numbering = numbering;
        Ok(self)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawStyleConfig = toml::from_str(content)?;
        Self::from_raw(raw)
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let raw: RawStyleConfig =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        let config = Self::from_raw(raw)?;
        log::debug!(
            "loaded style config from {}: {} heading levels, {} paragraph levels",
            config_path.display(),
            config.heading.max_level(),
            config.paragraph.max_level()
        );
        Ok(Some(config))
    }

    fn from_raw(raw: RawStyleConfig) -> Result<Self, ConfigError> {
        raw.numbering.validate()?;
        Ok(Self {
            heading: StyleTable::from_raw("heading", raw.heading)?,
            paragraph: StyleTable::from_raw("paragraph", raw.paragraph)?,
            numbering: raw.numbering,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        let raw = RawStyleConfig {
            heading: self.heading.to_raw(),
            paragraph: self.paragraph.to_raw(),
            numbering: self.numbering.clone(),
        };
        toml::to_string_pretty(&raw)
    }

    pub fn heading_table(&self) -> &StyleTable {
        &self.heading
    }

    pub fn paragraph_table(&self) -> &StyleTable {
        &self.paragraph
    }

    pub fn numbering(&self) -> &NumberingConfig {
        &self.numbering
    }

    /// Maps a style name to its outline category and level.
    ///
    /// Returns `None` when neither table mentions the style. A positive
    /// heading level wins over a positive paragraph level; a style listed at
    /// level 0 in both tables is treated as a level-1 paragraph.
    pub fn classify(&self, style: &str) -> Option<Classification> {
        let heading = self.heading.level_of(style);
        let paragraph = self.paragraph.level_of(style);

        match (heading, paragraph) {
            (Some(level), _) if level > 0 => Some(Classification::Classified {
                kind: ElementKind::Heading,
                level,
            }),
            (_, Some(level)) if level > 0 => Some(Classification::Classified {
                kind: ElementKind::Paragraph,
                level,
            }),
            (Some(0), Some(0)) => Some(Classification::Classified {
                kind: ElementKind::Paragraph,
                level: 1,
            }),
            (Some(_), _) | (_, Some(_)) => Some(Classification::Unclassified),
            (None, None) => None,
        }
    }
}
