//! Section records and the validated, ordered section catalog.

use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bundled catalog used when the host page does not supply its own.
pub static DEFAULT_SECTIONS_JSON: &str = include_str!("../assets/sections.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("section catalog is empty")]
    Empty,
    #[error("section `{id}` has a non-finite depth")]
    NonFiniteDepth { id: String },
    #[error("duplicate section id `{0}`")]
    DuplicateId(String),
    #[error("sections `{first}` and `{second}` share depth {depth}")]
    DuplicateDepth {
        first: String,
        second: String,
        depth: f32,
    },
    #[error("section `{id}` (depth {depth}) is not deeper than the section before it (depth {previous})")]
    NotDescending { id: String, depth: f32, previous: f32 },
    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveTunable { name: &'static str, value: f32 },
    #[error("{inner} must be smaller than {outer}")]
    BandOrder {
        inner: &'static str,
        outer: &'static str,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub depth: f32,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub category_key: String,
}

fn default_color() -> String {
    "#ffffff".to_string()
}

impl Section {
    /// Minimal section, mostly useful for tests and tooling.
    pub fn new(id: impl Into<String>, depth: f32) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            subtitle: String::new(),
            description: String::new(),
            color: default_color(),
            category_key: id.clone(),
            id,
            depth,
        }
    }
}

/// Ordered, validated list of sections.
///
/// Depths are finite, unique and strictly decreasing; ids are unique. The
/// catalog is never mutated after construction.
#[derive(Clone, Debug)]
pub struct SectionCatalog {
    sections: Vec<Section>,
}

impl SectionCatalog {
    pub fn new(sections: Vec<Section>) -> Result<Self, ConfigError> {
        if sections.is_empty() {
            return Err(ConfigError::Empty);
        }
        let mut ids = FnvHashSet::default();
        let mut previous: Option<&Section> = None;
        for s in &sections {
            if !s.depth.is_finite() {
                return Err(ConfigError::NonFiniteDepth { id: s.id.clone() });
            }
            if !ids.insert(s.id.as_str()) {
                return Err(ConfigError::DuplicateId(s.id.clone()));
            }
            if let Some(prev) = previous {
                if s.depth == prev.depth {
                    return Err(ConfigError::DuplicateDepth {
                        first: prev.id.clone(),
                        second: s.id.clone(),
                        depth: s.depth,
                    });
                }
                if s.depth > prev.depth {
                    return Err(ConfigError::NotDescending {
                        id: s.id.clone(),
                        depth: s.depth,
                        previous: prev.depth,
                    });
                }
            }
            previous = Some(s);
        }
        log::debug!("[catalog] loaded {} sections", sections.len());
        Ok(Self { sections })
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let sections: Vec<Section> = serde_json::from_str(text)?;
        Self::new(sections)
    }

    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_SECTIONS_JSON)
    }

    #[inline]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Depth of the section before `index`, or 0 for the first one.
    #[inline]
    pub fn previous_depth(&self, index: usize) -> f32 {
        index
            .checked_sub(1)
            .and_then(|i| self.sections.get(i))
            .map_or(0.0, |s| s.depth)
    }

    /// Deepest anchor in the catalog.
    #[inline]
    pub fn last_depth(&self) -> f32 {
        self.sections.last().map_or(0.0, |s| s.depth)
    }
}
