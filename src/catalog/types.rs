//! Destination types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Destination category.
///
/// Only used to pick a success-probability bucket and a site adapter.
/// Strings that name no known category parse to `Unknown`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Social,
    Blog,
    Video,
    News,
    ArabicForum,
    Unknown,
}

impl Category {
    /// Parses a category name, falling back to `Unknown`.
    ///
    /// Accepts `arabic_forum` as well as `arabic-forum`.
    pub fn parse(name: &str) -> Self {
        let normalized = name.trim().replace('_', "-");
        Category::from_str(&normalized).unwrap_or(Category::Unknown)
    }
}

/// Site vs. forum. Cosmetic apart from default probability and retry backoff.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    Site,
    Forum,
}

/// One publish target. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub base_url: String,
    pub category: Category,
    pub kind: DestinationKind,
}

impl Destination {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        category: Category,
        kind: DestinationKind,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            category,
            kind,
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
