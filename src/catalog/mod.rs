//! Destination catalog.
//!
//! Supplies the ordered list of publish destinations and the category-based
//! success-probability table. Catalogs come from the built-in list or from a
//! line-oriented file:
//!
//! ```text
//! # name | base_url | category | kind
//! Medium|https://medium.com|blog|site
//! Arab Forums|https://www.arabforums.net|arabic-forum|forum
//! ```
//!
//! Blank lines and `#` comments are skipped. Malformed lines are logged and skipped,
//! so a bad entry never aborts a run.

mod builtin;
mod policy;
mod types;

use std::path::Path;
use std::str::FromStr;

use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::validate_and_normalize_url;
use crate::error_handling::CatalogError;

pub use policy::SuccessPolicy;
pub use types::{Category, Destination, DestinationKind};

/// Restricts which catalog entries a run publishes to.
#[derive(Debug, Clone, Default)]
pub struct DestinationFilter {
    /// Only destinations of this kind
    pub kind: Option<DestinationKind>,
    /// Only destinations with these names (case-insensitive)
    pub names: Option<Vec<String>>,
}

impl DestinationFilter {
    pub fn matches(&self, destination: &Destination) -> bool {
        if let Some(kind) = self.kind {
            if destination.kind != kind {
                return false;
            }
        }
        match &self.names {
            Some(names) => names
                .iter()
                .any(|n| n.trim().eq_ignore_ascii_case(&destination.name)),
            None => true,
        }
    }
}

/// Immutable, ordered set of destinations loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    destinations: Vec<Destination>,
}

impl Catalog {
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self { destinations }
    }

    /// The compiled-in destination list.
    pub fn builtin() -> Self {
        let destinations = builtin::BUILTIN_DESTINATIONS
            .iter()
            .map(|(name, url, category, kind)| Destination::new(*name, *url, *category, *kind))
            .collect();
        Self { destinations }
    }

    /// Loads a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be opened or read.
    pub async fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let file = tokio::fs::File::open(path).await?;
        let mut lines = BufReader::new(file).lines();
        let mut destinations = Vec::new();
        let mut line_no = 0usize;
        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            if let Some(destination) = parse_line(&line, line_no) {
                destinations.push(destination);
            }
        }
        info!(
            "Loaded {} destinations from {}",
            destinations.len(),
            path.display()
        );
        Ok(Self { destinations })
    }

    /// Parses catalog text already in memory.
    pub fn parse(text: &str) -> Self {
        let destinations = text
            .lines()
            .enumerate()
            .filter_map(|(i, line)| parse_line(line, i + 1))
            .collect();
        Self { destinations }
    }

    /// Destinations in catalog order, restricted by `filter`.
    pub fn list_destinations(&self, filter: &DestinationFilter) -> Vec<&Destination> {
        self.destinations
            .iter()
            .filter(|d| filter.matches(d))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

fn parse_line(line: &str, line_no: usize) -> Option<Destination> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let fields: Vec<&str> = trimmed.split('|').map(str::trim).collect();
    if fields.len() < 2 || fields.len() > 4 {
        warn!("Skipping catalog line {line_no}: expected name|base_url[|category[|kind]]");
        return None;
    }

    let name = fields[0];
    if name.is_empty() {
        warn!("Skipping catalog line {line_no}: empty destination name");
        return None;
    }
    let base_url = validate_and_normalize_url(fields[1])?;
    let category = fields
        .get(2)
        .map(|c| Category::parse(c))
        .unwrap_or(Category::Unknown);
    let kind = match fields.get(3) {
        Some(k) => match DestinationKind::from_str(k) {
            Ok(kind) => kind,
            Err(_) => {
                warn!("Catalog line {line_no}: unknown kind '{k}', treating as site");
                DestinationKind::Site
            }
        },
        None => DestinationKind::Site,
    };

    Some(Destination::new(name, base_url, category, kind))
}
