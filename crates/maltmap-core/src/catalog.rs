use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::whisky::{MapPosition, Whisky};
use crate::ConfigError;

/// One known whisky as listed in the catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub region: String,
    pub x: f64,
    pub y: f64,
}

impl CatalogEntry {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        region: impl Into<String>,
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            region: region.into(),
            x,
            y,
        }
    }

    /// Builds a whisky with empty accumulators at this entry's map position.
    #[must_use]
    pub fn to_whisky(&self) -> Whisky {
        Whisky::new(
            self.name.clone(),
            self.image.clone(),
            self.region.clone(),
            MapPosition::new(self.x, self.y),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub whiskies: Vec<CatalogEntry>,
}

/// The validated, ordered list of known whiskies.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Validates and wraps catalog entries. Order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a name is blank or repeated.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, ConfigError> {
        validate_entries(&entries)?;
        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seeds one whisky per entry, in catalog order.
    #[must_use]
    pub fn whiskies(&self) -> Vec<Whisky> {
        self.entries.iter().map(CatalogEntry::to_whisky).collect()
    }

    /// Builds the combined name matcher for this catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] if the combined pattern exceeds the
    /// regex size limit.
    pub fn matcher(&self) -> Result<CatalogMatcher, ConfigError> {
        CatalogMatcher::new(self.entries.iter().map(|e| e.name.as_str()))
    }
}

/// Load and validate the whisky catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CatalogFile = serde_yaml::from_str(&content)?;
    Catalog::new(file.whiskies)
}

fn validate_entries(entries: &[CatalogEntry]) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for entry in entries {
        if entry.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "whisky name must be non-empty".to_string(),
            ));
        }

        if entry.name.trim() != entry.name {
            return Err(ConfigError::Validation(format!(
                "whisky name '{}' has leading or trailing whitespace",
                entry.name
            )));
        }

        if !seen_names.insert(entry.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate whisky name: '{}'",
                entry.name
            )));
        }
    }

    Ok(())
}

/// Tests free-text review names against the catalog.
///
/// `is_match` answers "does this text name any known whisky" with one
/// compiled pattern; `resolve` picks the first catalog entry (in catalog
/// order) whose name is contained in the trimmed text. Matching is
/// case-sensitive.
#[derive(Debug, Clone)]
pub struct CatalogMatcher {
    pattern: Option<Regex>,
    names: Vec<String>,
}

impl CatalogMatcher {
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] if the combined pattern cannot be
    /// compiled.
    pub fn new<'a, I>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<String> = names.into_iter().map(ToOwned::to_owned).collect();

        // An empty alternation would match every string.
        let pattern = if names.is_empty() {
            None
        } else {
            let alternation = names
                .iter()
                .map(|n| regex::escape(n))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&alternation)?)
        };

        Ok(Self { pattern, names })
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|re| re.is_match(text))
    }

    /// Index of the first catalog name contained in `text`.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Option<usize> {
        let trimmed = text.trim();
        self.names
            .iter()
            .position(|name| trimmed.contains(name.as_str()))
    }

    /// The combined alternation, if the catalog is non-empty.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
