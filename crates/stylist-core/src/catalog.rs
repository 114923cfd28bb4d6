//! Garment catalog.
//!
//! The reference catalog is embedded at compile time from
//! `contrib/catalog/garments.toml` and parsed once on first use. Deployments
//! may load their own catalog file in the same format.

use crate::types::{check_measurement, Category, Garment, ParseError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../../../contrib/catalog/garments.toml");

static BUILTIN: OnceLock<Result<Catalog, String>> = OnceLock::new();

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("bad catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("garment {garment:?}: {source}")]
    InvalidMeasure {
        garment: String,
        #[source]
        source: ParseError,
    },
    #[error("embedded catalog is unusable: {0}")]
    Builtin(String),
}

/// Read-only collection of garments, in authoring order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "garment", default)]
    garments: Vec<Garment>,
}

impl Catalog {
    pub fn new(garments: Vec<Garment>) -> Self {
        Self { garments }
    }

    /// The embedded reference catalog.
    ///
    /// Parsed on first call; a broken embedded file is reported on every call.
    pub fn builtin() -> Result<&'static Catalog, CatalogError> {
        BUILTIN
            .get_or_init(|| Catalog::from_toml_str(BUILTIN_CATALOG).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|e| CatalogError::Builtin(e.clone()))
    }

    /// Parse a TOML catalog. Every measure must be a finite, non-negative length.
    pub fn from_toml_str(src: &str) -> Result<Self, CatalogError> {
        let catalog: Self = toml::from_str(src)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for garment in &self.garments {
            for (&key, &value) in &garment.measures {
                check_measurement(key, value).map_err(|source| CatalogError::InvalidMeasure {
                    garment: garment.name.clone(),
                    source,
                })?;
            }
        }
        Ok(())
    }

    /// Load a catalog file in the embedded TOML format.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let src = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_toml_str(&src)?;
        tracing::info!(path = %path.display(), garments = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    pub fn garments(&self) -> &[Garment] {
        &self.garments
    }

    /// Garments of one category, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Garment> + '_ {
        self.garments.iter().filter(move |g| g.category == category)
    }

    pub fn len(&self) -> usize {
        self.garments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.garments.is_empty()
    }
}
