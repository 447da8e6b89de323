//! Immutable reference tables shared by the calculator and the aggregator.
//!
//! The GDP estimates are approximations in trillions of USD, used only as a
//! denominator. They are not authoritative data.

use super::resolver::{names_overlap, NameResolver};
use crate::utils::config::{
    EXCLUDED_LABEL_MARKERS, FALLBACK_GDP_TRILLIONS, GDP_SCALE, MATERIALITY_FLOOR_USD, OTHER_REGION,
};
use crate::utils::error::ReferenceError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// GDP estimate for one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GdpEstimate {
    pub country: String,
    pub trillions_usd: f64,
}

/// A named region and the country labels that belong to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub countries: Vec<String>,
}

/// Reference configuration for the whole pipeline
///
/// Table order matters: fuzzy lookups pick the first matching entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    #[serde(default = "default_gdp")]
    pub gdp: Vec<GdpEstimate>,

    #[serde(default = "default_regions")]
    pub regions: Vec<Region>,

    #[serde(default = "default_excluded_markers")]
    pub excluded_markers: Vec<String>,

    #[serde(default = "default_materiality_floor")]
    pub materiality_floor: f64,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            gdp: default_gdp(),
            regions: default_regions(),
            excluded_markers: default_excluded_markers(),
            materiality_floor: default_materiality_floor(),
        }
    }
}

impl ReferenceData {
    /// Parse reference data from TOML, filling omitted tables with defaults
    ///
    /// # Errors
    /// * `ReferenceError::Toml` - invalid TOML or field types
    /// * `ReferenceError::Invalid` - non-positive GDP, empty names, bad floor
    pub fn from_toml_str(content: &str) -> Result<Self, ReferenceError> {
        let data: ReferenceData = toml::from_str(content)?;
        data.validate()?;
        Ok(data)
    }

    /// Load reference data from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let path = path.as_ref();
        info!("Loading reference data: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let data = Self::from_toml_str(&content)?;

        debug!(
            "Reference data: {} GDP entries, {} regions",
            data.gdp.len(),
            data.regions.len()
        );
        Ok(data)
    }

    /// Check table contents
    pub fn validate(&self) -> Result<(), ReferenceError> {
        for entry in &self.gdp {
            if entry.country.trim().is_empty() {
                return Err(ReferenceError::Invalid("GDP entry with empty country".to_string()));
            }
            if !entry.trillions_usd.is_finite() || entry.trillions_usd <= 0.0 {
                return Err(ReferenceError::Invalid(format!(
                    "GDP for '{}' must be positive, found {}",
                    entry.country, entry.trillions_usd
                )));
            }
        }

        for region in &self.regions {
            if region.name.trim().is_empty() {
                return Err(ReferenceError::Invalid("region with empty name".to_string()));
            }
        }

        if !self.materiality_floor.is_finite() || self.materiality_floor < 0.0 {
            return Err(ReferenceError::Invalid(format!(
                "materiality_floor must be non-negative, found {}",
                self.materiality_floor
            )));
        }

        Ok(())
    }

    /// GDP keys in table order
    pub fn gdp_keys(&self) -> Vec<String> {
        self.gdp.iter().map(|e| e.country.clone()).collect()
    }

    /// GDP in USD by exact name, if the table has an entry
    pub fn gdp_exact(&self, country: &str) -> Option<f64> {
        self.gdp
            .iter()
            .find(|e| e.country == country)
            .map(|e| e.trillions_usd * GDP_SCALE)
    }

    /// GDP in USD by exact name, falling back to the default estimate
    pub fn gdp_or_fallback(&self, country: &str) -> f64 {
        self.gdp_exact(country)
            .unwrap_or(FALLBACK_GDP_TRILLIONS * GDP_SCALE)
    }

    /// GDP in USD through a resolver built over `gdp_keys()`
    pub fn gdp_resolved(&self, resolver: &NameResolver, country: &str) -> f64 {
        resolver
            .resolve(country)
            .index()
            .and_then(|i| self.gdp.get(i))
            .map(|e| e.trillions_usd * GDP_SCALE)
            .unwrap_or(FALLBACK_GDP_TRILLIONS * GDP_SCALE)
    }

    /// Region for a country label, by containment in either direction
    pub fn region_for(&self, country: &str) -> &str {
        self.regions
            .iter()
            .find(|r| r.countries.iter().any(|c| names_overlap(country, c)))
            .map(|r| r.name.as_str())
            .unwrap_or(OTHER_REGION)
    }

    /// Region whose member list contains `country` exactly
    pub fn region_exact(&self, country: &str) -> &str {
        self.regions
            .iter()
            .find(|r| r.countries.iter().any(|c| c == country))
            .map(|r| r.name.as_str())
            .unwrap_or(OTHER_REGION)
    }

    /// Whether a label names a non-country aggregate ("Areas, nes")
    ///
    /// Markers match whole words only.
    pub fn is_excluded_label(&self, label: &str) -> bool {
        label
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .any(|word| self.excluded_markers.iter().any(|m| m == word))
    }
}

fn default_gdp() -> Vec<GdpEstimate> {
    [
        ("United States", 23.0),
        ("China", 17.7),
        ("Japan", 5.0),
        ("Germany", 4.2),
        ("United Kingdom", 3.1),
        ("India", 3.2),
        ("France", 2.9),
        ("Italy", 2.1),
        ("Canada", 1.9),
        ("Rep. of Korea", 1.8),
        ("Australia", 1.5),
        ("Brazil", 1.8),
        ("Spain", 1.4),
        ("Mexico", 1.3),
        ("Netherlands", 1.0),
    ]
    .into_iter()
    .map(|(country, trillions_usd)| GdpEstimate {
        country: country.to_string(),
        trillions_usd,
    })
    .collect()
}

fn default_regions() -> Vec<Region> {
    let region = |name: &str, countries: &[&str]| Region {
        name: name.to_string(),
        countries: countries.iter().map(|c| c.to_string()).collect(),
    };

    vec![
        region("North America", &["United States", "USA", "Canada", "Mexico"]),
        region(
            "Europe",
            &["Germany", "United Kingdom", "France", "Italy", "Spain", "Netherlands"],
        ),
        region(
            "Asia-Pacific",
            &["China", "Japan", "Rep. of Korea", "Australia", "India"],
        ),
        region("South America", &["Brazil"]),
    ]
}

fn default_excluded_markers() -> Vec<String> {
    EXCLUDED_LABEL_MARKERS.iter().map(|m| m.to_string()).collect()
}

fn default_materiality_floor() -> f64 {
    MATERIALITY_FLOOR_USD
}
