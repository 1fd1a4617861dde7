//! Document Configuration - Static Bill of Lading Content
//!
//! Origin facility, carrier and commodity line are printed verbatim on every
//! bill of lading. Defaults are compiled in; a JSON file may override them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentConfig {
    #[serde(default = "default_origin")]
    pub origin: Vec<String>,
    #[serde(default = "default_carrier")]
    pub carrier: String,
    #[serde(default)]
    pub commodity: CommodityLine,
}

fn default_origin() -> Vec<String> {
    vec![
        "Vaughan CFC".to_string(),
        "100 Gibraltar Road".to_string(),
        "Vaughan, ON L4H 3N5".to_string(),
    ]
}

fn default_carrier() -> String { "Sobeys Inc.".to_string() }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommodityLine {
    #[serde(default = "default_quantity")]
    pub quantity: String,
    #[serde(default = "default_package_type")]
    pub package_type: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_weight")]
    pub weight: String,
}

fn default_quantity() -> String { "36".to_string() }
fn default_package_type() -> String { "Frames".to_string() }
fn default_description() -> String { "Mixed Grocery - Perishable".to_string() }
fn default_weight() -> String { "28,440 lbs".to_string() }

impl Default for CommodityLine {
    fn default() -> Self {
        Self {
            quantity: default_quantity(),
            package_type: default_package_type(),
            description: default_description(),
            weight: default_weight(),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            carrier: default_carrier(),
            commodity: CommodityLine::default(),
        }
    }
}

impl DocumentConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded document config");
        Ok(config)
    }
}
