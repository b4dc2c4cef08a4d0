//! Preset file format.
//!
//! Presets are TOML files holding a name and a `[params]` table. Values are
//! strings and are parsed against each parameter's declared kind, so
//! `order = "4"` and `order = 4` are both accepted.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::Path;

/// Preset file format.
#[derive(Debug, Deserialize)]
pub struct Preset {
    /// Name of the preset
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Parameter values by name
    #[serde(default, deserialize_with = "deserialize_params")]
    pub params: BTreeMap<String, String>,
}

impl Preset {
    /// Load and parse a preset file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse preset TOML.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Int(i64),
    Float(f64),
}

fn deserialize_params<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, RawValue>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(k, v)| {
            let text = match v {
                RawValue::Text(s) => s,
                RawValue::Int(i) => i.to_string(),
                RawValue::Float(f) => f.to_string(),
            };
            (k, text)
        })
        .collect())
}
