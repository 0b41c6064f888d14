use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Named parameter sets for the different output templates the records feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Short bullets (120 chars, 5 per entry), lenient name detection.
    #[default]
    Standard,
    /// Longer bullets (150 chars, 6 per entry), stricter name detection.
    Detailed,
}

/// Every tunable threshold and placeholder used by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub name_placeholder: String,
    pub location_placeholder: String,
    /// A name line must be strictly longer than this.
    pub name_min_len: usize,
    pub name_scan_lines: usize,
    /// Lines longer than this are never section headers.
    pub header_max_len: usize,
    /// Unclassified lines must be strictly longer than this to count as prose.
    pub free_text_min_len: usize,
    /// Prose longer than this is split into sentences.
    pub sentence_split_len: usize,
    pub max_item_len: usize,
    pub max_items: usize,
    pub max_list_items: usize,
    pub default_verb: String,
    /// Prefix action verbs on education details as well as responsibilities.
    pub rewrite_details: bool,
    pub max_input_bytes: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            name_placeholder: "Candidate Name".to_string(),
            location_placeholder: "Location".to_string(),
            name_min_len: 3,
            name_scan_lines: 10,
            header_max_len: 50,
            free_text_min_len: 20,
            sentence_split_len: 150,
            max_item_len: 120,
            max_items: 5,
            max_list_items: 15,
            default_verb: "Developed".to_string(),
            rewrite_details: true,
            max_input_bytes: 1 << 20,
        }
    }
}

impl ParserConfig {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Standard => ParserConfig::default(),
            Preset::Detailed => ParserConfig {
                name_min_len: 5,
                max_item_len: 150,
                max_items: 6,
                ..ParserConfig::default()
            },
        }
    }

    /// Start from `preset` and apply any fields set in the TOML file at `path`.
    pub fn load(preset: Preset, path: Option<&Path>) -> Result<Self> {
        let base = ParserConfig::preset(preset);
        let Some(path) = path else {
            return Ok(base);
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let overrides: toml::Table = toml::from_str(&raw)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?;

        let mut merged = toml::Table::try_from(&base).context("Failed to encode base config")?;
        merged.extend(overrides);
        let config: ParserConfig = merged
            .try_into()
            .with_context(|| format!("Invalid parser settings in {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Clamp values that would make the pipeline degenerate.
    pub fn sanitized(mut self) -> Self {
        if self.max_item_len < 10 {
            warn!("max_item_len {} too small, using 10", self.max_item_len);
            self.max_item_len = 10;
        }
        if self.max_items == 0 {
            warn!("max_items is 0, using 1");
            self.max_items = 1;
        }
        if self.sentence_split_len == 0 {
            warn!("sentence_split_len is 0, using {}", self.max_item_len);
            self.sentence_split_len = self.max_item_len;
        }
        if self.name_scan_lines == 0 {
            warn!("name_scan_lines is 0, using 1");
            self.name_scan_lines = 1;
        }
        if self.default_verb.trim().is_empty() {
            warn!("default_verb is empty, using \"Developed\"");
            self.default_verb = "Developed".to_string();
        }
        self
    }
}
