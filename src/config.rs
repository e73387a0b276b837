//! Board configuration.
//!
//! Settings are read from an optional TOML file; every field falls back to
//! the historical defaults (target of 5 problems a week, eight avatars,
//! ties kept in first-appearance order).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// How participants with equal completion counts are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the order in which each name first appeared that week.
    #[default]
    FirstAppearance,
    /// Order tied names by byte-wise string comparison.
    Alphabetical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Problems each participant should solve per week.
    #[serde(default = "default_weekly_target")]
    pub weekly_target: u32,

    /// Glyphs handed out cyclically in first-appearance order.
    #[serde(default = "default_avatars")]
    pub avatars: Vec<String>,

    #[serde(default)]
    pub tie_break: TieBreak,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            weekly_target: default_weekly_target(),
            avatars: default_avatars(),
            tie_break: TieBreak::default(),
        }
    }
}

fn default_weekly_target() -> u32 {
    5
}

fn default_avatars() -> Vec<String> {
    vec!["🧑‍💻", "👩‍💻", "🤓", "👨‍💻", "🧠", "🦄", "🔥", "⭐"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl BoardConfig {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BoardError> {
        if self.weekly_target == 0 {
            return Err(BoardError::InvalidTarget);
        }
        if self.avatars.is_empty() {
            return Err(BoardError::NoAvatars);
        }
        Ok(())
    }

    /// Default configuration rendered as TOML.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("Failed to serialize default config")
    }
}
