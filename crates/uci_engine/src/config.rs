//! Engine configuration: TOML file plus command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 8;

/// Settings the front-end hands to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Search depth in plies
    pub depth: u8,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("invalid engine configuration")?;
        Ok(config.normalized())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("in {}", path.display()))
    }

    /// Command-line values win over whatever the file said.
    pub fn with_overrides(mut self, depth: Option<u8>, log_level: Option<String>) -> Self {
        if let Some(depth) = depth {
            self.depth = depth;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        self.depth = clamp_depth(self.depth);
        self
    }
}

pub fn clamp_depth(depth: u8) -> u8 {
    depth.clamp(MIN_DEPTH, MAX_DEPTH)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
