//! Engine configuration with documented constants
//!
//! All tunable values are collected here with explanations of their purpose
//! and how they interact with each other.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::circle::NUM_HOLES;
use crate::core::error::{AubreyError, Result};

/// Configuration for the simulation engine
///
/// The defaults reproduce Hoyle's published model: 56 holes, exact syzygy
/// alignment, and a three-hole nodal influence band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of discrete positions on the circle
    ///
    /// Must be positive and even (node opposition is defined as a half-circle
    /// offset). The monument circle has 56.
    pub num_holes: u16,

    /// Tolerance in holes for treating the Moon as aligned with the Sun
    /// (new moon) or with the anti-Sun point (full moon)
    ///
    /// At the default of 0 only exact alignment counts as syzygy.
    pub proximity_threshold: u16,

    /// Half-width in holes of the nodal influence band
    ///
    /// The Moon must be within this many holes of a node for an alignment to
    /// count as an eclipse. Hoyle's model uses 3.
    pub nodal_influence_width: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_holes: NUM_HOLES,
            proximity_threshold: 0,
            nodal_influence_width: 3,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.num_holes == 0 {
            return Err(AubreyError::InvalidConfiguration(
                "num_holes must be positive".into(),
            ));
        }

        // Node opposition places the descending node half a circle away
        if self.num_holes % 2 != 0 {
            return Err(AubreyError::InvalidConfiguration(format!(
                "num_holes ({}) must be even for node opposition",
                self.num_holes
            )));
        }

        // Beyond half the circle every pair of positions is trivially aligned
        if self.proximity_threshold >= self.num_holes / 2 {
            return Err(AubreyError::InvalidConfiguration(format!(
                "proximity_threshold ({}) must be < num_holes / 2 ({})",
                self.proximity_threshold,
                self.num_holes / 2
            )));
        }

        if self.nodal_influence_width >= self.num_holes / 2 {
            return Err(AubreyError::InvalidConfiguration(format!(
                "nodal_influence_width ({}) must be < num_holes / 2 ({})",
                self.nodal_influence_width,
                self.num_holes / 2
            )));
        }

        Ok(())
    }

    /// Parse a config from TOML text
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(content).map_err(|e| AubreyError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| AubreyError::ParseError(format!("{}: {}", path.display(), e)))
    }
}
