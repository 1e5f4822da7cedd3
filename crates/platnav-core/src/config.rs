//! # Terrain Configuration
//!
//! Tunable constants for segmentation and reachability.
//!
//! Every field defaults to the matching constant in [`crate::primitives`], so
//! a partial TOML file only needs the values it changes:
//!
//! ```toml
//! jump_range = 18
//! minimum_platform_length = 8
//! ```

use crate::NavError;
use crate::primitives::{
    DBLJUMP_HALF_HEIGHT, DOUBLEJUMP_MAX_HEIGHT, JUMP_RANGE, LADDER_VARIANCE,
    MINIMUM_LADDER_LENGTH, MINIMUM_PLATFORM_LENGTH, PLATFORM_VARIANCE,
};
use serde::{Deserialize, Serialize};

/// Tuning values shared by the segmenter and the graph builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerrainConfig {
    /// Horizontal jitter tolerated inside a platform run.
    pub platform_variance: u32,
    /// Vertical jitter tolerated inside a ladder run.
    pub ladder_variance: u32,
    /// Distinct samples required to commit a platform.
    pub minimum_platform_length: usize,
    /// Distinct samples required to commit a ladder.
    pub minimum_ladder_length: usize,
    /// Maximum endpoint distance for sideways jumps.
    pub jump_range: u32,
    /// Height reachable by a partial double jump.
    pub dbljump_half_height: u32,
    /// Height reachable by a full double jump.
    pub doublejump_max_height: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            platform_variance: PLATFORM_VARIANCE,
            ladder_variance: LADDER_VARIANCE,
            minimum_platform_length: MINIMUM_PLATFORM_LENGTH,
            minimum_ladder_length: MINIMUM_LADDER_LENGTH,
            jump_range: JUMP_RANGE,
            dbljump_half_height: DBLJUMP_HALF_HEIGHT,
            doublejump_max_height: DOUBLEJUMP_MAX_HEIGHT,
        }
    }
}

impl TerrainConfig {
    /// Check that the values describe a usable configuration.
    ///
    /// A run needs two distinct samples to span any length, and the partial
    /// double-jump tier may not exceed the full one.
    pub fn validate(&self) -> Result<(), NavError> {
        if self.minimum_platform_length < 2 {
            return Err(NavError::InvalidConfig(
                "minimum_platform_length must be at least 2".to_string(),
            ));
        }
        if self.minimum_ladder_length < 2 {
            return Err(NavError::InvalidConfig(
                "minimum_ladder_length must be at least 2".to_string(),
            ));
        }
        if self.dbljump_half_height > self.doublejump_max_height {
            return Err(NavError::InvalidConfig(format!(
                "dbljump_half_height ({}) exceeds doublejump_max_height ({})",
                self.dbljump_half_height, self.doublejump_max_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(TerrainConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_jump_tiers_rejected() {
        let config = TerrainConfig {
            dbljump_half_height: 40,
            doublejump_max_height: 31,
            ..TerrainConfig::default()
        };
        assert!(matches!(config.validate(), Err(NavError::InvalidConfig(_))));
    }

    #[test]
    fn single_sample_run_length_rejected() {
        let config = TerrainConfig {
            minimum_ladder_length: 1,
            ..TerrainConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
