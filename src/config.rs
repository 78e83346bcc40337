//! Configuration loading for the route planner

use crate::error::Result;
use crate::route::RouteStyle;
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub route: RouteConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub style: RouteStyle,
}

/// Graph search settings
#[derive(Clone, Debug, Deserialize)]
pub struct SearchConfig {
    /// Iteration cap before a search is abandoned (default: 100000)
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

/// Route geometry settings
#[derive(Clone, Debug, Deserialize)]
pub struct RouteConfig {
    /// Cardinal spline tension (default: 0.25)
    #[serde(default = "default_spline_tension")]
    pub spline_tension: f64,

    /// Interpolated samples per control-point pair (default: 8)
    #[serde(default = "default_spline_samples")]
    pub spline_samples: usize,
}

/// Path cache settings
#[derive(Clone, Debug, Deserialize)]
pub struct CacheConfig {
    /// TTL assigned to freshly inserted routes (default: 3)
    #[serde(default = "default_initial_ttl")]
    pub initial_ttl: i32,

    /// Suggested interval between sweep() calls in seconds (default: 60).
    /// The cache never spawns its own timer; the embedder drives the
    /// sweep at this cadence.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            spline_tension: default_spline_tension(),
            spline_samples: default_spline_samples(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_ttl: default_initial_ttl(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            route: RouteConfig::default(),
            cache: CacheConfig::default(),
            style: RouteStyle::default(),
        }
    }
}

// Default value functions
fn default_max_iterations() -> usize {
    100_000
}
fn default_spline_tension() -> f64 {
    0.25
}
fn default_spline_samples() -> usize {
    8
}
fn default_initial_ttl() -> i32 {
    3
}
fn default_sweep_interval_secs() -> u64 {
    60
}

impl PlannerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PlannerConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
