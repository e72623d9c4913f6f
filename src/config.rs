// Configuration for the standings simulator
// Supports YAML configuration files for simulation and projection settings

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub projection: ProjectionSettings,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        if !Path::new(path).exists() {
            return Err(ConfigError::NotFound(path.to_string()));
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load configuration from file if it exists, otherwise use defaults
    pub fn load_or_default(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::from_file(p).unwrap_or_else(|e| {
                warn!(error = %e, "using default configuration");
                Self::default()
            }),
            None => {
                // Try default locations
                for default_path in &["tablesim.yaml", "tablesim.yml", ".tablesim.yaml"] {
                    if Path::new(default_path).exists() {
                        match Self::from_file(default_path) {
                            Ok(config) => {
                                info!(path = default_path, "loaded configuration");
                                return config;
                            }
                            Err(e) => warn!(path = default_path, error = %e, "skipping config file"),
                        }
                    }
                }
                Self::default()
            }
        }
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }
}

/// Position probability settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Monte Carlo iterations for position probabilities
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Most remaining league fixtures the exact solver is used for
    #[serde(default = "default_exact_fixture_limit")]
    pub exact_fixture_limit: usize,

    /// Fixed seed for reproducible Monte Carlo runs; unset draws a fresh one
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            iterations: default_iterations(),
            exact_fixture_limit: default_exact_fixture_limit(),
            seed: None,
        }
    }
}

fn default_iterations() -> usize { 10000 }
fn default_exact_fixture_limit() -> usize { 15 }

/// Projected table settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSettings {
    #[serde(default = "default_projection_iterations")]
    pub iterations: usize,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        ProjectionSettings {
            iterations: default_projection_iterations(),
        }
    }
}

fn default_projection_iterations() -> usize { 5000 }

/// Generate a sample configuration file
pub fn generate_sample_config() -> String {
    r#"# tablesim configuration
# All values shown are defaults - uncomment and modify as needed

# Position probability settings
simulation:
  # Monte Carlo iterations (higher = more accurate but slower)
  iterations: 10000
  # Exact enumeration is used while the league has at most this many fixtures left
  exact_fixture_limit: 15
  # Fixed seed for reproducible runs (omit for a fresh seed every run)
  # seed: 42

# Projected table settings
projection:
  iterations: 5000
"#.to_string()
}
