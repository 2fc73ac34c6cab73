use crate::log_debug;
use crate::sources::{Source, default_sources};

use anyhow::{Context, Result, anyhow};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration structure for the Chorus application
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Upstream sources, queried in this order
    #[serde(default = "default_sources")]
    pub sources: Vec<Source>,
    /// Network and dispatch settings
    #[serde(default)]
    pub network: NetworkConfig,
    /// Answer quality scoring thresholds
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Fusion and candidate selection settings
    #[serde(default)]
    pub fusion: FusionConfig,
}

/// Network and dispatch configuration
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct NetworkConfig {
    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Maximum number of in-flight upstream calls
    #[serde(default = "default_max_concurrent_calls")]
    pub max_concurrent_calls: usize,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Scoring thresholds; see `pipeline::score` for how they are applied
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ScoringConfig {
    /// Texts shorter than this score exactly 0
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// (length threshold, points) pairs, highest threshold first
    #[serde(default = "default_length_bands")]
    pub length_bands: Vec<(usize, u32)>,
    /// Substrings that signal a structured, explanatory answer
    #[serde(default = "default_discourse_markers")]
    pub discourse_markers: Vec<String>,
}

/// Fusion and candidate selection configuration
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct FusionConfig {
    /// How many top-ranked answers a synthesized reply may combine
    #[serde(default = "default_max_fused")]
    pub max_fused: usize,
    /// Extracted texts at or below this length never become candidates
    #[serde(default = "default_min_answer_chars")]
    pub min_answer_chars: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            max_concurrent_calls: default_max_concurrent_calls(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            length_bands: default_length_bands(),
            discourse_markers: default_discourse_markers(),
        }
    }
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            max_fused: default_max_fused(),
            min_answer_chars: default_min_answer_chars(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            network: NetworkConfig::default(),
            scoring: ScoringConfig::default(),
            fusion: FusionConfig::default(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_max_concurrent_calls() -> usize {
    4
}

fn default_user_agent() -> String {
    format!("chorus/{}", env!("CARGO_PKG_VERSION"))
}

fn default_min_length() -> usize {
    20
}

fn default_length_bands() -> Vec<(usize, u32)> {
    vec![(150, 3), (80, 2), (30, 1)]
}

fn default_discourse_markers() -> Vec<String> {
    [
        "for example",
        "however",
        "firstly",
        "secondly",
        "therefore",
        "in other words",
        "such as",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_max_fused() -> usize {
    3
}

fn default_min_answer_chars() -> usize {
    10
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Load the configuration from the file, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        let config = if config_path.exists() {
            let config_content = fs::read_to_string(&config_path)?;
            toml::from_str(&config_content).with_context(|| {
                format!(
                    "Invalid configuration file format in {}",
                    config_path.display()
                )
            })?
        } else {
            Self::default()
        };

        log_debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// Save the configuration to the file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        let config_content = toml::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        log_debug!("Configuration saved: {:?}", self);
        Ok(())
    }

    /// Get the path to the configuration file
    fn get_config_path() -> Result<PathBuf> {
        let mut path =
            config_dir().ok_or_else(|| anyhow!("Unable to determine config directory"))?;
        path.push("chorus");
        std::fs::create_dir_all(&path)?;
        path.push("config.toml");
        Ok(path)
    }

    /// Update the configuration with new values
    pub fn update(
        &mut self,
        timeout_seconds: Option<u64>,
        max_concurrent_calls: Option<usize>,
        max_fused: Option<usize>,
        add_source: Option<(String, String)>,
        remove_source: Option<String>,
    ) -> Result<()> {
        if let Some(timeout) = timeout_seconds {
            if timeout == 0 {
                return Err(anyhow!("Timeout must be at least one second"));
            }
            self.network.timeout_seconds = timeout;
        }
        if let Some(limit) = max_concurrent_calls {
            if limit == 0 {
                return Err(anyhow!("At least one concurrent call is required"));
            }
            self.network.max_concurrent_calls = limit;
        }
        if let Some(fused) = max_fused {
            if fused == 0 {
                return Err(anyhow!("At least one fused source is required"));
            }
            self.fusion.max_fused = fused;
        }
        if let Some((name, url_template)) = add_source {
            let source = Source::new(name, url_template);
            source.validate()?;
            self.sources.retain(|s| s.name != source.name);
            self.sources.push(source);
        }
        if let Some(name) = remove_source {
            let before = self.sources.len();
            self.sources.retain(|s| s.name != name);
            if self.sources.len() == before {
                return Err(anyhow!("No source named '{}' is configured", name));
            }
        }

        self.validate()?;
        log_debug!("Configuration updated: {:?}", self);
        Ok(())
    }

    /// Check the configuration for values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(anyhow!("At least one source must be configured"));
        }
        for source in &self.sources {
            source.validate()?;
        }
        Ok(())
    }

    /// Look up a configured source by name
    pub fn get_source(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.name == name)
    }
}
