use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upstream Multivac server used when neither config nor flags name one.
pub const DEFAULT_UPSTREAM: &str = "http://127.0.0.1:5000";

/// Launcher config, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Base URL of the server exposing `/session`.
    pub upstream: String,
    /// Environment names offered by the form.
    pub environments: Vec<String>,
    /// Agent names offered by the form.
    pub agents: Vec<String>,
    /// Pre-filled values for the numeric inputs.
    pub defaults: FormDefaults,
}

/// Initial values of the numeric form inputs. Kept as strings since they
/// are placed into the form verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub num_steps: String,
    pub observation_delta: String,
    pub video_fps: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            upstream: DEFAULT_UPSTREAM.to_string(),
            environments: vec!["MeanPixelDifferenceEnv".to_string()],
            agents: vec!["random".to_string()],
            defaults: FormDefaults::default(),
        }
    }
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            num_steps: String::new(),
            observation_delta: "250".to_string(),
            video_fps: "1".to_string(),
        }
    }
}

impl LauncherConfig {
    /// Load config from a TOML file path. Returns None if file doesn't exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(path.to_path_buf(), e))?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e))?;
        Ok(Some(config))
    }

    /// Load from `path`, or the default location, falling back to built-in
    /// defaults when no file is present.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };
        match path {
            Some(p) => {
                let loaded = Self::load(&p)?;
                if loaded.is_some() {
                    tracing::debug!(path = %p.display(), "loaded launcher config");
                }
                Ok(loaded.unwrap_or_default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn knows_environment(&self, name: &str) -> bool {
        self.environments.iter().any(|e| e == name)
    }

    pub fn knows_agent(&self, name: &str) -> bool {
        self.agents.iter().any(|a| a == name)
    }
}

/// `~/.config/multivac/launch.toml` on Linux; the platform equivalent elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("multivac").join("launch.toml"))
}

/// Errors that can occur when loading config.
#[derive(Debug)]
pub enum ConfigError {
    ReadFailed(PathBuf, std::io::Error),
    ParseFailed(PathBuf, toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadFailed(path, e) => {
                write!(f, "Failed to read config {}: {}", path.display(), e)
            }
            Self::ParseFailed(path, e) => {
                write!(f, "Failed to parse config {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
