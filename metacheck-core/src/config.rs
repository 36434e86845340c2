use crate::error::{MetacheckError, Result};
use crate::reference::GatedFormat;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    #[serde(default = "default_reference_file")]
    pub reference_file: Utf8PathBuf,
    /// Base directory for relative sample paths in the reference file
    pub media_root: Option<Utf8PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Optional codec support of the environment under test
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Capabilities {
    #[serde(default)]
    pub wma_enabled: bool,
    #[serde(default)]
    pub wmv_enabled: bool,
}

impl Capabilities {
    pub fn is_enabled(&self, format: GatedFormat) -> bool {
        match format {
            GatedFormat::Wma => self.wma_enabled,
            GatedFormat::Wmv => self.wmv_enabled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Largest accepted duration difference is one less than this
    #[serde(default = "default_duration_tolerance")]
    pub duration_tolerance_ms: u64,
    /// Stop checking a file at its first mismatching field
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            reference_file: default_reference_file(),
            media_root: None,
            log_level: default_log_level(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            duration_tolerance_ms: default_duration_tolerance(),
            fail_fast: false,
        }
    }
}

// Default value functions
fn default_reference_file() -> Utf8PathBuf {
    dirs::config_dir()
        .map(|p| p.join("metacheck/reference.toml"))
        .and_then(|p| Utf8PathBuf::try_from(p).ok())
        .unwrap_or_else(|| Utf8PathBuf::from("~/.config/metacheck/reference.toml"))
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_duration_tolerance() -> u64 {
    100
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;
        Self::load_from_path(&config_path)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| MetacheckError::Config(format!("Failed to read config: {}", e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)
            .map_err(|e| MetacheckError::Config(format!("Failed to parse config: {}", e)))?;

        config.expand_paths();
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::default())
    }

    fn find_config_file() -> Result<PathBuf> {
        let candidates = [
            dirs::config_dir().map(|p| p.join("metacheck/metacheck.toml")),
            Some(PathBuf::from("/etc/metacheck/metacheck.toml")),
        ];

        for candidate in candidates.into_iter().flatten() {
            if candidate.exists() {
                return Ok(candidate);
            }
        }

        Err(MetacheckError::Config("Config file not found".to_owned()))
    }

    fn expand_paths(&mut self) {
        fn expand_tilde(path: &Utf8PathBuf) -> Utf8PathBuf {
            let path_str = path.as_str();
            if path_str.starts_with("~/") {
                if let Some(home) = dirs::home_dir() {
                    if let Some(home_str) = home.to_str() {
                        return Utf8PathBuf::from(path_str.replacen("~", home_str, 1));
                    }
                }
            }
            path.clone()
        }

        self.general.reference_file = expand_tilde(&self.general.reference_file);
        if let Some(root) = &self.general.media_root {
            self.general.media_root = Some(expand_tilde(root));
        }
    }

    fn validate(&self) -> Result<()> {
        if self.validation.duration_tolerance_ms == 0 {
            return Err(MetacheckError::Config(
                "duration_tolerance_ms must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}
