//! Configuration persistence
//!
//! ```toml
//! scratch_dir = "/tmp/modlayout"   # optional, cleared before each run
//! keep_scratch = false
//!
//! [tools]
//! erf = "nwn_erf"
//! gff = "nwn_gff"
//! tlk = "nwn_tlk"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Program names (or paths) of the external converters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub erf: String,
    pub gff: String,
    pub tlk: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            erf: "nwn_erf".to_string(),
            gff: "nwn_gff".to_string(),
            tlk: "nwn_tlk".to_string(),
        }
    }
}

/// Settings for a layout run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModLayoutConfig {
    pub tools: ToolConfig,
    /// Directory the per-run scratch area is created in (system temp dir when unset)
    pub scratch_dir: Option<PathBuf>,
    /// Leave the scratch directory in place after the run
    pub keep_scratch: bool,
}

impl ModLayoutConfig {
    /// Platform config file location (`<config dir>/ModLayout/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ModLayout").join("config.toml"))
    }

    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load `explicit` if given, else the platform config file if it exists,
    /// else defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}
