//! Configuration loading and parsing.
//!
//! Parses `deemacs.toml` (or an override path supplied by the binary). Every
//! table and field is optional; missing values take their defaults. Unknown
//! fields are ignored so older binaries tolerate newer files. A file that
//! fails to parse is reported at WARN and replaced by the defaults.
//!
//! ```toml
//! [editor]
//! create_if_missing = true
//! [search]
//! case = "smart"        # smart | sensitive | insensitive
//! [display]
//! status_color = "red"
//! audible_alert = true
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "deemacs.toml";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchCase {
    /// Case-sensitive only when the needle contains an uppercase letter.
    #[default]
    Smart,
    Sensitive,
    Insensitive,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Black,
    #[default]
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// Terminal default foreground.
    Default,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_create_if_missing")]
    pub create_if_missing: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            create_if_missing: Self::default_create_if_missing(),
        }
    }
}

impl EditorConfig {
    const fn default_create_if_missing() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SearchConfig {
    #[serde(default)]
    pub case: SearchCase,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default)]
    pub status_color: StatusColor,
    #[serde(default = "DisplayConfig::default_audible_alert")]
    pub audible_alert: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            status_color: StatusColor::default(),
            audible_alert: Self::default_audible_alert(),
        }
    }
}

impl DisplayConfig {
    const fn default_audible_alert() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
    pub source: Option<PathBuf>,
}

/// Best-effort config path: `./deemacs.toml`, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("deemacs").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                file,
                source: Some(path),
            })
        }
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            Ok(Config::default())
        }
    }
}
