use anyhow::Result;
use std::path::PathBuf;

use crate::resolver::LocaleSettings;

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the message file tree (contains `defaults/` and `overrides/`).
    pub lang_dir: PathBuf,

    /// Configured default locale for console/system output and fallback.
    pub default_locale: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            lang_dir: std::env::var("LANG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("lang")),
            default_locale: std::env::var("DEFAULT_LOCALE")
                .unwrap_or_else(|_| "en".to_string()),
        })
    }

    /// Directory of shipped default message files.
    pub fn defaults_dir(&self) -> PathBuf {
        self.lang_dir.join("defaults")
    }

    /// Directory of administrator override message files.
    pub fn overrides_dir(&self) -> PathBuf {
        self.lang_dir.join("overrides")
    }
}

impl LocaleSettings for Config {
    fn default_locale(&self) -> String {
        self.default_locale.clone()
    }
}
