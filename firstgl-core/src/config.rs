//! Demo configuration.
//!
//! Every binary starts from a built-in preset (see [`crate::demo::DemoKind::config`]). If a file
//! called `<binary>.json` exists in the assets directory, the fields it sets replace the preset's.
//! A missing file is fine; a malformed one is an error.

use std::{
    num::NonZeroU32,
    path::{Path, PathBuf},
};

use log::LevelFilter;
use serde::Deserialize;

use crate::{
    error::{DemoError, Result},
    event::Key,
};

/// Window creation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

/// Complete configuration of one demo run.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub window: WindowConfig,
    /// Directory shader and texture files are resolved against.
    pub assets_dir: PathBuf,
    /// Pressing this key ends the demo like closing the window does.
    pub quit_key: Key,
    pub log_level: LevelFilter,
}

/// The subset of [`DemoConfig`] a config file may override.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    title: Option<String>,
    width: Option<NonZeroU32>,
    height: Option<NonZeroU32>,
    resizable: Option<bool>,
    quit_key: Option<Key>,
    log_level: Option<LevelFilter>,
}

impl DemoConfig {
    pub fn new(window: WindowConfig, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            window,
            assets_dir: assets_dir.into(),
            quit_key: Key::End,
            log_level: LevelFilter::Info,
        }
    }

    /// Applies the overrides in `path`, if that file exists.
    pub fn with_file(mut self, path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(self),
            Err(source) => {
                return Err(DemoError::Asset {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        self.apply_json(&text).map_err(|source| DemoError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self)
    }

    /// Applies the overrides in a JSON document.
    pub fn apply_json(&mut self, json: &str) -> serde_json::Result<()> {
        let file: ConfigFile = serde_json::from_str(json)?;

        if let Some(title) = file.title {
            self.window.title = title;
        }
        if let Some(width) = file.width {
            self.window.width = width.get();
        }
        if let Some(height) = file.height {
            self.window.height = height.get();
        }
        if let Some(resizable) = file.resizable {
            self.window.resizable = resizable;
        }
        if let Some(quit_key) = file.quit_key {
            self.quit_key = quit_key;
        }
        if let Some(log_level) = file.log_level {
            self.log_level = log_level;
        }
        Ok(())
    }
}
