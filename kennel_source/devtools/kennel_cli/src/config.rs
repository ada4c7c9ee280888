use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "kennel.toml";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Contents of `kennel.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct KennelConfig {
    pub log_level: Option<String>,
    pub scene: SceneConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Scene used when no `--scene` is given. Relative to the config file.
    pub default: Option<PathBuf>,
}

pub fn parse_config(contents: &str) -> Result<KennelConfig> {
    toml::from_str(contents).context("invalid kennel config")
}

/// Reads the config at `explicit`, or `./kennel.toml` when none is given.
/// A missing implicit config yields the defaults; a missing explicit one is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<KennelConfig> {
    let path = explicit.map_or_else(|| PathBuf::from(CONFIG_FILE), Path::to_path_buf);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound && explicit.is_none() => {
            return Ok(KennelConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", path.display()));
        }
    };

    let mut config =
        parse_config(&contents).with_context(|| format!("parsing {}", path.display()))?;
    if let (Some(scene), Some(dir)) = (config.scene.default.as_mut(), path.parent()) {
        if scene.is_relative() {
            *scene = dir.join(&*scene);
        }
    }
    Ok(config)
}

impl KennelConfig {
    /// Command line first, then the config file, then `warn`.
    pub fn log_level<'a>(&'a self, cli: Option<&'a str>) -> &'a str {
        cli.or(self.log_level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn scene_path(&self, cli: Option<&Path>) -> Result<PathBuf> {
        cli.map(Path::to_path_buf)
            .or_else(|| self.scene.default.clone())
            .context("no scene given: pass --scene or set [scene] default in kennel.toml")
    }
}
