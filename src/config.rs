// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Layered configuration: built-in defaults, then `config.toml` in the gilt
//! home, then `GILT_*` environment variables.

use crate::error::{GiltError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::env;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";
const GILT_HOME_ENV: &str = "GILT_HOME";
const ENV_PREFIX: &str = "GILT";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GiltConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub command: CommandConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CommandConfig {
    /// Print the working directory and command line before running commands.
    #[serde(default)]
    pub debug: bool,
}

/// When warning lines should carry ANSI highlighting.
#[derive(Debug, Clone, Copy, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Defer to terminal detection and `NO_COLOR`/`CLICOLOR` conventions.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn use_color(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => colored::control::SHOULD_COLORIZE.should_colorize(),
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = GiltError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(GiltError::ConfigError(format!(
                "Unknown color mode '{other}' (expected auto, always or never)"
            ))),
        }
    }
}

// Goes through `FromStr` so files, environment and `--color` accept the same spellings.
impl<'de> Deserialize<'de> for ColorMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value
            .parse()
            .map_err(|_| de::Error::unknown_variant(&value, &["auto", "always", "never"]))
    }
}

impl GiltConfig {
    /// Load configuration for the given gilt home, reading the process environment.
    pub fn load(gilt_home: &Path) -> Result<Self> {
        Self::from_sources(&gilt_home.join(CONFIG_FILE_NAME), environment())
    }

    pub(crate) fn from_sources(config_path: &Path, env_source: Environment) -> Result<Self> {
        if config_path.exists() {
            log::debug!("Loading config from {config_path:?}");
        } else {
            log::debug!("Config file not found at {config_path:?}, using defaults");
        }

        let settings = Config::builder()
            .set_default("output.color", "auto")?
            .set_default("command.debug", false)?
            .add_source(
                File::from(config_path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(env_source)
            .build()?;

        let config: GiltConfig = settings.try_deserialize()?;
        log::debug!("Effective config: {config:?}");
        Ok(config)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Resolve the gilt home directory: `$GILT_HOME`, otherwise `~/.gilt`.
pub fn gilt_home() -> Result<PathBuf> {
    if let Ok(home) = env::var(GILT_HOME_ENV)
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir()
        .map(|home| home.join(".gilt"))
        .ok_or_else(|| GiltError::ConfigError("Unable to determine home directory".to_string()))
}

/// Load the configuration from the resolved gilt home.
pub fn new_gilt_config() -> Result<GiltConfig> {
    let home = gilt_home()?;
    GiltConfig::load(&home)
}
