// Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::dispatch::DispatchConfig;
use crate::serializers::OutputFormat;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub dispatch: DispatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Output format used when `--format` is not given
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Count skipped test cases as failures when rolling up pass/fail
    #[serde(default)]
    pub treat_skipped_as_failure: bool,

    /// Exit with status 1 when the parsed suite did not pass
    #[serde(default)]
    pub exit_with_error_on_failure: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            treat_skipped_as_failure: false,
            exit_with_error_on_failure: false,
        }
    }
}

pub const ENV_CITE_REPORT_CONFIG: &str = "CITE_REPORT_CONFIG";

const CONFIG_FILE_NAMES: [&str; 2] = [".citereportrc", ".citereportrc.toml"];

fn default_output_format() -> OutputFormat {
    OutputFormat::Markdown
}

impl Config {
    /// First existing config file, in lookup order:
    /// `$CITE_REPORT_CONFIG`, then each file name in the current directory and
    /// the home directory.
    pub fn discover() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(ENV_CITE_REPORT_CONFIG) {
            return Some(PathBuf::from(path));
        }

        let cwd = std::env::current_dir().ok();
        let home = dirs::home_dir();

        CONFIG_FILE_NAMES
            .iter()
            .flat_map(|name| [cwd.as_ref(), home.as_ref()].map(|dir| dir.map(|d| d.join(name))))
            .flatten()
            .find(|path| path.exists())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read config {}: {}", path.display(), e);
                return None;
            }
        };
        match toml::from_str(&content) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                warn!("Ignoring invalid config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Generate configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }
}
