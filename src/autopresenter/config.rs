use crate::error::{AutoPresenterError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;
use viewkit::WILDCARD;

const CONFIG_FILENAME: &str = "autopresenter.json";
const DEFAULT_ORDER: i32 = 999;

/// How the autopresenter hooks into a view layer, stored in autopresenter.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutoPresenterConfig {
    /// Set to false to leave views untouched
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Views to decorate ("*", "orders.*", "orders.show")
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Composer order; high values run after the composers that populate variables
    #[serde(default = "default_order")]
    pub order: i32,

    /// Also decorate data shared across all views, not just the render's own data
    #[serde(default = "default_enabled")]
    pub decorate_shared: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_pattern() -> String {
    WILDCARD.to_string()
}

fn default_order() -> i32 {
    DEFAULT_ORDER
}

impl Default for AutoPresenterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pattern: default_pattern(),
            order: DEFAULT_ORDER,
            decorate_shared: true,
        }
    }
}

impl AutoPresenterConfig {
    /// Reads `autopresenter.json` from `config_dir`. A missing file yields the defaults;
    /// a file that does not parse is an error naming the file.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let path = config_dir.as_ref().join(CONFIG_FILENAME);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no autopresenter config, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(AutoPresenterError::Io(err)),
        };

        serde_json::from_str(&content)
            .map_err(|source| AutoPresenterError::Config { path, source })
    }

    /// Writes `autopresenter.json` into `config_dir`, creating the directory if needed.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }
}
