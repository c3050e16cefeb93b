//! Configuration file handling for fintrack.
//!
//! The configuration file is stored at `$FINTRACK_HOME/config.json` and identifies the user the
//! CLI acts for. The records themselves live next to it in `expense-tracker-data.json`.

use crate::model::{User, UserId, FALLBACK_COLOR};
use crate::session::Session;
use crate::store::{JsonFileStore, Store};
use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

const APP_NAME: &str = "fintrack";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA_JSON: &str = "expense-tracker-data.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FINTRACK_HOME` and from there it loads `$FINTRACK_HOME/config.json`. It provides
/// the path to the data file and opens sessions for the configured user.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    data_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory and:
    /// - Writes an initial `config.json` for a new user named `user_name` with a fresh ID
    /// - Writes the data file, seeded with the default categories for that user
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of data directory, e.g. `$HOME/fintrack`
    /// - `user_name` - Display name of the user.
    ///
    /// # Errors
    /// - Returns an error if `dir` already holds a `config.json` or if any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>, user_name: &str) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the fintrack home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        ensure!(
            !config_path.exists(),
            "fintrack is already initialized at '{}'",
            root.display()
        );

        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            user_id: UserId::new(utils::generate_id()),
            user_name: user_name.to_string(),
            fallback_color: None,
        };
        config_file.save(&config_path).await?;

        let config = Self {
            data_path: root.join(DATA_JSON),
            root,
            config_path,
            config_file,
        };

        let seeded = config.session().await?.seed_default_categories().await?;
        info!(
            "Created {} with {} default categories",
            config.data_path.display(),
            seeded.len()
        );
        Ok(config)
    }

    /// This will
    /// - validate that `fintrack_home` exists and that the config file exists
    /// - load and validate the config file
    /// - return the loaded configuration object
    ///
    /// A missing data file is not an error; the store starts empty.
    pub async fn load(fintrack_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = fintrack_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("fintrack home is missing, run 'fintrack init' first")?;
        if !root.is_dir() {
            bail!("fintrack home is not a directory '{}'", root.display())
        }

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            data_path: root.join(DATA_JSON),
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn user(&self) -> User {
        User::new(
            self.config_file.user_id.clone(),
            self.config_file.user_name.clone(),
        )
    }

    pub fn fallback_color(&self) -> &str {
        self.config_file.fallback_color()
    }

    /// Opens the data file and returns a `Session` for the configured user.
    pub async fn session(&self) -> Result<Session> {
        let store: Arc<dyn Store> = Arc::new(
            JsonFileStore::open(&self.data_path)
                .await
                .context("Unable to open the data file")?,
        );
        Ok(Session::new(self.user(), store).with_fallback_color(self.fallback_color()))
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "fintrack",
///   "config_version": 1,
///   "user_id": "0b5f2f4e-7f57-4c55-9d0e-4a1f7d0f6e51",
///   "user_name": "Ada",
///   "fallback_color": "#8b5cf6"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "fintrack"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The ID that owns every record the CLI creates
    user_id: UserId,

    user_name: String,

    /// Color for spending whose category matches no known category. Defaults to `#8b5cf6`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fallback_color: Option<String>,
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path)
            .await
            .context("Failed to read config file")?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    fn fallback_color(&self) -> &str {
        self.fallback_color.as_deref().unwrap_or(FALLBACK_COLOR)
    }
}
