use crate::{
    client::REQUEST_TIMEOUT_DEFAULT,
    render::{DATE_FORMAT_DEFAULT, TITLE_DEFAULT},
    utils,
};
use anyhow::{anyhow, Context};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    env, fmt,
    path::{Path, PathBuf},
};

/// The settings file looked up in the current directory.
pub const SETTINGS_FILE: &str = "linkdown.json";

/// The settings file looked up in the config directory.
const HOME_SETTINGS_FILE: &str = "settings.json";

const CONFIG_DIR: &str = "linkdown";

/// The default for `FetchSettings::days`.
const DAYS_DEFAULT: u32 = 7;

/// Describes the settings used in linkdown.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub linkding: LinkdingSettings,
    pub fetch: FetchSettings,
}

/// The connection to the linkding instance.
#[derive(Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct LinkdingSettings {
    /// The url of the linkding instance.
    pub url: String,
    /// The API token, see the linkding settings page.
    pub token: String,
    /// The request timeout in seconds.
    pub timeout: u64,
}

impl Default for LinkdingSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: String::new(),
            timeout: REQUEST_TIMEOUT_DEFAULT,
        }
    }
}

impl fmt::Debug for LinkdingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkdingSettings")
            .field("url", &self.url)
            .field("token", &"[redacted]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// The defaults for the `fetch` subcommand.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct FetchSettings {
    /// The number of days to fetch, counted back from now.
    pub days: u32,
    /// Fetch bookmarks added since this date (YYYY-MM-DD).
    pub since: Option<String>,
    /// Fetch bookmarks modified since this date (YYYY-MM-DD).
    pub until: Option<String>,
    /// The search query to filter bookmarks.
    pub query: String,
    /// The output file; stdout if not set.
    pub output: Option<PathBuf>,
    /// The title of the document.
    pub title: String,
    pub no_notes: bool,
    pub no_tags: bool,
    pub no_group_by_date: bool,
    /// The date format used to group bookmarks.
    pub date_format: String,
    /// The template file; the built-in template if not set.
    pub template: Option<PathBuf>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            days: DAYS_DEFAULT,
            since: None,
            until: None,
            query: String::new(),
            output: None,
            title: TITLE_DEFAULT.to_owned(),
            no_notes: false,
            no_tags: false,
            no_group_by_date: false,
            date_format: DATE_FORMAT_DEFAULT.to_owned(),
            template: None,
        }
    }
}

impl Settings {
    /// The settings written by `linkdown init`.
    pub fn example() -> Self {
        let mut settings = Settings::default();
        settings.linkding.url = "https://linkding.example.com".to_owned();
        settings
    }

    /// Find the settings file.
    ///
    /// An explicitly given path must exist. Otherwise `./linkdown.json`,
    /// `$LINKDOWN_HOME/settings.json`, and `<config dir>/linkdown/settings.json`
    /// are tried in this order.
    pub fn find(settings_path: Option<&Path>) -> Result<Option<PathBuf>, anyhow::Error> {
        if let Some(settings_path) = settings_path {
            if settings_path.exists() {
                return Ok(Some(settings_path.to_owned()));
            } else {
                return Err(anyhow!(
                    "Missing settings file at {}",
                    settings_path.display()
                ));
            }
        }

        let mut candidates = vec![PathBuf::from(SETTINGS_FILE)];

        if let Ok(linkdown_home) = env::var("LINKDOWN_HOME") {
            candidates.push(PathBuf::from(linkdown_home).join(HOME_SETTINGS_FILE));
        }

        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(CONFIG_DIR).join(HOME_SETTINGS_FILE));
        }

        Ok(candidates.into_iter().find(|candidate| candidate.exists()))
    }

    pub fn read(settings_path: &Path) -> Result<Settings, anyhow::Error> {
        debug!("Reading settings file at {}", settings_path.display());
        let buf = utils::read_file(settings_path)?;
        let settings = serde_json::from_slice::<Settings>(&buf).context(format!(
            "Can't parse settings file at {}",
            settings_path.display()
        ))?;
        Ok(settings)
    }

    pub fn write(&self, settings_path: &Path) -> Result<(), anyhow::Error> {
        debug!("Write settings file at {}", settings_path.display());
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        buf.push(b'\n');
        utils::write_file(settings_path, &buf)?;
        Ok(())
    }

    /// Override the connection with `LINKDOWN_URL` and `LINKDOWN_TOKEN`.
    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var("LINKDOWN_URL") {
            self.linkding.url = url;
        }

        if let Ok(token) = env::var("LINKDOWN_TOKEN") {
            self.linkding.token = token;
        }
    }
}
