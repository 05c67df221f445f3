use crate::{
    client::{BookmarkQuery, ClientConfig},
    render::{DateFormat, RenderOptions},
    FetchArgs, Settings,
};
use anyhow::{anyhow, Context};
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use log::{debug, trace};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// The date format accepted by `--since` and `--until`.
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// A configuration for running the `fetch` subcommand.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The path of the settings file, if any was found.
    pub settings_path: Option<PathBuf>,
    /// The connection to the linkding instance.
    pub client: ClientConfig,
    /// The filter applied to the bookmarks.
    pub query: BookmarkQuery,
    /// The options handed to the template.
    pub render_options: RenderOptions,
    /// The output file; stdout if not set.
    pub output: Option<PathBuf>,
    /// The template file; the built-in template if not set.
    pub template: Option<PathBuf>,
}

impl Config {
    /// Merge settings file, environment, and arguments.
    ///
    /// Arguments override the environment, which overrides the settings file.
    pub fn init(
        settings_path: Option<&Path>,
        args: &FetchArgs,
        now: DateTime<Utc>,
    ) -> Result<Config, anyhow::Error> {
        let settings_path = Settings::find(settings_path)?;

        let mut settings = match &settings_path {
            Some(settings_path) => {
                let mut settings = Settings::read(settings_path)?;
                // A relative template is relative to the settings file.
                if let (Some(template), Some(settings_dir)) =
                    (&settings.fetch.template, settings_path.parent())
                {
                    if template.is_relative() {
                        settings.fetch.template = Some(settings_dir.join(template));
                    }
                }
                settings
            }
            None => {
                debug!("No settings file found; using defaults");
                Settings::default()
            }
        };
        settings.apply_env();

        let mut config = Config::from_settings(settings, args, now)?;
        config.settings_path = settings_path;

        trace!("Config: {:#?}", config);

        Ok(config)
    }

    pub fn from_settings(
        settings: Settings,
        args: &FetchArgs,
        now: DateTime<Utc>,
    ) -> Result<Config, anyhow::Error> {
        let Settings { linkding, fetch } = settings;

        let client = ClientConfig::new(
            args.url.as_deref().unwrap_or(&linkding.url),
            args.token.as_deref().unwrap_or(&linkding.token),
            Duration::from_secs(args.timeout.unwrap_or(linkding.timeout)),
        );

        let since = args.since.as_deref().or(fetch.since.as_deref());
        let days = args.days.unwrap_or(fetch.days);
        let added_since = match since {
            Some(since) => Some(parse_date(since).context("Invalid date for `--since`")?),
            None if days > 0 => Some(now - ChronoDuration::days(i64::from(days))),
            None => None,
        };

        let modified_since = args
            .until
            .as_deref()
            .or(fetch.until.as_deref())
            .map(|until| parse_date(until).context("Invalid date for `--until`"))
            .transpose()?;

        let query = BookmarkQuery::new(
            args.query.as_deref().unwrap_or(&fetch.query),
            added_since,
            modified_since,
        );

        let date_format = args.date_format.clone().unwrap_or(fetch.date_format);
        DateFormat::parse(&date_format)?;

        let render_options = RenderOptions {
            title: args.title.clone().unwrap_or(fetch.title),
            include_notes: !(args.no_notes || fetch.no_notes),
            include_tags: !(args.no_tags || fetch.no_tags),
            group_by_date: !(args.no_group_by_date || fetch.no_group_by_date),
            date_format,
        };

        Ok(Config {
            settings_path: None,
            client,
            query,
            render_options,
            output: args.output.clone().or(fetch.output),
            template: args.template.clone().or(fetch.template),
        })
    }
}

/// Parse a `YYYY-MM-DD` date as midnight UTC.
fn parse_date(date: &str) -> Result<DateTime<Utc>, anyhow::Error> {
    let date = NaiveDate::parse_from_str(date, DATE_INPUT_FORMAT)
        .map_err(|err| anyhow!("Expected YYYY-MM-DD, got '{date}': {err}"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("Invalid date: {date}"))?;
    Ok(midnight.and_utc())
}
