use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::{fmt, path::PathBuf};

/// Describes the available arguments in the CLI.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// The path of the settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub subcommands: Subcommands,
}

/// Describes the available subcommands in the CLI.
#[derive(Subcommand, Debug)]
pub enum Subcommands {
    /// Fetch bookmarks from linkding and render them as markdown.
    Fetch(FetchArgs),
    /// Write a settings file and the built-in template to get started.
    Init(InitArgs),
}

/// Describes the arguments for the `fetch` subcommand.
#[derive(ClapArgs, Default)]
pub struct FetchArgs {
    /// The url of the linkding instance.
    #[arg(long)]
    pub url: Option<String>,
    /// The API token of the linkding instance.
    #[arg(long)]
    pub token: Option<String>,
    /// The request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Fetch bookmarks added in the last n days; 0 fetches all bookmarks.
    #[arg(long)]
    pub days: Option<u32>,
    /// Fetch bookmarks added since this date (YYYY-MM-DD); overrides `--days`.
    #[arg(long)]
    pub since: Option<String>,
    /// Fetch bookmarks modified since this date (YYYY-MM-DD).
    #[arg(long)]
    pub until: Option<String>,
    /// The search query, e.g. `#rust`.
    #[arg(short, long)]
    pub query: Option<String>,
    /// Write markdown to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// The title of the document.
    #[arg(long)]
    pub title: Option<String>,
    /// Don't render notes.
    #[arg(long)]
    pub no_notes: bool,
    /// Don't render tags.
    #[arg(long)]
    pub no_tags: bool,
    /// Don't group bookmarks by date.
    #[arg(long)]
    pub no_group_by_date: bool,
    /// The date format used to group bookmarks, either a layout like
    /// `2006-01-02` or a strftime pattern like `%Y-%m-%d`.
    #[arg(long)]
    pub date_format: Option<String>,
    /// The template file used instead of the built-in template.
    #[arg(long)]
    pub template: Option<PathBuf>,
}

impl fmt::Debug for FetchArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchArgs")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field("timeout", &self.timeout)
            .field("days", &self.days)
            .field("since", &self.since)
            .field("until", &self.until)
            .field("query", &self.query)
            .field("output", &self.output)
            .field("title", &self.title)
            .field("no_notes", &self.no_notes)
            .field("no_tags", &self.no_tags)
            .field("no_group_by_date", &self.no_group_by_date)
            .field("date_format", &self.date_format)
            .field("template", &self.template)
            .finish()
    }
}

/// Describes the arguments for the `init` subcommand.
#[derive(ClapArgs, Debug)]
pub struct InitArgs {
    /// Overwrite existing files.
    #[arg(short, long)]
    pub force: bool,
    /// The file name of the template.
    #[arg(long, default_value = "linkdown.md.j2")]
    pub template_file: PathBuf,
    /// The directory to write the files to.
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}
