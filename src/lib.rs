/// Available arguments.
mod args;
/// The bookmarks and pages returned by the linkding API.
mod bookmarks;
/// The client for fetching bookmarks from linkding.
mod client;
/// Available commands.
pub mod cmd;
/// The configuration used in linkdown.
mod config;
pub mod errors;
mod logger;
/// Render bookmarks to markdown with templates.
pub mod render;
/// The settings used in linkdown.
mod settings;
/// Utilities used in testing.
pub mod test_utils;
/// Utilities to work with files (create, open, read, write).
pub mod utils;

pub use args::{Args, FetchArgs, InitArgs, Subcommands};
pub use bookmarks::{Bookmark, BookmarkBuilder, BookmarksPage};
pub use client::{
    BookmarkQuery, Client, ClientConfig, Fetch, MockClient, PAGE_SIZE, REQUEST_TIMEOUT_DEFAULT,
};
pub use config::Config;
pub use logger::Logger;
pub use settings::{FetchSettings, LinkdingSettings, Settings, SETTINGS_FILE};
