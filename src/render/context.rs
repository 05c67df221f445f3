use super::DateFormat;
use crate::{errors::LinkdownError, Bookmark};
use chrono::{DateTime, SecondsFormat, Utc};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The default title of the rendered document.
pub const TITLE_DEFAULT: &str = "Bookmarks";

/// The default date format used to group bookmarks.
pub const DATE_FORMAT_DEFAULT: &str = "2006-01-02";

/// Options for rendering bookmarks.
///
/// `include_notes` and `include_tags` are hints for the template; the data
/// is always present in the [`RenderContext`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenderOptions {
    pub title: String,
    pub include_notes: bool,
    pub include_tags: bool,
    pub group_by_date: bool,
    pub date_format: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: TITLE_DEFAULT.to_owned(),
            include_notes: true,
            include_tags: true,
            group_by_date: true,
            date_format: DATE_FORMAT_DEFAULT.to_owned(),
        }
    }
}

/// The data handed to the template engine for one rendered document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenderContext {
    title: String,
    /// The generation time as RFC 3339.
    generated: String,
    bookmarks: Vec<Bookmark>,
    #[serde(skip_serializing_if = "Option::is_none")]
    grouped_bookmarks: Option<BTreeMap<String, Vec<Bookmark>>>,
    options: RenderOptions,
}

impl RenderContext {
    /// Build the context for the given bookmarks.
    ///
    /// The bookmarks are grouped by their formatted `date_added` if
    /// `options.group_by_date` is set.
    pub fn new(
        bookmarks: Vec<Bookmark>,
        options: RenderOptions,
        now: DateTime<Utc>,
    ) -> Result<Self, LinkdownError> {
        let grouped_bookmarks = if options.group_by_date {
            let date_format = DateFormat::parse(&options.date_format)?;
            Some(group_by_date(&bookmarks, &date_format)?)
        } else {
            None
        };

        let context = Self {
            title: options.title.clone(),
            generated: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            bookmarks,
            grouped_bookmarks,
            options,
        };
        trace!("Render context: {context:#?}");

        Ok(context)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn generated(&self) -> &str {
        &self.generated
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn grouped_bookmarks(&self) -> Option<&BTreeMap<String, Vec<Bookmark>>> {
        self.grouped_bookmarks.as_ref()
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

/// Group bookmarks by their formatted `date_added`.
///
/// Within a group, bookmarks keep their relative input order. The order of
/// the groups themselves is the order of the keys.
pub fn group_by_date(
    bookmarks: &[Bookmark],
    date_format: &DateFormat,
) -> Result<BTreeMap<String, Vec<Bookmark>>, LinkdownError> {
    let mut grouped_bookmarks: BTreeMap<String, Vec<Bookmark>> = BTreeMap::new();

    for bookmark in bookmarks {
        let date_key = date_format.format(bookmark.date_added())?;
        grouped_bookmarks
            .entry(date_key)
            .or_default()
            .push(bookmark.clone());
    }

    Ok(grouped_bookmarks)
}
