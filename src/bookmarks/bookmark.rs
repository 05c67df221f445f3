use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// A bookmark as returned by the linkding API.
///
/// A bookmark is read-only: it is decoded from a page response and handed to
/// the renderer as is.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    id: u64,
    url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    notes: String,
    /// The title reported by the website when linkding fetched it.
    #[serde(default, deserialize_with = "null_as_empty")]
    website_title: String,
    /// The description reported by the website when linkding fetched it.
    #[serde(default, deserialize_with = "null_as_empty")]
    website_description: String,
    is_archived: bool,
    unread: bool,
    shared: bool,
    tag_names: Vec<String>,
    date_added: DateTime<FixedOffset>,
    date_modified: DateTime<FixedOffset>,
}

impl Bookmark {
    pub fn builder(id: u64, url: &str, date_added: DateTime<FixedOffset>) -> BookmarkBuilder {
        BookmarkBuilder::new(id, url, date_added)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn website_title(&self) -> &str {
        &self.website_title
    }

    pub fn website_description(&self) -> &str {
        &self.website_description
    }

    pub fn is_archived(&self) -> bool {
        self.is_archived
    }

    pub fn is_unread(&self) -> bool {
        self.unread
    }

    pub fn is_shared(&self) -> bool {
        self.shared
    }

    pub fn tag_names(&self) -> &[String] {
        &self.tag_names
    }

    pub fn date_added(&self) -> &DateTime<FixedOffset> {
        &self.date_added
    }

    pub fn date_modified(&self) -> &DateTime<FixedOffset> {
        &self.date_modified
    }
}

/// linkding sends `null` for website metadata it couldn't fetch.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

pub struct BookmarkBuilder {
    id: u64,
    url: String,
    title: String,
    description: String,
    notes: String,
    website_title: String,
    website_description: String,
    is_archived: bool,
    unread: bool,
    shared: bool,
    tag_names: Vec<String>,
    date_added: DateTime<FixedOffset>,
    date_modified: DateTime<FixedOffset>,
}

impl BookmarkBuilder {
    pub fn new(id: u64, url: &str, date_added: DateTime<FixedOffset>) -> BookmarkBuilder {
        BookmarkBuilder {
            id,
            url: url.to_owned(),
            title: String::new(),
            description: String::new(),
            notes: String::new(),
            website_title: String::new(),
            website_description: String::new(),
            is_archived: false,
            unread: false,
            shared: false,
            tag_names: Vec::new(),
            date_added,
            date_modified: date_added,
        }
    }

    pub fn with_title(mut self, title: &str) -> BookmarkBuilder {
        self.title = title.to_owned();
        self
    }

    pub fn with_description(mut self, description: &str) -> BookmarkBuilder {
        self.description = description.to_owned();
        self
    }

    pub fn with_notes(mut self, notes: &str) -> BookmarkBuilder {
        self.notes = notes.to_owned();
        self
    }

    pub fn with_website_title(mut self, website_title: &str) -> BookmarkBuilder {
        self.website_title = website_title.to_owned();
        self
    }

    pub fn with_website_description(mut self, website_description: &str) -> BookmarkBuilder {
        self.website_description = website_description.to_owned();
        self
    }

    pub fn with_archived(mut self, is_archived: bool) -> BookmarkBuilder {
        self.is_archived = is_archived;
        self
    }

    pub fn with_unread(mut self, unread: bool) -> BookmarkBuilder {
        self.unread = unread;
        self
    }

    pub fn with_shared(mut self, shared: bool) -> BookmarkBuilder {
        self.shared = shared;
        self
    }

    pub fn add_tag(mut self, tag: &str) -> BookmarkBuilder {
        self.tag_names.push(tag.to_owned());
        self
    }

    pub fn with_date_modified(mut self, date_modified: DateTime<FixedOffset>) -> BookmarkBuilder {
        self.date_modified = date_modified;
        self
    }

    pub fn build(self) -> Bookmark {
        Bookmark {
            id: self.id,
            url: self.url,
            title: self.title,
            description: self.description,
            notes: self.notes,
            website_title: self.website_title,
            website_description: self.website_description,
            is_archived: self.is_archived,
            unread: self.unread,
            shared: self.shared,
            tag_names: self.tag_names,
            date_added: self.date_added,
            date_modified: self.date_modified,
        }
    }
}
