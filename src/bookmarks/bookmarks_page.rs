use super::Bookmark;
use serde::{Deserialize, Deserializer, Serialize};

/// One page of the bookmark collection, as returned by
/// `GET /api/bookmarks/`.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct BookmarksPage {
    /// The total number of bookmarks matching the filter.
    pub count: usize,
    /// The url of the next page, if any.
    #[serde(deserialize_with = "nullable")]
    pub next: Option<String>,
    /// The url of the previous page, if any.
    #[serde(deserialize_with = "nullable")]
    pub previous: Option<String>,
    pub results: Vec<Bookmark>,
}

impl BookmarksPage {
    pub fn new(count: usize, results: Vec<Bookmark>) -> Self {
        Self {
            count,
            next: None,
            previous: None,
            results,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A field which must be present but may be `null`.
fn nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}
