use crate::Bookmark;
use chrono::DateTime;
use serde_json::json;
use std::ops::Range;

/// Create a bookmark with the given id, added at `date_added` (RFC 3339).
pub fn bookmark(id: u64, date_added: &str) -> Bookmark {
    let date_added = DateTime::parse_from_rfc3339(date_added).unwrap();
    Bookmark::builder(id, &format!("https://url{id}.com"), date_added)
        .with_title(&format!("Bookmark {id}"))
        .build()
}

/// Create bookmarks for all ids in `ids`, all added on 2025-01-01.
pub fn bookmarks(ids: Range<u64>) -> Vec<Bookmark> {
    ids.map(|id| bookmark(id, "2025-01-01T00:00:00Z")).collect()
}

/// The JSON representation of a bookmark as sent by the linkding API.
pub fn bookmark_json(id: u64, date_added: &str) -> serde_json::Value {
    json!({
        "id": id,
        "url": format!("https://url{id}.com"),
        "title": format!("Bookmark {id}"),
        "description": "",
        "notes": "",
        "website_title": null,
        "website_description": null,
        "is_archived": false,
        "unread": false,
        "shared": false,
        "tag_names": [],
        "date_added": date_added,
        "date_modified": date_added,
    })
}

/// A page of bookmarks as sent by the linkding API.
pub fn page_json(bookmarks: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "count": bookmarks.len(),
        "next": null,
        "previous": null,
        "results": bookmarks,
    })
}
