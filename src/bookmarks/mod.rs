mod bookmark;
mod bookmarks_page;

pub use bookmark::{Bookmark, BookmarkBuilder};
pub use bookmarks_page::BookmarksPage;
