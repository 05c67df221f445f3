mod fetch;
mod init;

pub use fetch::{fetch, fetch_bookmarks, write_bookmarks};
pub use init::init;
