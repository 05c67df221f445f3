#![allow(dead_code)]

use assert_cmd::Command;
use linkdown::test_utils;
use std::path::Path;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const TOKEN: &str = "test-token";

pub async fn start_mock_server() -> MockServer {
    MockServer::start().await
}

/// Serve the bookmarks `(id, date_added)` as a single page.
pub async fn mount_bookmarks(mock_server: &MockServer, bookmarks: &[(u64, &str)]) {
    let page = test_utils::page_json(
        bookmarks
            .iter()
            .map(|(id, date_added)| test_utils::bookmark_json(*id, date_added))
            .collect(),
    );

    Mock::given(method("GET"))
        .and(path("/api/bookmarks/"))
        .and(header("Authorization", format!("Token {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page))
        .mount(mock_server)
        .await;
}

pub async fn mount_error(mock_server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/api/bookmarks/"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(mock_server)
        .await;
}

/// The binary isolated from the settings and environment of the host.
pub fn linkdown(temp_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.current_dir(temp_path)
        .env("HOME", temp_path)
        .env("XDG_CONFIG_HOME", temp_path.join("config"))
        .env("LINKDOWN_HOME", temp_path.join("home"))
        .env_remove("LINKDOWN_URL")
        .env_remove("LINKDOWN_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}
