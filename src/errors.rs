use std::io;
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum LinkdownError {
    #[error("Missing configuration: {0}")]
    Configuration(String),
    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] ParseError),
    #[error("Can't create client: {0}")]
    CreateClient(reqwest::Error),
    #[error("Can't fetch bookmarks at offset {offset}: {err}")]
    Connection { offset: usize, err: reqwest::Error },
    #[error("API request at offset {offset} failed with status {status}: {body}")]
    Api {
        offset: usize,
        status: u16,
        body: String,
    },
    #[error("Can't decode bookmarks at offset {offset}: {err}")]
    Decode {
        offset: usize,
        err: serde_json::Error,
    },
    #[error("Invalid date format: {0}")]
    DateFormat(String),
    #[error("Can't compile template: {0}")]
    TemplateCompile(minijinja::Error),
    #[error("Can't render template: {0}")]
    TemplateExecution(minijinja::Error),
    #[error("Can't write output: {0}")]
    Output(io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
