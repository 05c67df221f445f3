use super::DateFormat;
use crate::errors::LinkdownError;
use chrono::DateTime;
use minijinja::{value::Rest, Environment, Error, ErrorKind, Value};
use std::{borrow::Cow, fmt};

/// A helper function implemented outside of this crate.
pub type CustomHelper = fn(&[Value]) -> Result<Value, Error>;

/// The functions which can be exposed to a template.
#[derive(Clone, Copy)]
pub enum Helper {
    /// `formatDate(timestamp, format)`: format an RFC 3339 timestamp.
    FormatDate,
    /// `join(values, separator)`: join a list of strings.
    Join,
    /// `isBlank(value)`: true if the string is empty or whitespace only.
    IsBlank,
    /// `hasContent(value)`: true if the string is not blank.
    HasContent,
    Custom(CustomHelper),
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Helper::FormatDate => "FormatDate",
            Helper::Join => "Join",
            Helper::IsBlank => "IsBlank",
            Helper::HasContent => "HasContent",
            Helper::Custom(_) => "Custom",
        };
        write!(f, "{name}")
    }
}

/// The table of helper functions registered in the template environment.
#[derive(Debug, Clone)]
pub struct Helpers {
    entries: Vec<(Cow<'static, str>, Helper)>,
}

impl Default for Helpers {
    fn default() -> Self {
        Self::empty()
            .with("formatDate", Helper::FormatDate)
            .with("join", Helper::Join)
            .with("isBlank", Helper::IsBlank)
            .with("hasContent", Helper::HasContent)
    }
}

impl Helpers {
    /// A table without any helpers.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a helper under `name`, replacing any helper with the same name.
    pub fn with(mut self, name: impl Into<Cow<'static, str>>, helper: Helper) -> Self {
        let name = name.into();
        self.entries.retain(|(existing, _)| *existing != name);
        self.entries.push((name, helper));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_ref())
    }

    pub fn register(&self, env: &mut Environment<'static>) {
        for (name, helper) in &self.entries {
            let name = name.clone();

            match *helper {
                Helper::FormatDate => {
                    env.add_function(name, |timestamp: String, format: String| {
                        format_date(&timestamp, &format).map_err(|err| {
                            Error::new(ErrorKind::InvalidOperation, err.to_string())
                        })
                    })
                }
                Helper::Join => env.add_function(name, |values: Vec<String>, separator: String| {
                    join(&values, &separator)
                }),
                Helper::IsBlank => env.add_function(name, |value: String| is_blank(&value)),
                Helper::HasContent => {
                    env.add_function(name, |value: String| has_content(&value))
                }
                Helper::Custom(function) => {
                    env.add_function(name, move |args: Rest<Value>| function(&args.0))
                }
            }
        }
    }
}

/// Format an RFC 3339 timestamp with a strftime pattern or Go layout.
pub fn format_date(timestamp: &str, format: &str) -> Result<String, LinkdownError> {
    let date = DateTime::parse_from_rfc3339(timestamp)
        .map_err(|err| anyhow::anyhow!("Invalid timestamp '{timestamp}': {err}"))?;
    let date_format = DateFormat::parse(format)?;
    date_format.format(&date)
}

pub fn join(values: &[String], separator: &str) -> String {
    values.join(separator)
}

/// Check if a string is empty or consists of whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn has_content(value: &str) -> bool {
    !is_blank(value)
}
