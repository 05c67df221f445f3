use crate::errors::LinkdownError;
use chrono::{
    format::{Item, StrftimeItems},
    DateTime, FixedOffset,
};
use std::{fmt::Write, mem};
use Specifier::{Strftime, UtcOrOffset};

/// The strftime equivalent of a Go reference-time token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Specifier {
    Strftime(&'static str),
    /// `Z` for UTC, the offset in the given format otherwise.
    UtcOrOffset(&'static str),
}

/// Go reference-time tokens and their strftime equivalent, longest first.
///
/// The flag marks tokens which are only recognized if not followed by a
/// lowercase letter (e.g. `Mon` in `Month`).
const GO_TOKENS: &[(&str, Specifier, bool)] = &[
    ("January", Strftime("%B"), false),
    ("Jan", Strftime("%b"), true),
    ("Monday", Strftime("%A"), false),
    ("Mon", Strftime("%a"), true),
    ("MST", Strftime("%Z"), false),
    ("2006", Strftime("%Y"), false),
    ("002", Strftime("%j"), false),
    ("01", Strftime("%m"), false),
    ("02", Strftime("%d"), false),
    ("03", Strftime("%I"), false),
    ("04", Strftime("%M"), false),
    ("05", Strftime("%S"), false),
    ("06", Strftime("%y"), false),
    ("15", Strftime("%H"), false),
    ("_2", Strftime("%e"), false),
    ("Z07:00", UtcOrOffset("%:z"), false),
    ("Z0700", UtcOrOffset("%z"), false),
    ("Z07", UtcOrOffset("%:::z"), false),
    ("-07:00", Strftime("%:z"), false),
    ("-0700", Strftime("%z"), false),
    ("-07", Strftime("%:::z"), false),
    ("PM", Strftime("%p"), false),
    ("pm", Strftime("%P"), false),
    ("1", Strftime("%-m"), false),
    ("2", Strftime("%-d"), false),
    ("3", Strftime("%-I"), false),
    ("4", Strftime("%-M"), false),
    ("5", Strftime("%-S"), false),
];

/// A part of a translated date format.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Strftime(String),
    UtcOrOffset(&'static str),
}

/// A validated date format.
///
/// Accepts strftime patterns (anything containing a `%`) as well as Go
/// reference layouts like `2006-01-02`, which are translated to strftime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    segments: Vec<Segment>,
}

impl DateFormat {
    pub fn parse(pattern: &str) -> Result<Self, LinkdownError> {
        let segments = translate(pattern);

        let is_invalid = segments.iter().any(|segment| {
            let strftime = match segment {
                Segment::Strftime(strftime) => strftime.as_str(),
                Segment::UtcOrOffset(strftime) => *strftime,
            };
            StrftimeItems::new(strftime).any(|item| matches!(item, Item::Error))
        });

        if is_invalid {
            return Err(LinkdownError::DateFormat(pattern.to_owned()));
        }

        Ok(Self {
            pattern: pattern.to_owned(),
            segments,
        })
    }

    pub fn format(&self, date: &DateTime<FixedOffset>) -> Result<String, LinkdownError> {
        let mut formatted = String::new();

        for segment in &self.segments {
            let strftime = match segment {
                Segment::UtcOrOffset(_) if date.offset().local_minus_utc() == 0 => {
                    formatted.push('Z');
                    continue;
                }
                Segment::UtcOrOffset(strftime) => *strftime,
                Segment::Strftime(strftime) => strftime.as_str(),
            };

            write!(
                formatted,
                "{}",
                date.format_with_items(StrftimeItems::new(strftime))
            )
            .map_err(|_| LinkdownError::DateFormat(self.pattern.clone()))?;
        }

        Ok(formatted)
    }
}

/// Translate a Go reference layout into strftime segments.
///
/// Patterns containing a `%` are kept as a single strftime segment.
fn translate(layout: &str) -> Vec<Segment> {
    if layout.contains('%') {
        return vec![Segment::Strftime(layout.to_owned())];
    }

    let mut segments = Vec::new();
    let mut strftime = String::with_capacity(layout.len() * 2);
    let mut rest = layout;

    'outer: while let Some(ch) = rest.chars().next() {
        for (token, specifier, needs_word_end) in GO_TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                if *needs_word_end && after.starts_with(|c: char| c.is_ascii_lowercase()) {
                    continue;
                }

                match specifier {
                    Strftime(specifier) => strftime.push_str(specifier),
                    UtcOrOffset(specifier) => {
                        if !strftime.is_empty() {
                            segments.push(Segment::Strftime(mem::take(&mut strftime)));
                        }
                        segments.push(Segment::UtcOrOffset(*specifier));
                    }
                }

                rest = after;
                continue 'outer;
            }
        }

        if let Some((specifier, len)) = fractional_seconds(rest) {
            strftime.push_str(specifier);
            rest = &rest[len..];
            continue;
        }

        strftime.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    if !strftime.is_empty() {
        segments.push(Segment::Strftime(strftime));
    }

    segments
}

/// Match fractional seconds like `.000` or `.999` at the start of `layout`.
fn fractional_seconds(layout: &str) -> Option<(&'static str, usize)> {
    let digits = layout.strip_prefix('.')?;
    let digit = digits.chars().next().filter(|c| *c == '0' || *c == '9')?;
    let count = digits.chars().take_while(|c| *c == digit).count();

    // The run of digits must end the number.
    if digits[count..].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let specifier = match (digit, count) {
        ('0', 3) => "%.3f",
        ('0', 6) => "%.6f",
        ('0', 9) => "%.9f",
        _ => "%.f",
    };

    Some((specifier, count + 1))
}
