//! Date and time synthesis for chrono's temporal types.
//!
//! These types are recognized by their declared type name before a decoder
//! would recurse into them; their own routines expect a single parsed
//! timestamp string, which is synthesized here instead.
use std::fmt::Write;

use chrono::format::StrftimeItems;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::options::GenerateOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    /// `DateTime<Tz>` for any time zone.
    DateTime,
    NaiveDateTime,
    NaiveDate,
    NaiveTime,
}

const OPTION_PREFIX: &str = "core::option::Option<";

/// Strip one `Option<..>` layer from a type name.
pub fn unwrap_option(type_name: &str) -> &str {
    type_name
        .strip_prefix(OPTION_PREFIX)
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(type_name)
}

/// Classify a type name as produced by `std::any::type_name`.
pub fn classify(type_name: &str) -> Option<TemporalKind> {
    let base = unwrap_option(type_name).split('<').next()?;
    if !base.starts_with("chrono::") {
        return None;
    }
    match base.rsplit("::").next()? {
        "DateTime" => Some(TemporalKind::DateTime),
        "NaiveDateTime" => Some(TemporalKind::NaiveDateTime),
        "NaiveDate" => Some(TemporalKind::NaiveDate),
        "NaiveTime" => Some(TemporalKind::NaiveTime),
        _ => None,
    }
}

impl TemporalKind {
    /// `now` in the form the type's own deserializer parses.
    pub fn standard(self, now: DateTime<Utc>) -> String {
        match self {
            TemporalKind::DateTime => now.to_rfc3339_opts(SecondsFormat::Secs, true),
            TemporalKind::NaiveDateTime => now.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string(),
            TemporalKind::NaiveDate => now.date_naive().format("%Y-%m-%d").to_string(),
            TemporalKind::NaiveTime => now.time().format("%H:%M:%S").to_string(),
        }
    }
}

/// The string recorded into the node tree for a temporal field.
pub fn render(kind: TemporalKind, now: DateTime<Utc>, options: &GenerateOptions) -> String {
    let Some(pattern) = options.temporal_format.as_deref() else {
        return kind.standard(now);
    };
    let mut out = String::new();
    match write!(out, "{}", now.format_with_items(StrftimeItems::new(pattern))) {
        Ok(()) => out,
        Err(_) => {
            log::warn!("temporal_format `{pattern}` failed to render; using the standard form");
            kind.standard(now)
        }
    }
}
