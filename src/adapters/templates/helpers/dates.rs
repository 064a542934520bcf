use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use minijinja::Value;

use super::text;

const DEFAULT_FORMAT: &str = "%Y-%m-%d";

/// Reformat an ISO-8601 date or timestamp. Unparseable input or an invalid
/// format string yields an empty string.
pub fn format_date(value: Value, format: Option<Value>) -> String {
    let input = text(&value);
    let format = format.map(|f| text(&f)).unwrap_or_else(|| DEFAULT_FORMAT.to_string());
    let items: Vec<Item<'_>> = StrftimeItems::new(&format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return String::new();
    }

    let mut out = String::new();
    let written = if let Ok(timestamp) = DateTime::parse_from_rfc3339(&input) {
        write!(out, "{}", timestamp.format_with_items(items.iter()))
    } else if let Ok(timestamp) = NaiveDateTime::parse_from_str(&input, "%Y-%m-%dT%H:%M:%S") {
        write!(out, "{}", timestamp.format_with_items(items.iter()))
    } else if let Ok(date) = NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
        write!(out, "{}", date.format_with_items(items.iter()))
    } else {
        return String::new();
    };

    match written {
        Ok(()) => out,
        Err(_) => String::new(),
    }
}

fn whole(value: &Value) -> u64 {
    u64::try_from(value.clone()).unwrap_or(0)
}

/// `PT{n}M`; negative or non-numeric input counts as zero.
pub fn iso_duration_minutes(value: Value) -> String {
    format!("PT{}M", whole(&value))
}

pub fn iso_duration_days(value: Value) -> String {
    format!("P{}D", whole(&value))
}
