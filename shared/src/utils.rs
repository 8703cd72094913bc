// Date/time helpers shared by the cleaner library and its binary.
use anyhow::{anyhow, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_timestamp_format(fmt: &str) -> Result<Vec<Item<'_>>> {
    let items: Vec<Item> = StrftimeItems::new(fmt).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(anyhow!("Invalid timestamp format '{}'", fmt));
    }
    Ok(items)
}

/// Checks a strftime pattern up front, before any timestamp is formatted.
pub fn validate_timestamp_format(fmt: &str) -> Result<()> {
    parse_timestamp_format(fmt).map(|_| ())
}

/// Formats `dt` with a strftime pattern. Unknown specifiers are reported as
/// an error instead of panicking inside `Display`.
pub fn format_timestamp<Tz>(dt: &DateTime<Tz>, fmt: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let items = parse_timestamp_format(fmt)?;
    Ok(dt.format_with_items(items.into_iter()).to_string())
}

/// Current local time formatted with `fmt`.
pub fn current_timestamp(fmt: &str) -> Result<String> {
    format_timestamp(&Local::now(), fmt)
}
