use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};

/// Formats a millisecond timestamp as e.g. "3rd March 2022" in local time.
pub fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(datetime) => format_date(&datetime),
        None => String::new(),
    }
}

fn format_date<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String {
    format_naive_date(datetime.date_naive())
}

pub fn format_naive_date(date: NaiveDate) -> String {
    let day = date.day();
    format!("{}{} {}", day, ordinal_suffix(day), date.format("%B %Y"))
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
