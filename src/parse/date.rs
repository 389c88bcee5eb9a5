use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::util::text::collapse_whitespace;
use crate::util::time::{days_before, parse_absolute_date, parse_day_month, parse_short_window, AgoUnit};

/// A cleaned "date posted" value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostedDate {
    /// Input with board boilerplate ("Posted", "Active", ...) removed.
    pub label: String,
    pub date: Option<NaiveDate>,
    /// The board only gave a lower bound on age, e.g. "30+ days ago".
    pub open_ended: bool,
}

impl PostedDate {
    /// Value written to the `date_posted` CSV column.
    pub fn to_field(&self) -> String {
        match self.date {
            Some(d) if self.open_ended => format!("before {}", d.format("%Y-%m-%d")),
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => self.label.clone(),
        }
    }
}

static BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:re)?posted|employer\s+active|active|hiring\s+ongoing)\b\s*(?:on\b)?\s*:?\s*")
        .expect("valid boilerplate regex")
});
static AGO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,3})\s*(\+)?\s*([a-z]+)(?:\s+ago)?$").expect("valid ago regex")
});
static ONE_AGO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:a|an|one)\s+([a-z]+)\s+ago$").expect("valid one-ago regex")
});

const TODAY_PHRASES: &[&str] = &[
    "just posted",
    "just now",
    "today",
    "new",
    "moments ago",
    "few hours ago",
    "a few hours ago",
    "an hour ago",
];

/// Normalize a board's "date posted" text relative to `today`.
pub fn clean_date_posted(raw: &str, today: NaiveDate) -> PostedDate {
    let collapsed = collapse_whitespace(raw);
    let label = BOILERPLATE.replace(&collapsed, "").trim().to_string();
    let lower = label.to_lowercase();

    let (date, open_ended) = resolve(&lower, &label, today);
    PostedDate { label, date, open_ended }
}

fn resolve(lower: &str, label: &str, today: NaiveDate) -> (Option<NaiveDate>, bool) {
    if lower.is_empty() {
        return (None, false);
    }
    if TODAY_PHRASES.contains(&lower) {
        return (Some(today), false);
    }
    if lower == "yesterday" {
        return (days_before(today, 1, AgoUnit::Day), false);
    }
    if let Some(c) = AGO.captures(lower) {
        if let (Ok(amount), Some(unit)) = (c[1].parse::<u32>(), AgoUnit::parse(&c[3])) {
            return (days_before(today, amount, unit), c.get(2).is_some());
        }
    }
    if let Some(c) = ONE_AGO.captures(lower) {
        if let Some(unit) = AgoUnit::parse(&c[1]) {
            return (days_before(today, 1, unit), false);
        }
    }
    let without_ago = lower.trim_end_matches("ago").trim();
    if let Some(d) = parse_short_window(without_ago, today) {
        return (Some(d), false);
    }
    if let Some(d) = parse_absolute_date(label) {
        return (Some(d), false);
    }
    (parse_day_month(label, today), false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 3, 15).unwrap() }

    fn field(raw: &str) -> String { clean_date_posted(raw, today()).to_field() }

    #[test]
    fn relative_phrases() {
        assert_eq!(field("Posted 3 days ago"), "2024-03-12");
        assert_eq!(field("Active 1 day ago"), "2024-03-14");
        assert_eq!(field("Just posted"), "2024-03-15");
        assert_eq!(field("Today"), "2024-03-15");
        assert_eq!(field("Few Hours Ago"), "2024-03-15");
        assert_eq!(field("yesterday"), "2024-03-14");
        assert_eq!(field("2 weeks ago"), "2024-03-01");
        assert_eq!(field("a month ago"), "2024-02-15");
        assert_eq!(field("3 Days Ago"), "2024-03-12");
    }

    #[test]
    fn open_ended_age() {
        let d = clean_date_posted("Posted 30+ days ago", today());
        assert!(d.open_ended);
        assert_eq!(d.label, "30+ days ago");
        assert_eq!(d.to_field(), "before 2024-02-14");
    }

    #[test]
    fn short_forms_and_absolute_dates() {
        assert_eq!(field("2d"), "2024-03-13");
        assert_eq!(field("5h ago"), "2024-03-15");
        assert_eq!(field("Posted on 12 Mar 2024"), "2024-03-12");
        assert_eq!(field("2024-01-02"), "2024-01-02");
        assert_eq!(field("Posted: 20 Dec"), "2023-12-20");
    }

    #[test]
    fn unknown_text_keeps_cleaned_label() {
        let d = clean_date_posted("  Reposted   recently ", today());
        assert_eq!(d.date, None);
        assert_eq!(d.to_field(), "recently");
        assert_eq!(clean_date_posted("", today()).to_field(), "");
    }

    #[test]
    fn boilerplate_only_strips_whole_words() {
        assert_eq!(field("Actively hiring"), "Actively hiring");
        assert_eq!(field("Postedtoday"), "Postedtoday");
        assert_eq!(field("Reposted today"), "2024-03-15");
        assert_eq!(field("Employer active 2 days ago"), "2024-03-13");
    }
}
