use chrono::{Datelike, Duration, Months, NaiveDate};

/// Unit of a "N units ago" phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgoUnit {
    Hour,
    Day,
    Week,
    Month,
}

impl AgoUnit {
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "h" | "hr" | "hrs" | "hour" | "hours" | "min" | "mins" | "minute" | "minutes" => Some(AgoUnit::Hour),
            "d" | "day" | "days" => Some(AgoUnit::Day),
            "w" | "wk" | "wks" | "week" | "weeks" => Some(AgoUnit::Week),
            "mo" | "mos" | "month" | "months" => Some(AgoUnit::Month),
            _ => None,
        }
    }
}

// Shift `today` back by `amount` units. Hours and minutes stay on `today`.
pub fn days_before(today: NaiveDate, amount: u32, unit: AgoUnit) -> Option<NaiveDate> {
    match unit {
        AgoUnit::Hour => Some(today),
        AgoUnit::Day => today.checked_sub_signed(Duration::days(amount as i64)),
        AgoUnit::Week => today.checked_sub_signed(Duration::weeks(amount as i64)),
        AgoUnit::Month => today.checked_sub_months(Months::new(amount)),
    }
}

// Parse a short window like "2d", "3h", "1w" or "1mo" into a date relative to `today`.
pub fn parse_short_window(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim();
    let split = s.find(|c: char| !c.is_ascii_digit())?;
    if split == 0 { return None; }
    let (num, unit) = s.split_at(split);
    let amount = num.parse::<u32>().ok()?;
    let unit = AgoUnit::parse(unit)?;
    days_before(today, amount, unit)
}

const ABSOLUTE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
];

// Parse a calendar date in one of the formats job boards print.
pub fn parse_absolute_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim().trim_end_matches('.');
    for fmt in ABSOLUTE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

// Like parse_absolute_date, but "12 Mar" resolves to the latest such date not after `today`.
pub fn parse_day_month(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let with_year = format!("{} {}", s.trim(), today.year());
    let d = NaiveDate::parse_from_str(&with_year, "%d %b %Y")
        .or_else(|_| NaiveDate::parse_from_str(&with_year, "%b %d %Y"))
        .ok()?;
    if d > today { d.with_year(today.year() - 1) } else { Some(d) }
}
