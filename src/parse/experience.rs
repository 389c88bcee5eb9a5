use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Years of experience a posting asks for. `max == None` means open-ended ("3+ yrs").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExperienceRange {
    pub min: u32,
    pub max: Option<u32>,
}

impl ExperienceRange {
    fn bounded(a: u32, b: u32) -> Self {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        ExperienceRange { min, max: Some(max) }
    }

    fn open(min: u32) -> Self {
        ExperienceRange { min, max: None }
    }

    fn entry_level() -> Self {
        ExperienceRange { min: 0, max: Some(1) }
    }
}

impl fmt::Display for ExperienceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            None => write!(f, "{}+ yrs", self.min),
            Some(max) if max == self.min => write!(f, "{} yrs", self.min),
            Some(max) => write!(f, "{}-{} yrs", self.min, max),
        }
    }
}

const YEARS: &str = r"(?:yrs?|years?)";
// A count never starts right after a digit or a decimal point, so "3.5" reads as 3.
const LEAD: &str = r"(?:^|[^\w.])";

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{LEAD}(\d{{1,2}})(?:\.\d+)?\s*(?:-|–|to)\s*(\d{{1,2}})(?:\.\d+)?\s*\+?\s*{YEARS}\b"))
        .expect("valid range regex")
});
static PLUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{LEAD}(\d{{1,2}})(?:\.\d+)?\s*\+\s*{YEARS}\b")).expect("valid plus regex")
});
static MINIMUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:min(?:imum)?|at\s+least|over|more\s+than)\s*(?:of\s+)?(\d{{1,2}})(?:\.\d+)?\s*\+?\s*{YEARS}\b"))
        .expect("valid minimum regex")
});
static SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{LEAD}(\d{{1,2}})(?:\.\d+)?\s*{YEARS}\b")).expect("valid single regex")
});
static MONTHS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w.])(\d{1,2})(?:\.\d+)?\s*(?:months?|mos?)\b").expect("valid months regex")
});
static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:freshers?|entry[\s-]level|no\s+experience|graduate\s+trainee)\b").expect("valid entry regex")
});

/// Pull an experience requirement out of free text such as "2-5 Yrs",
/// "3+ years", "Minimum 4 years", "6 months" or "Fresher".
pub fn extract_experience_enhanced(text: &str) -> Option<ExperienceRange> {
    let lower = text.to_lowercase();

    if let Some(c) = RANGE.captures(&lower) {
        let a = c[1].parse().ok()?;
        let b = c[2].parse().ok()?;
        return Some(ExperienceRange::bounded(a, b));
    }
    if let Some(c) = PLUS.captures(&lower) {
        return Some(ExperienceRange::open(c[1].parse().ok()?));
    }
    if let Some(c) = MINIMUM.captures(&lower) {
        return Some(ExperienceRange::open(c[1].parse().ok()?));
    }
    if let Some(c) = SINGLE.captures(&lower) {
        let n = c[1].parse().ok()?;
        return Some(ExperienceRange::bounded(n, n));
    }
    if let Some(c) = MONTHS.captures(&lower) {
        let months: u32 = c[1].parse().ok()?;
        return Some(ExperienceRange::bounded(months / 12, months.div_ceil(12).max(1)));
    }
    if ENTRY.is_match(&lower) {
        return Some(ExperienceRange::entry_level());
    }
    None
}

/// True when the posting's minimum requirement is at least `min_years`.
/// Text with no recognizable requirement yields `keep_unknown`.
pub fn filter_experience(text: &str, min_years: u32, keep_unknown: bool) -> bool {
    match extract_experience_enhanced(text) {
        Some(range) => range.min >= min_years,
        None => keep_unknown,
    }
}
