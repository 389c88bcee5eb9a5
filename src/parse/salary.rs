use std::sync::LazyLock;

use regex::Regex;

use crate::util::text::collapse_whitespace;

pub const NOT_DISCLOSED: &str = "Not disclosed";

static PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:salary|ctc|pay|compensation)\s*:?\s*").expect("valid salary prefix regex")
});

const UNDISCLOSED: &[&str] = &[
    "not disclosed",
    "not disclosed by recruiter",
    "not mentioned",
    "not specified",
    "competitive",
    "best in industry",
    "as per industry standards",
    "n/a",
    "na",
    "-",
];

/// Normalize free-text salary; everything that says "we won't tell you" becomes "Not disclosed".
pub fn clean_salary(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    let stripped = PREFIX.replace(&collapsed, "").trim().to_string();
    let lower = stripped.to_lowercase();
    if stripped.is_empty() || UNDISCLOSED.contains(&lower.as_str()) {
        return NOT_DISCLOSED.to_string();
    }
    stripped
}
