const LEGAL_SUFFIXES: &[&str] = &[
    "pvt", "private", "ltd", "limited", "inc", "incorporated", "llc", "llp", "corp",
    "corporation", "co", "gmbh", "plc",
];

/// Join key for matching listings to HR contacts: lowercase, no punctuation,
/// trailing legal suffixes removed. A name made only of suffixes yields "".
pub fn normalize_company(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let mut words: Vec<&str> = cleaned.split_whitespace().collect();
    while words.last().is_some_and(|w| LEGAL_SUFFIXES.contains(w)) {
        words.pop();
    }
    words.join(" ")
}
