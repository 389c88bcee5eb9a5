//! Crude keep/drop heuristics applied to freshly scraped cards.

use std::fmt;
use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::Serialize;

use crate::listing::JobListing;
use crate::parse::filter_experience;

static REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:remote|work\s+from\s+home|wfh|anywhere|telecommute|distributed)\b").expect("valid remote regex")
});
static HYBRID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bhybrid\b").expect("valid hybrid regex"));
static CONTRACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:contract(?:ual|or)?|freelance|freelancer|temporary|temp|c2h|contract\s+to\s+hire|fixed[\s-]term)\b")
        .expect("valid contract regex")
});

/// Work arrangement flags found by keyword matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkType {
    pub remote: bool,
    pub hybrid: bool,
    pub contract: bool,
}

impl WorkType {
    pub fn detect(text: &str) -> Self {
        WorkType {
            remote: REMOTE.is_match(text),
            hybrid: HYBRID.is_match(text),
            contract: CONTRACT.is_match(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.remote && !self.hybrid && !self.contract
    }

    /// `None` when nothing matched, so the CSV column stays empty.
    pub fn label(&self) -> Option<String> {
        if self.is_empty() { None } else { Some(self.to_string()) }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = Vec::new();
        if self.remote { tags.push("Remote"); }
        if self.hybrid { tags.push("Hybrid"); }
        if self.contract { tags.push("Contract"); }
        write!(f, "{}", tags.join("; "))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkTypeFilter {
    #[default]
    Any,
    Remote,
    Contract,
    RemoteOrContract,
}

impl WorkTypeFilter {
    pub fn accepts(&self, wt: &WorkType) -> bool {
        match self {
            WorkTypeFilter::Any => true,
            WorkTypeFilter::Remote => wt.remote,
            WorkTypeFilter::Contract => wt.contract,
            WorkTypeFilter::RemoteOrContract => wt.remote || wt.contract,
        }
    }
}

/// Why a card was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Keep,
    MissingTitle,
    Experience,
    WorkType,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingFilter {
    pub min_years: u32,
    pub keep_unknown_experience: bool,
    pub work_type: WorkTypeFilter,
}

impl Default for ListingFilter {
    fn default() -> Self {
        ListingFilter { min_years: 2, keep_unknown_experience: true, work_type: WorkTypeFilter::Any }
    }
}

impl ListingFilter {
    pub fn accepts(&self, listing: &JobListing) -> Verdict {
        if listing.title.trim().is_empty() {
            return Verdict::MissingTitle;
        }
        if !filter_experience(&listing.experience, self.min_years, self.keep_unknown_experience) {
            return Verdict::Experience;
        }
        let wt = WorkType::detect(&listing.keyword_text());
        if !self.work_type.accepts(&wt) {
            return Verdict::WorkType;
        }
        Verdict::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str, experience: &str, location: &str) -> JobListing {
        JobListing {
            title: title.into(),
            experience: experience.into(),
            location: Some(location.into()),
            ..Default::default()
        }
    }

    #[test]
    fn detects_work_type_keywords() {
        let wt = WorkType::detect("Rust Engineer (Remote) - Contract to hire");
        assert_eq!(wt, WorkType { remote: true, hybrid: false, contract: true });
        assert_eq!(wt.label().as_deref(), Some("Remote; Contract"));
        assert!(WorkType::detect("Work From Home").remote);
        assert!(WorkType::detect("Hybrid - Bengaluru").hybrid);
        assert_eq!(WorkType::detect("Backend Developer, Pune").label(), None);
        // whole words only
        assert!(WorkType::detect("Contractual role").contract);
        assert!(!WorkType::detect("Remotely located office").remote);
    }

    #[test]
    fn experience_gate() {
        let f = ListingFilter::default();
        assert_eq!(f.accepts(&listing("Rust Dev", "2-5 Yrs", "Pune")), Verdict::Keep);
        assert_eq!(f.accepts(&listing("Rust Dev", "0-1 Yrs", "Pune")), Verdict::Experience);
        assert_eq!(f.accepts(&listing("Rust Dev", "", "Pune")), Verdict::Keep);
        let strict = ListingFilter { keep_unknown_experience: false, ..ListingFilter::default() };
        assert_eq!(strict.accepts(&listing("Rust Dev", "", "Pune")), Verdict::Experience);
        assert_eq!(f.accepts(&listing("  ", "3 yrs", "Pune")), Verdict::MissingTitle);
    }

    #[test]
    fn work_type_gate() {
        let f = ListingFilter { work_type: WorkTypeFilter::RemoteOrContract, ..ListingFilter::default() };
        assert_eq!(f.accepts(&listing("Go Dev", "3 yrs", "Remote")), Verdict::Keep);
        assert_eq!(f.accepts(&listing("Go Dev (Contract)", "3 yrs", "Delhi")), Verdict::Keep);
        assert_eq!(f.accepts(&listing("Go Dev", "3 yrs", "Delhi")), Verdict::WorkType);
        let remote = ListingFilter { work_type: WorkTypeFilter::Remote, ..ListingFilter::default() };
        assert_eq!(remote.accepts(&listing("Go Dev (Contract)", "3 yrs", "Delhi")), Verdict::WorkType);
    }
}
