//! Per-board search URLs and selector libraries.
//!
//! Selectors are ordered candidates: the first one that matches wins. They
//! degrade as boards change their markup; when every candidate misses, the
//! generic selectors in `scrape::extract` take over.

mod foundit;
mod glassdoor;
mod indeed;
mod linkedin;
mod naukri;
mod shine;
mod unstop;

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Indeed,
    Shine,
    Glassdoor,
    Foundit,
    Linkedin,
    Naukri,
    Unstop,
}

impl Site {
    pub const ALL: [Site; 7] = [
        Site::Indeed,
        Site::Shine,
        Site::Glassdoor,
        Site::Foundit,
        Site::Linkedin,
        Site::Naukri,
        Site::Unstop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Indeed => "indeed",
            Site::Shine => "shine",
            Site::Glassdoor => "glassdoor",
            Site::Foundit => "foundit",
            Site::Linkedin => "linkedin",
            Site::Naukri => "naukri",
            Site::Unstop => "unstop",
        }
    }

    pub fn profile(&self) -> &'static SiteProfile {
        match self {
            Site::Indeed => &indeed::PROFILE,
            Site::Shine => &shine::PROFILE,
            Site::Glassdoor => &glassdoor::PROFILE,
            Site::Foundit => &foundit::PROFILE,
            Site::Linkedin => &linkedin::PROFILE,
            Site::Naukri => &naukri::PROFILE,
            Site::Unstop => &unstop::PROFILE,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub query: String,
    pub location: Option<String>,
}

/// Candidate selectors for each field of a job card, tried in order.
#[derive(Debug)]
pub struct CardSelectors {
    pub cards: &'static [&'static str],
    pub title: &'static [&'static str],
    pub company: &'static [&'static str],
    pub link: &'static [&'static str],
    pub experience: &'static [&'static str],
    pub salary: &'static [&'static str],
    pub date_posted: &'static [&'static str],
    pub location: &'static [&'static str],
    pub summary: &'static [&'static str],
}

#[cfg(test)]
impl CardSelectors {
    pub fn all(&self) -> impl Iterator<Item = &'static str> + '_ {
        [
            self.cards,
            self.title,
            self.company,
            self.link,
            self.experience,
            self.salary,
            self.date_posted,
            self.location,
            self.summary,
        ]
        .into_iter()
        .flatten()
        .copied()
    }
}

pub struct SiteProfile {
    pub site: Site,
    /// Search results URL for a 1-based page number.
    pub search: fn(&SearchQuery, u32) -> String,
    pub selectors: CardSelectors,
    /// Board-specific "next page" controls, tried before the generic ones.
    pub next: &'static [&'static str],
}

impl SiteProfile {
    pub fn search_url(&self, q: &SearchQuery, page: u32) -> String {
        (self.search)(q, page.max(1))
    }
}

/// `base?k=v&...`, skipping empty values.
pub(crate) fn with_params(base: &str, params: &[(&str, String)]) -> String {
    let pairs = params.iter().filter(|(_, v)| !v.is_empty());
    match Url::parse_with_params(base, pairs) {
        Ok(u) => u.to_string(),
        Err(_) => base.to_string(),
    }
}

/// Zero-based result offset for boards that paginate with `start=`.
pub(crate) fn offset(page: u32, per_page: u32) -> String {
    (page.saturating_sub(1) * per_page).to_string()
}
