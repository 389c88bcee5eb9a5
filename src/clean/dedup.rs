use std::collections::HashSet;

use crate::listing::types::normalize_link;
use crate::listing::JobListing;
use crate::parse::clean_salary;
use crate::util::text::collapse_whitespace;

use super::types::CleanReport;

fn tidy(s: &str) -> String {
    collapse_whitespace(s)
}

fn tidy_opt(s: Option<String>) -> Option<String> {
    s.map(|v| tidy(&v)).filter(|v| !v.is_empty())
}

/// Whitespace collapsed everywhere, salary canonicalized, tracking stripped from the link.
pub fn normalize_listing(l: JobListing) -> JobListing {
    JobListing {
        source: tidy(&l.source).to_lowercase(),
        title: tidy(&l.title),
        company: tidy(&l.company),
        link: normalize_link(&l.link),
        experience: tidy(&l.experience),
        salary: clean_salary(&l.salary),
        date_posted: tidy(&l.date_posted),
        location: tidy_opt(l.location),
        work_type: tidy_opt(l.work_type),
        summary: tidy_opt(l.summary),
    }
}

/// Normalize, drop untitled rows, then keep the first row per dedup key.
pub fn clean_listings(rows: Vec<JobListing>) -> (Vec<JobListing>, CleanReport) {
    let mut report = CleanReport { read: rows.len(), ..Default::default() };
    let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
    let mut kept = Vec::with_capacity(rows.len());

    for row in rows.into_iter().map(normalize_listing) {
        if row.title.is_empty() {
            report.dropped_empty += 1;
            continue;
        }
        if !seen.insert(row.dedup_key()) {
            report.duplicates += 1;
            continue;
        }
        kept.push(row);
    }
    report.kept = kept.len();
    (kept, report)
}
