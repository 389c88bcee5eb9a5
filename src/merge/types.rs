use serde::Serialize;

use crate::listing::csv_io::CsvRow;
use crate::listing::{HrContact, JobListing};

/// A listing with at most one HR contact attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergedRow {
    pub source: String,
    pub title: String,
    pub company: String,
    pub link: String,
    pub experience: String,
    pub salary: String,
    pub date_posted: String,
    pub location: Option<String>,
    pub work_type: Option<String>,
    pub summary: Option<String>,
    pub hr_name: Option<String>,
    pub hr_email: Option<String>,
    pub hr_title: Option<String>,
    pub hr_seniority: Option<String>,
    pub hr_phone: Option<String>,
    pub hr_linkedin: Option<String>,
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

impl MergedRow {
    pub fn new(l: &JobListing, contact: Option<&HrContact>) -> Self {
        let l = l.clone();
        let mut row = MergedRow {
            source: l.source,
            title: l.title,
            company: l.company,
            link: l.link,
            experience: l.experience,
            salary: l.salary,
            date_posted: l.date_posted,
            location: l.location,
            work_type: l.work_type,
            summary: l.summary,
            ..Default::default()
        };
        if let Some(c) = contact {
            row.hr_name = non_empty(&c.name);
            row.hr_email = non_empty(&c.email);
            row.hr_title = c.title.clone();
            row.hr_seniority = c.seniority.clone();
            row.hr_phone = c.phone.clone();
            row.hr_linkedin = c.linkedin.clone();
        }
        row
    }
}

impl CsvRow for MergedRow {
    const HEADERS: &'static [&'static str] = &[
        "source", "title", "company", "link", "experience", "salary", "date_posted", "location", "work_type", "summary",
        "hr_name", "hr_email", "hr_title", "hr_seniority", "hr_phone", "hr_linkedin",
    ];
}

// Plan envelope types
#[derive(Serialize)]
pub struct MergePlan {
    pub listings: usize,
    pub contacts: usize,
    pub companies_with_contacts: usize,
    pub how: super::join::JoinHow,
    pub output: String,
}

// Apply/result envelope types
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport { pub listings: usize, pub contacts: usize, pub matched_listings: usize, pub rows_out: usize }
