use std::collections::BTreeMap;

use serde::Serialize;

use crate::listing::csv_io::CsvRow;
use crate::listing::JobListing;

/// A listing plus classifier output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichedRow {
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
    pub role_category: String,
    pub job_type: String,
    pub seniority: String,
    /// `;`-joined
    pub skills: String,
    pub experience_min: Option<u32>,
    pub experience_max: Option<u32>,
}

impl EnrichedRow {
    pub fn from_listing(l: JobListing) -> Self {
        EnrichedRow {
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
        }
    }
}

impl CsvRow for EnrichedRow {
    const HEADERS: &'static [&'static str] = &[
        "source", "title", "company", "link", "experience", "salary", "date_posted", "location", "work_type", "summary",
        "role_category", "job_type", "seniority", "skills", "experience_min", "experience_max",
    ];
}

// Plan envelope types
#[derive(Serialize)]
pub struct EnrichPlan { pub rows: usize, pub input: String, pub output: String }

// Apply/result envelope types
#[derive(Serialize, Debug, Default)]
pub struct EnrichReport {
    pub rows: usize,
    pub role_categories: BTreeMap<String, usize>,
    pub job_types: BTreeMap<String, usize>,
    pub seniority: BTreeMap<String, usize>,
    pub with_skills: usize,
}
