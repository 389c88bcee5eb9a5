use std::collections::{BTreeMap, HashMap};

use csv::StringRecord;

use crate::parse::{extract_experience_enhanced, normalize_company};

use super::types::{CompanyCount, StatsSummary};

const UNKNOWN: &str = "(unknown)";
const NONE: &str = "(none)";

struct Columns {
    source: Option<usize>,
    company: Option<usize>,
    role_category: Option<usize>,
    work_type: Option<usize>,
    experience: Option<usize>,
}

impl Columns {
    fn find(headers: &StringRecord) -> Self {
        let idx = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
        Columns {
            source: idx("source"),
            company: idx("company"),
            role_category: idx("role_category"),
            work_type: idx("work_type"),
            experience: idx("experience"),
        }
    }
}

fn field<'a>(rec: &'a StringRecord, col: Option<usize>) -> &'a str {
    col.and_then(|i| rec.get(i)).map(str::trim).unwrap_or("")
}

fn or_label<'a>(v: &'a str, label: &'a str) -> &'a str {
    if v.is_empty() { label } else { v }
}

/// Bucket label for a minimum-years requirement.
pub fn experience_bucket(min: Option<u32>) -> &'static str {
    match min {
        None => "unknown",
        Some(0..=1) => "0-1",
        Some(2..=4) => "2-4",
        Some(5..=9) => "5-9",
        Some(_) => "10+",
    }
}

/// Summarize any stage's CSV by whichever known columns it has.
pub fn summarize(headers: &StringRecord, records: &[StringRecord], top: usize) -> StatsSummary {
    let cols = Columns::find(headers);
    let mut s = StatsSummary {
        rows: records.len(),
        columns: headers.iter().map(str::to_string).collect(),
        by_role_category: cols.role_category.map(|_| BTreeMap::new()),
        by_work_type: cols.work_type.map(|_| BTreeMap::new()),
        experience_min: cols.experience.map(|_| BTreeMap::new()),
        ..Default::default()
    };
    // normalized name -> (first spelling seen, count)
    let mut companies: HashMap<String, (String, usize)> = HashMap::new();

    for rec in records {
        *s.by_source.entry(or_label(field(rec, cols.source), UNKNOWN).to_lowercase()).or_default() += 1;

        if let Some(m) = s.by_role_category.as_mut() {
            *m.entry(or_label(field(rec, cols.role_category), UNKNOWN).to_string()).or_default() += 1;
        }
        if let Some(m) = s.by_work_type.as_mut() {
            let wt = field(rec, cols.work_type);
            if wt.is_empty() {
                *m.entry(NONE.to_string()).or_default() += 1;
            }
            for tag in wt.split(';').map(str::trim).filter(|t| !t.is_empty()) {
                *m.entry(tag.to_string()).or_default() += 1;
            }
        }
        if let Some(m) = s.experience_min.as_mut() {
            let min = extract_experience_enhanced(field(rec, cols.experience)).map(|r| r.min);
            *m.entry(experience_bucket(min).to_string()).or_default() += 1;
        }

        let raw = field(rec, cols.company);
        let key = normalize_company(raw);
        if !key.is_empty() {
            companies.entry(key).or_insert_with(|| (raw.to_string(), 0)).1 += 1;
        }
    }

    let mut ranked: Vec<CompanyCount> = companies
        .into_values()
        .map(|(company, count)| CompanyCount { company, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.company.cmp(&b.company)));
    ranked.truncate(top);
    s.top_companies = ranked;
    s
}
