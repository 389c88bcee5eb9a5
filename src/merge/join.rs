use std::collections::{HashMap, HashSet};

use clap::ValueEnum;
use serde::Serialize;

use crate::listing::{HrContact, JobListing};
use crate::parse::normalize_company;

use super::types::{MergeReport, MergedRow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinHow {
    /// Only listings with at least one contact
    Inner,
    /// Every listing; unmatched ones get empty HR columns
    #[default]
    Left,
}

/// Contacts grouped by normalized company. Contacts without a usable company are left out.
pub fn index_contacts(contacts: &[HrContact]) -> HashMap<String, Vec<&HrContact>> {
    let mut by_company: HashMap<String, Vec<&HrContact>> = HashMap::new();
    for c in contacts {
        let key = normalize_company(&c.company);
        if key.is_empty() {
            continue;
        }
        by_company.entry(key).or_default().push(c);
    }
    by_company
}

/// One row per (listing, contact) pair sharing a normalized company.
/// Rows repeating a listing key and contact email are emitted once.
pub fn merge(listings: &[JobListing], contacts: &[HrContact], how: JoinHow) -> (Vec<MergedRow>, MergeReport) {
    let index = index_contacts(contacts);
    let mut report = MergeReport { listings: listings.len(), contacts: contacts.len(), ..Default::default() };
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut rows = Vec::new();

    for l in listings {
        let key = l.dedup_key();
        let matches = match normalize_company(&l.company) {
            company if company.is_empty() => None,
            company => index.get(&company),
        };
        match matches {
            Some(found) => {
                report.matched_listings += 1;
                for c in found {
                    if seen.insert((key.clone(), c.email.trim().to_lowercase())) {
                        rows.push(MergedRow::new(l, Some(c)));
                    }
                }
            }
            None if how == JoinHow::Left => {
                if seen.insert((key, String::new())) {
                    rows.push(MergedRow::new(l, None));
                }
            }
            None => {}
        }
    }
    report.rows_out = rows.len();
    (rows, report)
}
