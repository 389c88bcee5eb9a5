use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CompanyCount { pub company: String, pub count: usize }

#[derive(Serialize, Debug, Default)]
pub struct StatsSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    pub by_source: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_role_category: Option<BTreeMap<String, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_work_type: Option<BTreeMap<String, usize>>,
    pub top_companies: Vec<CompanyCount>,
    /// Minimum years asked for, bucketed; `unknown` when nothing parses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_min: Option<BTreeMap<String, usize>>,
}
