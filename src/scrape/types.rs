use serde::Serialize;

use crate::filter::WorkTypeFilter;

use super::sites::Site;

// Plan envelope types
#[derive(Serialize)]
pub struct TaskSample { pub site: Site, pub query: String, pub location: Option<String>, pub first_url: String }

#[derive(Serialize)]
pub struct ScrapePlan {
    pub tasks: usize,
    pub max_pages: u32,
    pub concurrency: usize,
    pub min_experience: u32,
    pub work_type: WorkTypeFilter,
    pub keep_unknown_experience: bool,
    pub output: String,
    pub sample_tasks: Vec<TaskSample>,
}

// Apply/result envelope types
#[derive(Serialize, Debug, Clone)]
pub struct TaskSummary {
    pub site: Site,
    pub query: String,
    pub pages: usize,
    pub cards: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub duplicates: usize,
    pub blocked: usize,
    pub errors: usize,
}

#[derive(Serialize, Debug, Default)]
pub struct ScrapeTotals {
    pub tasks: usize,
    pub pages: usize,
    pub cards: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub duplicates: usize,
    pub blocked: usize,
    pub errors: usize,
}

impl TaskSummary {
    pub fn new(site: Site, query: &str) -> Self {
        TaskSummary {
            site,
            query: query.to_string(),
            pages: 0,
            cards: 0,
            accepted: 0,
            rejected: 0,
            duplicates: 0,
            blocked: 0,
            errors: 0,
        }
    }
}

impl ScrapeTotals {
    pub fn add(&mut self, t: &TaskSummary) {
        self.tasks += 1;
        self.pages += t.pages;
        self.cards += t.cards;
        self.accepted += t.accepted;
        self.rejected += t.rejected;
        self.duplicates += t.duplicates;
        self.blocked += t.blocked;
        self.errors += t.errors;
    }
}

#[derive(Serialize)]
pub struct ScrapeApply { pub totals: ScrapeTotals, pub per_task: Vec<TaskSummary> }
