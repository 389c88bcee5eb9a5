use serde::Serialize;

// Plan envelope types
#[derive(Serialize)]
pub struct InputFile { pub path: String, pub rows: usize }

#[derive(Serialize)]
pub struct CleanPlan { pub inputs: Vec<InputFile>, pub rows: usize, pub output: String }

// Apply/result envelope types
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport { pub read: usize, pub kept: usize, pub duplicates: usize, pub dropped_empty: usize }
