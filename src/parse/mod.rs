//! Deterministic string helpers shared by every stage.
//!
//! These are the only pieces of the pipeline with a stable contract: they
//! never touch the network and never depend on live site markup.

pub mod company;
pub mod date;
pub mod experience;
pub mod salary;

pub use company::normalize_company;
pub use date::clean_date_posted;
pub use experience::{extract_experience_enhanced, filter_experience};
pub use salary::clean_salary;
