pub mod csv_io;
pub mod types;

pub use types::{HrContact, JobListing};
