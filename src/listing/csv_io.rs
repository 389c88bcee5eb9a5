use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::types::{HrContact, JobListing};

/// Row types written by a stage. The header is fixed so that an empty
/// result still produces a well-formed file for the next stage.
pub trait CsvRow: Serialize {
    const HEADERS: &'static [&'static str];
}

pub const LISTING_HEADERS: &[&str] = &[
    "source", "title", "company", "link", "experience", "salary", "date_posted", "location", "work_type", "summary",
];

impl CsvRow for JobListing {
    const HEADERS: &'static [&'static str] = LISTING_HEADERS;
}

impl CsvRow for HrContact {
    const HEADERS: &'static [&'static str] = &["name", "email", "company", "title", "seniority", "phone", "linkedin"];
}

pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open csv {}", path.display()))?;
    let mut rows = Vec::new();
    for (i, rec) in rdr.deserialize::<T>().enumerate() {
        // header is line 1
        let row = rec.with_context(|| format!("parse {} line {}", path.display(), i + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read several files of the same shape back to back, in argument order.
pub fn read_many<T: DeserializeOwned>(paths: &[impl AsRef<Path>]) -> Result<Vec<(usize, Vec<T>)>> {
    paths
        .iter()
        .enumerate()
        .map(|(i, p)| read_rows::<T>(p.as_ref()).map(|rows| (i, rows)))
        .collect()
}

/// Header row plus raw records, for stages that inspect whatever columns exist.
pub fn read_table(path: &Path) -> Result<(StringRecord, Vec<StringRecord>)> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open csv {}", path.display()))?;
    let headers = rdr.headers().with_context(|| format!("read header of {}", path.display()))?.clone();
    let records = rdr
        .records()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("read records of {}", path.display()))?;
    Ok((headers, records))
}

pub fn write_rows<T: CsvRow>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
        }
    }
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create csv {}", path.display()))?;
    wtr.write_record(T::HEADERS)?;
    for row in rows {
        wtr.serialize(row).with_context(|| format!("write row to {}", path.display()))?;
    }
    wtr.flush().with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("jobs-test-{}-{}", uuid::Uuid::new_v4(), name))
}
