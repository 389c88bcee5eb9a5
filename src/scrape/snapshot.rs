use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;

use crate::util::text::slug;

use super::sites::Site;

/// Save a page's HTML for manual inspection, as
/// `{site}_{query}_p{page}_{timestamp}.html`.
pub fn write_snapshot(dir: &Path, site: Site, query: &str, page: u32, html: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create snapshot dir {}", dir.display()))?;
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%6f");
    let path = dir.join(format!("{}_{}_p{}_{}.html", site.as_str(), slug(query), page, stamp));
    fs::write(&path, html).with_context(|| format!("write snapshot {}", path.display()))?;
    Ok(path)
}
