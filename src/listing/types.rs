use serde::{Deserialize, Serialize};

use crate::util::text::collapse_whitespace;

/// One job card, denormalized. The link is the only (weak) identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default)]
    pub source: String,
    #[serde(alias = "Title", alias = "job_title")]
    pub title: String,
    #[serde(default, alias = "Company", alias = "company_name")]
    pub company: String,
    #[serde(default, alias = "Link", alias = "url", alias = "job_link")]
    pub link: String,
    #[serde(default, alias = "Experience")]
    pub experience: String,
    #[serde(default, alias = "Salary")]
    pub salary: String,
    #[serde(default, alias = "Date Posted", alias = "posted")]
    pub date_posted: String,
    #[serde(default, alias = "Location")]
    pub location: Option<String>,
    #[serde(default, alias = "Work Type")]
    pub work_type: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl JobListing {
    /// Dedup key: normalized link, else lowercased title + company.
    pub fn dedup_key(&self) -> String {
        let link = normalize_link(&self.link);
        if !link.is_empty() {
            return link;
        }
        format!(
            "{}|{}",
            collapse_whitespace(&self.title).to_lowercase(),
            collapse_whitespace(&self.company).to_lowercase()
        )
    }

    /// Title, location and summary joined for keyword matching.
    pub fn keyword_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.title.as_str()];
        for extra in [&self.location, &self.work_type, &self.summary].into_iter().flatten() {
            parts.push(extra.as_str());
        }
        parts.join(" ")
    }
}

/// A row from an HR contact list. Header spellings vary by export, hence the aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrContact {
    #[serde(default, alias = "Name", alias = "full_name", alias = "Full Name")]
    pub name: String,
    #[serde(default, alias = "Email", alias = "email_id", alias = "Email ID")]
    pub email: String,
    #[serde(default, alias = "Company", alias = "company_name", alias = "Company Name", alias = "organization")]
    pub company: String,
    #[serde(default, alias = "Title", alias = "designation", alias = "Designation")]
    pub title: Option<String>,
    #[serde(default, alias = "Seniority", alias = "level")]
    pub seniority: Option<String>,
    #[serde(default, alias = "Phone", alias = "mobile")]
    pub phone: Option<String>,
    #[serde(default, alias = "LinkedIn", alias = "linkedin_url")]
    pub linkedin: Option<String>,
}

const TRACKING_PARAMS: &[&str] = &["ref", "trk", "src", "from", "refid", "trackingid", "sid"];

/// Canonical form of a job link for dedup: lowercase scheme/host, no fragment,
/// no tracking query parameters, no trailing slash. Unparseable links are trimmed only.
pub fn normalize_link(link: &str) -> String {
    let link = link.trim();
    if link.is_empty() {
        return String::new();
    }
    let Ok(mut url) = url::Url::parse(link) else {
        return link.trim_end_matches('/').to_string();
    };
    url.set_fragment(None);
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| {
            let k = k.to_ascii_lowercase();
            !k.starts_with("utm_") && !TRACKING_PARAMS.contains(&k.as_str())
        })
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    url.as_str().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_normalization_drops_tracking() {
        assert_eq!(
            normalize_link("HTTPS://www.Naukri.com/job-listings-rust-dev-123/?utm_source=x&src=jobsearch#apply"),
            "https://www.naukri.com/job-listings-rust-dev-123"
        );
        assert_eq!(
            normalize_link("https://in.indeed.com/viewjob?jk=abc123&from=serp"),
            "https://in.indeed.com/viewjob?jk=abc123"
        );
        assert_eq!(normalize_link("  /jobs/42/ "), "/jobs/42");
        assert_eq!(normalize_link(""), "");
    }

    #[test]
    fn dedup_key_falls_back_to_title_and_company() {
        let a = JobListing { title: "Rust  Engineer".into(), company: "Acme".into(), ..Default::default() };
        let b = JobListing { title: "rust engineer".into(), company: "ACME".into(), ..Default::default() };
        assert_eq!(a.dedup_key(), b.dedup_key());
        let c = JobListing { link: "https://x.io/j/1?utm_medium=mail".into(), ..a.clone() };
        assert_eq!(c.dedup_key(), "https://x.io/j/1");
    }
}
