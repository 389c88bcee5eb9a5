//! Keyword classifiers. Rules are ordered and the first match wins, so
//! narrower buckets sit above the catch-alls.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::listing::JobListing;
use crate::parse::extract_experience_enhanced;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RoleCategory {
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Data Engineering")]
    DataEngineering,
    #[serde(rename = "Machine Learning")]
    MachineLearning,
    #[serde(rename = "DevOps / Cloud")]
    DevOpsCloud,
    Frontend,
    Backend,
    #[serde(rename = "Full Stack")]
    FullStack,
    Mobile,
    #[serde(rename = "QA / Testing")]
    QaTesting,
    Security,
    #[serde(rename = "Product Management")]
    ProductManagement,
    Analytics,
    Design,
    #[serde(rename = "Software Engineering")]
    SoftwareEngineering,
    Other,
}

impl RoleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::DataScience => "Data Science",
            RoleCategory::DataEngineering => "Data Engineering",
            RoleCategory::MachineLearning => "Machine Learning",
            RoleCategory::DevOpsCloud => "DevOps / Cloud",
            RoleCategory::Frontend => "Frontend",
            RoleCategory::Backend => "Backend",
            RoleCategory::FullStack => "Full Stack",
            RoleCategory::Mobile => "Mobile",
            RoleCategory::QaTesting => "QA / Testing",
            RoleCategory::Security => "Security",
            RoleCategory::ProductManagement => "Product Management",
            RoleCategory::Analytics => "Analytics",
            RoleCategory::Design => "Design",
            RoleCategory::SoftwareEngineering => "Software Engineering",
            RoleCategory::Other => "Other",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum JobType {
    Internship,
    Contract,
    Freelance,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Full-time")]
    FullTime,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Internship => "Internship",
            JobType::Contract => "Contract",
            JobType::Freelance => "Freelance",
            JobType::PartTime => "Part-time",
            JobType::FullTime => "Full-time",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Seniority {
    Intern,
    Junior,
    Mid,
    Senior,
    Lead,
}

impl Seniority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Intern => "Intern",
            Seniority::Junior => "Junior",
            Seniority::Mid => "Mid",
            Seniority::Senior => "Senior",
            Seniority::Lead => "Lead",
        }
    }

    /// Bucket for a minimum years-of-experience requirement.
    pub fn from_min_years(min: u32) -> Self {
        match min {
            0..=1 => Seniority::Junior,
            2..=4 => Seniority::Mid,
            _ => Seniority::Senior,
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn rules<T: Copy>(table: &[(T, &str)]) -> Vec<(T, Regex)> {
    table
        .iter()
        .map(|(v, pat)| (*v, Regex::new(&format!("(?i){pat}")).expect("valid classifier regex")))
        .collect()
}

static ROLE_RULES: LazyLock<Vec<(RoleCategory, Regex)>> = LazyLock::new(|| {
    rules(&[
        (RoleCategory::DataScience, r"data\s+scien"),
        (RoleCategory::MachineLearning, r"machine\s+learning|\bml\b|mlops|deep\s+learning|\bai\b|artificial\s+intelligence|\bnlp\b|computer\s+vision|\bllm"),
        (RoleCategory::DataEngineering, r"data\s+engineer|\betl\b|big\s+data|data\s+platform|data\s+pipeline|databricks|\bspark\b|hadoop"),
        (RoleCategory::Security, r"secur|cyber|penetration|\bappsec\b|infosec|\bsoc\b"),
        (RoleCategory::DevOpsCloud, r"devops|\bsre\b|site\s+reliability|\bcloud\b|platform\s+engineer|infrastructure|kubernetes|\baws\b|azure|\bgcp\b"),
        (RoleCategory::QaTesting, r"\bqa\b|quality\s+(?:assurance|engineer|analyst)|\btest|\bsdet\b"),
        (RoleCategory::Mobile, r"android|\bios\b|mobile|flutter|react\s+native|\bswift\b|kotlin"),
        (RoleCategory::FullStack, r"full[\s-]?stack|\bmern\b|\bmean\s+stack"),
        (RoleCategory::Frontend, r"front[\s-]?end|\breact|angular|\bvue|\bui\s+developer|javascript\s+developer"),
        (RoleCategory::Backend, r"back[\s-]?end|\bapi\b|node\.?js|django|\bspring\b|golang|\bjava\s+developer|python\s+developer|\brust\b"),
        (RoleCategory::ProductManagement, r"product\s+(?:manager|owner|management)|\bpm\b"),
        (RoleCategory::Analytics, r"analyst|analytics|business\s+intelligence|\bbi\b|tableau"),
        (RoleCategory::Design, r"design|\bux\b|\bui\b|user\s+experience"),
        (RoleCategory::SoftwareEngineering, r"software|developer|engineer|programmer|\bsde\b|coder"),
    ])
});

static JOB_TYPE_RULES: LazyLock<Vec<(JobType, Regex)>> = LazyLock::new(|| {
    rules(&[
        (JobType::Internship, r"\bintern(?:ship)?s?\b|\btrainee\b|apprentice"),
        (JobType::Contract, r"\bcontract(?:ual)?\b|\bc2h\b|temporary|fixed[\s-]term"),
        (JobType::Freelance, r"freelanc|\bgig\b"),
        (JobType::PartTime, r"part[\s-]?time"),
    ])
});

static SENIORITY_RULES: LazyLock<Vec<(Seniority, Regex)>> = LazyLock::new(|| {
    rules(&[
        (Seniority::Intern, r"\bintern(?:ship)?\b|\btrainee\b|apprentice"),
        (Seniority::Lead, r"\blead\b|principal|\bstaff\b|architect|head\s+of|\bmanager\b|director|\bvp\b"),
        (Seniority::Senior, r"\bsenior\b|\bsr\b\.?|\biii\b"),
        (Seniority::Junior, r"junior|\bjr\b\.?|entry[\s-]level|fresher|graduate|\bassociate\b"),
        (Seniority::Mid, r"\bmid\b|mid[\s-]level|\bii\b"),
    ])
});

fn first_match<T: Copy>(rules: &[(T, Regex)], text: &str) -> Option<T> {
    rules.iter().find(|(_, re)| re.is_match(text)).map(|(v, _)| *v)
}

pub fn classify_role(title: &str) -> RoleCategory {
    first_match(&ROLE_RULES, title).unwrap_or(RoleCategory::Other)
}

/// Looks at title, work type and summary; defaults to full-time.
pub fn guess_job_type(listing: &JobListing) -> JobType {
    first_match(&JOB_TYPE_RULES, &listing.keyword_text()).unwrap_or(JobType::FullTime)
}

/// Title keywords first, then the experience minimum. No signal at all reads as mid-level.
pub fn guess_seniority(title: &str, experience: &str) -> Seniority {
    if let Some(s) = first_match(&SENIORITY_RULES, title) {
        return s;
    }
    extract_experience_enhanced(experience)
        .map(|r| Seniority::from_min_years(r.min))
        .unwrap_or(Seniority::Mid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_by_title() {
        let cases = [
            ("Senior Data Scientist", RoleCategory::DataScience),
            ("ML Engineer - NLP", RoleCategory::MachineLearning),
            ("Data Engineer (Spark/Airflow)", RoleCategory::DataEngineering),
            ("Cloud Security Engineer", RoleCategory::Security),
            ("DevOps Engineer", RoleCategory::DevOpsCloud),
            ("SDET II", RoleCategory::QaTesting),
            ("React Native Developer", RoleCategory::Mobile),
            ("Full-Stack Developer (MERN)", RoleCategory::FullStack),
            ("Frontend Engineer", RoleCategory::Frontend),
            ("Backend Developer - Rust", RoleCategory::Backend),
            ("Associate Product Manager", RoleCategory::ProductManagement),
            ("Data Analyst", RoleCategory::Analytics),
            ("UI/UX Designer", RoleCategory::Design),
            ("Software Engineer", RoleCategory::SoftwareEngineering),
            ("Office Administrator", RoleCategory::Other),
        ];
        for (title, want) in cases {
            assert_eq!(classify_role(title), want, "{title}");
        }
    }

    #[test]
    fn categories_display_like_their_labels() {
        assert_eq!(RoleCategory::DevOpsCloud.to_string(), "DevOps / Cloud");
        assert_eq!(serde_json::to_string(&RoleCategory::QaTesting).unwrap(), "\"QA / Testing\"");
        assert_eq!(JobType::PartTime.to_string(), "Part-time");
    }

    #[test]
    fn job_types() {
        let with = |title: &str, summary: Option<&str>| JobListing {
            title: title.into(),
            summary: summary.map(Into::into),
            ..Default::default()
        };
        assert_eq!(guess_job_type(&with("Summer Internship - Analytics", None)), JobType::Internship);
        assert_eq!(guess_job_type(&with("Rust Developer", Some("6 month contract, extendable"))), JobType::Contract);
        assert_eq!(guess_job_type(&with("Freelance Designer", None)), JobType::Freelance);
        assert_eq!(guess_job_type(&with("Part Time Tutor", None)), JobType::PartTime);
        assert_eq!(guess_job_type(&with("Internal Tools Engineer", None)), JobType::FullTime);
    }

    #[test]
    fn seniority_title_then_experience() {
        assert_eq!(guess_seniority("Tech Lead - Payments", "2-4 yrs"), Seniority::Lead);
        assert_eq!(guess_seniority("Sr. Backend Engineer", ""), Seniority::Senior);
        assert_eq!(guess_seniority("Graduate Engineer Trainee", ""), Seniority::Intern);
        assert_eq!(guess_seniority("Backend Engineer", "0-1 yrs"), Seniority::Junior);
        assert_eq!(guess_seniority("Backend Engineer", "3+ yrs"), Seniority::Mid);
        assert_eq!(guess_seniority("Backend Engineer", "7-10 yrs"), Seniority::Senior);
        assert_eq!(guess_seniority("Backend Engineer", ""), Seniority::Mid);
    }
}
