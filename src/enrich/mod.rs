use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;

use crate::listing::csv_io::{read_rows, write_rows};
use crate::listing::JobListing;
use crate::output::types::Meta;
use crate::parse::extract_experience_enhanced;
use crate::telemetry::{self};
use crate::telemetry::ops::enrich::Phase as EnrichPhase;

pub mod classify;
pub mod skills;
pub mod types;

use classify::{classify_role, guess_job_type, guess_seniority};
use types::{EnrichReport, EnrichedRow};

#[derive(Args)]
pub struct EnrichCmd {
    /// Cleaned (or merged) listings CSV
    pub input: PathBuf,
    #[arg(short, long, default_value = "jobs_enriched.csv")] pub output: PathBuf,
    #[arg(long, default_value_t=false)] pub apply: bool,
}

pub fn enrich_listing(l: JobListing) -> EnrichedRow {
    let role = classify_role(&l.title);
    let job_type = guess_job_type(&l);
    let seniority = guess_seniority(&l.title, &l.experience);
    let skills = skills::extract_skills(&l.keyword_text());
    let range = extract_experience_enhanced(&l.experience)
        .or_else(|| l.summary.as_deref().and_then(extract_experience_enhanced));

    let mut row = EnrichedRow::from_listing(l);
    row.role_category = role.to_string();
    row.job_type = job_type.to_string();
    row.seniority = seniority.to_string();
    row.skills = skills.join(";");
    row.experience_min = range.map(|r| r.min);
    row.experience_max = range.and_then(|r| r.max);
    row
}

pub fn enrich_all(listings: Vec<JobListing>) -> (Vec<EnrichedRow>, EnrichReport) {
    let mut report = EnrichReport { rows: listings.len(), ..Default::default() };
    let rows: Vec<EnrichedRow> = listings.into_iter().map(enrich_listing).collect();
    for r in &rows {
        *report.role_categories.entry(r.role_category.clone()).or_default() += 1;
        *report.job_types.entry(r.job_type.clone()).or_default() += 1;
        *report.seniority.entry(r.seniority.clone()).or_default() += 1;
        if !r.skills.is_empty() { report.with_skills += 1; }
    }
    (rows, report)
}

pub async fn run(args: EnrichCmd) -> Result<()> {
    let log = telemetry::enrich();
    let _g = log.root_span_kv([
        ("apply", args.apply.to_string()),
        ("input", args.input.display().to_string()),
        ("output", args.output.display().to_string()),
    ]).entered();

    let listings: Vec<JobListing> = {
        let _s = log.span(&EnrichPhase::Read).entered();
        read_rows(&args.input)?
    };

    if !args.apply {
        let _s = log.span(&EnrichPhase::Plan).entered();
        if crate::output::config::envelope_requested() {
            use types::EnrichPlan;
            log.plan(&EnrichPlan { rows: listings.len(), input: args.input.display().to_string(), output: args.output.display().to_string() })?;
        } else {
            log.info(format!("📝 Enrich plan — rows={} output={}", listings.len(), args.output.display()));
            log.info("   Use --apply to execute.");
        }
        return Ok(());
    }

    let started = Instant::now();
    let (rows, report) = {
        let _s = log.span_kv(&EnrichPhase::Classify, [("rows", listings.len().to_string())]).entered();
        enrich_all(listings)
    };
    {
        let _s = log.span_kv(&EnrichPhase::Write, [("rows", rows.len().to_string())]).entered();
        write_rows(&args.output, &rows)?;
    }

    if crate::output::config::envelope_requested() {
        log.result_with_meta(&report, Meta::finished(started, &args.output))?;
    } else {
        log.info(format!("🏷️ enriched {} rows → {}", report.rows, args.output.display()));
        for (category, n) in &report.role_categories {
            log.info(format!("  {:22} {}", category, n));
        }
    }
    Ok(())
}
