use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::listing::csv_io::read_table;
use crate::telemetry::{self};
use crate::telemetry::ops::stats::Phase as StatsPhase;

pub mod summary;
pub mod types;

#[derive(Args, Debug)]
pub struct StatsCmd {
    /// Output of any stage (scrape, clean, merge, enrich)
    pub input: PathBuf,

    /// Number of companies to list (default: 10)
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

pub async fn run(args: StatsCmd) -> Result<()> {
    let log = telemetry::stats();
    let _g = log
        .root_span_kv([
            ("input", args.input.display().to_string()),
            ("top", args.top.to_string()),
        ])
        .entered();

    let (headers, records) = {
        let _s = log.span(&StatsPhase::Read).entered();
        read_table(&args.input)?
    };

    let _s = log.span(&StatsPhase::Summarize).entered();
    let s = summary::summarize(&headers, &records, args.top);

    if crate::output::config::envelope_requested() {
        return log.result(&s);
    }

    log.info(format!("📄 {} — rows={} columns={}", args.input.display(), s.rows, s.columns.len()));
    log.info("🌐 By source:");
    for (k, v) in &s.by_source { log.info(format!("  {:12} {}", k, v)); }
    if let Some(roles) = &s.by_role_category {
        log.info("🏷️ By role:");
        for (k, v) in roles { log.info(format!("  {:22} {}", k, v)); }
    }
    if let Some(wt) = &s.by_work_type {
        log.info("🏠 By work type:");
        for (k, v) in wt { log.info(format!("  {:12} {}", k, v)); }
    }
    if let Some(exp) = &s.experience_min {
        log.info("🎓 Experience (min years):");
        for (k, v) in exp { log.info(format!("  {:8} {}", k, v)); }
    }
    if !s.top_companies.is_empty() {
        log.info(format!("🏢 Top {} companies:", s.top_companies.len()));
        for c in &s.top_companies { log.info(format!("  {:4} {}", c.count, c.company)); }
    }
    Ok(())
}
