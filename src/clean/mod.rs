use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::Args;

use crate::listing::csv_io::{read_many, write_rows};
use crate::listing::JobListing;
use crate::output::types::Meta;
use crate::telemetry::{self};
use crate::telemetry::ops::clean::Phase as CleanPhase;

pub mod dedup;
mod types;

#[derive(Args)]
pub struct CleanCmd {
    /// Scrape outputs to concatenate, in order
    #[arg(required = true)] pub inputs: Vec<PathBuf>,
    #[arg(short, long, default_value = "jobs_clean.csv")] pub output: PathBuf,
    #[arg(long, default_value_t=false)] pub apply: bool,
    #[arg(long, default_value_t=10)] pub plan_limit: usize,
}

pub async fn run(args: CleanCmd) -> Result<()> {
    let log = telemetry::clean();
    let _g = log.root_span_kv([
        ("apply", args.apply.to_string()),
        ("inputs", args.inputs.len().to_string()),
        ("output", args.output.display().to_string()),
    ]).entered();

    if args.inputs.iter().any(|p| p == &args.output) {
        bail!("output {} is also an input", args.output.display());
    }

    let files = {
        let _s = log.span_kv(&CleanPhase::Read, [("files", args.inputs.len().to_string())]).entered();
        read_many::<JobListing>(&args.inputs)?
    };
    let total: usize = files.iter().map(|(_, rows)| rows.len()).sum();

    if !args.apply {
        let _s = log.span(&CleanPhase::Plan).entered();
        if crate::output::config::envelope_requested() {
            use types::{CleanPlan, InputFile};
            let inputs = files.iter().take(args.plan_limit)
                .map(|(i, rows)| InputFile { path: args.inputs[*i].display().to_string(), rows: rows.len() })
                .collect();
            log.plan(&CleanPlan { inputs, rows: total, output: args.output.display().to_string() })?;
        } else {
            log.info(format!("📝 Clean plan — files={} rows={} output={}", files.len(), total, args.output.display()));
            for (i, rows) in files.iter().take(args.plan_limit) {
                log.info(format!("  {} rows={}", args.inputs[*i].display(), rows.len()));
            }
            if files.len() > args.plan_limit { log.info(format!("  ... ({} more)", files.len() - args.plan_limit)); }
            log.info("   Use --apply to execute.");
        }
        return Ok(());
    }

    let started = Instant::now();
    let rows: Vec<JobListing> = files.into_iter().flat_map(|(_, rows)| rows).collect();
    let (kept, report) = {
        let _s = log.span(&CleanPhase::Dedup).entered();
        dedup::clean_listings(rows)
    };
    {
        let _s = log.span_kv(&CleanPhase::Write, [("rows", kept.len().to_string())]).entered();
        write_rows(&args.output, &kept)?;
    }

    log.info_kv("🧹 clean done", [
        ("read", report.read.to_string()),
        ("kept", report.kept.to_string()),
        ("duplicates", report.duplicates.to_string()),
        ("dropped_empty", report.dropped_empty.to_string()),
    ]);
    if crate::output::config::envelope_requested() {
        log.result_with_meta(&report, Meta::finished(started, &args.output))?;
    } else {
        log.info(format!("  read={} kept={} duplicates={} dropped_empty={} → {}",
            report.read, report.kept, report.duplicates, report.dropped_empty, args.output.display()));
    }
    Ok(())
}
