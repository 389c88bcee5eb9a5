use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use futures::stream::{self, StreamExt};
use tracing::Instrument;

use crate::filter::{ListingFilter, WorkTypeFilter};
use crate::listing::csv_io::write_rows;
use crate::listing::JobListing;
use crate::output::types::Meta;
use crate::telemetry::{self};
use crate::telemetry::ops::scrape::Phase as ScrapePhase;

pub mod extract;
pub mod fetch;
pub mod paginate;
pub mod seen;
pub mod sites;
pub mod snapshot;
pub mod task;
mod types;

use fetch::{FetchConfig, HttpFetcher};
use seen::SeenLinks;
use sites::{SearchQuery, Site};
use task::{run_task, ScrapeTask, TaskContext, TaskOutcome};

#[derive(Args)]
pub struct ScrapeCmd {
    /// Boards to search (repeat or comma-separate); all boards when omitted
    #[arg(long = "site", value_enum, value_delimiter = ',')] pub sites: Vec<Site>,
    /// Search terms; each one becomes a task per board
    #[arg(short, long = "query", required = true)] pub queries: Vec<String>,
    #[arg(long)] pub location: Option<String>,
    #[arg(long, default_value_t=3)] pub max_pages: u32,
    #[arg(long, default_value_t=4)] pub concurrency: usize,
    #[arg(long, env = "JOBS_MIN_EXPERIENCE", default_value_t=2)] pub min_experience: u32,
    /// Drop cards whose experience can't be parsed
    #[arg(long, default_value_t=false)] pub strict_experience: bool,
    #[arg(long, value_enum, default_value_t=WorkTypeFilter::Any)] pub work_type: WorkTypeFilter,
    /// Overrides JOBS_RETRIES
    #[arg(long)] pub retries: Option<u32>,
    /// Overrides JOBS_RETRY_DELAY_MS
    #[arg(long)] pub retry_delay_ms: Option<u64>,
    /// Pause between pages of the same task
    #[arg(long, default_value_t=1000)] pub delay_ms: u64,
    /// Save HTML of blocked or empty pages here
    #[arg(long)] pub snapshot_dir: Option<PathBuf>,
    #[arg(short, long, default_value = "jobs_raw.csv")] pub output: PathBuf,
    #[arg(long, default_value_t=false)] pub apply: bool,
    #[arg(long, default_value_t=10)] pub plan_limit: usize,
}

impl ScrapeCmd {
    fn filter(&self) -> ListingFilter {
        ListingFilter {
            min_years: self.min_experience,
            keep_unknown_experience: !self.strict_experience,
            work_type: self.work_type,
        }
    }
}

pub async fn run(args: ScrapeCmd) -> Result<()> {
    let log = telemetry::scrape();
    let _g = log.root_span_kv([
        ("apply", args.apply.to_string()),
        ("sites", format!("{:?}", args.sites)),
        ("queries", format!("{:?}", args.queries)),
        ("max_pages", args.max_pages.to_string()),
        ("concurrency", args.concurrency.to_string()),
        ("output", args.output.display().to_string()),
    ]).entered();

    let tasks = build_tasks(&args.sites, &args.queries, args.location.as_deref());
    let filter = args.filter();

    if !args.apply {
        let _s = log.span(&ScrapePhase::Plan).entered();
        if crate::output::config::envelope_requested() {
            use types::{ScrapePlan, TaskSample};
            let samples: Vec<TaskSample> = tasks.iter().take(args.plan_limit)
                .map(|t| TaskSample {
                    site: t.site,
                    query: t.query.query.clone(),
                    location: t.query.location.clone(),
                    first_url: t.site.profile().search_url(&t.query, 1),
                })
                .collect();
            let plan = ScrapePlan {
                tasks: tasks.len(),
                max_pages: args.max_pages,
                concurrency: args.concurrency,
                min_experience: filter.min_years,
                keep_unknown_experience: filter.keep_unknown_experience,
                work_type: filter.work_type,
                output: args.output.display().to_string(),
                sample_tasks: samples,
            };
            log.plan(&plan)?;
        } else {
            log.info(format!("📝 Scrape plan — tasks={} max_pages={} concurrency={} min_experience={} output={}",
                tasks.len(), args.max_pages, args.concurrency, filter.min_years, args.output.display()));
            for t in tasks.iter().take(args.plan_limit) {
                log.info(format!("  {} → {}", t.label(), t.site.profile().search_url(&t.query, 1)));
            }
            if tasks.len() > args.plan_limit { log.info(format!("  ... ({} more)", tasks.len() - args.plan_limit)); }
            log.info("   Use --apply to execute.");
        }
        return Ok(());
    }

    let started = Instant::now();
    let cfg = FetchConfig::from_env();
    let fetcher = HttpFetcher::new(&cfg).context("build http client")?;
    let ctx = TaskContext {
        fetcher: Box::new(fetcher),
        filter,
        seen: SeenLinks::default(),
        max_pages: args.max_pages.max(1),
        retries: args.retries.unwrap_or(cfg.retries),
        retry_delay: args.retry_delay_ms.map(Duration::from_millis).unwrap_or(cfg.retry_delay),
        page_delay: Duration::from_millis(args.delay_ms),
        snapshot_dir: args.snapshot_dir.clone(),
        today: Local::now().date_naive(),
    };

    let outcomes = run_all(&ctx, tasks, args.concurrency).await;

    use types::{ScrapeApply, ScrapeTotals};
    let mut totals = ScrapeTotals::default();
    let mut per_task = Vec::with_capacity(outcomes.len());
    let mut listings: Vec<JobListing> = Vec::new();
    for outcome in outcomes {
        totals.add(&outcome.summary);
        per_task.push(outcome.summary);
        listings.extend(outcome.listings);
    }

    {
        let _s = log.span_kv(&ScrapePhase::Write, [("rows", listings.len().to_string())]).entered();
        write_rows(&args.output, &listings)?;
    }
    log.totals(totals.accepted, totals.rejected, totals.duplicates, totals.errors + totals.blocked);
    log.debug(format!("unique links seen: {}", ctx.seen.len()));

    if crate::output::config::envelope_requested() {
        let result = ScrapeApply { totals, per_task };
        log.result_with_meta(&result, Meta::finished(started, &args.output))?;
    } else {
        log.info(format!("💾 wrote {} listings to {}", listings.len(), args.output.display()));
    }
    Ok(())
}

/// Every (site, query) pair, sites outermost. No sites means all of them.
pub fn build_tasks(sites: &[Site], queries: &[String], location: Option<&str>) -> Vec<ScrapeTask> {
    let sites: Vec<Site> = if sites.is_empty() { Site::ALL.to_vec() } else { dedup_sites(sites) };
    let location = location.map(str::trim).filter(|l| !l.is_empty()).map(str::to_string);
    let queries: Vec<&str> = queries.iter().map(|q| q.trim()).filter(|q| !q.is_empty()).collect();

    let mut tasks = Vec::with_capacity(sites.len() * queries.len());
    for site in sites {
        for q in &queries {
            tasks.push(ScrapeTask {
                index: tasks.len(),
                site,
                query: SearchQuery { query: q.to_string(), location: location.clone() },
            });
        }
    }
    tasks
}

fn dedup_sites(sites: &[Site]) -> Vec<Site> {
    let mut out: Vec<Site> = Vec::with_capacity(sites.len());
    for s in sites {
        if !out.contains(s) { out.push(*s); }
    }
    out
}

/// Run tasks over a bounded pool; outcomes come back in task order.
pub async fn run_all(ctx: &TaskContext, tasks: Vec<ScrapeTask>, concurrency: usize) -> Vec<TaskOutcome> {
    let log = telemetry::scrape();
    let mut outcomes: Vec<TaskOutcome> = stream::iter(tasks)
        .map(|task| {
            let span = log.span_kv(&ScrapePhase::Task, [("task", task.label())]);
            run_task(ctx, task).instrument(span)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;
    outcomes.sort_by_key(|o| o.index);
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::fetch::testing::MockFetcher;
    use chrono::NaiveDate;

    #[test]
    fn tasks_cross_sites_and_queries() {
        let tasks = build_tasks(
            &[Site::Naukri, Site::Indeed, Site::Naukri],
            &["rust".into(), "  ".into(), "go".into()],
            Some(" Pune "),
        );
        let labels: Vec<String> = tasks.iter().map(|t| t.label()).collect();
        assert_eq!(labels, ["naukri:rust", "naukri:go", "indeed:rust", "indeed:go"]);
        assert!(tasks.iter().enumerate().all(|(i, t)| t.index == i));
        assert_eq!(tasks[0].query.location.as_deref(), Some("Pune"));
    }

    #[test]
    fn no_sites_means_every_board() {
        let tasks = build_tasks(&[], &["data".into()], None);
        assert_eq!(tasks.len(), Site::ALL.len());
    }

    #[tokio::test]
    async fn outcomes_keep_task_order() {
        let mock = MockFetcher::default();
        for q in ["alpha", "beta", "gamma"] {
            let html = format!(
                r#"<div class="srp-jobtuple-wrapper"><a class="title" href="/job-{q}">{q} engineer</a><span class="expwdth">2-4 Yrs</span></div>"#
            );
            mock.push(&format!("https://www.naukri.com/{q}-jobs"), Ok(html));
        }
        let ctx = TaskContext {
            fetcher: Box::new(mock),
            filter: ListingFilter::default(),
            seen: SeenLinks::default(),
            max_pages: 1,
            retries: 0,
            retry_delay: Duration::from_millis(1),
            page_delay: Duration::ZERO,
            snapshot_dir: None,
            today: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        };
        let tasks = build_tasks(&[Site::Naukri], &["alpha".into(), "beta".into(), "gamma".into()], None);

        let outcomes = run_all(&ctx, tasks, 3).await;
        let titles: Vec<&str> = outcomes.iter().map(|o| o.listings[0].title.as_str()).collect();
        assert_eq!(titles, ["alpha engineer", "beta engineer", "gamma engineer"]);
        assert_eq!(ctx.seen.len(), 3);
    }
}
