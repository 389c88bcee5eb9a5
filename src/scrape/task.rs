use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::Instrument;
use url::Url;

use crate::filter::{ListingFilter, Verdict};
use crate::listing::JobListing;
use crate::telemetry::{self, ctx::LogCtx, ops::scrape::{Phase, Scrape}};

use super::extract::extract_page;
use super::fetch::{fetch_with_retry, FetchError, PageFetcher};
use super::seen::SeenLinks;
use super::sites::{SearchQuery, Site};
use super::snapshot::write_snapshot;
use super::types::TaskSummary;

/// One (site, query) pair. `index` keeps output order stable under concurrency.
#[derive(Debug, Clone)]
pub struct ScrapeTask {
    pub index: usize,
    pub site: Site,
    pub query: SearchQuery,
}

impl ScrapeTask {
    pub fn label(&self) -> String {
        format!("{}:{}", self.site, self.query.query)
    }
}

/// Shared by every task of a run.
pub struct TaskContext {
    pub fetcher: Box<dyn PageFetcher>,
    pub filter: ListingFilter,
    pub seen: SeenLinks,
    pub max_pages: u32,
    pub retries: u32,
    pub retry_delay: Duration,
    pub page_delay: Duration,
    pub snapshot_dir: Option<PathBuf>,
    pub today: NaiveDate,
}

#[derive(Debug)]
pub struct TaskOutcome {
    pub index: usize,
    pub summary: TaskSummary,
    pub listings: Vec<JobListing>,
}

/// Walk a board's result pages for one query. Failures end the task early
/// and are counted in the summary; they never abort the run.
pub async fn run_task(ctx: &TaskContext, task: ScrapeTask) -> TaskOutcome {
    let log = telemetry::scrape();
    let profile = task.site.profile();
    let mut summary = TaskSummary::new(task.site, &task.query.query);
    let mut listings = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut url = profile.search_url(&task.query, 1);

    for page in 1..=ctx.max_pages {
        if !visited.insert(url.clone()) {
            log.debug(format!("{} already visited {}", task.label(), url));
            break;
        }
        if page > 1 && !ctx.page_delay.is_zero() {
            tokio::time::sleep(ctx.page_delay).await;
        }

        let fetch_span = log.span_kv(&Phase::Fetch, [("url", url.clone()), ("page", page.to_string())]);
        let fetched = fetch_with_retry(ctx.fetcher.as_ref(), &url, ctx.retries, ctx.retry_delay)
            .instrument(fetch_span)
            .await;
        let html = match fetched {
            Ok(html) => html,
            Err(FetchError::Blocked { reason, body }) => {
                summary.blocked += 1;
                log.warn_kv("🚧 blocked, skipping", [("task", task.label()), ("page", page.to_string()), ("reason", reason)]);
                snapshot(&log, ctx, &task, page, &body);
                break;
            }
            Err(err) => {
                summary.errors += 1;
                log.warn_kv("⚠️ fetch failed", [("task", task.label()), ("url", url.clone()), ("error", err.to_string())]);
                break;
            }
        };
        summary.pages += 1;

        let page_url = match Url::parse(&url) {
            Ok(u) => u,
            Err(err) => {
                summary.errors += 1;
                log.warn_kv("⚠️ bad page url", [("url", url.clone()), ("error", err.to_string())]);
                break;
            }
        };
        let extracted = {
            let _s = log.span_kv(&Phase::Extract, [("site", task.site.to_string())]).entered();
            extract_page(&html, &page_url, profile, ctx.today)
        };
        if extracted.listings.is_empty() {
            log.info_kv("no job cards", [("task", task.label()), ("page", page.to_string())]);
            snapshot(&log, ctx, &task, page, &html);
            break;
        }
        if extracted.generic {
            log.warn_kv("site selectors missed, used generic cards", [("task", task.label()), ("page", page.to_string())]);
        }

        summary.cards += extracted.listings.len();
        for listing in extracted.listings {
            match ctx.filter.accepts(&listing) {
                Verdict::Keep => {}
                verdict => {
                    summary.rejected += 1;
                    log.debug(format!("reject {:?}: {} ({})", verdict, listing.title, listing.experience));
                    continue;
                }
            }
            if !ctx.seen.insert(listing.dedup_key()) {
                summary.duplicates += 1;
                continue;
            }
            summary.accepted += 1;
            listings.push(listing);
        }

        let _p = log.span(&Phase::Paginate).entered();
        url = match extracted.next {
            Some(next) => next.to_string(),
            None => profile.search_url(&task.query, page + 1),
        };
    }

    log.task_summary(&task.label(), summary.pages, summary.accepted, summary.rejected, summary.duplicates, summary.errors + summary.blocked);
    TaskOutcome { index: task.index, summary, listings }
}

fn snapshot(log: &LogCtx<Scrape>, ctx: &TaskContext, task: &ScrapeTask, page: u32, html: &str) {
    let Some(dir) = ctx.snapshot_dir.as_deref() else { return };
    let _s = log.span(&Phase::Snapshot).entered();
    match write_snapshot(dir, task.site, &task.query.query, page, html) {
        Ok(path) => log.info_kv("📸 snapshot", [("path", path.display().to_string())]),
        Err(err) => log.warn(format!("snapshot failed: {err:#}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::csv_io::temp_path;
    use crate::scrape::fetch::testing::MockFetcher;
    use std::sync::Arc;

    const PAGE_1: &str = r#"
    <div class="srp-jobtuple-wrapper">
      <a class="title" href="/job-listings-rust-a">Rust Engineer</a><a class="comp-name">Ferrous</a>
      <span class="expwdth">3-6 Yrs</span>
    </div>
    <div class="srp-jobtuple-wrapper">
      <a class="title" href="/job-listings-rust-b">Rust Trainee</a><a class="comp-name">Ferrous</a>
      <span class="expwdth">0-1 Yrs</span>
    </div>
    <a rel="next" href="/rust-jobs-2">Next</a>"#;

    const PAGE_2: &str = r#"
    <div class="srp-jobtuple-wrapper">
      <a class="title" href="/job-listings-rust-a?src=similar">Rust Engineer</a><a class="comp-name">Ferrous</a>
      <span class="expwdth">3-6 Yrs</span>
    </div>
    <div class="srp-jobtuple-wrapper">
      <a class="title" href="/job-listings-rust-c">Staff Rust Engineer</a><a class="comp-name">Oxide</a>
      <span class="expwdth">8+ Yrs</span>
    </div>
    <a rel="next" href="/rust-jobs">Previous</a>"#;

    fn task(index: usize) -> ScrapeTask {
        query_task(index, "rust")
    }

    fn query_task(index: usize, query: &str) -> ScrapeTask {
        ScrapeTask { index, site: Site::Naukri, query: SearchQuery { query: query.into(), location: None } }
    }

    fn context(fetcher: MockFetcher, max_pages: u32, snapshot_dir: Option<PathBuf>) -> TaskContext {
        TaskContext {
            fetcher: Box::new(fetcher),
            filter: ListingFilter::default(),
            seen: SeenLinks::default(),
            max_pages,
            retries: 0,
            retry_delay: Duration::from_millis(1),
            page_delay: Duration::ZERO,
            snapshot_dir,
            today: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        }
    }

    #[tokio::test]
    async fn follows_next_until_a_visited_page() {
        let mock = MockFetcher::default();
        mock.push("https://www.naukri.com/rust-jobs", Ok(PAGE_1.into()));
        mock.push("https://www.naukri.com/rust-jobs-2", Ok(PAGE_2.into()));
        let ctx = context(mock, 5, None);

        let out = run_task(&ctx, task(0)).await;
        let s = &out.summary;
        assert_eq!((s.pages, s.cards, s.accepted, s.rejected, s.duplicates), (2, 4, 2, 1, 1));
        let links: Vec<&str> = out.listings.iter().map(|l| l.link.as_str()).collect();
        assert_eq!(links, ["https://www.naukri.com/job-listings-rust-a", "https://www.naukri.com/job-listings-rust-c"]);
    }

    #[tokio::test]
    async fn seen_links_dedup_across_tasks() {
        let mock = MockFetcher::default();
        mock.push("https://www.naukri.com/rust-jobs", Ok(PAGE_1.into()));
        mock.push("https://www.naukri.com/rust-jobs", Ok(PAGE_1.into()));
        let ctx = context(mock, 1, None);

        let first = run_task(&ctx, task(0)).await;
        let second = run_task(&ctx, task(1)).await;
        assert_eq!(first.summary.accepted, 1);
        assert_eq!(second.summary.accepted, 0);
        assert_eq!(second.summary.duplicates, 1);
        assert_eq!(second.index, 1);
    }

    #[tokio::test]
    async fn stops_at_max_pages_using_numbered_urls() {
        let mock = Arc::new(MockFetcher::default());
        let no_next = PAGE_1.replace(r#"<a rel="next" href="/rust-jobs-2">Next</a>"#, "");
        mock.push("https://www.naukri.com/rust-jobs", Ok(no_next.clone()));
        mock.push("https://www.naukri.com/rust-jobs-2", Ok(no_next));
        let ctx = TaskContext { fetcher: Box::new(ArcFetcher(mock.clone())), ..context(MockFetcher::default(), 2, None) };

        let out = run_task(&ctx, task(0)).await;
        assert_eq!(out.summary.pages, 2);
        assert_eq!(mock.calls(), ["https://www.naukri.com/rust-jobs", "https://www.naukri.com/rust-jobs-2"]);
    }

    #[tokio::test]
    async fn blocked_and_empty_pages_are_snapshotted() {
        let dir = temp_path("snaps");
        let mock = MockFetcher::default();
        mock.push(
            "https://www.naukri.com/rust-jobs",
            Err(FetchError::Blocked { reason: "status 403".into(), body: "<h1>Access Denied</h1>".into() }),
        );
        mock.push("https://www.naukri.com/go-jobs", Ok("<html><body>No results</body></html>".into()));
        let ctx = context(mock, 3, Some(dir.clone()));

        let blocked = run_task(&ctx, task(0)).await;
        assert_eq!((blocked.summary.blocked, blocked.summary.pages), (1, 0));
        let empty = run_task(&ctx, query_task(1, "go")).await;
        assert_eq!((empty.summary.pages, empty.summary.cards), (1, 0));

        let files = std::fs::read_dir(&dir).unwrap().count();
        assert_eq!(files, 2);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn fetch_errors_are_counted_not_raised() {
        let ctx = context(MockFetcher::default(), 3, None);
        let out = run_task(&ctx, task(0)).await;
        assert_eq!(out.summary.errors, 1);
        assert!(out.listings.is_empty());
    }

    struct ArcFetcher(Arc<MockFetcher>);

    #[async_trait::async_trait]
    impl PageFetcher for ArcFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.0.fetch(url).await
        }
    }
}
