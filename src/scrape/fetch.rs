use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client as HttpClient, StatusCode};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRIES: u32 = 2;
const DEFAULT_RETRY_DELAY_MS: u64 = 1500;

// Lowercased body markers of interstitial / bot-check pages.
const BLOCK_MARKERS: &[&str] = &[
    "are you a robot",
    "unusual traffic",
    "verify you are human",
    "verifying you are human",
    "<title>just a moment...</title>",
    "captcha-delivery",
    "px-captcha",
    "cf-chl-",
];

#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl FetchConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(ua) = std::env::var("JOBS_USER_AGENT") {
            if !ua.trim().is_empty() {
                cfg.user_agent = ua;
            }
        }
        if let Ok(timeout) = std::env::var("JOBS_HTTP_TIMEOUT_SECS") {
            if let Ok(parsed) = timeout.parse::<u64>() {
                cfg.timeout = Duration::from_secs(parsed);
            }
        }
        if let Ok(retries) = std::env::var("JOBS_RETRIES") {
            if let Ok(parsed) = retries.parse::<u32>() {
                cfg.retries = parsed;
            }
        }
        if let Ok(delay) = std::env::var("JOBS_RETRY_DELAY_MS") {
            if let Ok(parsed) = delay.parse::<u64>() {
                cfg.retry_delay = Duration::from_millis(parsed);
            }
        }
        cfg
    }
}

#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    Timeout,
    Status(StatusCode),
    /// A bot check or rate limit page. Never retried; the page is skipped.
    Blocked { reason: String, body: String },
}

impl FetchError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Http(err)
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::Http(_) => true,
            FetchError::Status(status) => status.is_server_error(),
            FetchError::Blocked { .. } => false,
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(err) => write!(f, "http error: {err}"),
            FetchError::Timeout => write!(f, "request timed out"),
            FetchError::Status(status) => write!(f, "unexpected status {status}"),
            FetchError::Blocked { reason, .. } => write!(f, "blocked: {reason}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Http(err) => Some(err),
            _ => None,
        }
    }
}

/// Reason string when a response looks like a block page rather than results.
pub fn detect_block(status: StatusCode, body: &str) -> Option<String> {
    if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
        return Some(format!("status {}", status.as_u16()));
    }
    let lower = body.to_lowercase();
    BLOCK_MARKERS
        .iter()
        .find(|m| lower.contains(*m))
        .map(|m| format!("marker {m:?}"))
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Clone)]
pub struct HttpFetcher {
    http: HttpClient,
}

impl HttpFetcher {
    pub fn new(cfg: &FetchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-IN,en;q=0.9"));
        let http = HttpClient::builder()
            .user_agent(cfg.user_agent.clone())
            .default_headers(headers)
            .timeout(cfg.timeout)
            .gzip(true)
            .build()
            .map_err(FetchError::from_reqwest)?;
        Ok(Self { http })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.http.get(url).send().await.map_err(FetchError::from_reqwest)?;
        let status = response.status();
        let body = response.text().await.map_err(FetchError::from_reqwest)?;

        if let Some(reason) = detect_block(status, &body) {
            return Err(FetchError::Blocked { reason, body });
        }
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(body)
    }
}

/// Up to `retries` extra attempts, sleeping `delay * attempt` in between.
pub async fn fetch_with_retry(
    fetcher: &dyn PageFetcher,
    url: &str,
    retries: u32,
    delay: Duration,
) -> Result<String, FetchError> {
    let mut attempt = 0u32;
    loop {
        match fetcher.fetch(url).await {
            Ok(body) => return Ok(body),
            Err(err) if err.is_retryable() && attempt < retries => {
                attempt += 1;
                tracing::warn!(url, attempt, error = %err, "fetch failed, retrying");
                tokio::time::sleep(delay * attempt).await;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use super::*;

    /// Serves queued responses per URL; an unknown URL is a 404.
    #[derive(Default)]
    pub struct MockFetcher {
        responses: Mutex<HashMap<String, VecDeque<Result<String, FetchError>>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        pub fn push(&self, url: &str, resp: Result<String, FetchError>) {
            self.responses.lock().unwrap().entry(url.to_string()).or_default().push_back(resp);
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.calls.lock().unwrap().push(url.to_string());
            self.responses
                .lock()
                .unwrap()
                .get_mut(url)
                .and_then(|q| q.pop_front())
                .unwrap_or(Err(FetchError::Status(StatusCode::NOT_FOUND)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockFetcher;
    use super::*;

    const URL: &str = "https://jobs.example/search";

    #[tokio::test]
    async fn retries_transient_failures() {
        let mock = MockFetcher::default();
        mock.push(URL, Err(FetchError::Timeout));
        mock.push(URL, Err(FetchError::Status(StatusCode::BAD_GATEWAY)));
        mock.push(URL, Ok("<html>ok</html>".into()));
        let body = fetch_with_retry(&mock, URL, 2, Duration::from_millis(1)).await.unwrap();
        assert_eq!(body, "<html>ok</html>");
        assert_eq!(mock.calls().len(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_retries() {
        let mock = MockFetcher::default();
        for _ in 0..3 {
            mock.push(URL, Err(FetchError::Timeout));
        }
        let err = fetch_with_retry(&mock, URL, 1, Duration::from_millis(1)).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout));
        assert_eq!(mock.calls().len(), 2);
    }

    #[tokio::test]
    async fn blocked_and_client_errors_are_not_retried() {
        let mock = MockFetcher::default();
        mock.push(URL, Err(FetchError::Blocked { reason: "status 429".into(), body: String::new() }));
        let err = fetch_with_retry(&mock, URL, 3, Duration::from_millis(1)).await.unwrap_err();
        assert!(matches!(err, FetchError::Blocked { .. }));
        assert_eq!(mock.calls().len(), 1);

        let err = fetch_with_retry(&mock, "https://jobs.example/missing", 3, Duration::from_millis(1)).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(s) if s == StatusCode::NOT_FOUND));
        assert_eq!(mock.calls().len(), 2);
    }

    #[test]
    fn block_pages() {
        assert_eq!(detect_block(StatusCode::TOO_MANY_REQUESTS, ""), Some("status 429".to_string()));
        assert!(detect_block(StatusCode::FORBIDDEN, "<html>jobs</html>").is_some());
        assert!(detect_block(StatusCode::OK, "<title>Are you a robot?</title>").is_some());
        assert!(detect_block(StatusCode::OK, "We detected Unusual Traffic from your network").is_some());
        assert!(detect_block(StatusCode::OK, "<div class=\"job\">Captain wanted</div>").is_none());
        assert!(detect_block(StatusCode::NOT_FOUND, "gone").is_none());
    }

    #[test]
    fn cloudflare_challenge_vs_ordinary_cloudflare_page() {
        let challenge = r#"<html><head><title>Just a moment...</title></head>
            <body><div id="cf-chl-widget-x1"></div></body></html>"#;
        assert!(detect_block(StatusCode::OK, challenge).is_some());

        let listing = r#"<html><head><title>Rust jobs</title>
            <script src="/cdn-cgi/challenge-platform/scripts/jsd/main.js"></script></head>
            <body><div class="job-card"><h2>Rust Dev</h2><p>Back in just a moment... we are hiring</p>
            <form><div class="g-recaptcha" data-sitekey="k"></div></form></div></body></html>"#;
        assert!(detect_block(StatusCode::OK, listing).is_none());
    }
}
