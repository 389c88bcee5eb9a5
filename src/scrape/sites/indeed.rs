use super::{offset, with_params, CardSelectors, SearchQuery, Site, SiteProfile};

pub static PROFILE: SiteProfile = SiteProfile {
    site: Site::Indeed,
    search,
    selectors: CardSelectors {
        cards: &["div.job_seen_beacon", "div.cardOutline", "td.resultContent", "a.tapItem"],
        title: &["h2.jobTitle span[title]", "h2.jobTitle a span", "h2.jobTitle", "a.jcs-JobTitle"],
        company: &["[data-testid=company-name]", "span.companyName", "span.company"],
        link: &["h2.jobTitle a", "a.jcs-JobTitle", "a[data-jk]"],
        experience: &[],
        salary: &[
            "div.salary-snippet-container",
            "[data-testid=attribute_snippet_testid]",
            "span.salary-snippet",
        ],
        date_posted: &["span.date", "[data-testid=myJobsStateDate]"],
        location: &["[data-testid=text-location]", "div.companyLocation"],
        summary: &["div.job-snippet", "div.underShelfFooter"],
    },
    next: &["a[data-testid=pagination-page-next]", "a[aria-label=\"Next Page\"]"],
};

fn search(q: &SearchQuery, page: u32) -> String {
    with_params(
        "https://in.indeed.com/jobs",
        &[
            ("q", q.query.clone()),
            ("l", q.location.clone().unwrap_or_default()),
            ("start", offset(page, 10)),
        ],
    )
}
