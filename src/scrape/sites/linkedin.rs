use super::{offset, with_params, CardSelectors, SearchQuery, Site, SiteProfile};

// The guest endpoint returns bare card markup without a page shell.
pub static PROFILE: SiteProfile = SiteProfile {
    site: Site::Linkedin,
    search,
    selectors: CardSelectors {
        cards: &["div.base-search-card", "div.job-search-card", "li div.base-card"],
        title: &["h3.base-search-card__title", "span.sr-only"],
        company: &["h4.base-search-card__subtitle a", "h4.base-search-card__subtitle"],
        link: &["a.base-card__full-link", "a[href*=\"/jobs/view/\"]"],
        experience: &[],
        salary: &["span.job-search-card__salary-info"],
        date_posted: &["time.job-search-card__listdate", "time.job-search-card__listdate--new", "time"],
        location: &["span.job-search-card__location"],
        summary: &["div.base-search-card__metadata"],
    },
    next: &[],
};

fn search(q: &SearchQuery, page: u32) -> String {
    with_params(
        "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search",
        &[
            ("keywords", q.query.clone()),
            ("location", q.location.clone().unwrap_or_default()),
            ("start", offset(page, 25)),
        ],
    )
}
