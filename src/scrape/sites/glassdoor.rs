use super::{with_params, CardSelectors, SearchQuery, Site, SiteProfile};

pub static PROFILE: SiteProfile = SiteProfile {
    site: Site::Glassdoor,
    search,
    selectors: CardSelectors {
        cards: &["li[data-test=jobListing]", "li.react-job-listing", "div[class*=JobCard_jobCardContainer]"],
        title: &["a[data-test=job-title]", "a[class*=JobCard_jobTitle]", "a.jobLink span"],
        company: &["span[class*=EmployerProfile_compactEmployerName]", "div[class*=EmployerProfile_employerName]", "div.job-search-8wag7x"],
        link: &["a[data-test=job-title]", "a[data-test=job-link]", "a.jobLink"],
        experience: &[],
        salary: &["div[data-test=detailSalary]", "span[data-test=detailSalary]"],
        date_posted: &["div[data-test=job-age]", "div[class*=JobCard_listingAge]"],
        location: &["div[data-test=emp-location]", "span[data-test=emp-location]"],
        summary: &["div[data-test=descSnippet]", "div[class*=JobCard_jobDescriptionSnippet]"],
    },
    next: &["button[data-test=pagination-next]", "a[data-test=pagination-next]", "li.next a"],
};

fn search(q: &SearchQuery, page: u32) -> String {
    with_params(
        "https://www.glassdoor.co.in/Job/jobs.htm",
        &[
            ("sc.keyword", q.query.clone()),
            ("locKeyword", q.location.clone().unwrap_or_default()),
            ("p", page.to_string()),
        ],
    )
}
