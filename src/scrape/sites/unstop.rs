use super::{with_params, CardSelectors, SearchQuery, Site, SiteProfile};

// Cards are often the anchor element itself.
pub static PROFILE: SiteProfile = SiteProfile {
    site: Site::Unstop,
    search,
    selectors: CardSelectors {
        cards: &["app-competition-listing a.item", "div.single_profile", "a[href*=\"/jobs/\"].item"],
        title: &["h2.double-wrap", "h2", "h3"],
        company: &["p.single-wrap", "div.content p"],
        link: &["a.item"],
        experience: &["div.skill_list span", "div.seperate_box"],
        salary: &["div.seperate_box.salary", "span.salary"],
        date_posted: &["div.posted", "span.posted_on"],
        location: &["div.location", "span.location"],
        summary: &["div.skill_list"],
    },
    next: &["a.next-page", "li.next a"],
};

fn search(q: &SearchQuery, page: u32) -> String {
    with_params(
        "https://unstop.com/jobs",
        &[
            ("searchTerm", q.query.clone()),
            ("location", q.location.clone().unwrap_or_default()),
            ("page", page.to_string()),
        ],
    )
}
