use crate::util::text::slug;

use super::{CardSelectors, SearchQuery, Site, SiteProfile};

pub static PROFILE: SiteProfile = SiteProfile {
    site: Site::Shine,
    search,
    selectors: CardSelectors {
        cards: &["div.jobCard_jobCard__jjUmu", "div[class*=jobCard_jobCard]", "li.result-display__profile"],
        title: &["h2[itemprop=name] a", "h2 a", "h2"],
        company: &["div[class*=jobCard_jobCard_cName] span", "span[itemprop=hiringOrganization]", "div[class*=cName]"],
        link: &["meta[itemprop=url]", "h2 a"],
        experience: &["div[class*=jobCard_jobIcon] span", "span[class*=experience]", "li[class*=exp]"],
        salary: &["span[class*=salary]", "li[class*=salary]"],
        date_posted: &["span[class*=jobCard_jobCard_features] span", "span[class*=postedDate]", "time"],
        location: &["div[class*=jobCard_locationIcon]", "span[itemprop=addressLocality]", "div[class*=location]"],
        summary: &["div[class*=jobCard_skillList]", "ul[class*=skill]"],
    },
    next: &["a[class*=pagination_next]", "li.next a"],
};

// /job-search/{query}-jobs[-in-{location}][-{page}]
fn search(q: &SearchQuery, page: u32) -> String {
    let mut path = format!("https://www.shine.com/job-search/{}-jobs", slug(&q.query));
    if let Some(loc) = q.location.as_deref().map(slug).filter(|l| !l.is_empty()) {
        path.push_str("-in-");
        path.push_str(&loc);
    }
    if page > 1 {
        path.push_str(&format!("-{page}"));
    }
    path
}
