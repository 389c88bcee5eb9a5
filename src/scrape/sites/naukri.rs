use crate::util::text::slug;

use super::{CardSelectors, SearchQuery, Site, SiteProfile};

pub static PROFILE: SiteProfile = SiteProfile {
    site: Site::Naukri,
    search,
    selectors: CardSelectors {
        cards: &["div.srp-jobtuple-wrapper", "article.jobTuple", "div.cust-job-tuple"],
        title: &["a.title", "div.row1 a"],
        company: &["a.comp-name", "a.subTitle", "span.comp-dtls-wrap a"],
        link: &["a.title", "div.row1 a"],
        experience: &["span.expwdth", "span.exp-wrap span", "li.experience span"],
        salary: &["span.sal-wrap span", "li.salary span", "span.salary"],
        date_posted: &["span.job-post-day", "div.type span.fleft", "span.date"],
        location: &["span.locWdth", "li.location span", "span.loc-wrap span"],
        summary: &["span.job-desc", "div.job-description"],
    },
    next: &["a.styles_btn-secondary__2AsIP:last-child", "a.fright.fs14.btn-secondary"],
};

// /{query}-jobs[-in-{location}][-{page}]
fn search(q: &SearchQuery, page: u32) -> String {
    let mut path = format!("https://www.naukri.com/{}-jobs", slug(&q.query));
    if let Some(loc) = q.location.as_deref().map(slug).filter(|l| !l.is_empty()) {
        path.push_str("-in-");
        path.push_str(&loc);
    }
    if page > 1 {
        path.push_str(&format!("-{page}"));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::extract::extract_page;
    use chrono::NaiveDate;
    use url::Url;

    const FIXTURE: &str = r#"
    <div class="styles_jlc__main__VdwtF">
      <div class="srp-jobtuple-wrapper" data-job-id="120324">
        <div class="cust-job-tuple">
          <div class="row1"><a class="title" href="https://www.naukri.com/job-listings-senior-data-scientist-quantum-bengaluru-5-to-9-years-120324" title="Senior Data Scientist">Senior Data Scientist</a></div>
          <div class="row2"><span class="comp-dtls-wrap"><a class="comp-name" href="/quantum-jobs">Quantum Analytics Ltd.</a></span></div>
          <div class="row3">
            <span class="exp-wrap"><span class="expwdth">5-9 Yrs</span></span>
            <span class="sal-wrap"><span>Not disclosed</span></span>
            <span class="loc-wrap"><span class="locWdth">Bengaluru (Hybrid)</span></span>
          </div>
          <span class="job-desc">Own forecasting models end to end.</span>
          <span class="job-post-day">Just Now</span>
        </div>
      </div>
      <div class="srp-jobtuple-wrapper" data-job-id="120325">
        <div class="row1"><a class="title" href="/job-listings-junior-analyst-120325">Junior Analyst</a></div>
        <span class="expwdth">0-1 Yrs</span>
        <span class="sal-wrap"><span>3-4.5 Lacs PA</span></span>
        <span class="job-post-day">4 Days Ago</span>
      </div>
    </div>
    <div class="styles_pagination__oIvXh"><a class="styles_btn-secondary__2AsIP" href="/data-scientist-jobs-2"><span>Next</span></a></div>"#;

    #[test]
    fn fixture_cards() {
        let page = Url::parse("https://www.naukri.com/data-scientist-jobs").unwrap();
        let out = extract_page(FIXTURE, &page, &PROFILE, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(out.card_selector, Some("div.srp-jobtuple-wrapper"));
        assert_eq!(out.listings.len(), 2);

        let senior = &out.listings[0];
        assert_eq!(senior.title, "Senior Data Scientist");
        assert_eq!(senior.company, "Quantum Analytics Ltd.");
        assert_eq!(senior.experience, "5-9 yrs");
        assert_eq!(senior.salary, "Not disclosed");
        assert_eq!(senior.date_posted, "2024-03-15");
        assert_eq!(senior.location.as_deref(), Some("Bengaluru (Hybrid)"));
        assert_eq!(senior.work_type.as_deref(), Some("Hybrid"));

        let junior = &out.listings[1];
        assert_eq!(junior.link, "https://www.naukri.com/job-listings-junior-analyst-120325");
        assert_eq!(junior.experience, "0-1 yrs");
        assert_eq!(junior.salary, "3-4.5 Lacs PA");
        assert_eq!(junior.date_posted, "2024-03-11");

        assert_eq!(out.next.unwrap().path(), "/data-scientist-jobs-2");
    }

    #[test]
    fn path_style_search() {
        let q = SearchQuery { query: "Data Scientist".into(), location: None };
        assert_eq!(PROFILE.search_url(&q, 1), "https://www.naukri.com/data-scientist-jobs");
        assert_eq!(PROFILE.search_url(&q, 3), "https://www.naukri.com/data-scientist-jobs-3");
    }
}
