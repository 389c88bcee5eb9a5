use super::{offset, with_params, CardSelectors, SearchQuery, Site, SiteProfile};

pub static PROFILE: SiteProfile = SiteProfile {
    site: Site::Foundit,
    search,
    selectors: CardSelectors {
        cards: &["div.cardContainer", "div.srpResultCardContainer", "div.card-apply-content"],
        title: &["div.jobTitle", "h3.jobTitle a", "div.job-tittle h3"],
        company: &["div.companyName p", "div.companyName", "span.company-name"],
        link: &["div.jobTitle a", "h3.jobTitle a", "a[href*=\"/job/\"]"],
        experience: &["div.experienceSalary div.details", "span.exp", "div.experience"],
        salary: &["div.experienceSalary div.salary", "span.salary"],
        date_posted: &["div.jobAddedTime p", "span.time", "div.posted-update"],
        location: &["div.details.location", "span.location", "div.location"],
        summary: &["div.skillDetails", "div.jobDescInfo"],
    },
    next: &["div.arrow-right a", "a.next", "li.next a"],
};

fn search(q: &SearchQuery, page: u32) -> String {
    with_params(
        "https://www.foundit.in/srp/results",
        &[
            ("query", q.query.clone()),
            ("locations", q.location.clone().unwrap_or_default()),
            ("start", offset(page, 15)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::extract::extract_page;
    use chrono::NaiveDate;
    use url::Url;

    const FIXTURE: &str = r#"
    <div class="srpResultCard">
      <div class="cardContainer">
        <div class="jobTitle"><a href="/job/ml-engineer-vision-labs-hyderabad-4411">ML Engineer</a></div>
        <div class="companyName"><p>Vision Labs Private Limited</p></div>
        <div class="experienceSalary">
          <div class="details">2-6 Years</div>
          <div class="salary">Not Specified</div>
        </div>
        <div class="details location">Hyderabad</div>
        <div class="jobAddedTime"><p>Posted 5 days ago</p></div>
        <div class="skillDetails">pytorch, computer vision, python</div>
      </div>
      <div class="cardContainer">
        <div class="jobTitle"><a href="/job/ml-ops-contract-4412">MLOps (Contract)</a></div>
        <div class="companyName"><p>Vision Labs Private Limited</p></div>
      </div>
    </div>"#;

    #[test]
    fn fixture_cards() {
        let page = Url::parse("https://www.foundit.in/srp/results?query=ml").unwrap();
        let out = extract_page(FIXTURE, &page, &PROFILE, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(out.card_selector, Some("div.cardContainer"));
        assert_eq!(out.listings.len(), 2);
        let l = &out.listings[0];
        assert_eq!(l.title, "ML Engineer");
        assert_eq!(l.company, "Vision Labs Private Limited");
        assert_eq!(l.link, "https://www.foundit.in/job/ml-engineer-vision-labs-hyderabad-4411");
        assert_eq!(l.experience, "2-6 yrs");
        assert_eq!(l.salary, "Not disclosed");
        assert_eq!(l.date_posted, "2024-03-10");
        assert_eq!(l.location.as_deref(), Some("Hyderabad"));
        assert_eq!(out.listings[1].work_type.as_deref(), Some("Contract"));
    }
}
