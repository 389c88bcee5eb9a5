//! Selector-fallback extraction of job cards from a results page.

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::filter::WorkType;
use crate::listing::JobListing;
use crate::parse::{clean_date_posted, clean_salary, extract_experience_enhanced};
use crate::util::text::collapse_whitespace;

use super::paginate::next_page_url;
use super::sites::{CardSelectors, Site, SiteProfile};

const SUMMARY_MAX_CHARS: usize = 300;

/// Used when none of a board's own card selectors match.
pub const GENERIC: CardSelectors = CardSelectors {
    cards: &[
        "[data-job-id]",
        "[class*=job-card]",
        "[class*=jobCard]",
        "[class*=job_card]",
        "li[class*=job]",
        "article",
    ],
    title: &["h2 a", "h3 a", "h2", "h3", "a[class*=title]", "[class*=title]"],
    company: &["[class*=company]", "[class*=employer]", "[class*=organization]"],
    link: &["h2 a", "h3 a", "a[class*=title]", "a[href]"],
    experience: &["[class*=exp]"],
    salary: &["[class*=salary]", "[class*=sal]"],
    date_posted: &["time", "[class*=date]", "[class*=posted]"],
    location: &["[class*=location]", "[class*=loc]"],
    summary: &["[class*=desc]", "[class*=snippet]", "p"],
};

#[derive(Debug, Default)]
pub struct PageExtract {
    pub listings: Vec<JobListing>,
    pub card_selector: Option<&'static str>,
    pub generic: bool,
    pub next: Option<Url>,
}

pub fn extract_page(html: &str, page_url: &Url, profile: &SiteProfile, today: NaiveDate) -> PageExtract {
    let doc = Html::parse_document(html);

    let (fields, generic, found) = match select_cards(&doc, profile.selectors.cards) {
        Some(found) => (&profile.selectors, false, Some(found)),
        None => (&GENERIC, true, select_cards(&doc, GENERIC.cards)),
    };

    let mut out = PageExtract { generic, ..Default::default() };
    if let Some((sel, cards)) = found {
        out.card_selector = Some(sel);
        out.listings = cards
            .into_iter()
            .map(|card| card_to_listing(card, fields, profile.site, page_url, today))
            .collect();
    } else {
        out.generic = false;
    }
    out.next = next_page_url(&doc, page_url, profile.next);
    out
}

/// First selector that matches at least one element wins.
pub fn select_cards<'a>(doc: &'a Html, selectors: &[&'static str]) -> Option<(&'static str, Vec<ElementRef<'a>>)> {
    for s in selectors {
        let Ok(sel) = Selector::parse(s) else { continue };
        let cards: Vec<ElementRef<'a>> = doc.select(&sel).collect();
        if !cards.is_empty() {
            return Some((*s, cards));
        }
    }
    None
}

fn card_to_listing(card: ElementRef<'_>, sel: &CardSelectors, site: Site, page_url: &Url, today: NaiveDate) -> JobListing {
    let card_text = element_text(card);
    let link = first_link(card, sel.link)
        .and_then(|href| page_url.join(&href).ok())
        .map(|u| u.to_string())
        .unwrap_or_default();

    JobListing {
        source: site.as_str().to_string(),
        title: first_text(card, sel.title).unwrap_or_default(),
        company: first_text(card, sel.company).unwrap_or_default(),
        link,
        experience: find_experience(card, sel.experience, &card_text),
        salary: clean_salary(&first_text(card, sel.salary).unwrap_or_default()),
        date_posted: first_text(card, sel.date_posted)
            .map(|d| clean_date_posted(&d, today).to_field())
            .unwrap_or_default(),
        location: first_text(card, sel.location),
        work_type: WorkType::detect(&card_text).label(),
        summary: first_text(card, sel.summary).map(|s| s.chars().take(SUMMARY_MAX_CHARS).collect()),
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<Vec<_>>().join(" "))
}

/// Text of the first match of the first selector that yields non-empty text.
pub fn first_text(card: ElementRef<'_>, selectors: &[&str]) -> Option<String> {
    for s in selectors {
        let Ok(sel) = Selector::parse(s) else { continue };
        if let Some(text) = card.select(&sel).map(element_text).find(|t| !t.is_empty()) {
            return Some(text);
        }
    }
    None
}

/// `href` (or `content` for `<meta itemprop=url>`) of the first usable match;
/// falls back to the card itself when it is an anchor.
pub fn first_link(card: ElementRef<'_>, selectors: &[&str]) -> Option<String> {
    for s in selectors {
        let Ok(sel) = Selector::parse(s) else { continue };
        for el in card.select(&sel) {
            let v = el.value();
            if let Some(href) = v.attr("href").or_else(|| v.attr("content")).filter(|h| usable_href(h)) {
                return Some(href.trim().to_string());
            }
        }
    }
    card.value().attr("href").filter(|h| usable_href(h)).map(|h| h.trim().to_string())
}

pub fn usable_href(href: &str) -> bool {
    let h = href.trim();
    !h.is_empty() && !h.starts_with('#') && !h.to_ascii_lowercase().starts_with("javascript:")
}

// Experience: the first selector match that parses, else whatever the card text says.
fn find_experience(card: ElementRef<'_>, selectors: &[&str], card_text: &str) -> String {
    let mut first_raw: Option<String> = None;
    for s in selectors {
        let Ok(sel) = Selector::parse(s) else { continue };
        for text in card.select(&sel).map(element_text).filter(|t| !t.is_empty()) {
            if let Some(range) = extract_experience_enhanced(&text) {
                return range.to_string();
            }
            first_raw.get_or_insert(text);
        }
    }
    if let Some(range) = extract_experience_enhanced(card_text) {
        return range.to_string();
    }
    first_raw.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::sites::Site;

    fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 3, 15).unwrap() }

    fn page() -> Url { Url::parse("https://boards.example/search?q=rust").unwrap() }

    #[test]
    fn generic_fallback_when_site_selectors_miss() {
        let html = r#"
        <html><body>
          <div class="job-card">
            <h2><a href="/jobs/7">Senior Rust Engineer</a></h2>
            <span class="company-name">Ferrous Labs</span>
            <span class="exp">4-8 Yrs</span>
            <span class="location">Remote</span>
            <time>2 days ago</time>
          </div>
        </body></html>"#;
        let out = extract_page(html, &page(), Site::Indeed.profile(), today());
        assert!(out.generic);
        assert_eq!(out.card_selector, Some("[class*=job-card]"));
        assert_eq!(out.listings.len(), 1);
        let l = &out.listings[0];
        assert_eq!(l.source, "indeed");
        assert_eq!(l.title, "Senior Rust Engineer");
        assert_eq!(l.company, "Ferrous Labs");
        assert_eq!(l.link, "https://boards.example/jobs/7");
        assert_eq!(l.experience, "4-8 yrs");
        assert_eq!(l.date_posted, "2024-03-13");
        assert_eq!(l.salary, "Not disclosed");
        assert_eq!(l.work_type.as_deref(), Some("Remote"));
    }

    #[test]
    fn no_cards_anywhere() {
        let html = "<html><body><p>Nothing to see</p></body></html>";
        let out = extract_page(html, &page(), Site::Naukri.profile(), today());
        assert!(out.listings.is_empty());
        assert!(!out.generic);
        assert_eq!(out.card_selector, None);
    }

    #[test]
    fn experience_falls_back_to_card_text() {
        let html = r#"<div class="job-card"><h3>Data Engineer</h3><p>Need 3+ years with Spark</p></div>"#;
        let out = extract_page(html, &page(), Site::Shine.profile(), today());
        assert_eq!(out.listings[0].experience, "3+ yrs");
    }

    #[test]
    fn links_skip_placeholders_and_use_anchor_cards() {
        let doc = Html::parse_fragment(r#"<a class="card" href="/jobs/9"><span>t</span></a>"#);
        let sel = Selector::parse("a.card").unwrap();
        let card = doc.select(&sel).next().unwrap();
        assert_eq!(first_link(card, &["a.missing"]), Some("/jobs/9".to_string()));
        assert!(!usable_href("javascript:void(0)"));
        assert!(!usable_href("  "));
    }
}
