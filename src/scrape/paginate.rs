use scraper::{Html, Selector};
use url::Url;

use crate::util::text::collapse_whitespace;

use super::extract::usable_href;

const REL_NEXT: &[&str] = &[
    "a[rel=next]",
    "link[rel=next]",
    "a[aria-label*=Next]",
    "a[aria-label*=next]",
    "a[title*=Next]",
];

const NEXT_LABELS: &[&str] = &["next", "next >", "next »", "next ›", "›", "»", ">"];

/// Guess the "next page" control: board selectors, then rel/aria hints,
/// then any anchor labelled "Next".
pub fn next_page_url(doc: &Html, page_url: &Url, site_next: &[&str]) -> Option<Url> {
    for s in site_next.iter().chain(REL_NEXT.iter()) {
        let Ok(sel) = Selector::parse(s) else { continue };
        for el in doc.select(&sel) {
            if let Some(u) = el.value().attr("href").and_then(|h| resolve(page_url, h)) {
                return Some(u);
            }
        }
    }

    let anchors = Selector::parse("a[href]").ok()?;
    doc.select(&anchors)
        .filter(|el| {
            let label = collapse_whitespace(&el.text().collect::<String>()).to_lowercase();
            NEXT_LABELS.contains(&label.as_str())
        })
        .find_map(|el| el.value().attr("href").and_then(|h| resolve(page_url, h)))
}

fn resolve(page_url: &Url, href: &str) -> Option<Url> {
    if !usable_href(href) { return None; }
    let u = page_url.join(href.trim()).ok()?;
    if &u == page_url { None } else { Some(u) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url { Url::parse("https://jobs.example/search?q=go&page=1").unwrap() }

    #[test]
    fn rel_next_wins() {
        let doc = Html::parse_document(r#"<a href="?q=go&page=9">Next</a><a rel="next" href="?q=go&page=2">2</a>"#);
        let u = next_page_url(&doc, &page(), &[]).unwrap();
        assert_eq!(u.as_str(), "https://jobs.example/search?q=go&page=2");
    }

    #[test]
    fn site_selector_precedes_generic_hints() {
        let doc = Html::parse_document(r#"<a rel="next" href="/a">a</a><div class="pager"><a class="fwd" href="/b">b</a></div>"#);
        let u = next_page_url(&doc, &page(), &["div.pager a.fwd"]).unwrap();
        assert_eq!(u.path(), "/b");
    }

    #[test]
    fn labelled_anchor_and_placeholders() {
        let doc = Html::parse_document(r##"<a href="#">Next</a><a href="/search?page=2"> Next &gt; </a>"##);
        assert_eq!(next_page_url(&doc, &page(), &[]).unwrap().query(), Some("page=2"));
        let none = Html::parse_document(r#"<a href="javascript:void(0)">Next</a>"#);
        assert!(next_page_url(&none, &page(), &[]).is_none());
    }

    #[test]
    fn self_link_is_not_a_next_page() {
        let doc = Html::parse_document(r#"<a rel="next" href="?q=go&page=1">1</a>"#);
        assert!(next_page_url(&doc, &page(), &[]).is_none());
    }
}
