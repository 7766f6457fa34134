//! Portal discovery: embedded frames, sibling subdomains and topic-keyword
//! links that may host better content than the page itself.

use crate::domain::{host_of, is_sibling_host};
use crate::topic::Topic;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Maximum portals returned per page.
pub const MAX_PORTALS: usize = 5;

/// Why a URL was considered a portal. Ordered by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PortalSource {
    Frame,
    Subdomain,
    Keyword,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortalCandidate {
    pub url: String,
    pub source: PortalSource,
    /// Anchor text, empty for frames.
    pub text: String,
}

impl PortalCandidate {
    /// True when the URL itself carries one of the topic's keywords.
    pub fn url_matches(&self, topic: Topic) -> bool {
        topic.matches_keywords(&self.url.to_lowercase())
    }
}

const FRAME_SKIP: &[&str] = &["data:", "javascript:", "about:"];
const ANCHOR_SKIP: &[&str] = &["#", "javascript:", "mailto:", "tel:"];

fn resolve(base: &Url, raw: &str, skip: &[&str]) -> Option<String> {
    let raw = raw.trim();
    let lower = raw.to_lowercase();
    if raw.is_empty() || skip.iter().any(|p| lower.starts_with(p)) {
        return None;
    }
    let resolved = base.join(raw).ok()?;
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

/// Find up to five portal candidates for `topic` on a page.
///
/// Frames are always kept; links are kept when they point at a sibling
/// subdomain or mention a topic keyword in their URL or text. Results are
/// deduplicated by URL and ordered frames, subdomains, keyword links.
pub fn discover_portals(html: &str, page_url: &str, topic: Topic) -> Vec<PortalCandidate> {
    let Ok(base) = Url::parse(page_url) else {
        return Vec::new();
    };
    let origin_host = base.host_str().unwrap_or_default().to_lowercase();
    let doc = Html::parse_document(html);

    let mut found: Vec<PortalCandidate> = Vec::new();

    if let Ok(frame_sel) = Selector::parse("iframe[src], frame[src]") {
        for frame in doc.select(&frame_sel) {
            if let Some(url) = frame
                .value()
                .attr("src")
                .and_then(|src| resolve(&base, src, FRAME_SKIP))
            {
                found.push(PortalCandidate {
                    url,
                    source: PortalSource::Frame,
                    text: String::new(),
                });
            }
        }
    }

    if let Ok(anchor_sel) = Selector::parse("a[href]") {
        for a in doc.select(&anchor_sel) {
            let Some(url) = a
                .value()
                .attr("href")
                .and_then(|href| resolve(&base, href, ANCHOR_SKIP))
            else {
                continue;
            };
            let text = a.text().collect::<String>().trim().to_string();

            let sibling = host_of(&url)
                .map(|h| is_sibling_host(&h, &origin_host))
                .unwrap_or(false);
            let source = if sibling {
                PortalSource::Subdomain
            } else if topic.matches_keywords(&url.to_lowercase())
                || topic.matches_keywords(&text.to_lowercase())
            {
                PortalSource::Keyword
            } else {
                continue;
            };
            found.push(PortalCandidate { url, source, text });
        }
    }

    let mut seen = HashSet::new();
    found.retain(|p| seen.insert(p.url.clone()));
    found.sort_by_key(|p| p.source);
    found.truncate(MAX_PORTALS);
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = r##"
        <html><body>
          <a href="#top">Top</a>
          <a href="mailto:info@iith.ac.in">Mail</a>
          <a href="javascript:void(0)">Menu</a>
          <a href="/news">News</a>
          <a href="/students/fee-structure">Fees</a>
          <a href="https://ocs.iith.ac.in/">Office of Career Services</a>
          <a href="/misc">Training &amp; Placement</a>
          <a href="https://ocs.iith.ac.in/">duplicate</a>
          <iframe src="https://stats.iith.ac.in/embed"></iframe>
          <iframe src="data:text/html,hi"></iframe>
          <a href="https://www.youtube.com/placements-video">Video</a>
        </body></html>"##;

    #[test]
    fn test_discovers_and_orders_portals() {
        let portals = discover_portals(HOME, "https://www.iith.ac.in/", Topic::Placements);
        let got: Vec<(&str, PortalSource)> =
            portals.iter().map(|p| (p.url.as_str(), p.source)).collect();
        assert_eq!(
            got,
            vec![
                ("https://stats.iith.ac.in/embed", PortalSource::Frame),
                ("https://ocs.iith.ac.in/", PortalSource::Subdomain),
                ("https://www.iith.ac.in/misc", PortalSource::Keyword),
                ("https://www.youtube.com/placements-video", PortalSource::Keyword),
            ]
        );
        assert_eq!(portals[2].text, "Training & Placement");
    }

    #[test]
    fn test_keyword_links_follow_topic() {
        let portals = discover_portals(HOME, "https://www.iith.ac.in/", Topic::Fees);
        assert!(portals
            .iter()
            .any(|p| p.url == "https://www.iith.ac.in/students/fee-structure"));
        assert!(!portals.iter().any(|p| p.url.ends_with("/misc")));
    }

    #[test]
    fn test_capped_at_five() {
        let links: String = (0..10)
            .map(|i| format!(r#"<a href="/placement-{i}">p</a>"#))
            .collect();
        let portals = discover_portals(&links, "https://acme.edu/", Topic::Placements);
        assert_eq!(portals.len(), MAX_PORTALS);
    }

    #[test]
    fn test_url_matches_ignores_anchor_text() {
        let p = PortalCandidate {
            url: "https://www.iith.ac.in/misc".into(),
            source: PortalSource::Keyword,
            text: "Training & Placement".into(),
        };
        assert!(!p.url_matches(Topic::Placements));
    }

    #[test]
    fn test_bad_page_url_yields_nothing() {
        assert!(discover_portals(HOME, "not a url", Topic::Placements).is_empty());
    }
}
