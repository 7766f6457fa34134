//! Hostname helpers: base domains, the static exclusion list, and the
//! country/education suffixes that mark an official site.

use url::Url;

/// Aggregators, social networks and search engines never returned as an
/// institution's own site. Matched as substrings of the host.
pub const EXCLUDED_DOMAINS: &[&str] = &[
    "collegedunia.com",
    "shiksha.com",
    "careers360.com",
    "getmyuni.com",
    "collegedekho.com",
    "justdial.com",
    "wikipedia.org",
    "youtube.com",
    "facebook.com",
    "twitter.com",
    "linkedin.com",
    "instagram.com",
    "quora.com",
    "reddit.com",
    "glassdoor.com",
    "naukri.com",
    "indeed.com",
    "studyabroad",
    "embibe.com",
    "byjus.com",
    "vedantu.com",
    "toppr.com",
    "leverage.edu",
    "admitkard.com",
    "collegesearch.in",
    "indiaeducation.net",
    "google.com",
    "bing.com",
    "duckduckgo.com",
];

/// Third-party directories queried by the aggregator fallback.
pub const AGGREGATOR_DOMAINS: &[&str] = &["shiksha.com", "collegedunia.com", "careers360.com"];

/// Second-level suffixes that need three labels to name an organisation.
const COMPOUND_SUFFIXES: &[&str] = &[
    "ac.in", "edu.in", "org.in", "res.in", "gov.in", "co.in", "net.in", "nic.in", "ac.uk",
    "co.uk", "org.uk", "edu.au", "com.au", "net.au", "co.nz", "co.jp", "ac.jp", "co.kr",
    "com.br", "com.mx", "com.cn", "edu.cn",
];

/// Lowercased host of `url`, or `None` when it does not parse.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

/// `scheme://host[:port]` of `url`.
pub fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}

/// Host without a leading `www.`.
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Organisational domain of a host: the last two labels, or the last three
/// when the last two form a compound suffix such as `ac.in`.
pub fn base_domain(host: &str) -> String {
    let host = host.trim_end_matches('.').to_lowercase();
    let parts: Vec<&str> = host.split('.').filter(|p| !p.is_empty()).collect();
    if parts.len() <= 2 {
        return parts.join(".");
    }
    let last_two = format!("{}.{}", parts[parts.len() - 2], parts[parts.len() - 1]);
    if COMPOUND_SUFFIXES.contains(&last_two.as_str()) {
        format!("{}.{}", parts[parts.len() - 3], last_two)
    } else {
        last_two
    }
}

/// True when the host contains an entry of the exclusion list.
pub fn is_excluded_domain(host: &str) -> bool {
    let lower = host.to_lowercase();
    EXCLUDED_DOMAINS.iter().any(|d| lower.contains(d))
}

/// True when `url` is hosted on (a subdomain of) one of the aggregators.
pub fn is_aggregator_url(url: &str) -> bool {
    host_of(url)
        .map(|host| {
            AGGREGATOR_DOMAINS
                .iter()
                .any(|d| host == *d || host.ends_with(&format!(".{d}")))
        })
        .unwrap_or(false)
}

/// True when both hosts belong to the same organisation but differ once
/// `www.` is ignored, e.g. `ocs.iith.ac.in` under `iith.ac.in`.
pub fn is_sibling_host(candidate: &str, origin: &str) -> bool {
    let candidate = strip_www(candidate);
    let origin = strip_www(origin);
    candidate != origin && base_domain(candidate) == base_domain(origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_domain_handles_compound_suffixes() {
        assert_eq!(base_domain("www.iith.ac.in"), "iith.ac.in");
        assert_eq!(base_domain("ocs.iith.ac.in"), "iith.ac.in");
        assert_eq!(base_domain("placements.mit.edu"), "mit.edu");
        assert_eq!(base_domain("example.com"), "example.com");
        assert_eq!(base_domain("localhost"), "localhost");
    }

    #[test]
    fn test_exclusion_matches_subdomains() {
        assert!(is_excluded_domain("www.shiksha.com"));
        assert!(is_excluded_domain("en.m.wikipedia.org"));
        assert!(!is_excluded_domain("iitb.ac.in"));
    }

    #[test]
    fn test_origin_of_keeps_port() {
        assert_eq!(
            origin_of("https://www.iitb.ac.in/en/about?x=1").as_deref(),
            Some("https://www.iitb.ac.in")
        );
        assert_eq!(
            origin_of("http://127.0.0.1:8080/a").as_deref(),
            Some("http://127.0.0.1:8080")
        );
        assert_eq!(origin_of("not a url"), None);
    }

    #[test]
    fn test_aggregator_url() {
        assert!(is_aggregator_url("https://www.shiksha.com/college/iit-placements"));
        assert!(!is_aggregator_url("https://notshiksha.com/college"));
        assert!(!is_aggregator_url("https://iitb.ac.in/placements"));
    }

    #[test]
    fn test_sibling_host() {
        assert!(is_sibling_host("ocs.iith.ac.in", "www.iith.ac.in"));
        assert!(!is_sibling_host("www.iith.ac.in", "iith.ac.in"));
        assert!(!is_sibling_host("iitb.ac.in", "iith.ac.in"));
    }
}
