//! HTTP search providers against a mock server.

use campus_scout::acquisition::HttpClient;
use campus_scout::search::{
    DuckDuckGoLite, HitFilter, SearchChain, SearchProvider, SearxngSearch, StartpageSearch,
};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> HttpClient {
    HttpClient::new("campus-scout-test", 5_000)
}

const SEARXNG_BODY: &str = r#"{"results": [
  {"url": "https://www.iith.ac.in/", "title": "IIT Hyderabad"},
  {"url": "https://www.shiksha.com/university/iit-hyderabad", "title": "Shiksha"}
]}"#;

const STARTPAGE_BODY: &str = r#"<html><body>
<div class="w-gl__result">
  <a class="w-gl__result-url" href="https://www.nitw.ac.in/">nitw.ac.in</a>
  <h3>NIT Warangal</h3>
</div>
<div class="w-gl__result">
  <a class="w-gl__result-url" href="/relative">broken</a>
  <h3>Relative link</h3>
</div>
</body></html>"#;

const DDG_BODY: &str = r#"<html><body><table>
<tr><td><a class="result-link" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.iith.ac.in%2F&amp;rut=x">IIT Hyderabad</a></td></tr>
<tr><td><a class="result-link" href="https://duckduckgo.com/y.js?ad=1">Ad</a></td></tr>
</table></body></html>"#;

#[tokio::test]
async fn test_searxng_falls_through_failing_instance() {
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&broken)
        .await;

    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "json"))
        .and(query_param("q", "IIT Hyderabad official website"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SEARXNG_BODY, "application/json"))
        .mount(&healthy)
        .await;

    let provider = SearxngSearch::new(client(), vec![broken.uri(), healthy.uri()]);
    let hits = provider
        .search("IIT Hyderabad official website", 10, HitFilter::All)
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].url, "https://www.iith.ac.in/");
    assert_eq!(hits[0].provider, "searxng");
}

#[tokio::test]
async fn test_searxng_errors_when_every_instance_fails() {
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&broken)
        .await;

    let provider = SearxngSearch::new(client(), vec![broken.uri()]);
    assert!(provider.search("anything", 5, HitFilter::All).await.is_err());
}

#[tokio::test]
async fn test_startpage_posts_query_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sp/search"))
        .and(body_string_contains("query=NIT+Warangal"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(STARTPAGE_BODY, "text/html"))
        .mount(&server)
        .await;

    let provider = StartpageSearch::new(client(), format!("{}/sp/search", server.uri()));
    let hits = provider.search("NIT Warangal", 5, HitFilter::All).await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].url, "https://www.nitw.ac.in/");
    assert_eq!(hits[0].title, "NIT Warangal");
}

#[tokio::test]
async fn test_duckduckgo_unwraps_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/lite/"))
        .and(body_string_contains("q=IIT+Hyderabad"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(DDG_BODY, "text/html"))
        .mount(&server)
        .await;

    let provider = DuckDuckGoLite::new(client(), format!("{}/lite/", server.uri()));
    let hits = provider.search("IIT Hyderabad", 5, HitFilter::All).await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].url, "https://www.iith.ac.in/");
    assert_eq!(hits[0].provider, "duckduckgo_lite");
}

#[tokio::test]
async fn test_chain_moves_past_failed_provider() {
    let searx = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&searx)
        .await;
    let ddg = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(DDG_BODY, "text/html"))
        .mount(&ddg)
        .await;

    let providers: Vec<Arc<dyn SearchProvider>> = vec![
        Arc::new(SearxngSearch::new(client(), vec![searx.uri()])),
        Arc::new(DuckDuckGoLite::new(client(), format!("{}/lite/", ddg.uri()))),
    ];
    let chain = SearchChain::new(providers, 5_000);

    let hits = chain.search("IIT Hyderabad official website", 5).await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].provider, "duckduckgo_lite");
}

#[tokio::test]
async fn test_chain_filters_excluded_domains() {
    let searx = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SEARXNG_BODY, "application/json"))
        .mount(&searx)
        .await;

    let providers: Vec<Arc<dyn SearchProvider>> =
        vec![Arc::new(SearxngSearch::new(client(), vec![searx.uri()]))];
    let chain = SearchChain::new(providers, 5_000);

    let filtered = chain.search("IIT Hyderabad", 5).await;
    assert_eq!(filtered.len(), 1);
    assert!(filtered.iter().all(|h| !h.url.contains("shiksha.com")));

    let raw = chain.search_unfiltered("IIT Hyderabad", 5).await;
    assert_eq!(raw.len(), 2);
}

#[tokio::test]
async fn test_chain_finds_official_hit_behind_excluded_hits() {
    let mut results: Vec<String> = (0..12)
        .map(|i| {
            format!(
                r#"{{"url": "https://www.shiksha.com/college/acme-{i}", "title": "Acme on Shiksha {i}"}}"#
            )
        })
        .collect();
    results.push(r#"{"url": "https://www.acme.ac.in/", "title": "Acme Institute"}"#.to_string());
    let body = format!(r#"{{"results": [{}]}}"#, results.join(","));

    let searx = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&searx)
        .await;

    let providers: Vec<Arc<dyn SearchProvider>> =
        vec![Arc::new(SearxngSearch::new(client(), vec![searx.uri()]))];
    let chain = SearchChain::new(providers, 5_000);

    let hits = chain.search("Acme Institute official website", 10).await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].url, "https://www.acme.ac.in/");

    let raw = chain.search_unfiltered("Acme Institute", 10).await;
    assert_eq!(raw.len(), 10);
    assert!(raw.iter().all(|h| h.url.contains("shiksha.com")));
}

#[tokio::test]
async fn test_searxng_rejects_html_response() {
    let blocked = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>Too many requests</html>", "text/html"),
        )
        .mount(&blocked)
        .await;

    let provider = SearxngSearch::new(client(), vec![blocked.uri()]);
    assert!(provider
        .search("anything", 5, HitFilter::All)
        .await
        .is_err());
}
