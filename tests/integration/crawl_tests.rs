//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full playlist → cases → JSON cycle end-to-end.

use radcase::config::Config;
use radcase::crawler::{crawl, Crawler};
use radcase::output::{load_json, JsonSink, OutputSink};
use radcase::record::{CaseRecord, PlaylistResult};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn create_test_config(origin: &str, delay_ms: u64) -> Config {
    let mut config = Config::default();
    config.scraper.origin = origin.to_string();
    config.scraper.delay_ms = delay_ms;
    config.scraper.timeout_secs = 5;
    config.scraper.connect_timeout_secs = 2;
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn case_page(title: &str, diagnosis: Option<&str>) -> String {
    let diagnosis = diagnosis
        .map(|d| format!(r#"<div data-section="diagnosis"><h2>Diagnosis</h2><p>{}</p></div>"#, d))
        .unwrap_or_default();

    format!(
        r#"<html><head><title>{title} | Radiopaedia</title></head><body>
        <h1>{title}</h1>
        <div data-section="patient-data"><dl><dt>Age</dt><dd>7 years</dd></dl></div>
        <div data-section="findings"><h2>Findings</h2><p>Findings for {title}.</p></div>
        {diagnosis}
        <img src="/images/{title}.png">
        </body></html>"#
    )
}

async fn mount_playlist(server: &MockServer, links: &str) {
    Mock::given(method("GET"))
        .and(path("/playlists/85715"))
        .respond_with(html(&format!(
            r#"<html><head><title>Playlist</title></head><body>
            <h1>Paediatric imaging</h1>
            <div class="description">Teaching cases</div>
            {}
            </body></html>"#,
            links
        )))
        .mount(server)
        .await;
}

async fn mount_case(server: &MockServer, id: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/cases/{}", id)))
        .respond_with(html(&body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_in_playlist_order() {
    let server = MockServer::start().await;

    mount_playlist(
        &server,
        r#"
        <a href="/cases/1-alpha">Alpha</a>
        <a href="/cases/2-beta?lang=us">Beta</a>
        <a href="/cases/1-alpha#images">Alpha again</a>
        <a href="/cases/3-gamma">Gamma</a>
        <a href="/articles/not-a-case">Article</a>
        "#,
    )
    .await;
    mount_case(&server, "1-alpha", case_page("alpha", Some("Alpha disease"))).await;
    mount_case(&server, "2-beta", case_page("beta", Some("Beta disease"))).await;
    mount_case(&server, "3-gamma", case_page("gamma", None)).await;

    let config = create_test_config(&server.uri(), 0);
    let records = crawl(&config, "85715").await.expect("Crawl failed");

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["alpha", "beta", "gamma"]);

    let alpha = &records[0];
    assert_eq!(alpha.url, format!("{}/cases/1-alpha", server.uri()));
    assert_eq!(alpha.patient_data["Age"], "7 years");
    assert_eq!(alpha.findings, "Findings for alpha.");
    assert_eq!(alpha.diagnosis, "Alpha disease");
    assert_eq!(alpha.images, vec![format!("{}/images/alpha.png", server.uri())]);

    assert_eq!(records[1].url, format!("{}/cases/2-beta?lang=us", server.uri()));
    assert_eq!(records[2].diagnosis, "");
}

#[tokio::test]
async fn test_failed_case_is_skipped() {
    let server = MockServer::start().await;

    mount_playlist(
        &server,
        r#"
        <a href="/cases/1">One</a>
        <a href="/cases/2">Two</a>
        <a href="/cases/3">Three</a>
        "#,
    )
    .await;
    mount_case(&server, "1", case_page("one", Some("First"))).await;
    Mock::given(method("GET"))
        .and(path("/cases/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_case(&server, "3", case_page("three", Some("Third"))).await;

    let config = create_test_config(&server.uri(), 0);
    let mut crawler = Crawler::new(&config).unwrap();
    let playlist_url = crawler.playlist_url("85715").unwrap();
    let report = crawler.crawl_with_report(&playlist_url).await.unwrap();

    assert_eq!(report.discovered, 3);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].title, "one");
    assert_eq!(report.records[1].title, "three");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].url, format!("{}/cases/2", server.uri()));
    assert!(report.failures[0].reason.contains("500"));
}

#[tokio::test]
async fn test_playlist_without_cases() {
    let server = MockServer::start().await;
    mount_playlist(&server, r#"<a href="/about">About</a>"#).await;

    let config = create_test_config(&server.uri(), 0);
    let records = crawl(&config, "85715").await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_playlist_fetch_failure_gives_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/playlists/85715"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), 0);
    let records = crawl(&config, "85715").await.unwrap();
    assert!(records.is_empty());

    let mut crawler = Crawler::new(&config).unwrap();
    let playlist_url = crawler.playlist_url("85715").unwrap();
    assert!(crawler.scrape_playlist(&playlist_url).await.is_err());
}

#[tokio::test]
async fn test_requests_carry_browser_user_agent() {
    let server = MockServer::start().await;
    let config = create_test_config(&server.uri(), 0);

    Mock::given(method("GET"))
        .and(path("/playlists/85715"))
        .and(header("user-agent", config.user_agent.value.as_str()))
        .respond_with(html("<h1>Playlist</h1>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut crawler = Crawler::new(&config).unwrap();
    let playlist_url = crawler.playlist_url("85715").unwrap();
    let playlist = crawler.scrape_playlist(&playlist_url).await.unwrap();
    assert_eq!(playlist.title, "Playlist");
}

#[tokio::test]
async fn test_delay_between_case_requests() {
    let server = MockServer::start().await;

    mount_playlist(
        &server,
        r#"<a href="/cases/1">One</a><a href="/cases/2">Two</a>"#,
    )
    .await;
    mount_case(&server, "1", case_page("one", None)).await;
    mount_case(&server, "2", case_page("two", None)).await;

    let delay = Duration::from_millis(150);
    let config = create_test_config(&server.uri(), delay.as_millis() as u64);
    let mut crawler = Crawler::new(&config).unwrap();
    let playlist_url = crawler.playlist_url("85715").unwrap();

    let start = Instant::now();
    let report = crawler.crawl_with_report(&playlist_url).await.unwrap();

    // a pause follows the playlist and the first case
    assert_eq!(report.records.len(), 2);
    assert!(start.elapsed() >= delay * 2);
}

#[tokio::test]
async fn test_delay_follows_slow_responses() {
    let server = MockServer::start().await;
    let latency = Duration::from_millis(200);

    Mock::given(method("GET"))
        .and(path("/playlists/85715"))
        .respond_with(
            html(r#"<a href="/cases/1">One</a><a href="/cases/2">Two</a><a href="/cases/3">Three</a>"#)
                .set_delay(latency),
        )
        .mount(&server)
        .await;
    for id in ["1", "2", "3"] {
        Mock::given(method("GET"))
            .and(path(format!("/cases/{}", id)))
            .respond_with(html(&case_page(id, None)).set_delay(latency))
            .mount(&server)
            .await;
    }

    // shorter than the server latency
    let delay = Duration::from_millis(150);
    let config = create_test_config(&server.uri(), delay.as_millis() as u64);
    let mut crawler = Crawler::new(&config).unwrap();
    let playlist_url = crawler.playlist_url("85715").unwrap();

    let start = Instant::now();
    let report = crawler.crawl_with_report(&playlist_url).await.unwrap();

    // four responses plus a pause after each of the first three
    assert_eq!(report.records.len(), 3);
    assert!(start.elapsed() >= latency * 4 + delay * 3);
}

#[tokio::test]
async fn test_scrape_and_save_round_trip() {
    let server = MockServer::start().await;

    mount_playlist(
        &server,
        r#"<a href="/cases/1-alpha">Alpha</a><a href="/cases/2-beta"></a>"#,
    )
    .await;
    mount_case(&server, "1-alpha", case_page("alpha", Some("Ça va"))).await;
    mount_case(&server, "2-beta", case_page("beta", None)).await;

    let dir = TempDir::new().unwrap();
    let sink = JsonSink::new(
        dir.path().join("data/playlist_data.json"),
        dir.path().join("data/cases.json"),
    );

    let config = create_test_config(&server.uri(), 0);
    let mut crawler = Crawler::new(&config).unwrap();
    let playlist_url = crawler.playlist_url("85715").unwrap();

    let playlist = crawler.scrape_playlist(&playlist_url).await.unwrap();
    sink.save_playlist(&playlist).unwrap();
    let report = crawler.crawl_cases(&playlist).await;
    sink.save_cases(&report.records).unwrap();

    let saved_playlist: PlaylistResult = load_json(sink.playlist_path()).unwrap();
    assert_eq!(saved_playlist.id, "85715");
    assert_eq!(saved_playlist.title, "Paediatric imaging");
    assert_eq!(saved_playlist.description, "Teaching cases");
    assert_eq!(saved_playlist.cases.len(), 2);
    assert_eq!(saved_playlist.cases[1].title, "Case 2-beta");

    let saved_cases: Vec<CaseRecord> = load_json(sink.cases_path()).unwrap();
    assert_eq!(saved_cases, report.records);
    assert_eq!(saved_cases[0].diagnosis, "Ça va");

    let raw = std::fs::read_to_string(sink.cases_path()).unwrap();
    assert!(raw.contains("Ça va"));
    assert!(raw.contains("\"diagnosis\": \"\""));
}
