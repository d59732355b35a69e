//! Integration tests for full crawl sessions
//!
//! These use wiremock to stand up a mock site and run real sessions with
//! the built-in HTTP engine, checking the resulting artifact tree, image
//! dedup on re-runs, and error-log behavior.

use kumo_harvest::artifacts::FileErrorLog;
use kumo_harvest::config::{CrawlTarget, Settings};
use kumo_harvest::engine::HttpEngine;
use kumo_harvest::session::SessionRunner;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_in(tmp: &TempDir) -> Settings {
    Settings {
        results_root: tmp.path().join("results"),
        excluded_domains_path: tmp.path().join("excluded_domains.txt"),
        ..Settings::default()
    }
}

fn target_for(seed: &str, deep: bool) -> CrawlTarget {
    CrawlTarget {
        seed_url: seed.to_string(),
        depth: 3,
        deep,
        accept_downloads: false,
        save_pdf: false,
        save_screenshot: false,
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>T</title></head><body>{}</body></html>", body),
        "text/html",
    )
}

async fn mount_robots_allow_all(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"))
        .mount(server)
        .await;
}

/// The mock server binds 127.0.0.1, so every session root lands here
fn session_root(settings: &Settings) -> PathBuf {
    settings.results_root.join("127_0_0_1")
}

async fn run_session(settings: &Settings, target: CrawlTarget) -> kumo_harvest::session::SessionSummary {
    let engine = HttpEngine::new(&settings.user_agent).expect("engine should build");
    let mut error_log = FileErrorLog::new(settings.results_root.join("error.txt"));
    let runner = SessionRunner::new(engine, settings.clone(), target);
    runner.run(&mut error_log).await.expect("session should complete")
}

#[tokio::test]
async fn test_single_page_session_persists_artifacts() {
    let server = MockServer::start().await;
    mount_robots_allow_all(&server).await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<p>Hello</p><img src="/logo.png">"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89u8, 0x50]))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let settings = settings_in(&tmp);
    let seed = format!("{}/", server.uri());

    let summary = run_session(&settings, target_for(&seed, false)).await;

    assert_eq!(summary.pages_total, 1);
    assert_eq!(summary.pages_succeeded, 1);
    assert_eq!(summary.artifacts_written, 2); // markdown + html
    assert_eq!(summary.images_downloaded, 1);
    assert_eq!(summary.total_errors(), 0);

    let root = session_root(&settings);
    let md_entries: Vec<_> = std::fs::read_dir(root.join("md")).unwrap().collect();
    assert_eq!(md_entries.len(), 1);
    let html_entries: Vec<_> = std::fs::read_dir(root.join("html")).unwrap().collect();
    assert_eq!(html_entries.len(), 1);
    let image_entries: Vec<_> = std::fs::read_dir(root.join("images")).unwrap().collect();
    assert_eq!(image_entries.len(), 1);
    // Layout subdirs exist even when unused
    assert!(root.join("downloads").is_dir());
}

#[tokio::test]
async fn test_deep_crawl_persists_every_page() {
    let server = MockServer::start().await;
    mount_robots_allow_all(&server).await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="/page1">1</a><a href="/page2">2</a>"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html_page("<p>One</p>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html_page("<p>Two</p>"))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let settings = settings_in(&tmp);
    let seed = format!("{}/", server.uri());

    let summary = run_session(&settings, target_for(&seed, true)).await;

    assert_eq!(summary.pages_total, 3);
    assert_eq!(summary.pages_succeeded, 3);
    let md_entries: Vec<_> = std::fs::read_dir(session_root(&settings).join("md"))
        .unwrap()
        .collect();
    assert_eq!(md_entries.len(), 3);
}

#[tokio::test]
async fn test_rerun_skips_already_downloaded_images() {
    let server = MockServer::start().await;
    mount_robots_allow_all(&server).await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<img src="/photo.jpg">"#))
        .mount(&server)
        .await;
    // The image endpoint must be hit exactly once across both sessions
    Mock::given(method("GET"))
        .and(path("/photo.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let settings = settings_in(&tmp);
    let seed = format!("{}/", server.uri());

    let first = run_session(&settings, target_for(&seed, false)).await;
    assert_eq!(first.images_downloaded, 1);
    assert_eq!(first.images_skipped, 0);

    let second = run_session(&settings, target_for(&seed, false)).await;
    assert_eq!(second.images_downloaded, 0);
    assert_eq!(second.images_skipped, 1);
    assert_eq!(second.total_errors(), 0);
}

#[tokio::test]
async fn test_failed_page_does_not_end_session() {
    let server = MockServer::start().await;
    mount_robots_allow_all(&server).await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="/forbidden">f</a><a href="/ok">o</a>"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forbidden"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(html_page("<p>fine</p>"))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let settings = settings_in(&tmp);
    let seed = format!("{}/", server.uri());

    let summary = run_session(&settings, target_for(&seed, true)).await;

    assert_eq!(summary.pages_total, 3);
    assert_eq!(summary.pages_succeeded, 2);
    assert_eq!(summary.pages_failed, 1);
    // Page-level crawl failures are console-reported, not error-logged
    assert!(!settings.results_root.join("error.txt").exists());
}

#[tokio::test]
async fn test_image_failure_lands_in_error_log() {
    let server = MockServer::start().await;
    mount_robots_allow_all(&server).await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<img src="/gone.png">"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let settings = settings_in(&tmp);
    let seed = format!("{}/", server.uri());

    let summary = run_session(&settings, target_for(&seed, false)).await;

    assert_eq!(summary.images_failed, 1);
    let log = std::fs::read_to_string(settings.results_root.join("error.txt")).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("gone.png"));
    assert!(log.contains("HTTP 404"));
}

#[tokio::test]
async fn test_exclusion_list_bootstrapped_on_first_run() {
    let server = MockServer::start().await;
    mount_robots_allow_all(&server).await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page("<p>home</p>"))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let settings = settings_in(&tmp);
    assert!(!settings.excluded_domains_path.exists());

    let seed = format!("{}/", server.uri());
    let summary = run_session(&settings, target_for(&seed, false)).await;

    assert_eq!(summary.pages_succeeded, 1);
    assert!(settings.excluded_domains_path.exists());
    assert_eq!(
        std::fs::read_to_string(&settings.excluded_domains_path).unwrap(),
        ""
    );
}

#[tokio::test]
async fn test_robots_disallow_reported_as_page_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /"))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let settings = settings_in(&tmp);
    let seed = format!("{}/", server.uri());

    let summary = run_session(&settings, target_for(&seed, false)).await;

    assert_eq!(summary.pages_total, 1);
    assert_eq!(summary.pages_failed, 1);
    assert!(std::fs::read_dir(session_root(&settings).join("md"))
        .map(|mut d| d.next().is_none())
        .unwrap_or(true));
}

#[tokio::test]
async fn test_seed_reuses_same_session_root() {
    let server = MockServer::start().await;
    mount_robots_allow_all(&server).await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page("<p>home</p>"))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let settings = settings_in(&tmp);
    let seed = format!("{}/", server.uri());

    run_session(&settings, target_for(&seed, false)).await;
    run_session(&settings, target_for(&seed, false)).await;

    // Exactly one session directory under the results root (error.txt aside)
    let dirs: Vec<_> = std::fs::read_dir(&settings.results_root)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .collect();
    assert_eq!(dirs.len(), 1);
    assert_eq!(dirs[0].path(), session_root(&settings));
}
