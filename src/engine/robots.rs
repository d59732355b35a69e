//! Per-origin robots.txt gating for the built-in HTTP engine
//!
//! robots.txt is fetched at most once per origin and cached for the run.
//! Fetch or parse trouble degrades to allow-all: the gate exists to be
//! polite, not to block the session on a flaky robots endpoint.

use reqwest::Client;
use robotstxt::DefaultMatcher;
use std::collections::HashMap;
use url::Url;

/// Cached robots.txt decisions, keyed by origin
pub struct RobotsGate {
    /// origin -> robots.txt content; None means unreachable (allow all)
    cache: HashMap<String, Option<String>>,
}

impl RobotsGate {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Checks whether a URL may be fetched by the given user agent
    pub async fn is_allowed(&mut self, client: &Client, url: &Url, user_agent: &str) -> bool {
        if url.host_str().is_none() {
            return true;
        }
        let origin = url.origin().ascii_serialization();

        if !self.cache.contains_key(&origin) {
            let content = fetch_robots(client, url).await;
            self.cache.insert(origin.clone(), content);
        }

        match self.cache.get(&origin).and_then(|c| c.as_deref()) {
            Some(content) if !content.is_empty() => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(content, user_agent, url.as_str())
            }
            _ => true,
        }
    }
}

impl Default for RobotsGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetches robots.txt for the URL's origin; any failure yields None
async fn fetch_robots(client: &Client, url: &Url) -> Option<String> {
    // Derive from the page URL so non-default ports are kept
    let mut robots_url = url.clone();
    robots_url.set_path("/robots.txt");
    robots_url.set_query(None);
    robots_url.set_fragment(None);

    match client.get(robots_url.clone()).send().await {
        Ok(response) if response.status().is_success() => response.text().await.ok(),
        Ok(response) => {
            tracing::debug!("robots.txt at {} returned {}", robots_url, response.status());
            None
        }
        Err(e) => {
            tracing::debug!("Failed to fetch {}: {}", robots_url, e);
            None
        }
    }
}
