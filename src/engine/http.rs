//! Built-in HTTP crawling engine
//!
//! A plain `reqwest` + `scraper` implementation of [`CrawlEngine`]: GET with
//! content-type checking, manual error classification, and breadth-first
//! deep crawl bounded by depth and scoped to the seed domain. It performs no
//! rendering, so screenshot and PDF payloads are always absent; the
//! persistence layer treats absent payloads as skippable, not as errors.

use crate::engine::parser::parse_page;
use crate::engine::robots::RobotsGate;
use crate::engine::{CrawlEngine, CrawlResult, EngineConfig, EngineError, ImageRef};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// Domains dropped when `exclude_social_links` is set
const SOCIAL_DOMAINS: &[&str] = &[
    "facebook.com",
    "twitter.com",
    "x.com",
    "instagram.com",
    "linkedin.com",
    "pinterest.com",
    "tiktok.com",
    "youtube.com",
    "reddit.com",
];

/// HTTP implementation of the crawling engine contract
pub struct HttpEngine {
    client: Client,
    user_agent: String,
}

impl HttpEngine {
    /// Builds an engine with its own HTTP client
    pub fn new(user_agent: &str) -> Result<Self, EngineError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
        })
    }

    /// Fetches one page and classifies the outcome
    ///
    /// Returns the page result plus the outgoing links found on it (empty
    /// for failures). Transport errors and non-2xx statuses become
    /// unsuccessful results, never engine errors.
    async fn fetch_page(&self, url: &Url) -> (CrawlResult, Vec<String>) {
        let response = match self.client.get(url.as_str()).send().await {
            Ok(r) => r,
            Err(e) => {
                let message = if e.is_timeout() {
                    "Request timeout".to_string()
                } else if e.is_connect() {
                    "Connection refused".to_string()
                } else {
                    e.to_string()
                };
                return (CrawlResult::failure(url.as_str(), None, message), Vec::new());
            }
        };

        let status = response.status();
        if !status.is_success() {
            return (
                CrawlResult::failure(
                    url.as_str(),
                    Some(status.as_u16()),
                    format!("HTTP {}", status.as_u16()),
                ),
                Vec::new(),
            );
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.is_empty() && !content_type.contains("text/html") {
            return (
                CrawlResult::failure(
                    url.as_str(),
                    Some(status.as_u16()),
                    format!("Expected HTML, got {}", content_type),
                ),
                Vec::new(),
            );
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                return (
                    CrawlResult::failure(url.as_str(), Some(status.as_u16()), e.to_string()),
                    Vec::new(),
                );
            }
        };

        let page = parse_page(&body, url);
        let links = page.links.clone();
        let result = CrawlResult {
            url: url.as_str().to_string(),
            success: true,
            status_code: Some(status.as_u16()),
            error_message: None,
            markdown: Some(page.to_markdown(url.as_str())),
            cleaned_html: Some(page.body_html.clone()),
            screenshot: None,
            pdf: None,
            images: page.images.into_iter().map(|src| ImageRef { src }).collect(),
        };

        (result, links)
    }
}

#[async_trait]
impl CrawlEngine for HttpEngine {
    async fn run(&self, config: &EngineConfig) -> Result<Vec<CrawlResult>, EngineError> {
        let seed = Url::parse(&config.seed_url).map_err(|e| EngineError::InvalidSeed {
            url: config.seed_url.clone(),
            message: e.to_string(),
        })?;
        let seed_domain = seed
            .host_str()
            .map(|h| h.to_lowercase())
            .ok_or_else(|| EngineError::InvalidSeed {
                url: config.seed_url.clone(),
                message: "URL has no host".to_string(),
            })?;

        let max_depth = config.max_depth.unwrap_or(0);
        let mut robots = config.check_robots.then(RobotsGate::new);

        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<(Url, u32)> = VecDeque::new();
        queue.push_back((seed, 0));

        let mut results = Vec::new();

        while let Some((url, depth)) = queue.pop_front() {
            if !visited.insert(url.as_str().to_string()) {
                continue;
            }

            if let Some(gate) = robots.as_mut() {
                if !gate.is_allowed(&self.client, &url, &self.user_agent).await {
                    tracing::info!("URL {} disallowed by robots.txt", url);
                    results.push(CrawlResult::failure(
                        url.as_str(),
                        None,
                        "Disallowed by robots.txt".to_string(),
                    ));
                    continue;
                }
            }

            tracing::debug!("Fetching {} (depth {})", url, depth);
            let (result, links) = self.fetch_page(&url).await;

            if result.success && depth < max_depth {
                for link in links {
                    if let Ok(link_url) = Url::parse(&link) {
                        if should_follow(&link_url, &seed_domain, config) {
                            queue.push_back((link_url, depth + 1));
                        }
                    }
                }
            }

            results.push(result);
        }

        Ok(results)
    }
}

/// Decides whether a discovered link is followed
fn should_follow(link: &Url, seed_domain: &str, config: &EngineConfig) -> bool {
    let host = match link.host_str() {
        Some(h) => h.to_lowercase(),
        None => return false,
    };

    if config
        .domain_blocklist
        .iter()
        .any(|blocked| domain_matches(&host, blocked))
    {
        return false;
    }

    if config.exclude_social_links
        && SOCIAL_DOMAINS
            .iter()
            .any(|social| domain_matches(&host, social))
    {
        return false;
    }

    if !config.include_external && !domain_matches(&host, seed_domain) {
        return false;
    }

    true
}

/// True when `host` is `domain` or a subdomain of it
fn domain_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{}", domain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn config_for(seed: &str) -> EngineConfig {
        EngineConfig {
            seed_url: seed.to_string(),
            max_depth: None,
            include_external: false,
            domain_blocklist: HashSet::new(),
            exclude_social_links: true,
            check_robots: false,
            accept_downloads: false,
            render: Default::default(),
        }
    }

    #[test]
    fn test_domain_matches() {
        assert!(domain_matches("example.com", "example.com"));
        assert!(domain_matches("sub.example.com", "example.com"));
        assert!(!domain_matches("example.com.evil.net", "example.com"));
        assert!(!domain_matches("otherexample.com", "example.com"));
    }

    #[test]
    fn test_should_follow_blocklist() {
        let mut config = config_for("https://example.com/");
        config.domain_blocklist.insert("ads.example.com".to_string());

        let blocked = Url::parse("https://ads.example.com/banner").unwrap();
        let allowed = Url::parse("https://example.com/page").unwrap();
        assert!(!should_follow(&blocked, "example.com", &config));
        assert!(should_follow(&allowed, "example.com", &config));
    }

    #[test]
    fn test_should_follow_social_exclusion() {
        let config = config_for("https://example.com/");
        let social = Url::parse("https://www.facebook.com/somepage").unwrap();
        assert!(!should_follow(&social, "example.com", &config));
    }

    #[test]
    fn test_should_follow_external_scoping() {
        let mut config = config_for("https://example.com/");
        let external = Url::parse("https://other.net/page").unwrap();
        assert!(!should_follow(&external, "example.com", &config));

        config.include_external = true;
        assert!(should_follow(&external, "example.com", &config));
    }

    #[tokio::test]
    async fn test_invalid_seed_is_engine_fatal() {
        let engine = HttpEngine::new("TestBot/1.0").unwrap();
        let config = config_for("not a url");
        let result = engine.run(&config).await;
        assert!(matches!(result, Err(EngineError::InvalidSeed { .. })));
    }
}
