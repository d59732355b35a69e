//! Page content extraction for the built-in HTTP engine
//!
//! Extracts the title, text blocks, outgoing links, and referenced images
//! from fetched HTML, and renders a light Markdown view of the page.
//! Extraction quality is deliberately modest; the persistence core makes no
//! assumptions about it.

use scraper::{Html, Selector};
use url::Url;

/// Content extracted from one fetched page
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// The page title (from the <title> tag)
    pub title: Option<String>,

    /// Text content of top-level text blocks, in document order
    pub text_blocks: Vec<String>,

    /// Absolute outgoing links
    pub links: Vec<String>,

    /// Absolute image sources, in document order
    pub images: Vec<String>,

    /// The page body markup
    pub body_html: String,
}

impl ExtractedPage {
    /// Renders the extracted content as Markdown
    pub fn to_markdown(&self, url: &str) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(&format!("# {}\n\n", title));
        }
        out.push_str(&format!("Source: {}\n\n", url));
        for block in &self.text_blocks {
            out.push_str(block);
            out.push_str("\n\n");
        }
        if !self.links.is_empty() {
            out.push_str("## Links\n\n");
            for link in &self.links {
                out.push_str(&format!("- <{}>\n", link));
            }
        }
        out
    }
}

/// Parses HTML content and extracts title, text, links, and images
pub fn parse_page(html: &str, base_url: &Url) -> ExtractedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let text_blocks = extract_text_blocks(&document);
    let links = extract_links(&document, base_url);
    let images = extract_images(&document, base_url);
    let body_html = extract_body_html(&document, html);

    ExtractedPage {
        title,
        text_blocks,
        links,
        images,
        body_html,
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn extract_text_blocks(document: &Html) -> Vec<String> {
    let mut blocks = Vec::new();
    if let Ok(selector) = Selector::parse("h1, h2, h3, p, li") {
        for element in document.select(&selector) {
            let text = element.text().collect::<String>();
            let trimmed = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !trimmed.is_empty() {
                blocks.push(trimmed);
            }
        }
    }
    blocks
}

fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();
    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_link(href, base_url) {
                    links.push(absolute);
                }
            }
        }
    }
    links
}

fn extract_images(document: &Html, base_url: &Url) -> Vec<String> {
    let mut images = Vec::new();
    if let Ok(selector) = Selector::parse("img[src]") {
        for element in document.select(&selector) {
            if let Some(src) = element.value().attr("src") {
                if let Some(absolute) = resolve_link(src, base_url) {
                    images.push(absolute);
                }
            }
        }
    }
    images
}

fn extract_body_html(document: &Html, fallback: &str) -> String {
    Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .map(|body| body.html())
        .unwrap_or_else(|| fallback.to_string())
}

/// Resolves an href to an absolute HTTP(S) URL
///
/// Returns None for empty hrefs, fragment-only anchors, special schemes
/// (`javascript:`, `mailto:`, `tel:`, `data:`), and anything that does not
/// resolve to HTTP(S).
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}
