//! Website crawler module
//!
//! This module provides functionality for crawling a website breadth-first,
//! scoped to the seed URL's domain, extracting the visible text of each HTML
//! page and persisting it under `text/{domain}/`.

mod config;
mod error;
mod links;
mod storage;

pub use config::{CrawlerConfig, CrawlerConfigBuilder};
pub use error::CrawlError;
pub use links::sanitize_link;
pub use storage::{file_name_for_url, PageStore};

use std::collections::{HashSet, VecDeque};

use ego_tree::NodeRef;
use reqwest::{header, StatusCode};
use scraper::{node::Node, Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::corpus::DataLayout;

/// Marker text left behind by pages that render entirely client side.
/// Such pages are persisted anyway; their text is just the marker shell.
pub const JS_REQUIRED_MARKER: &str = "You need to enable JavaScript to run this app.";

/// A crawled page: its absolute URL and tag-stripped visible text
#[derive(Debug, Clone)]
pub struct PageDocument {
    /// URL of the page
    pub url: String,

    /// Visible text with scripts and styles removed
    pub text: String,
}

/// Breadth-first crawler scoped to a single domain.
pub struct Crawler {
    http: reqwest::Client,
    config: CrawlerConfig,
}

impl Crawler {
    /// Create a crawler with the given configuration
    pub fn new(config: CrawlerConfig) -> Result<Self, CrawlError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { http, config })
    }

    /// Crawl the site rooted at `seed`, persisting each page's text and
    /// returning the pages in visit order.
    ///
    /// The frontier is a FIFO queue seeded with the start URL; every
    /// normalized in-domain link is enqueued exactly once. Non-HTML and
    /// non-200 responses are skipped without producing a text file, and a
    /// transport failure skips the page rather than ending the crawl.
    pub async fn crawl(
        &self,
        seed: &Url,
        layout: &DataLayout,
    ) -> Result<Vec<PageDocument>, CrawlError> {
        let domain = seed
            .host_str()
            .ok_or_else(|| CrawlError::InvalidSeed(seed.to_string()))?
            .to_string();
        let store = PageStore::create(layout.text_dir(&domain))?;

        let mut queue = VecDeque::new();
        let mut seen = HashSet::new();
        queue.push_back(seed.as_str().to_string());
        seen.insert(seed.as_str().to_string());

        let mut pages = Vec::new();
        while let Some(url) = queue.pop_front() {
            if let Some(max) = self.config.max_pages {
                if pages.len() >= max {
                    info!("Reached page cap of {max}, stopping crawl");
                    break;
                }
            }

            info!("Crawling {url}");
            let html = match self.fetch_html(&url).await {
                Ok(Some(html)) => html,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Failed to fetch {url}: {e}");
                    continue;
                }
            };

            let text = extract_text(&html);
            if text.contains(JS_REQUIRED_MARKER) {
                warn!("{url} needs JavaScript to render, stored text may be incomplete");
            }
            store.store_page(&url, &text)?;

            let base = Url::parse(&url)?;
            for link in extract_links(&html, &base, &domain) {
                if seen.insert(link.clone()) {
                    queue.push_back(link);
                }
            }

            pages.push(PageDocument { url, text });
        }

        info!("Crawled {} pages from {domain}", pages.len());
        Ok(pages)
    }

    /// Fetch one URL, returning its body only for 200 responses that
    /// declare an HTML content type.
    async fn fetch_html(&self, url: &str) -> Result<Option<String>, CrawlError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!("Skipping {url}: status {status}");
            return Ok(None);
        }

        let is_html = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("text/html"))
            .unwrap_or(false);
        if !is_html {
            debug!("Skipping {url}: not an HTML page");
            return Ok(None);
        }

        Ok(Some(response.text().await?))
    }
}

/// Extract the visible text of an HTML document, skipping script, style
/// and noscript subtrees.
fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();
    collect_text(&document.tree.root(), &mut out);
    out
}

fn collect_text(node: &NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            if matches!(element.name(), "script" | "style" | "noscript") {
                return;
            }
            for child in node.children() {
                collect_text(&child, out);
            }
        }
        _ => {
            for child in node.children() {
                collect_text(&child, out);
            }
        }
    }
}

/// Collect every normalized in-domain link found on a page.
fn extract_links(html: &str, base: &Url, domain: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("must parse anchor selector");

    document
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| sanitize_link(base, domain, href))
        .collect()
}
