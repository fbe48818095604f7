use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scraper::Html;
use nt_core::{Candidate, Error, Result};
use tracing::{debug, warn};
use url::Url;
use crate::scrapers::utils;
use crate::scrapers::{Scraper, SourceMetadata};
use super::REGION;

/// Nate daily sports ranking.
#[derive(Debug, Clone)]
pub struct NateScraper {
    client: Client,
    ranking_url: String,
}

impl NateScraper {
    pub const RANKING_URL: &'static str = "https://news.nate.com/rank/interest?sc=spo&p=day";

    const ITEM_SELECTOR: &'static str = "div.mlt01 a";
    const HEADING_SELECTOR: &'static str = "h2.tit";
    const FALLBACK_TITLE_SELECTOR: &'static str = "strong";
    const BODY_SELECTOR: &'static str = "div.content_view";
    const PRUNE_SELECTOR: &'static str = "div, figure, script, style, a";
    const USER_AGENT: &'static str = "Mozilla/5.0 (compatible; nt-news-summarizer/0.1)";

    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self {
            client,
            ranking_url: Self::RANKING_URL.to_string(),
        }
    }

    pub fn with_ranking_url(mut self, url: impl Into<String>) -> Self {
        self.ranking_url = url.into();
        self
    }

    pub fn ranking_url(&self) -> &str {
        &self.ranking_url
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Scraping(format!("{} answered with status {}", url, status)));
        }
        Ok(response.text().await?)
    }

    /// Walks the ranking items in document order and keeps the first `limit`
    /// that have a title and a link. Skipped items do not consume a rank.
    pub fn parse_candidates(html: &str, base: &Url, limit: usize) -> Result<Vec<Candidate>> {
        let document = Html::parse_document(html);
        let item_selector = utils::parse_selector(Self::ITEM_SELECTOR)?;
        let heading_selector = utils::parse_selector(Self::HEADING_SELECTOR)?;
        let fallback_selector = utils::parse_selector(Self::FALLBACK_TITLE_SELECTOR)?;

        let mut candidates = Vec::new();
        for item in document.select(&item_selector) {
            if candidates.len() >= limit {
                break;
            }

            let title = item
                .select(&heading_selector)
                .next()
                .or_else(|| item.select(&fallback_selector).next())
                .map(|el| utils::element_text(&el))
                .unwrap_or_default();
            if title.is_empty() {
                debug!("Skipping ranking item without a title");
                continue;
            }

            let Some(href) = item.value().attr("href") else {
                debug!("Skipping ranking item without a link: {}", title);
                continue;
            };
            let detail_url = match utils::normalize_link(href, base) {
                Ok(url) => url,
                Err(e) => {
                    warn!("Skipping ranking item {}: {}", title, e);
                    continue;
                }
            };

            candidates.push(Candidate {
                rank: candidates.len() + 1,
                title,
                detail_url,
            });
        }
        Ok(candidates)
    }

    /// Cleaned text of the article body, `None` when the page has no body container.
    pub fn extract_body(html: &str) -> Result<Option<String>> {
        let container = utils::parse_selector(Self::BODY_SELECTOR)?;
        let prune = utils::parse_selector(Self::PRUNE_SELECTOR)?;
        Ok(utils::pruned_text(html, &container, &prune))
    }
}

impl Default for NateScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for NateScraper {
    fn source_metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Nate Sports",
            emoji: "🏟️",
            region: REGION,
        }
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("news.nate.com")
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["nate", "nate-sports"]
    }

    async fn get_candidates(&self, limit: usize) -> Result<Vec<Candidate>> {
        let base = utils::parse_url(&self.ranking_url)?;
        let html = self.fetch_html(&self.ranking_url).await?;
        Self::parse_candidates(&html, &base, limit)
    }

    async fn scrape_article(&self, url: &str) -> Result<Option<String>> {
        let html = self.fetch_html(url).await?;
        Self::extract_body(&html)
    }
}
