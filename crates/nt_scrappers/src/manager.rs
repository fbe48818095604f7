use std::sync::Arc;
use std::time::Duration;
use futures::future::join_all;
use nt_core::{ArticleRecord, Error, InferenceModel, Result, SummarizedRecord, Summary, ELLIPSIS};
use nt_inference::summarize_or_sentinel;
use tokio::time::sleep;
use tracing::info;
use crate::logging::Logger;
use crate::scrapers::Scraper;

/// Content used when a detail page has no body container.
pub const NO_BODY_PLACEHOLDER: &str = "no body available";

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// How many ranked articles to crawl.
    pub top_k: usize,
    /// Body length kept before the ellipsis, in characters.
    pub max_content_chars: usize,
    /// Pause after each successful extraction.
    pub courtesy_delay: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            max_content_chars: 500,
            courtesy_delay: Duration::from_millis(500),
        }
    }
}

/// Truncates to `max_chars` characters and appends the ellipsis.
pub fn finish_content(body: Option<String>, max_chars: usize) -> String {
    let body = body.unwrap_or_else(|| NO_BODY_PLACEHOLDER.to_string());
    let mut content: String = body.chars().take(max_chars).collect();
    content.push(ELLIPSIS);
    content
}

pub struct ScraperManager {
    scraper: Arc<dyn Scraper>,
    inference: Arc<dyn InferenceModel>,
    config: CrawlConfig,
    logger: Logger,
}

impl ScraperManager {
    pub fn new(scraper: Arc<dyn Scraper>, inference: Arc<dyn InferenceModel>, config: CrawlConfig) -> Self {
        let meta = scraper.source_metadata();
        let logger = Logger::new()
            .with_prefix(meta.emoji.to_string())
            .with_prefix(meta.name.to_string());
        Self {
            scraper,
            inference,
            config,
            logger,
        }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn scraper(&self) -> &dyn Scraper {
        self.scraper.as_ref()
    }

    pub fn inference(&self) -> &dyn InferenceModel {
        self.inference.as_ref()
    }

    /// Extracts one page and applies the same finishing as the crawl.
    pub async fn scrape_url(&self, url: &str) -> Result<String> {
        let body = self.scraper.scrape_article(url).await?;
        Ok(finish_content(body, self.config.max_content_chars))
    }

    /// Fetches the ranking page, then extracts each candidate one after another.
    ///
    /// Returns an empty list when the ranking page cannot be read. A failed
    /// candidate is dropped and the remaining records are renumbered from 1.
    pub async fn crawl_top(&self) -> Vec<ArticleRecord> {
        self.logger.info("🦗 Fetching ranking page");
        let candidates = match self.scraper.get_candidates(self.config.top_k).await {
            Ok(candidates) => candidates,
            Err(e) => {
                self.logger.error(&format!("❌ Ranking page unavailable: {}", e));
                return Vec::new();
            }
        };
        self.logger.info(&format!("📰 {} candidates found", candidates.len()));

        let mut articles = Vec::with_capacity(candidates.len());
        for candidate in candidates.into_iter().take(self.config.top_k) {
            let body = match self.scraper.scrape_article(&candidate.detail_url).await {
                Ok(body) => body,
                Err(e) => {
                    self.logger.warn(&format!(
                        "⚠️ Skipping #{} {}: {}",
                        candidate.rank, candidate.title, e
                    ));
                    continue;
                }
            };
            if body.is_none() {
                self.logger.debug(&format!("No body container at {}", candidate.detail_url));
            }

            articles.push(ArticleRecord {
                rank: articles.len() + 1,
                title: candidate.title,
                link: candidate.detail_url,
                content: finish_content(body, self.config.max_content_chars),
            });

            if !self.config.courtesy_delay.is_zero() {
                sleep(self.config.courtesy_delay).await;
            }
        }

        self.logger.info(&format!("✨ Crawled {} articles", articles.len()));
        articles
    }

    /// Summarizes every article concurrently and attaches each summary to the
    /// article at the same index.
    pub async fn summarize_articles(&self, articles: Vec<ArticleRecord>) -> Vec<SummarizedRecord> {
        let total = articles.len();
        let tasks = articles.iter().enumerate().map(|(index, article)| {
            let inference = self.inference.clone();
            async move {
                info!("🤖 Summarizing {}/{}: {}", index + 1, total, article.title);
                let summary = summarize_or_sentinel(inference.as_ref(), &article.content).await;
                (index, summary)
            }
        });

        let mut slots: Vec<Option<Summary>> = vec![None; total];
        for (index, summary) in join_all(tasks).await {
            slots[index] = Some(summary);
        }

        articles
            .into_iter()
            .zip(slots)
            .map(|(article, summary)| {
                let summary = summary
                    .unwrap_or_else(|| Summary::Failed("summary task did not report back".to_string()));
                SummarizedRecord::new(article, summary)
            })
            .collect()
    }

    /// Crawl, then fan out summarization. Fails only when nothing was crawled.
    pub async fn summarize_top(&self) -> Result<Vec<SummarizedRecord>> {
        let articles = self.crawl_top().await;
        if articles.is_empty() {
            return Err(Error::EmptyCrawl);
        }

        info!("🧠 Summarizing {} articles with {}", articles.len(), self.inference.name());
        let results = self.summarize_articles(articles).await;
        let failed = results.iter().filter(|r| r.summary.is_failed()).count();
        info!("✅ Summaries ready ({} failed)", failed);
        Ok(results)
    }
}
