use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod client;
pub mod error;
pub mod handlers;
pub mod state;

pub use error::{ApiError, ErrorBody};
pub use state::AppState;

pub const SUMMARIZE_PATH: &str = "/summarize-top3-sport-news";

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::health))
        .route(SUMMARIZE_PATH, get(handlers::summarize_top3_sport_news))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use nt_core::{Result, Error, SummarizedRecord, Summary};
    pub use crate::AppState;
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use async_trait::async_trait;
    use nt_core::{Candidate, Error, InferenceModel, Result};
    use nt_scrappers::scrapers::{Scraper, SourceMetadata};
    use nt_scrappers::scrapers::korea::REGION;
    use nt_scrappers::{CrawlConfig, ScraperManager};

    pub struct StaticScraper {
        pub bodies: Option<Vec<&'static str>>,
    }

    #[async_trait]
    impl Scraper for StaticScraper {
        fn source_metadata(&self) -> SourceMetadata {
            SourceMetadata {
                name: "Static",
                emoji: "🧪",
                region: REGION,
            }
        }

        fn can_handle(&self, _url: &str) -> bool {
            true
        }

        async fn get_candidates(&self, limit: usize) -> Result<Vec<Candidate>> {
            let bodies = self
                .bodies
                .as_ref()
                .ok_or_else(|| Error::Scraping("ranking page unavailable".to_string()))?;
            Ok((0..bodies.len().min(limit))
                .map(|i| Candidate {
                    rank: i + 1,
                    title: format!("Story {}", i + 1),
                    detail_url: format!("https://news.nate.com/view/{}", i),
                })
                .collect())
        }

        async fn scrape_article(&self, url: &str) -> Result<Option<String>> {
            let index: usize = url
                .rsplit('/')
                .next()
                .and_then(|i| i.parse().ok())
                .ok_or_else(|| Error::Scraping(format!("bad url {}", url)))?;
            Ok(self.bodies.as_ref().and_then(|b| b.get(index)).map(|b| b.to_string()))
        }
    }

    /// Later calls finish first; input containing "timeout" fails.
    pub struct EchoModel {
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl InferenceModel for EchoModel {
        fn name(&self) -> &str {
            "echo"
        }

        async fn summarize_text(&self, text: &str) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) as u64;
            tokio::time::sleep(Duration::from_millis(50u64.saturating_sub(call * 20))).await;
            if text.contains("timeout") {
                return Err(Error::Inference("operation timed out".to_string()));
            }
            Ok(format!("summary-for-{}", text))
        }
    }

    pub fn manager(bodies: Option<Vec<&'static str>>, model: Arc<EchoModel>) -> ScraperManager {
        let config = CrawlConfig {
            courtesy_delay: Duration::ZERO,
            ..CrawlConfig::default()
        };
        ScraperManager::new(Arc::new(StaticScraper { bodies }), model, config)
    }

    pub fn echo_model() -> Arc<EchoModel> {
        Arc::new(EchoModel {
            calls: AtomicUsize::new(0),
        })
    }
}
