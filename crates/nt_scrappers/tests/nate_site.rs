use std::sync::Arc;
use std::time::Duration;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use nt_core::ELLIPSIS;
use nt_inference::models::DummyModel;
use nt_scrappers::{CrawlConfig, NateScraper, ScraperManager};

const RANKING: &str = r#"
<html><body>
<div class="mlt01"><a href="/view/1"><h2 class="tit">Opening win</h2></a></div>
<div class="mlt01"><a href="/view/missing"><h2 class="tit">Gone article</h2></a></div>
<div class="mlt01"><a href="/view/3"><strong>Transfer rumour</strong></a></div>
<div class="mlt01"><a href="/view/4"><h2 class="tit">Never reached</h2></a></div>
</body></html>
"#;

const ARTICLE_ONE: &str = r#"
<html><body><div class="content_view">
  The home side won 2-1. <div class="ad">sponsored</div>
  <script>track()</script> Fans celebrated late into the night.
</div></body></html>
"#;

const ARTICLE_THREE: &str = r#"<html><body><p>video only</p></body></html>"#;

async fn spawn_site() -> String {
    let router = Router::new()
        .route("/rank", get(|| async { Html(RANKING) }))
        .route("/view/1", get(|| async { Html(ARTICLE_ONE) }))
        .route("/view/3", get(|| async { Html(ARTICLE_THREE) }))
        .route("/view/4", get(|| async { Html(ARTICLE_ONE) }))
        .fallback(|| async { (StatusCode::NOT_FOUND, "not found").into_response() });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn manager_for(ranking_url: String) -> ScraperManager {
    let scraper = NateScraper::new().with_ranking_url(ranking_url);
    let config = CrawlConfig {
        courtesy_delay: Duration::ZERO,
        ..CrawlConfig::default()
    };
    ScraperManager::new(Arc::new(scraper), Arc::new(DummyModel::new()), config)
}

#[tokio::test]
async fn crawl_against_fake_ranking_site() {
    let site = spawn_site().await;
    let manager = manager_for(format!("{}/rank", site));

    let articles = manager.crawl_top().await;
    assert_eq!(articles.len(), 2);

    assert_eq!(articles[0].rank, 1);
    assert_eq!(articles[0].title, "Opening win");
    assert_eq!(articles[0].link, format!("{}/view/1", site));
    assert_eq!(
        articles[0].content,
        format!("The home side won 2-1. Fans celebrated late into the night.{}", ELLIPSIS)
    );

    assert_eq!(articles[1].rank, 2);
    assert_eq!(articles[1].title, "Transfer rumour");
    assert_eq!(articles[1].content, format!("no body available{}", ELLIPSIS));
}

#[tokio::test]
async fn unreachable_ranking_page_yields_nothing() {
    let site = spawn_site().await;
    let manager = manager_for(format!("{}/does-not-exist", site));
    assert!(manager.crawl_top().await.is_empty());
}

#[tokio::test]
async fn summarize_top_with_offline_model() {
    let site = spawn_site().await;
    let manager = manager_for(format!("{}/rank", site));

    let results = manager.summarize_top().await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0].summary.to_wire(),
        "The home side won 2-1. Fans celebrated late into the night.…"
    );
    assert!(!results[1].summary.is_failed());
}
