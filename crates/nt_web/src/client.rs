//! Thin async helper for talking to the summary API, plus the renderers used
//! by the terminal client.

use std::time::Duration;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use crate::error::ErrorBody;
use crate::SUMMARIZE_PATH;

pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(60);
pub const GENERIC_ERROR: &str = "An unknown error occurred.";
const MISSING: &str = "-";
const SEPARATOR: &str = "------------------------------------------------------------\n";

/// One entry of the API response. Every field is optional so that a
/// partially filled record still renders.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub rank: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NewsResponse {
    Results(Vec<NewsItem>),
    Error(String),
}

#[derive(Deserialize)]
struct ResultsBody {
    #[serde(default)]
    results: Vec<NewsItem>,
}

/// Calls `GET {api_url}/summarize-top3-sport-news`. Never fails; transport
/// and HTTP errors come back as [`NewsResponse::Error`].
pub async fn fetch_summarized_news(api_url: &str, timeout: Duration) -> NewsResponse {
    let url = format!("{}{}", api_url.trim_end_matches('/'), SUMMARIZE_PATH);
    debug!("Requesting {}", url);

    let client = match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => return NewsResponse::Error(format!("Could not build HTTP client: {}", e)),
    };

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("News API unreachable: {}", e);
            return NewsResponse::Error(format!("Could not reach the news API: {}", e));
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.detail)
            .unwrap_or(body);
        return NewsResponse::Error(format!("News API returned {}: {}", status, detail));
    }

    match response.json::<ResultsBody>().await {
        Ok(body) => NewsResponse::Results(body.results),
        Err(e) => NewsResponse::Error(format!("Unexpected response from the news API: {}", e)),
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or(MISSING)
}

fn rank(item: &NewsItem) -> String {
    item.rank.map(|r| r.to_string()).unwrap_or_else(|| MISSING.to_string())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

pub fn render_text(response: &NewsResponse) -> String {
    match response {
        NewsResponse::Results(items) if items.is_empty() => "No articles were returned.".to_string(),
        NewsResponse::Results(items) => items
            .iter()
            .map(|item| {
                format!(
                    "{}. {}\nLink: {}\n\n{}\n",
                    rank(item),
                    field(&item.title),
                    field(&item.link),
                    field(&item.summary)
                )
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR),
        NewsResponse::Error(message) if message.trim().is_empty() => GENERIC_ERROR.to_string(),
        NewsResponse::Error(message) => message.clone(),
    }
}

pub fn render_html(response: &NewsResponse) -> String {
    match response {
        NewsResponse::Results(items) if items.is_empty() => {
            format!("<p>{}</p>", escape_html(&render_text(response)))
        }
        NewsResponse::Results(items) => items
            .iter()
            .map(|item| {
                let link = escape_html(field(&item.link));
                format!(
                    "<h2 style=\"color:#005A9C;\">{}. {}</h2>\n\
                     <p><b>Link:</b> <a href=\"{link}\">{link}</a></p>\n\
                     <p>{}</p>\n<hr>\n",
                    rank(item),
                    escape_html(field(&item.title)),
                    escape_html(field(&item.summary)).replace('\n', "<br>"),
                    link = link,
                )
            })
            .collect(),
        NewsResponse::Error(_) => format!("<p>{}</p>", escape_html(&render_text(response))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{echo_model, manager};
    use crate::{create_app, AppState};

    async fn spawn_api(bodies: Option<Vec<&'static str>>) -> String {
        let app = create_app(AppState::new(manager(bodies, echo_model())));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_fetch_results() {
        let api = spawn_api(Some(vec!["alpha", "bravo"])).await;
        match fetch_summarized_news(&format!("{}/", api), CLIENT_TIMEOUT).await {
            NewsResponse::Results(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].rank, Some(1));
                assert_eq!(items[0].title.as_deref(), Some("Story 1"));
                assert_eq!(items[1].summary.as_deref(), Some("summary-for-bravo…"));
            }
            other => panic!("expected results, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_surfaces_detail() {
        let api = spawn_api(None).await;
        let response = fetch_summarized_news(&api, CLIENT_TIMEOUT).await;
        match &response {
            NewsResponse::Error(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("crawling failed"));
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_api_is_an_error_value() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let response = fetch_summarized_news(&format!("http://{}", addr), Duration::from_secs(2)).await;
        assert!(matches!(response, NewsResponse::Error(ref m) if m.starts_with("Could not reach")));
    }

    #[test]
    fn test_missing_fields_render_as_placeholders() {
        let items: Vec<NewsItem> = serde_json::from_str(r#"[{"title": "Only a title"}]"#).unwrap();
        let text = render_text(&NewsResponse::Results(items));
        assert!(text.starts_with("-. Only a title"));
        assert!(text.contains("Link: -"));
    }

    #[test]
    fn test_render_html() {
        let response = NewsResponse::Results(vec![NewsItem {
            rank: Some(1),
            title: Some("A <b> title".to_string()),
            link: Some("https://news.nate.com/view/1".to_string()),
            content: None,
            summary: Some("1. one\n2. two".to_string()),
        }]);
        let html = render_html(&response);
        assert!(html.contains("<h2 style=\"color:#005A9C;\">1. A &lt;b&gt; title</h2>"));
        assert!(html.contains("<a href=\"https://news.nate.com/view/1\">"));
        assert!(html.contains("1. one<br>2. two"));
        assert!(html.ends_with("<hr>\n"));
    }

    #[test]
    fn test_empty_results_render_the_same_message() {
        let response = NewsResponse::Results(Vec::new());
        assert_eq!(render_text(&response), "No articles were returned.");
        assert_eq!(render_html(&response), "<p>No articles were returned.</p>");
    }

    #[test]
    fn test_empty_error_uses_generic_message() {
        assert_eq!(render_text(&NewsResponse::Error(" ".to_string())), GENERIC_ERROR);
    }
}
