use std::fmt;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use nt_core::{Error, Result};
use tracing::debug;
use crate::Config;

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Chat-completions client for the Perplexity API.
pub struct PerplexityModel {
    client: Client,
    config: Config,
}

impl PerplexityModel {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn build_prompt(article: &str) -> String {
        format!(
            "Summarize and analyze the following news article in plain language.\n\
             Give the three key points as a numbered list (1. 2. 3.), \
             then finish with a conclusion and an outlook for what comes next.\n\n\
             Article: {}",
            article
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

impl fmt::Debug for PerplexityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerplexityModel")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl super::InferenceModel for PerplexityModel {
    fn name(&self) -> &str {
        "Perplexity"
    }

    async fn summarize_text(&self, text: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model_name.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Self::build_prompt(text),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let response = self.client
            .post(self.endpoint())
            .header("accept", "application/json")
            .header("authorization", format!("Bearer {}", api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream { status: status.as_u16(), body });
        }

        let response = response.json::<ChatResponse>().await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::Inference("response contained no choices".to_string()))?;
        debug!("Received {} chars of summary", content.chars().count());
        Ok(content)
    }
}
