use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait InferenceModel: Send + Sync {
    /// Short human readable name used in logs
    fn name(&self) -> &str;

    /// Summarize a piece of article text
    async fn summarize_text(&self, text: &str) -> Result<String>;
}
