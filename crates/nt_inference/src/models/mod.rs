use std::sync::Arc;
use nt_core::{Error, InferenceModel, Result, Summary};
use tracing::warn;
use crate::Config;

pub mod dummy;
pub mod perplexity;

pub use dummy::DummyModel;
pub use perplexity::PerplexityModel;

/// Builds the model registered under `name`.
pub fn create_model(name: &str, config: Config) -> Result<Arc<dyn InferenceModel>> {
    match name.to_lowercase().as_str() {
        "perplexity" | "pplx" | "sonar" => Ok(Arc::new(PerplexityModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Config(format!(
            "Unknown model: {}. Available models: perplexity, dummy",
            other
        ))),
    }
}

/// Summarizes `text`, folding every failure into [`Summary::Failed`].
pub async fn summarize_or_sentinel(model: &dyn InferenceModel, text: &str) -> Summary {
    match model.summarize_text(text).await {
        Ok(summary) => Summary::Text(summary),
        Err(e) => {
            warn!("⚠️ {} summary failed: {}", model.name(), e);
            match e {
                Error::Upstream { .. } => Summary::Failed(e.to_string()),
                other => Summary::Failed(format!("failed to generate summary: {}", other)),
            }
        }
    }
}
