pub mod models;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use models::InferenceModel;
pub use types::{
    ArticleRecord, Candidate, SummarizedRecord, Summary, SummaryResults, ELLIPSIS, ERROR_MARKER,
};
