use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Marker that prefixes a failed summary once it is rendered as text.
pub const ERROR_MARKER: &str = "[ERROR]";

/// Appended to every article body after truncation.
pub const ELLIPSIS: char = '…';

/// A ranking page entry before its body is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub rank: usize,
    pub title: String,
    pub detail_url: String,
}

/// A crawled article with its cleaned, truncated body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub rank: usize,
    pub title: String,
    pub link: String,
    pub content: String,
}

/// Outcome of one summarization call.
///
/// On the wire both variants are a plain string; a failure is the reason
/// prefixed with [`ERROR_MARKER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    Text(String),
    Failed(String),
}

impl Summary {
    pub fn is_failed(&self) -> bool {
        matches!(self, Summary::Failed(_))
    }

    pub fn to_wire(&self) -> String {
        match self {
            Summary::Text(text) => text.clone(),
            Summary::Failed(reason) => format!("{} {}", ERROR_MARKER, reason),
        }
    }

    pub fn from_wire(raw: String) -> Self {
        match raw.strip_prefix(ERROR_MARKER) {
            Some(reason) => Summary::Failed(reason.trim_start().to_string()),
            None => Summary::Text(raw),
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for Summary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Summary::from_wire)
    }
}

/// An [`ArticleRecord`] with its generated summary attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizedRecord {
    #[serde(flatten)]
    pub article: ArticleRecord,
    pub summary: Summary,
}

impl SummarizedRecord {
    pub fn new(article: ArticleRecord, summary: Summary) -> Self {
        Self { article, summary }
    }
}

/// Body of a successful `summarize-top3-sport-news` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResults {
    pub results: Vec<SummarizedRecord>,
}
