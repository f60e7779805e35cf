use crate::content::ContentType;
use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};

/// ISO-8601 local timestamp used on stored records and the health check.
pub fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// A keyword research session: the seed, its keywords, and titles added later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub seed: String,
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titles: Option<Vec<String>>,
    pub time: String,
}

impl SessionRecord {
    pub fn new(seed: impl Into<String>, keywords: Vec<String>) -> Self {
        Self {
            seed: seed.into(),
            keywords,
            titles: None,
            time: timestamp(),
        }
    }
}

/// Generated copy with its inputs and score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub keyword: String,
    pub title: String,
    pub outline: String,
    pub content: String,
    pub seo_score: u8,
    pub factors: Vec<String>,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub words: usize,
    pub time: String,
}

impl ContentRecord {
    pub fn score(record: &ContentRecord) -> f64 {
        f64::from(record.seo_score)
    }
}
