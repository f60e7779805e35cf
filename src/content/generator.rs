//! SEO content generation on top of the completion client.
//!
//! Provider failures never escape this layer: each operation logs the error
//! and substitutes its own static fallback, tagged as [`Generation::Fallback`].

use crate::content::{
    parser::parse_lines,
    prompts::{self, ContentType, Prompt},
};
use crate::config::LlmSettings;
use crate::error::Result;
use crate::llm::{LlmClient, LlmConfig, LlmResult};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Output of a generation call: real provider text or the operation's fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation<T> {
    Generated(T),
    Fallback(T),
}

impl<T> Generation<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Generation::Fallback(_))
    }

    pub fn value(&self) -> &T {
        match self {
            Generation::Generated(value) | Generation::Fallback(value) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Generation::Generated(value) | Generation::Fallback(value) => value,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Generation<U> {
        match self {
            Generation::Generated(value) => Generation::Generated(f(value)),
            Generation::Fallback(value) => Generation::Fallback(f(value)),
        }
    }
}

pub fn fallback_keywords(seed: &str) -> Vec<String> {
    vec![format!("{seed} guide"), format!("best {seed} tools")]
}

pub fn fallback_titles(keyword: &str) -> Vec<String> {
    vec![
        format!("Complete {keyword} Guide"),
        format!("Mastering {keyword}"),
        format!("Boost ROI with {keyword}"),
    ]
}

pub fn fallback_topics(keyword: &str) -> String {
    format!("Topic 1: Everything about {keyword}\n- Overview\n- Benefits\n- Strategies")
}

pub fn fallback_content(keyword: &str) -> String {
    format!("Learn everything about {keyword} in this insightful guide.")
}

pub struct SeoContentGenerator {
    client: Arc<LlmClient>,
    temperature: Option<f32>,
}

impl SeoContentGenerator {
    pub fn new(client: Arc<LlmClient>) -> Self {
        Self {
            client,
            temperature: None,
        }
    }

    /// Generator backed by the configured provider.
    ///
    /// Fails when `GROQ_API_KEY` is unset or blank, or the settings are invalid.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self> {
        let client = LlmClient::new(LlmConfig::from_env(settings)?)?;
        info!(
            provider = client.provider_name(),
            model = %client.config().default_model,
            "LLM client ready"
        );
        Ok(Self::new(Arc::new(client)))
    }

    /// Override the client's default temperature for every operation.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    async fn run(&self, prompt: &Prompt) -> LlmResult<String> {
        self.client
            .complete_with_system(
                prompt.persona.system_prompt(),
                prompt.instruction.as_str(),
                self.temperature,
                Some(prompt.max_tokens),
            )
            .await
    }

    pub async fn generate_keywords(&self, seed: &str) -> Generation<Vec<String>> {
        match self.run(&prompts::keywords(seed)).await {
            Ok(output) => {
                let keywords = parse_lines(&output);
                debug!(seed, count = keywords.len(), "keywords generated");
                Generation::Generated(keywords)
            }
            Err(e) => {
                warn!(operation = "keywords", error = %e, "keyword generation failed, using fallback");
                Generation::Fallback(fallback_keywords(seed))
            }
        }
    }

    pub async fn generate_titles(&self, keyword: &str, tone: Option<&str>) -> Generation<Vec<String>> {
        match self.run(&prompts::titles(keyword, tone)).await {
            Ok(output) => Generation::Generated(parse_lines(&output)),
            Err(e) => {
                warn!(operation = "titles", error = %e, "title generation failed, using fallback");
                Generation::Fallback(fallback_titles(keyword))
            }
        }
    }

    pub async fn generate_topics(&self, title: &str, keyword: &str) -> Generation<String> {
        match self.run(&prompts::outline(title, keyword)).await {
            Ok(output) => Generation::Generated(output),
            Err(e) => {
                warn!(operation = "topics", error = %e, "topic generation failed, using fallback");
                Generation::Fallback(fallback_topics(keyword))
            }
        }
    }

    pub async fn generate_content(
        &self,
        keyword: &str,
        title: &str,
        outline: &str,
        content_type: ContentType,
    ) -> Generation<String> {
        match self
            .run(&prompts::body(keyword, title, outline, content_type))
            .await
        {
            Ok(output) => Generation::Generated(output),
            Err(e) => {
                warn!(operation = "content", %content_type, error = %e, "content generation failed, using fallback");
                Generation::Fallback(fallback_content(keyword))
            }
        }
    }
}
