//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use seo_scientist::{
    llm::{
        config::DEFAULT_MODEL, LlmClient, LlmConfig, LlmError, LlmProvider, LlmRequest,
        LlmResponse, LlmResult, TokenUsage,
    },
    AppState, SeoContentGenerator,
};
use std::sync::{Arc, Mutex};

/// Replies with canned text per persona, or fails every call.
pub struct ScriptedProvider {
    replies: Option<Vec<(&'static str, String)>>,
    pub seen: Arc<Mutex<Vec<LlmRequest>>>,
}

impl ScriptedProvider {
    /// Each entry maps a fragment of the system prompt to the reply text.
    pub fn replying(replies: Vec<(&'static str, String)>) -> Self {
        Self {
            replies: Some(replies),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            replies: None,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        self.seen.lock().unwrap().push(request.clone());

        let replies = self
            .replies
            .as_ref()
            .ok_or_else(|| LlmError::ApiError("401 invalid api key".to_string()))?;
        let system = &request.messages[0].content;
        let content = replies
            .iter()
            .find(|(fragment, _)| system.contains(fragment))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_default();

        Ok(LlmResponse {
            content,
            model: DEFAULT_MODEL.to_string(),
            usage: TokenUsage::default(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn generator(provider: ScriptedProvider) -> SeoContentGenerator {
    let client = LlmClient::with_provider(
        Box::new(provider),
        LlmConfig::groq("test-key", DEFAULT_MODEL),
    );
    SeoContentGenerator::new(Arc::new(client))
}

pub fn state(provider: ScriptedProvider) -> Arc<AppState> {
    Arc::new(AppState::new(
        generator(provider),
        "https://seo-science.vercel.app",
    ))
}

/// 209 words in 19 sentences with the keyword three times.
pub fn long_intro(keyword: &str) -> String {
    let sentence = "Readers want clear answers about gear, fit and training plans right here.";
    let mut text = format!("Choosing {keyword} well matters for every runner today.");
    for _ in 0..16 {
        text.push(' ');
        text.push_str(sentence);
    }
    text.push_str(&format!(" Good {keyword} last. Test {keyword} early."));
    text
}
