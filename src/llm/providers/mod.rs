//! LLMプロバイダー実装

pub mod openai;

use crate::llm::{
    config::LlmConfig,
    error::LlmResult,
    types::{LlmRequest, LlmResponse},
};
use async_trait::async_trait;

pub use openai::OpenAiCompatibleProvider;

/// LLMプロバイダートレイト
///
/// テキストを受け取りテキストを返す外部サービスの境界。
/// テストではスクリプト化した実装に差し替える。
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// 通常の完了リクエスト
    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse>;

    /// プロバイダー名を取得
    fn name(&self) -> &str;
}

/// プロバイダーファクトリー
///
/// Groq / OpenAI / カスタムはいずれも chat completions 互換APIで扱う。
pub fn create_provider(config: &LlmConfig) -> LlmResult<Box<dyn LlmProvider>> {
    Ok(Box::new(OpenAiCompatibleProvider::new(config.clone())?))
}
