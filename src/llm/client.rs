//! LLMクライアント

use crate::llm::{
    config::LlmConfig,
    error::LlmResult,
    providers::{create_provider, LlmProvider},
    types::{LlmRequest, LlmResponse},
};

/// LLMクライアント
///
/// 1回の呼び出しにつき外部プロバイダーへ1リクエストのみ送信する（リトライなし）。
pub struct LlmClient {
    provider: Box<dyn LlmProvider>,
    config: LlmConfig,
}

impl LlmClient {
    /// 設定からクライアントを作成
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        config.validate()?;
        let provider = create_provider(&config)?;
        Ok(Self { provider, config })
    }

    /// 任意のプロバイダーでクライアントを作成（テストダブル用）
    pub fn with_provider(provider: Box<dyn LlmProvider>, config: LlmConfig) -> Self {
        Self { provider, config }
    }

    /// 設定を取得
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// 完了リクエストを送信
    ///
    /// 省略された温度・最大トークン数には設定の既定値を補う。
    pub async fn complete(&self, request: LlmRequest) -> LlmResult<LlmResponse> {
        let request = LlmRequest {
            model: request
                .model
                .or_else(|| Some(self.config.default_model.clone())),
            temperature: request
                .temperature
                .or(Some(self.config.default_temperature)),
            max_tokens: request.max_tokens.or(Some(self.config.default_max_tokens)),
            messages: request.messages,
        };
        self.provider.complete(&request).await
    }

    /// システムプロンプト付きの完了
    ///
    /// ペルソナ＋指示文の2メッセージを送り、前後の空白を除いた本文を返す。
    pub async fn complete_with_system(
        &self,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> LlmResult<String> {
        let request = LlmRequest::persona(system_prompt, user_prompt, temperature, max_tokens);

        let response = self.complete(request).await?;
        Ok(response.content.trim().to_string())
    }

    /// プロバイダー名を取得
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}
