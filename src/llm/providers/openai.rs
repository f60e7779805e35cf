//! OpenAI互換プロバイダー実装（Groq既定）

use crate::llm::{
    config::{LlmConfig, ProviderKind},
    error::{LlmError, LlmResult},
    providers::LlmProvider,
    types::{LlmRequest, LlmResponse, Message, Role, TokenUsage},
};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;
use tracing::debug;

/// OpenAI互換プロバイダー
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    config: LlmConfig,
}

impl OpenAiCompatibleProvider {
    /// 新しいプロバイダーを作成
    ///
    /// タイムアウトはHTTPクライアント側に設定し、リトライは行わない。
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        config.validate()?;

        let api_key = config
            .get_api_key()
            .ok_or_else(|| LlmError::ConfigError("API key is required".to_string()))?;

        let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(endpoint) = &config.endpoint {
            openai_config = openai_config.with_api_base(endpoint.trim_end_matches('/'));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmError::ConfigError(e.to_string()))?;

        // 経過時間の上限0でレート制限時の自動リトライを無効化
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(no_retry);

        Ok(Self { client, config })
    }

    /// メッセージを変換
    fn convert_messages(
        &self,
        messages: &[Message],
    ) -> LlmResult<Vec<ChatCompletionRequestMessage>> {
        messages
            .iter()
            .map(|msg| {
                let converted: ChatCompletionRequestMessage = match msg.role {
                    Role::System => ChatCompletionRequestSystemMessageArgs::default()
                        .content(msg.content.clone())
                        .build()
                        .map_err(map_openai_error)?
                        .into(),
                    Role::User => ChatCompletionRequestUserMessageArgs::default()
                        .content(msg.content.clone())
                        .build()
                        .map_err(map_openai_error)?
                        .into(),
                };
                Ok(converted)
            })
            .collect()
    }

    fn map_error(&self, error: OpenAIError) -> LlmError {
        match error {
            OpenAIError::Reqwest(e) if e.is_timeout() => LlmError::Timeout(self.config.timeout_secs),
            other => map_openai_error(other),
        }
    }
}

/// async-openai のエラーを分類
fn map_openai_error(error: OpenAIError) -> LlmError {
    match error {
        OpenAIError::Reqwest(e) => LlmError::NetworkError(e.to_string()),
        OpenAIError::ApiError(api) => LlmError::ApiError(api.to_string()),
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg),
        other => LlmError::ApiError(other.to_string()),
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    #[allow(deprecated)]
    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        let messages = self.convert_messages(&request.messages)?;

        let model = request
            .model
            .as_ref()
            .unwrap_or(&self.config.default_model)
            .clone();

        let mut req_builder = CreateChatCompletionRequestArgs::default();
        req_builder
            .model(&model)
            .messages(messages)
            .temperature(request.temperature.unwrap_or(self.config.default_temperature))
            .max_tokens(request.max_tokens.unwrap_or(self.config.default_max_tokens));

        let chat_request = req_builder
            .build()
            .map_err(|e| LlmError::InvalidRequest(e.to_string()))?;

        debug!(model = %model, provider = self.name(), "sending chat completion");

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(|e| self.map_error(e))?;

        let choice = response.choices.first().ok_or(LlmError::EmptyResponse)?;

        let content = choice.message.content.clone().unwrap_or_default();

        let usage = response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(LlmResponse {
            content,
            model: response.model,
            usage,
            finish_reason: choice.finish_reason.as_ref().map(|r| format!("{:?}", r)),
        })
    }

    fn name(&self) -> &str {
        match self.config.provider {
            ProviderKind::Groq => "Groq",
            ProviderKind::OpenAI => "OpenAI",
            ProviderKind::Custom => "Custom",
        }
    }
}
