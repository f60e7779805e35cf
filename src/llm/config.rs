//! LLM統合の設定

use crate::config::LlmSettings;
use crate::llm::error::{LlmError, LlmResult};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// プロバイダー資格情報を読み込む環境変数
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// GroqのOpenAI互換エンドポイント
pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// 既定モデル
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// プロバイダー種別
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Groq (OpenAI互換API)
    Groq,
    /// OpenAI
    OpenAI,
    /// その他のOpenAI互換エンドポイント
    Custom,
}

/// LLM設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// プロバイダー
    pub provider: ProviderKind,
    /// APIキー（セキュア）
    #[serde(skip_serializing)]
    pub api_key: Option<SecretString>,
    /// APIエンドポイント（省略時はOpenAI既定）
    pub endpoint: Option<String>,
    /// デフォルトモデル
    pub default_model: String,
    /// リクエストタイムアウト（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// デフォルト温度
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,
    /// デフォルト最大トークン数
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,
}

pub(crate) fn default_timeout() -> u64 {
    60
}

pub(crate) fn default_temperature() -> f32 {
    0.7
}

pub(crate) fn default_max_tokens() -> u32 {
    300
}

impl LlmConfig {
    /// Groq設定を作成
    pub fn groq(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: ProviderKind::Groq,
            api_key: Some(SecretString::new(api_key.into().into_boxed_str())),
            endpoint: Some(GROQ_ENDPOINT.to_string()),
            default_model: model.into(),
            timeout_secs: default_timeout(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
        }
    }

    /// 環境変数のAPIキーとアプリ設定からLLM設定を組み立てる
    ///
    /// `GROQ_API_KEY` が未設定または空の場合はエラー（起動失敗）。
    pub fn from_env(settings: &LlmSettings) -> LlmResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                LlmError::ConfigError(format!("Missing {} in environment variables.", API_KEY_ENV))
            })?;

        let mut config = Self::groq(api_key, settings.model.clone()).with_settings(settings);
        if settings.endpoint.trim_end_matches('/') != GROQ_ENDPOINT {
            config.provider = ProviderKind::Custom;
        }
        config.validate()?;
        Ok(config)
    }

    /// アプリ設定の値で上書き
    pub fn with_settings(mut self, settings: &LlmSettings) -> Self {
        self.endpoint = Some(settings.endpoint.clone());
        self.default_model = settings.model.clone();
        self.timeout_secs = settings.timeout_secs;
        self.default_temperature = settings.temperature;
        self.default_max_tokens = settings.max_tokens;
        self
    }

    /// タイムアウトを取得
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// APIキーを取得（露出）
    pub fn get_api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret())
    }

    /// 設定を検証
    pub fn validate(&self) -> LlmResult<()> {
        if self.get_api_key().map_or(true, str::is_empty) {
            return Err(LlmError::ConfigError("API key is required".to_string()));
        }

        if self.provider == ProviderKind::Custom && self.endpoint.is_none() {
            return Err(LlmError::ConfigError(
                "Endpoint is required for custom providers".to_string(),
            ));
        }

        if self.default_model.trim().is_empty() {
            return Err(LlmError::ConfigError("Model must not be empty".to_string()));
        }

        // 温度の範囲チェック
        if !(0.0..=2.0).contains(&self.default_temperature) {
            return Err(LlmError::ConfigError(
                "Temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        // max_tokensの妥当性チェック
        if self.default_max_tokens == 0 || self.default_max_tokens > 100_000 {
            return Err(LlmError::ConfigError(
                "max_tokens must be between 1 and 100000".to_string(),
            ));
        }

        Ok(())
    }
}
