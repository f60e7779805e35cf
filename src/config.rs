use crate::error::{Error, Result};
use crate::llm::config::{
    default_max_tokens, default_temperature, default_timeout, DEFAULT_MODEL, GROQ_ENDPOINT,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Frontend that is allowed to call the API cross-origin.
pub const DEFAULT_FRONTEND: &str = "https://seo-science.vercel.app";

const CONFIG_PATHS: [&str; 3] = [
    "seo-scientist.toml",
    "config.toml",
    "config/seo-scientist.toml",
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    /// 読み込んだ設定ファイル（無ければ None）
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// The single origin allowed by CORS
    pub allowed_origin: String,
    /// Reported by `GET /`
    pub frontend_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            allowed_origin: DEFAULT_FRONTEND.to_string(),
            frontend_url: DEFAULT_FRONTEND.to_string(),
        }
    }
}

/// Provider settings. The API key itself only ever comes from `GROQ_API_KEY`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmSettings {
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: GROQ_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// ログレベル (trace, debug, info, warn, error) または EnvFilter 構文
    pub level: String,
    /// "text" or "json"
    pub format: String,
    pub file_enabled: bool,
    pub log_dir: PathBuf,
    /// "daily", "hourly" or "never"
    pub rotation: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            file_enabled: false,
            log_dir: PathBuf::from("logs"),
            rotation: "daily".to_string(),
        }
    }
}

impl AppConfig {
    /// 設定ファイルから読み込み、環境変数で上書き
    ///
    /// `path` が指定された場合はそのファイルのみを読み込む。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default()).map_err(config_error)?);

        // ロギング初期化前に呼ばれるため、ここではログを出さない
        let source = match path {
            Some(path) => Some(path.to_path_buf()),
            None => CONFIG_PATHS
                .iter()
                .map(PathBuf::from)
                .find(|p| p.exists()),
        };
        if let Some(source) = &source {
            settings = settings.add_source(config::File::from(source.clone()));
        }

        // 環境変数で上書き (例: SEO_SERVER__BIND_ADDR)
        settings = settings.add_source(
            config::Environment::with_prefix("SEO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut final_config: AppConfig = settings
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(config_error)?;

        // 個別の環境変数（後方互換性）
        if let Ok(bind_addr) = std::env::var("BIND_ADDR") {
            final_config.server.bind_addr = bind_addr;
        }
        if let Ok(model) = std::env::var("GROQ_MODEL") {
            final_config.llm.model = model;
        }

        final_config.source = source;
        Ok(final_config)
    }

    /// サンプル設定ファイルを生成
    pub fn generate_sample_config(dir: &Path) -> Result<PathBuf> {
        let toml_content = toml::to_string_pretty(&AppConfig::default())
            .map_err(|e| Error::Config(e.to_string()))?;

        let sample_content = format!(
            r#"# seo-scientist configuration
#
# Save as seo-scientist.toml. Every key can be overridden from the
# environment, e.g. SEO_SERVER__BIND_ADDR=127.0.0.1:8080.
# The provider key is read from GROQ_API_KEY only and is required.

{}
"#,
            toml_content
        );

        let path = dir.join("seo-scientist.toml.example");
        std::fs::write(&path, sample_content)?;
        Ok(path)
    }
}

fn config_error(e: config::ConfigError) -> Error {
    Error::Config(e.to_string())
}
