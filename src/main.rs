use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seo_scientist::{
    build_router,
    content::scorer,
    logging::{init_logging, LogConfig},
    serve, AppConfig, AppState, SeoContentGenerator,
};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "seo-scientist", version, about = "SEO content generation API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Bind address, overrides the configuration file
        #[arg(long)]
        bind: Option<String>,
        /// Configuration file to load instead of the default search paths
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write seo-scientist.toml.example to the current directory
    GenerateConfig,
    /// Score text offline and print the report as JSON
    Score {
        #[arg(long)]
        keyword: String,
        /// Read the text from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve {
        bind: None,
        config: None,
    }) {
        Command::Serve { bind, config } => run_server(bind, config).await,
        Command::GenerateConfig => {
            let path = AppConfig::generate_sample_config(&std::env::current_dir()?)?;
            println!("📝 サンプル設定ファイルを生成しました: {}", path.display());
            Ok(())
        }
        Command::Score { keyword, file } => {
            let content = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let report = scorer::score(&content, &keyword);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

async fn run_server(bind: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let mut config = AppConfig::load(config_path.as_deref())?;
    if let Some(bind) = bind {
        config.server.bind_addr = bind;
    }

    let _log_guard = init_logging(&LogConfig::from_settings(&config.logging))?;
    match &config.source {
        Some(path) => info!("📁 設定ファイルを読み込み: {}", path.display()),
        None => info!("📁 設定ファイルなし（既定値と環境変数を使用）"),
    }

    // 資格情報が無ければポートをバインドせずに終了
    let generator = SeoContentGenerator::from_settings(&config.llm).map_err(|e| {
        error!("{}", e);
        e
    })?;
    let state = Arc::new(AppState::new(generator, config.server.frontend_url.clone()));
    let app = build_router(state, &config.server.allowed_origin)?;

    serve(&config.server.bind_addr, app).await?;
    Ok(())
}
