//! # seo-scientist
//!
//! HTTP service that asks an LLM provider for SEO keywords, titles, outlines
//! and body copy, and scores the generated copy with a readability/keyword
//! heuristic.

pub mod config;
pub mod content;
pub mod error;
pub mod http_server;
pub mod llm;
pub mod logging;
pub mod store;

pub use config::AppConfig;
pub use content::{Generation, SeoContentGenerator};
pub use error::{ApiError, Error, Result};
pub use http_server::{build_router, serve, AppState};
