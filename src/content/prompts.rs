//! Prompt construction for the four generation tasks.
//!
//! Persona strings are part of the output contract: editing one changes the
//! provider's writing style, so bump [`PERSONA_VERSION`] alongside it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Revision of the persona strings below.
pub const PERSONA_VERSION: u32 = 1;

/// Tone used for titles when the caller does not supply one.
pub const DEFAULT_TONE: &str = "professional";

/// Assistant role sent as the system message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    KeywordExpert,
    TitleCopywriter,
    ContentStrategist,
    ContentWriter,
}

impl Persona {
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Persona::KeywordExpert => "You're an SEO keyword expert.",
            Persona::TitleCopywriter => "You're a creative SEO title copywriter.",
            Persona::ContentStrategist => "You're an SEO content strategist.",
            Persona::ContentWriter => "You're an expert SEO content writer.",
        }
    }
}

/// Kind of body copy requested from `/api/content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    MetaDescription,
    #[default]
    BlogIntro,
}

impl ContentType {
    /// Lenient wire parsing: anything other than `meta_description` is a blog intro.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "meta_description" => ContentType::MetaDescription,
            _ => ContentType::BlogIntro,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::MetaDescription => "meta_description",
            ContentType::BlogIntro => "blog_intro",
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            ContentType::MetaDescription => "Meta description (150–160 chars)",
            ContentType::BlogIntro => "Intro paragraph (150–250 words)",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request for one generation task.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub persona: Persona,
    pub instruction: String,
    pub max_tokens: u32,
}

pub fn keywords(seed: &str) -> Prompt {
    Prompt {
        persona: Persona::KeywordExpert,
        instruction: format!(
            "Generate 5 SEO-friendly keywords related to '{seed}'.\n\
             Return one per line, no numbering."
        ),
        max_tokens: 300,
    }
}

/// `tone` falls back to [`DEFAULT_TONE`] when absent or blank.
pub fn titles(keyword: &str, tone: Option<&str>) -> Prompt {
    let tone = tone
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TONE);

    Prompt {
        persona: Persona::TitleCopywriter,
        instruction: format!(
            "Generate 3 SEO titles for '{keyword}' in a {tone} tone.\n\
             Each title should be 50–60 characters, SEO-optimized, and catchy.\n\
             Return one per line."
        ),
        max_tokens: 300,
    }
}

pub fn outline(title: &str, keyword: &str) -> Prompt {
    Prompt {
        persona: Persona::ContentStrategist,
        instruction: format!(
            "For the title '{title}' and keyword '{keyword}', provide two content outlines.\n\
             Each: 1–2 line description + 3–4 bullet points.\n\
             Format:\n\
             Topic 1: [description]\n\
             - Point 1\n\
             - Point 2\n\
             ..."
        ),
        max_tokens: 500,
    }
}

pub fn body(keyword: &str, title: &str, outline: &str, content_type: ContentType) -> Prompt {
    let instruction = content_type.instruction();

    Prompt {
        persona: Persona::ContentWriter,
        instruction: format!(
            "Write a {instruction} for:\n\
             - Keyword: {keyword}\n\
             - Title: {title}\n\
             - Outline: {outline}\n\
             Include the keyword 2–3 times, professional tone, no extra text."
        ),
        max_tokens: 400,
    }
}
