//! Content service: prompt builder, response parser, SEO scorer and the
//! generator that ties them to the completion client.

pub mod generator;
pub mod parser;
pub mod prompts;
pub mod scorer;

pub use generator::{Generation, SeoContentGenerator};
pub use prompts::{ContentType, Persona, Prompt};
pub use scorer::{score, ScoreReport};
