//! Gemini weather integration
//!
//! Client for the Gemini `generateContent` API with Google Search and
//! Google Maps grounding, used to answer natural-language weather questions
//! with cited sources.

pub mod client;
mod models;
mod prompt;

pub use client::{
    EMPTY_ANSWER_FALLBACK, GeminiClient, GeminiConfig, GeminiError, GroundedSearchClient,
};
pub use models::{GroundedAnswer, LatLng, REVIEW_SOURCE_TITLE, SourceLink};
pub use prompt::ForecastRequest;
