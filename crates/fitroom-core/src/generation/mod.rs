//! Image generation module
//!
//! Thin orchestration around a remote generateContent API:
//! - Wire types for parts, candidates, finish reasons and block feedback
//! - Fixed instruction templates per generation task
//! - The four public operations (model shot, try-on, pose, background)
//! - Ordered response parsing with a typed failure for every outcome
//!
//! The remote service is injected behind a one-operation trait so everything
//! above the HTTP layer is testable with a mock.

pub mod api;
mod gemini;
pub mod operations;
mod parser;
mod prompt;
mod types;

pub use api::GenerateContentApi;
pub use gemini::{DEFAULT_IMAGE_MODEL, GeminiClient, GeminiClientBuilder};
pub use operations::Studio;
pub use parser::extract_image;
pub use prompt::{BACKGROUND_PRESETS, BackgroundPreset, GenerationTask, POSE_PRESETS};
pub use types::{
    Candidate, Content, FinishReason, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, InlineData, Modality, Part, PromptFeedback,
};
