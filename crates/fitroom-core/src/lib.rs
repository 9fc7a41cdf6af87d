//! Fitroom Core Library
//!
//! This crate provides the core functionality for Fitroom, including:
//! - Image generation client (remote generateContent API over HTTP)
//! - Prompt templates (model shot, try-on, pose variation, background)
//! - Data-URI image assets, the interchange format at every boundary
//! - Wardrobe catalog with custom item support
//! - Configuration management

pub mod asset;
pub mod config;
pub mod error;
pub mod generation;
pub mod wardrobe;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::asset::ImageAsset;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::generation::{GeminiClient, Studio};
}
