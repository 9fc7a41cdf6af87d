//! Remote generation capability
//!
//! The remote service is modeled as a single-operation interface so the
//! generation pipeline can run against a mock in tests instead of the
//! network-bound client.

use async_trait::async_trait;

use crate::error::Result;

use super::types::{GenerateContentResponse, Modality, Part};

/// One logical remote operation: generate content from ordered parts
#[async_trait]
pub trait GenerateContentApi: Send + Sync {
    /// Send the ordered parts with a modality preference and return the raw
    /// response. One sequential exchange per call; no shared state.
    async fn generate(
        &self,
        parts: Vec<Part>,
        modalities: &[Modality],
    ) -> Result<GenerateContentResponse>;
}
