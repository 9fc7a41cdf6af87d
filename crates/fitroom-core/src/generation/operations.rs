//! Generation operations
//!
//! The four public operations share one skeleton: encode inputs, build the
//! task instruction, invoke the remote model with the image part(s) plus the
//! prompt text, parse the response. Each call is one sequential awaited
//! exchange; the studio holds no mutable state, so callers may run
//! operations concurrently.

use std::sync::Arc;

use tracing::{debug, info};

use crate::asset::ImageAsset;
use crate::error::Result;
use crate::wardrobe::WardrobeCategory;

use super::api::GenerateContentApi;
use super::parser;
use super::prompt::GenerationTask;
use super::types::{Modality, Part};

/// Both modalities are requested so diagnostic text is available when the
/// model declines to produce an image.
const RESPONSE_MODALITIES: &[Modality] = &[Modality::Image, Modality::Text];

/// Virtual try-on studio over an injected remote generation capability
#[derive(Clone)]
pub struct Studio {
    api: Arc<dyn GenerateContentApi>,
}

impl Studio {
    /// Create a studio over the given remote capability
    pub fn new(api: Arc<dyn GenerateContentApi>) -> Self {
        Self { api }
    }

    /// Turn a user photo into a standardized full-body model shot
    pub async fn generate_model_shot(&self, user_photo: &ImageAsset) -> Result<String> {
        info!(media_type = %user_photo.media_type(), "Generating model shot");
        self.run(GenerationTask::ModelShot, &[user_photo]).await
    }

    /// Render the model wearing a garment or accessory
    ///
    /// The model image comes first, then the item image; the category picks
    /// the replacement or addition instruction.
    pub async fn generate_try_on(
        &self,
        model_image: &ImageAsset,
        garment_image: &ImageAsset,
        category: WardrobeCategory,
    ) -> Result<String> {
        info!(category = %category, "Generating try-on");
        self.run(
            GenerationTask::try_on(category),
            &[model_image, garment_image],
        )
        .await
    }

    /// Re-render an existing shot from a different stated perspective
    pub async fn generate_pose_variation(
        &self,
        base_image: &ImageAsset,
        pose_instruction: &str,
    ) -> Result<String> {
        info!(pose = %pose_instruction, "Generating pose variation");
        self.run(
            GenerationTask::PoseVariation {
                perspective: pose_instruction.to_string(),
            },
            &[base_image],
        )
        .await
    }

    /// Replace the backdrop while keeping the subject unchanged
    pub async fn generate_background(
        &self,
        base_image: &ImageAsset,
        background_instruction: &str,
    ) -> Result<String> {
        info!(backdrop = %background_instruction, "Generating background replacement");
        self.run(
            GenerationTask::BackgroundReplacement {
                backdrop: background_instruction.to_string(),
            },
            &[base_image],
        )
        .await
    }

    /// Shared skeleton: image parts in order, then the instruction text
    async fn run(&self, task: GenerationTask, images: &[&ImageAsset]) -> Result<String> {
        let mut parts: Vec<Part> = images.iter().map(|asset| Part::from(*asset)).collect();
        parts.push(Part::text(task.instruction()));

        let response = self.api.generate(parts, RESPONSE_MODALITIES).await?;

        debug!(
            candidates = response.candidates.len(),
            "Parsing generation response"
        );
        parser::extract_image(&response)
    }
}
