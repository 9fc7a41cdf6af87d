//! Prompt templates
//!
//! Each generation task maps to exactly one fixed instruction template. Every
//! template ends by demanding that only the final image is returned — the
//! response parser relies on this when it treats "an image part exists" as
//! success.

use crate::wardrobe::WardrobeCategory;

const MODEL_SHOT_PROMPT: &str = "You are an expert fashion photographer AI. Transform the person in this image into a full-body fashion model photo suitable for an e-commerce website. The background must be a clean, neutral studio backdrop (light gray, #f0f0f0). The person should have a neutral, professional model expression. Preserve the person's identity, unique features, and body type, but place them in a standard, relaxed standing model pose. The final image must be photorealistic. Return ONLY the final image.";

const GARMENT_TRY_ON_PROMPT: &str = "You are an expert virtual try-on AI. You will be given a 'model image' and a 'garment image'. Your task is to create a new photorealistic image where the person from the 'model image' is wearing the clothing from the 'garment image'.

**Crucial Rules:**
1.  **Complete Garment Replacement:** You MUST completely REMOVE and REPLACE the clothing item worn by the person in the 'model image' with the new garment. No part of the original clothing (e.g., collars, sleeves, patterns) should be visible in the final image.
2.  **Preserve the Model:** The person's face, hair, body shape, and pose from the 'model image' MUST remain unchanged.
3.  **Preserve the Background:** The entire background from the 'model image' MUST be preserved perfectly.
4.  **Apply the Garment:** Realistically fit the new garment onto the person. It should adapt to their pose with natural folds, shadows, and lighting consistent with the original scene.
5.  **Output:** Return ONLY the final, edited image. Do not include any text.";

const ACCESSORY_TRY_ON_PROMPT: &str = "You are an expert virtual try-on AI. You will be given a 'model image' and a 'garment image' (which is an accessory). Your task is to create a new photorealistic image where the person from the 'model image' is wearing the accessory from the 'garment image'.

**Crucial Rules:**
1.  **ADD, DO NOT REPLACE:** You MUST ADD the accessory to the person. Do NOT remove or replace any clothing they are already wearing.
2.  **Preserve the Model:** The person's face, hair, body shape, and pose from the 'model image' MUST remain unchanged, except where the accessory naturally covers them.
3.  **Preserve the Background:** The entire background from the 'model image' MUST be preserved perfectly.
4.  **Apply the Accessory:** Realistically fit the accessory onto the person (e.g., a hat on the head, glasses on the face). It should have natural shadows and lighting consistent with the original scene.
5.  **Output:** Return ONLY the final, edited image. Do not include any text.";

/// A generation request kind, mapping to exactly one instruction template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationTask {
    /// Standardize a user photo into a studio model shot
    ModelShot,
    /// Replace the model's clothing with a new garment
    GarmentTryOn,
    /// Add an accessory without removing existing clothing
    AccessoryTryOn,
    /// Re-render an existing shot from a new stated perspective
    PoseVariation { perspective: String },
    /// Swap the backdrop while preserving the subject
    BackgroundReplacement { backdrop: String },
}

impl GenerationTask {
    /// Select the try-on task for a wardrobe category
    pub fn try_on(category: WardrobeCategory) -> Self {
        match category {
            WardrobeCategory::Garment => Self::GarmentTryOn,
            WardrobeCategory::Accessory => Self::AccessoryTryOn,
        }
    }

    /// The instruction string sent to the remote model
    pub fn instruction(&self) -> String {
        match self {
            Self::ModelShot => MODEL_SHOT_PROMPT.to_string(),
            Self::GarmentTryOn => GARMENT_TRY_ON_PROMPT.to_string(),
            Self::AccessoryTryOn => ACCESSORY_TRY_ON_PROMPT.to_string(),
            Self::PoseVariation { perspective } => format!(
                "You are an expert fashion photographer AI. Take this image and regenerate it from a different perspective. The person, clothing, and background style must remain identical. The new perspective should be: \"{}\". Return ONLY the final image.",
                perspective
            ),
            Self::BackgroundReplacement { backdrop } => format!(
                "You are an expert photo editor AI. You will be given an image of a person. Your task is to meticulously replace the background of the image.

**Crucial Rules:**
1.  **New Background:** The new background must be: \"{}\".
2.  **Preserve Subject:** The person, their pose, their clothing, and any items they are holding MUST remain completely unchanged. Do not alter the subject in any way.
3.  **Realism:** The lighting, shadows, and reflections on the person must be realistically adjusted to match the new background.
4.  **Output:** Return ONLY the final, edited image. Do not include any text or explanations.",
                backdrop
            ),
        }
    }
}

/// Named backdrop preset
#[derive(Debug, Clone, Copy)]
pub struct BackgroundPreset {
    /// Display name
    pub name: &'static str,
    /// Instruction text fed to the background replacement task
    pub instruction: &'static str,
}

/// Built-in backdrop instructions
pub const BACKGROUND_PRESETS: &[BackgroundPreset] = &[
    BackgroundPreset {
        name: "Studio",
        instruction: "a clean, neutral studio backdrop (light gray, #f0f0f0)",
    },
    BackgroundPreset {
        name: "Outdoor",
        instruction: "a bright, slightly blurred outdoor city street scene with natural lighting",
    },
    BackgroundPreset {
        name: "Gradient",
        instruction: "a simple, clean color gradient background transitioning from a soft sky blue at the top to white at the bottom",
    },
];

/// Built-in pose perspectives for pose variation
pub const POSE_PRESETS: &[&str] = &[
    "Full frontal view, hands on hips",
    "Slightly turned, 3/4 view",
    "Side profile view",
    "Walking towards camera",
    "Leaning against a wall",
];
