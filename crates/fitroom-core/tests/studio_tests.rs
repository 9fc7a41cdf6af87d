//! Studio integration tests
//!
//! Drive the four generation operations end-to-end against a mock remote
//! capability that records every call.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fitroom_core::asset::ImageAsset;
use fitroom_core::error::{Error, Result};
use fitroom_core::generation::{
    Candidate, Content, FinishReason, GenerateContentApi, GenerateContentResponse, Modality, Part,
    PromptFeedback, Studio,
};
use fitroom_core::wardrobe::WardrobeCategory;

/// Recorded invocation of the mock API
struct RecordedCall {
    parts: Vec<Part>,
    modalities: Vec<Modality>,
}

/// Mock remote capability returning a canned response
struct MockApi {
    response: GenerateContentResponse,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockApi {
    fn new(response: GenerateContentResponse) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn returning_image(mime_type: &str, data: &str) -> Arc<Self> {
        Self::new(GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    parts: vec![Part::inline_image(mime_type, data)],
                }),
                finish_reason: Some(FinishReason::Stop),
            }],
            prompt_feedback: None,
        })
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn last_prompt(&self) -> String {
        let calls = self.calls.lock().unwrap();
        let call = calls.last().expect("no calls recorded");
        call.parts
            .iter()
            .filter_map(|p| p.text.clone())
            .next_back()
            .expect("no text part in request")
    }
}

#[async_trait]
impl GenerateContentApi for MockApi {
    async fn generate(
        &self,
        parts: Vec<Part>,
        modalities: &[Modality],
    ) -> Result<GenerateContentResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            parts,
            modalities: modalities.to_vec(),
        });
        Ok(self.response.clone())
    }
}

fn png_asset() -> ImageAsset {
    ImageAsset::new("image/png", "iVBORw0KGgo=")
}

fn webp_asset() -> ImageAsset {
    ImageAsset::new("image/webp", "UklGRg==")
}

#[tokio::test]
async fn model_shot_returns_data_uri_and_sends_one_image_part() {
    let api = MockApi::returning_image("image/png", "R0lGOD");
    let studio = Studio::new(api.clone());

    let result = studio.generate_model_shot(&png_asset()).await.unwrap();
    assert_eq!(result, "data:image/png;base64,R0lGOD");

    let calls = api.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];

    // One image part followed by the instruction text
    assert_eq!(call.parts.len(), 2);
    assert!(call.parts[0].inline_data.is_some());
    assert!(call.parts[1].text.is_some());

    // Both modalities are always requested
    assert_eq!(call.modalities, vec![Modality::Image, Modality::Text]);
}

#[tokio::test]
async fn try_on_sends_model_image_first_then_garment() {
    let api = MockApi::returning_image("image/png", "AAAA");
    let studio = Studio::new(api.clone());

    studio
        .generate_try_on(&png_asset(), &webp_asset(), WardrobeCategory::Garment)
        .await
        .unwrap();

    let calls = api.calls.lock().unwrap();
    let parts = &calls[0].parts;
    assert_eq!(parts.len(), 3);
    assert_eq!(
        parts[0].inline_data.as_ref().unwrap().mime_type,
        "image/png"
    );
    assert_eq!(
        parts[1].inline_data.as_ref().unwrap().mime_type,
        "image/webp"
    );
    assert!(parts[2].text.is_some());
}

#[tokio::test]
async fn try_on_selects_instruction_by_category() {
    let garment_api = MockApi::returning_image("image/png", "AAAA");
    let studio = Studio::new(garment_api.clone());
    studio
        .generate_try_on(&png_asset(), &webp_asset(), WardrobeCategory::Garment)
        .await
        .unwrap();
    let garment_prompt = garment_api.last_prompt();

    let accessory_api = MockApi::returning_image("image/png", "AAAA");
    let studio = Studio::new(accessory_api.clone());
    studio
        .generate_try_on(&png_asset(), &webp_asset(), WardrobeCategory::Accessory)
        .await
        .unwrap();
    let accessory_prompt = accessory_api.last_prompt();

    assert_ne!(garment_prompt, accessory_prompt);
    assert!(garment_prompt.contains("REMOVE and REPLACE"));
    assert!(accessory_prompt.contains("ADD, DO NOT REPLACE"));
}

#[tokio::test]
async fn pose_and_background_embed_the_instruction() {
    let api = MockApi::returning_image("image/png", "AAAA");
    let studio = Studio::new(api.clone());

    studio
        .generate_pose_variation(&png_asset(), "Side profile view")
        .await
        .unwrap();
    assert!(api.last_prompt().contains("\"Side profile view\""));

    studio
        .generate_background(&png_asset(), "a beach at sunset")
        .await
        .unwrap();
    assert!(api.last_prompt().contains("\"a beach at sunset\""));
}

#[tokio::test]
async fn generated_payload_is_preserved_byte_for_byte() {
    let api = MockApi::returning_image("image/webp", "UklGRiQAAABXRUJQ");
    let studio = Studio::new(api);

    let result = studio.generate_model_shot(&png_asset()).await.unwrap();
    let asset = ImageAsset::from_data_uri(&result).unwrap();
    assert_eq!(asset.media_type(), "image/webp");
    assert_eq!(asset.payload(), "UklGRiQAAABXRUJQ");
}

#[tokio::test]
async fn block_indication_beats_image_parts() {
    let api = MockApi::new(GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                parts: vec![Part::inline_image("image/png", "AAAA")],
            }),
            finish_reason: Some(FinishReason::Stop),
        }],
        prompt_feedback: Some(PromptFeedback {
            block_reason: Some("PROHIBITED_CONTENT".to_string()),
            block_reason_message: None,
        }),
    });
    let studio = Studio::new(api);

    let err = studio.generate_model_shot(&png_asset()).await.unwrap_err();
    match err {
        Error::BlockedRequest { reason, .. } => assert_eq!(reason, "PROHIBITED_CONTENT"),
        other => panic!("expected BlockedRequest, got {:?}", other),
    }
}

#[tokio::test]
async fn halted_generation_carries_finish_reason() {
    let api = MockApi::new(GenerateContentResponse {
        candidates: vec![Candidate {
            content: None,
            finish_reason: Some(FinishReason::ImageSafety),
        }],
        prompt_feedback: None,
    });
    let studio = Studio::new(api);

    let err = studio
        .generate_background(&png_asset(), "a volcano")
        .await
        .unwrap_err();
    match err {
        Error::GenerationHalted(reason) => assert_eq!(reason, "IMAGE_SAFETY"),
        other => panic!("expected GenerationHalted, got {:?}", other),
    }
}

#[tokio::test]
async fn text_only_response_surfaces_the_text() {
    let api = MockApi::new(GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                parts: vec![Part::text("try a clearer photo")],
            }),
            finish_reason: Some(FinishReason::Stop),
        }],
        prompt_feedback: None,
    });
    let studio = Studio::new(api);

    let err = studio.generate_model_shot(&png_asset()).await.unwrap_err();
    match err {
        Error::NoImageReturned(detail) => assert!(detail.contains("try a clearer photo")),
        other => panic!("expected NoImageReturned, got {:?}", other),
    }
}

#[tokio::test]
async fn image_in_later_candidate_is_still_found() {
    let api = MockApi::new(GenerateContentResponse {
        candidates: vec![
            Candidate {
                content: Some(Content {
                    parts: vec![Part::text("first candidate had no image")],
                }),
                finish_reason: Some(FinishReason::Stop),
            },
            Candidate {
                content: Some(Content {
                    parts: vec![Part::inline_image("image/png", "ZZZZ")],
                }),
                finish_reason: Some(FinishReason::Stop),
            },
        ],
        prompt_feedback: None,
    });
    let studio = Studio::new(api);

    let result = studio.generate_model_shot(&png_asset()).await.unwrap();
    assert_eq!(result, "data:image/png;base64,ZZZZ");
}

#[tokio::test]
async fn malformed_asset_fails_before_any_network_call() {
    let api = MockApi::returning_image("image/png", "AAAA");

    // Parsing fails on the way in, so the remote capability is never invoked
    let parse_result = ImageAsset::from_data_uri("not-a-data-uri");
    assert!(matches!(parse_result, Err(Error::MalformedAsset(_))));
    assert_eq!(api.call_count(), 0);
}
