//! Response parsing
//!
//! Turns a raw generateContent response into a data-URI image or a typed
//! failure. Ordering matters: explicit blocks are reported before silent
//! omissions, and any diagnostic text the model returned is surfaced rather
//! than swallowed.

use crate::error::{Error, Result};

use super::types::{FinishReason, GenerateContentResponse};

/// Extract the generated image from a response as a data URI
pub fn extract_image(response: &GenerateContentResponse) -> Result<String> {
    if let Some(feedback) = &response.prompt_feedback
        && let Some(reason) = &feedback.block_reason
    {
        return Err(Error::BlockedRequest {
            reason: reason.clone(),
            message: feedback.block_reason_message.clone(),
        });
    }

    // First inline image part in any candidate wins
    for candidate in &response.candidates {
        if let Some(content) = &candidate.content {
            for part in &content.parts {
                if let Some(inline) = &part.inline_data {
                    return Ok(format!("data:{};base64,{}", inline.mime_type, inline.data));
                }
            }
        }
    }

    if let Some(reason) = response.candidates.first().and_then(|c| c.finish_reason)
        && reason != FinishReason::Stop
    {
        return Err(Error::GenerationHalted(reason.to_string()));
    }

    let detail = match response.aggregated_text() {
        Some(text) => format!("The model responded with text: \"{}\"", text),
        None => "This can happen due to safety filters or if the request is too complex. \
                 Please try a different image."
            .to_string(),
    };
    Err(Error::NoImageReturned(detail))
}
