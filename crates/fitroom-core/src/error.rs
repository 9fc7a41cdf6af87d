//! Error types for Fitroom

use thiserror::Error;

/// Result type alias using Fitroom's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Fitroom error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Asset errors (E001-E099)
    #[error("Invalid image data: {0}")]
    MalformedAsset(String),

    // Network errors (E100-E199)
    #[error("Network error: {0}. Check your internet connection.")]
    Network(#[from] reqwest::Error),

    #[error(
        "API key missing or rejected. Set the FITROOM_API_KEY or GEMINI_API_KEY environment variable."
    )]
    ApiKeyMissing,

    #[error("Generation API error: {0}")]
    Api(String),

    #[error("Rate limited. Retry after {0} seconds.")]
    RateLimited(u64),

    // Generation errors (E200-E299)
    #[error("Request was blocked. Reason: {reason}. {}", .message.as_deref().unwrap_or_default())]
    BlockedRequest {
        reason: String,
        message: Option<String>,
    },

    #[error(
        "Image generation stopped unexpectedly. Reason: {0}. This often relates to safety settings."
    )]
    GenerationHalted(String),

    #[error("The model did not return an image. {0}")]
    NoImageReturned(String),

    // Wardrobe errors (E300-E399)
    #[error("Wardrobe item '{0}' not found. Run `fitroom wardrobe list` to see all items.")]
    WardrobeItemNotFound(String),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    Config(String),

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedAsset(_) => "E001",
            Self::Network(_) => "E100",
            Self::ApiKeyMissing => "E101",
            Self::Api(_) => "E102",
            Self::RateLimited(_) => "E103",
            Self::BlockedRequest { .. } => "E200",
            Self::GenerationHalted(_) => "E201",
            Self::NoImageReturned(_) => "E202",
            Self::WardrobeItemNotFound(_) => "E300",
            Self::Config(_) => "E600",
            Self::InvalidInput(_) => "E800",
            Self::Io(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Network(_) => Some("Check internet connection".to_string()),
            Self::ApiKeyMissing => {
                Some("Set FITROOM_API_KEY or GEMINI_API_KEY in the environment".to_string())
            }
            Self::BlockedRequest { .. } | Self::NoImageReturned(_) => {
                Some("Try a different photo".to_string())
            }
            Self::WardrobeItemNotFound(_) => Some("fitroom wardrobe list".to_string()),
            Self::Config(_) => Some("fitroom config list".to_string()),
            _ => None,
        }
    }
}
