//! Text generation behind an injectable seam.
//!
//! The planner only sees [`TextGenerator`]. Production wires in
//! [`GroqGenerator`]; a server started without an API key gets
//! [`DisabledGenerator`]; tests supply their own stubs.

use async_trait::async_trait;

use crate::error::{Result, TravelError};

pub mod groq;
pub mod prompts;

pub use groq::{GroqConfig, GroqGenerator};
pub use prompts::{ActivitySuggestion, CityInfo, SuggestionList};

/// One chat-style completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Instructions sent as the system message
    pub system: String,
    /// The user message
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Produces free text for a prompt.
///
/// Implementations make a single attempt; a transport or API failure is
/// reported as [`TravelError::Generation`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Human-readable name of the backend, used in logs.
    fn name(&self) -> &str;

    /// Returns the generated text for `request`.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// Generator used when no API key is configured. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
        Err(TravelError::generation(
            "text generation is not configured (set GROQ_API_KEY)",
        ))
    }
}
