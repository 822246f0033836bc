//! Wire types shared by the proxy routes and the client.
//!
//! DESIGN
//! ======
//! The image options are closed enums so a form can never hold a value the
//! server would reject. Both serialize as the plain strings the HTTP contract
//! uses (`"2"`, `"512x512"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::llm::types::Message;

// =============================================================================
// FEATURES
// =============================================================================

/// A proxied feature. Each one owns a single `POST` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Conversation,
    Code,
    Image,
}

impl Feature {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Conversation => "/api/conversation",
            Self::Code => "/api/code",
            Self::Image => "/api/image",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Conversation => "conversation",
            Self::Code => "code",
            Self::Image => "image",
        }
    }

    /// Marker attached to failure logs so errors can be grepped per feature.
    #[must_use]
    pub fn error_marker(self) -> &'static str {
        match self {
            Self::Conversation => "CONVERSATION_ERROR",
            Self::Code => "CODE_ERROR",
            Self::Image => "IMAGE_ERROR",
        }
    }
}

/// The chat-style subset of [`Feature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatFeature {
    Conversation,
    Code,
}

impl From<ChatFeature> for Feature {
    fn from(feature: ChatFeature) -> Self {
        match feature {
            ChatFeature::Conversation => Self::Conversation,
            ChatFeature::Code => Self::Code,
        }
    }
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// Body of `POST /api/conversation` and `POST /api/code`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub messages: &'a [Message],
}

/// Body of `POST /api/image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub amount: Amount,
    pub resolution: Resolution,
}

// =============================================================================
// IMAGE OPTIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported {field} '{value}'")]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
}

/// Number of images to generate per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Amount {
    #[default]
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
}

impl Amount {
    pub const ALL: [Self; 5] = [Self::One, Self::Two, Self::Three, Self::Four, Self::Five];

    #[must_use]
    pub fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
        }
    }

    /// Human label shown next to the option (`"2 Photos"`).
    #[must_use]
    pub fn label(self) -> String {
        if self == Self::One { "1 Photo".to_owned() } else { format!("{} Photos", self.count()) }
    }
}

impl FromStr for Amount {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == raw.trim())
            .ok_or_else(|| UnknownOption { field: "amount", value: raw.to_owned() })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Square output size of a generated image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "256x256")]
    Small,
    #[default]
    #[serde(rename = "512x512")]
    Medium,
    #[serde(rename = "1024x1024")]
    Large,
}

impl Resolution {
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "256x256",
            Self::Medium => "512x512",
            Self::Large => "1024x1024",
        }
    }
}

impl FromStr for Resolution {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == raw.trim())
            .ok_or_else(|| UnknownOption { field: "resolution", value: raw.to_owned() })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
