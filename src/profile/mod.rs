//! Provider profiles and their constant tables.
//!
//! A [`Profile`] selects the weight table the weighted estimator scores
//! with. Profiles are a small closed set, so resolution is a plain match
//! over caller hints:
//!
//! 1. an explicit profile (anything but [`Profile::Auto`])
//! 2. the provider type (`anthropic`, `google`, `openai`, ...)
//! 3. the model name (`claude-*`, `gemini-*`)
//! 4. [`Profile::OpenAI`]
//!
//! # Example
//!
//! ```
//! use tokenest::profile::{resolve_profile, Profile};
//!
//! assert_eq!(resolve_profile(Profile::Auto, "Anthropic", ""), Profile::Claude);
//! assert_eq!(resolve_profile(Profile::Auto, "", "gemini-1.5-pro"), Profile::Gemini);
//! assert_eq!(resolve_profile(Profile::Auto, "", "qwen-2.5"), Profile::OpenAI);
//! assert_eq!(resolve_profile(Profile::Gemini, "anthropic", ""), Profile::Gemini);
//! ```

mod weights;
mod zr;

use serde::{Deserialize, Serialize};

use crate::error::TokenestError;

pub use weights::{
    Category, WeightProfile, CLAUDE_WEIGHTS, GEMINI_WEIGHTS, OPENAI_WEIGHTS, WEIGHT_TABLE_VERSION,
};
pub use zr::{
    ZrCategory, ZrCoefficients, ZrConfig, ZrConfigDocument, ZrThresholds, ZR_CONFIG, ZR_FEATURES,
};

/// Weight profile approximating one provider's tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Resolve from provider type and model hints
    #[default]
    Auto,
    /// OpenAI tokenizers (default fallback)
    OpenAI,
    /// Anthropic Claude
    Claude,
    /// Google Gemini
    Gemini,
}

impl Profile {
    /// Lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Profile::Auto => "auto",
            Profile::OpenAI => "openai",
            Profile::Claude => "claude",
            Profile::Gemini => "gemini",
        }
    }

    /// Weight table for this profile ([`Profile::Auto`] uses OpenAI's)
    pub fn weights(&self) -> &'static WeightProfile {
        match self {
            Profile::Claude => &CLAUDE_WEIGHTS,
            Profile::Gemini => &GEMINI_WEIGHTS,
            Profile::Auto | Profile::OpenAI => &OPENAI_WEIGHTS,
        }
    }

    /// Concrete profiles, excluding [`Profile::Auto`]
    pub fn all() -> &'static [Profile] {
        &[Profile::OpenAI, Profile::Claude, Profile::Gemini]
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Profile {
    type Err = TokenestError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "openai" | "gpt" => Ok(Self::OpenAI),
            "claude" | "anthropic" => Ok(Self::Claude),
            "gemini" | "google" => Ok(Self::Gemini),
            _ => Err(TokenestError::InvalidProfile(s.to_string())),
        }
    }
}

/// Resolve the profile to score with. Never returns [`Profile::Auto`].
pub fn resolve_profile(profile: Profile, provider_type: &str, model: &str) -> Profile {
    if profile != Profile::Auto {
        return profile;
    }

    let provider = provider_type.trim().to_lowercase();
    if provider == "anthropic" || provider.contains("claude") {
        return Profile::Claude;
    }
    if provider == "gemini" || provider == "google" || provider.contains("gemini") {
        return Profile::Gemini;
    }
    if provider == "openai" || provider.contains("openai") {
        return Profile::OpenAI;
    }

    let model = model.trim().to_lowercase();
    if model.contains("claude") {
        Profile::Claude
    } else if model.contains("gemini") {
        Profile::Gemini
    } else {
        Profile::OpenAI
    }
}
