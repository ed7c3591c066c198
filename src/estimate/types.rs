//! Estimation options and result types.

use serde::{Deserialize, Serialize};

use crate::error::TokenestError;
use crate::profile::{resolve_profile, Profile};

/// Estimation algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// UltraFast for raw bytes, Fast for text
    #[default]
    Auto,
    /// `ceil(len / 4)` over bytes
    UltraFast,
    /// Head/middle/tail density sample
    Fast,
    /// Segment categories scored with profile weights
    Weighted,
    /// Categorical regression over base units
    Zr,
}

impl Strategy {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Auto => "auto",
            Strategy::UltraFast => "ultrafast",
            Strategy::Fast => "fast",
            Strategy::Weighted => "weighted",
            Strategy::Zr => "ZR",
        }
    }

    /// Concrete strategies, excluding [`Strategy::Auto`]
    pub fn all() -> &'static [Strategy] {
        &[
            Strategy::UltraFast,
            Strategy::Fast,
            Strategy::Weighted,
            Strategy::Zr,
        ]
    }

    /// Replace [`Strategy::Auto`] with `fallback`
    pub fn or(self, fallback: Strategy) -> Strategy {
        if self == Strategy::Auto {
            fallback
        } else {
            self
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Strategy {
    type Err = TokenestError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "ultrafast" | "ultra-fast" | "ultra_fast" => Ok(Self::UltraFast),
            "fast" => Ok(Self::Fast),
            "weighted" => Ok(Self::Weighted),
            "zr" => Ok(Self::Zr),
            _ => Err(TokenestError::InvalidStrategy(s.to_string())),
        }
    }
}

/// Per-call estimation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Algorithm to run
    pub strategy: Strategy,
    /// Weight profile (Weighted only)
    pub profile: Profile,
    /// Model name hint for profile resolution
    pub model: String,
    /// Provider hint for profile resolution
    pub provider_type: String,
    /// Final multiplier; values ≤ 0, non-finite, or exactly 1 leave the count unchanged
    pub multiplier: f64,
    /// Return a per-category breakdown
    pub explain: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            profile: Profile::Auto,
            model: String::new(),
            provider_type: String::new(),
            multiplier: 1.0,
            explain: false,
        }
    }
}

impl Options {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set an explicit profile
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the model hint
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the provider hint
    pub fn with_provider_type(mut self, provider_type: impl Into<String>) -> Self {
        self.provider_type = provider_type.into();
        self
    }

    /// Set the global multiplier
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Request a breakdown
    pub fn with_explain(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }

    /// Profile after applying provider and model hints
    pub fn resolved_profile(&self) -> Profile {
        resolve_profile(self.profile, &self.provider_type, &self.model)
    }
}

/// Images attached to a request, by detail level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageCounts {
    /// Low-detail images
    pub low_detail: usize,
    /// High-detail images
    pub high_detail: usize,
    /// Images with unknown detail
    pub unknown: usize,
}

impl ImageCounts {
    /// Total images, saturating at `usize::MAX`
    pub fn total(&self) -> usize {
        self.low_detail
            .saturating_add(self.high_detail)
            .saturating_add(self.unknown)
    }
}

/// One term of an explained estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    /// Category tag (`word`, `emoji`, `zr_base`, ...)
    pub category: &'static str,
    /// Units counted for the category
    pub base_units: f64,
    /// Multiplier applied to the units
    pub weight: f64,
    /// `base_units * weight`, before rounding
    pub tokens: f64,
}

impl CategoryBreakdown {
    /// Build an entry, computing its contribution
    pub fn new(category: &'static str, base_units: f64, weight: f64) -> Self {
        Self {
            category,
            base_units,
            weight,
            tokens: base_units * weight,
        }
    }
}

/// Result of one estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    /// Estimated token count
    pub tokens: usize,
    /// Strategy that ran (never [`Strategy::Auto`])
    pub strategy: Strategy,
    /// Resolved profile (never [`Profile::Auto`])
    pub profile: Profile,
    /// Per-category terms, present only when explain was requested
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<CategoryBreakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(Strategy::from_str("ZR").unwrap(), Strategy::Zr);
        assert_eq!(Strategy::from_str("ultra-fast").unwrap(), Strategy::UltraFast);
        assert_eq!(Strategy::from_str(" Weighted ").unwrap(), Strategy::Weighted);
        assert!(matches!(
            Strategy::from_str("exact"),
            Err(TokenestError::InvalidStrategy(_))
        ));
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Strategy::Zr.to_string(), "ZR");
        assert_eq!(serde_json::to_string(&Strategy::Zr).unwrap(), "\"zr\"");
        assert_eq!(Strategy::Auto.or(Strategy::Fast), Strategy::Fast);
        assert_eq!(Strategy::Zr.or(Strategy::Fast), Strategy::Zr);
    }

    #[test]
    fn test_options_defaults_and_builder() {
        let opts = Options::default();
        assert_eq!(opts.multiplier, 1.0);
        assert_eq!(opts.resolved_profile(), Profile::OpenAI);

        let opts = Options::new()
            .with_strategy(Strategy::Weighted)
            .with_model("claude-3-haiku")
            .with_explain(true);
        assert_eq!(opts.resolved_profile(), Profile::Claude);
        assert!(opts.explain);
    }

    #[test]
    fn test_options_partial_deserialize() {
        let opts: Options = serde_json::from_str(r#"{"strategy": "weighted"}"#).unwrap();
        assert_eq!(opts.strategy, Strategy::Weighted);
        assert_eq!(opts.multiplier, 1.0);
    }

    #[test]
    fn test_image_total() {
        let images = ImageCounts {
            low_detail: 1,
            high_detail: 2,
            unknown: 3,
        };
        assert_eq!(images.total(), 6);

        let huge = ImageCounts {
            low_detail: usize::MAX,
            high_detail: 1,
            unknown: 1,
        };
        assert_eq!(huge.total(), usize::MAX);
    }

    #[test]
    fn test_estimate_serialization_skips_empty_breakdown() {
        let estimate = Estimate {
            tokens: 3,
            strategy: Strategy::Fast,
            profile: Profile::OpenAI,
            breakdown: Vec::new(),
        };
        let json = serde_json::to_value(&estimate).unwrap();
        assert_eq!(json["tokens"], 3);
        assert_eq!(json["strategy"], "fast");
        assert!(json.get("breakdown").is_none());
    }
}
