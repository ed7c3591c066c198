//! # tokenest - LLM token estimation without a tokenizer
//!
//! Fast, allocation-light approximations of how many tokens a text or raw
//! request payload will consume, for preflight quota checks and for usage
//! accounting when a provider does not report exact counts.
//!
//! ## Features
//!
//! - **Four strategies**: constant-time bytes, sampled density, segment
//!   weighting, and a categorical regression
//! - **Provider profiles**: OpenAI, Claude and Gemini weight tables, resolved
//!   from explicit choice, provider type, or model name
//! - **Request overhead**: image and per-message costs for whole requests
//! - **Optional LRU cache**: decorator over any [`Estimator`]
//! - **Infallible**: empty input, invalid UTF-8 and odd options still produce
//!   an [`Estimate`]
//!
//! ## Pipeline
//!
//! ```text
//!   payload ──> Strategy (Auto resolved per entry point)
//!                 │
//!                 ├─ UltraFast: ceil(len / 4)
//!                 ├─ Fast:      sample ─> density ─> divisor
//!                 ├─ Weighted:  segment ─> classify ─> tally ─> profile weights
//!                 └─ ZR:        segment ─> base units + stats ─> category ─> regression
//!                 │
//!               multiplier (once) ──> Estimate
//! ```
//!
//! ## Strategies
//!
//! | Strategy  | Cost            | Auto for        | Breakdown |
//! |-----------|-----------------|-----------------|-----------|
//! | UltraFast | O(1)            | `estimate_bytes`| no        |
//! | Fast      | O(min(n, 1000)) | `estimate_text` | no        |
//! | Weighted  | O(n)            |                 | yes       |
//! | ZR        | O(n)            |                 | yes       |
//!
//! ## Quick Start
//!
//! ```
//! use tokenest::{estimate_text, Options, Profile, Strategy};
//!
//! let opts = Options::new()
//!     .with_strategy(Strategy::Weighted)
//!     .with_model("claude-3-5-sonnet")
//!     .with_explain(true);
//!
//! let estimate = estimate_text("Hello, 世界! 👋", &opts);
//! assert_eq!(estimate.profile, Profile::Claude);
//! assert!(estimate.tokens > 0);
//! assert!(!estimate.breakdown.is_empty());
//! ```
//!
//! ### Caching
//!
//! ```
//! use tokenest::{with_cache, DefaultEstimator, Estimator, Options};
//!
//! let estimator = with_cache(DefaultEstimator::new(), 4096);
//! let body = r#"{"messages":[{"role":"user","content":"hi"}]}"#.repeat(20);
//! let estimate = estimator.estimate_bytes(body.as_bytes(), &Options::default());
//! assert!(estimate.tokens > 0);
//! ```
//!
//! ## Modules
//!
//! - [`estimate`]: public API, options and results
//! - [`strategy`]: the four estimation algorithms
//! - [`text`]: classification, segmentation and base-unit rules
//! - [`profile`]: profiles, weight tables and ZR tables
//! - [`cache`]: LRU decorator
//! - [`config`]: configuration management
//! - [`reference`]: accuracy comparison against tiktoken
//! - [`error`]: error types and result aliases

pub mod cache;
pub mod config;
pub mod error;
pub mod estimate;
pub mod profile;
pub mod reference;
pub mod strategy;
pub mod text;

// Re-exports for convenience
pub use cache::{with_cache, CacheStats, CachedEstimator};
pub use config::Config;
pub use error::{Result, TokenestError};
pub use estimate::{
    apply_multiplier, estimate_bytes, estimate_input, estimate_output, estimate_text,
    CategoryBreakdown, DefaultEstimator, Estimate, Estimator, ImageCounts, Options, Strategy,
};
pub use profile::{resolve_profile, Profile};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
