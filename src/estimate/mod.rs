//! Public estimation API.
//!
//! Every entry point resolves `Auto` choices, dispatches to one strategy,
//! then applies the global multiplier exactly once. Nothing here can fail:
//! empty input, invalid UTF-8 and odd multipliers all produce an [`Estimate`].
//!
//! # Example
//!
//! ```
//! use tokenest::{estimate_input, estimate_text, ImageCounts, Options, Strategy};
//!
//! let opts = Options::new().with_strategy(Strategy::UltraFast);
//! assert_eq!(estimate_text("hello", &opts).tokens, 2);
//!
//! // text + one low-detail image + base overhead + two messages
//! let images = ImageCounts { low_detail: 1, ..Default::default() };
//! assert_eq!(estimate_input("hello", images, 2, &opts).tokens, 145);
//! ```

mod types;

pub use types::{CategoryBreakdown, Estimate, ImageCounts, Options, Strategy};

use crate::profile::ZR_CONFIG;
use crate::strategy::{ceil_tokens, fast, ultrafast, weighted, zr, Scored};

/// Fixed cost of a request: role tokens, separators, JSON framing
pub const BASE_OVERHEAD: usize = 50;

/// Formatting cost per message
pub const PER_MESSAGE_OVERHEAD: usize = 4;

/// Low-detail image cost
pub const IMAGE_TOKENS_LOW: usize = 85;

/// High-detail image cost
pub const IMAGE_TOKENS_HIGH: usize = 765;

/// Cost of an image with unknown detail
pub const IMAGE_TOKENS_DEFAULT: usize = 500;

/// Token estimation interface, implemented by [`DefaultEstimator`] and
/// decorators such as [`CachedEstimator`](crate::cache::CachedEstimator).
pub trait Estimator: Send + Sync {
    /// Estimate a raw payload (Auto runs UltraFast)
    fn estimate_bytes(&self, payload: &[u8], opts: &Options) -> Estimate;

    /// Estimate extracted text (Auto runs Fast)
    fn estimate_text(&self, text: &str, opts: &Options) -> Estimate;

    /// Estimate request input including image and message overhead
    fn estimate_input(
        &self,
        text: &str,
        images: ImageCounts,
        message_count: usize,
        opts: &Options,
    ) -> Estimate;

    /// Estimate response text
    fn estimate_output(&self, text: &str, opts: &Options) -> Estimate {
        self.estimate_text(text, opts)
    }
}

/// Estimator backed by the free functions in this module
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEstimator;

impl DefaultEstimator {
    /// Create the default estimator
    pub fn new() -> Self {
        Self
    }
}

impl Estimator for DefaultEstimator {
    fn estimate_bytes(&self, payload: &[u8], opts: &Options) -> Estimate {
        estimate_bytes(payload, opts)
    }

    fn estimate_text(&self, text: &str, opts: &Options) -> Estimate {
        estimate_text(text, opts)
    }

    fn estimate_input(
        &self,
        text: &str,
        images: ImageCounts,
        message_count: usize,
        opts: &Options,
    ) -> Estimate {
        estimate_input(text, images, message_count, opts)
    }
}

/// Estimate a raw payload such as a JSON request body.
///
/// [`Strategy::Auto`] runs UltraFast.
pub fn estimate_bytes(payload: &[u8], opts: &Options) -> Estimate {
    let mut estimate = dispatch(payload, Strategy::UltraFast, opts);
    estimate.tokens = apply_multiplier(estimate.tokens, opts.multiplier);
    estimate
}

/// Estimate extracted text content.
///
/// [`Strategy::Auto`] runs Fast.
pub fn estimate_text(text: &str, opts: &Options) -> Estimate {
    let mut estimate = dispatch(text.as_bytes(), Strategy::Fast, opts);
    estimate.tokens = apply_multiplier(estimate.tokens, opts.multiplier);
    estimate
}

/// Estimate request input: text plus image and message overhead.
///
/// The multiplier applies once, to the grand total.
pub fn estimate_input(
    text: &str,
    images: ImageCounts,
    message_count: usize,
    opts: &Options,
) -> Estimate {
    let mut estimate = dispatch(text.as_bytes(), Strategy::Fast, opts);
    let total = estimate
        .tokens
        .saturating_add(image_tokens(images))
        .saturating_add(message_overhead(message_count));
    estimate.tokens = apply_multiplier(total, opts.multiplier);
    estimate
}

/// Estimate response text; identical to [`estimate_text`].
pub fn estimate_output(text: &str, opts: &Options) -> Estimate {
    estimate_text(text, opts)
}

/// Scale a token count, rounding up.
///
/// Multipliers that are non-finite, ≤ 0, or exactly 1 return `tokens` as is.
pub fn apply_multiplier(tokens: usize, multiplier: f64) -> usize {
    if !multiplier.is_finite() || multiplier <= 0.0 || multiplier == 1.0 {
        return tokens;
    }
    ceil_tokens(tokens as f64 * multiplier)
}

fn image_tokens(images: ImageCounts) -> usize {
    images
        .low_detail
        .saturating_mul(IMAGE_TOKENS_LOW)
        .saturating_add(images.high_detail.saturating_mul(IMAGE_TOKENS_HIGH))
        .saturating_add(images.unknown.saturating_mul(IMAGE_TOKENS_DEFAULT))
}

fn message_overhead(message_count: usize) -> usize {
    BASE_OVERHEAD.saturating_add(message_count.saturating_mul(PER_MESSAGE_OVERHEAD))
}

/// Run one strategy without the multiplier
fn dispatch(bytes: &[u8], auto: Strategy, opts: &Options) -> Estimate {
    let strategy = opts.strategy.or(auto);
    let profile = opts.resolved_profile();

    tracing::trace!(
        strategy = %strategy,
        profile = %profile,
        len = bytes.len(),
        "estimating"
    );

    let scored = match strategy {
        Strategy::Fast => Scored::tokens(fast(bytes)),
        Strategy::Weighted => weighted(bytes, profile.weights(), opts.explain),
        Strategy::Zr => zr(bytes, &ZR_CONFIG, opts.explain),
        Strategy::UltraFast | Strategy::Auto => Scored::tokens(ultrafast(bytes)),
    };

    Estimate {
        tokens: scored.tokens,
        strategy,
        profile,
        breakdown: scored.breakdown,
    }
}
