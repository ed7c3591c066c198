//! Categorical regression over base units.

use super::{ceil_tokens, Scored};
use crate::estimate::CategoryBreakdown;
use crate::profile::{ZrCategory, ZrConfig, ZrThresholds, ZR_FEATURES};
use crate::text::{BaseCounter, TextStats, UnitRules};

/// Inputs with fewer visible code points than this are always General
const MIN_CLASSIFIED_RUNES: usize = 50;

const FEATURE_TAGS: [&str; ZR_FEATURES] = [
    "zr_base",
    "zr_cjk",
    "zr_punct",
    "zr_digit",
    "zr_cjk_sq",
    "zr_punct_sq",
    "zr_digit_sq",
    "zr_cjk_punct",
];

/// Estimate `bytes` with the ZR regression.
///
/// Negative predictions clamp to zero.
///
/// # Example
/// ```
/// use tokenest::profile::ZR_CONFIG;
/// use tokenest::strategy::zr;
///
/// assert_eq!(zr(b"", &ZR_CONFIG, false).tokens, 0);
/// assert_eq!(zr(b"hello world", &ZR_CONFIG, false).tokens, 2);
/// ```
pub fn zr(bytes: &[u8], config: &ZrConfig, explain: bool) -> Scored {
    if bytes.is_empty() {
        return Scored::default();
    }

    let rules = UnitRules {
        chars_per_token: config.thresholds.chars_per_token,
        short_threshold: config.thresholds.short_threshold,
    };
    let counter = BaseCounter::count(bytes, rules);
    if counter.base == 0 {
        return Scored::default();
    }

    let features = zr_features(counter.base, &counter.stats);
    let category = classify_zr(&counter.stats, &config.thresholds);
    let coeffs = config.coefficients(category);
    let prediction = zr_predict(coeffs, &features);

    tracing::trace!(
        base = counter.base,
        category = %category,
        prediction,
        "zr prediction"
    );

    let breakdown = if explain {
        FEATURE_TAGS
            .into_iter()
            .zip(features)
            .zip(coeffs)
            .map(|((tag, value), &coeff)| CategoryBreakdown::new(tag, value, coeff))
            .filter(|entry| entry.tokens != 0.0)
            .collect()
    } else {
        Vec::new()
    };

    Scored {
        tokens: ceil_tokens(prediction),
        breakdown,
    }
}

/// Pick exactly one category from ratios over visible code points.
///
/// Order: too short for General, then Capital, then for space-free input
/// Hex, Alnum or Dense, otherwise General.
pub fn classify_zr(stats: &TextStats, thresholds: &ZrThresholds) -> ZrCategory {
    if stats.total < MIN_CLASSIFIED_RUNES {
        return ZrCategory::General;
    }

    if stats.ratio(stats.upper) > thresholds.capital_threshold {
        return ZrCategory::Capital;
    }

    if stats.ratio(stats.space) < thresholds.dense_threshold {
        if stats.ratio(stats.hex) > thresholds.hex_threshold {
            return ZrCategory::Hex;
        }
        if stats.ratio(stats.punct) < thresholds.alnum_punct_threshold {
            return ZrCategory::Alnum;
        }
        return ZrCategory::Dense;
    }

    ZrCategory::General
}

/// `[b, b·c, b·p, b·d, b·c², b·p², b·d², b·c·p]` for base `b` and CJK,
/// punctuation and digit ratios `c`, `p`, `d`.
pub fn zr_features(base: usize, stats: &TextStats) -> [f64; ZR_FEATURES] {
    if base == 0 {
        return [0.0; ZR_FEATURES];
    }

    let b = base as f64;
    let c = stats.ratio(stats.cjk);
    let p = stats.ratio(stats.punct);
    let d = stats.ratio(stats.digit);

    [b, b * c, b * p, b * d, b * c * c, b * p * p, b * d * d, b * c * p]
}

/// Dot product over the shorter of the two vectors
pub fn zr_predict(coeffs: &[f64], features: &[f64]) -> f64 {
    coeffs.iter().zip(features).map(|(c, f)| c * f).sum()
}
