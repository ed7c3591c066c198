//! Estimation algorithms.
//!
//! | Strategy  | Input        | Cost            | Notes                                   |
//! |-----------|--------------|-----------------|-----------------------------------------|
//! | UltraFast | raw bytes    | O(1)            | `ceil(len / 4)`, admission control only |
//! | Fast      | bytes/text   | O(min(n, 1000)) | head/mid/tail density sample            |
//! | Weighted  | bytes/text   | O(n)            | segment categories × profile weights    |
//! | ZR        | bytes/text   | O(n)            | categorical regression over base units  |
//!
//! Each function here is pure: identical input always yields identical
//! output, which the cache layer relies on.

mod fast;
mod ultrafast;
mod weighted;
mod zr;

pub use fast::{fast, FAST_SAMPLE_LIMIT, FAST_WINDOW};
pub use ultrafast::ultrafast;
pub use weighted::{weighted, WeightedTally};
pub use zr::{classify_zr, zr, zr_features, zr_predict};

use crate::estimate::CategoryBreakdown;

/// Token count plus optional per-category accounting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scored {
    /// Estimated tokens
    pub tokens: usize,
    /// Breakdown in canonical order (empty unless explain was requested)
    pub breakdown: Vec<CategoryBreakdown>,
}

impl Scored {
    /// A bare count with no breakdown
    pub fn tokens(tokens: usize) -> Self {
        Self {
            tokens,
            breakdown: Vec::new(),
        }
    }
}

/// Round a non-negative accumulation up to whole tokens.
///
/// A plain ceiling: float noise above an integer costs a whole token.
/// Negative and non-finite inputs yield 0.
pub fn ceil_tokens(value: f64) -> usize {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_tokens() {
        assert_eq!(ceil_tokens(0.0), 0);
        assert_eq!(ceil_tokens(-3.2), 0);
        assert_eq!(ceil_tokens(f64::NAN), 0);
        assert_eq!(ceil_tokens(0.01), 1);
        assert_eq!(ceil_tokens(1.0), 1);
        assert_eq!(ceil_tokens(1.5), 2);
        assert_eq!(ceil_tokens(40.326), 41);
    }

    #[test]
    fn test_ceil_tokens_keeps_float_noise() {
        // 100 * 1.1 == 110.00000000000001
        assert!(100.0 * 1.1 > 110.0);
        assert_eq!(ceil_tokens(100.0 * 1.1), 111);
        assert_eq!(ceil_tokens(110.0), 110);
    }
}
