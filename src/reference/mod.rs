//! Accuracy comparison against a real BPE tokenizer.
//!
//! Used for offline validation and by the `tokenest compare` command. The
//! estimation API never calls into this module.
//!
//! # Example
//!
//! ```
//! use tokenest::reference::compare;
//! use tokenest::{Options, Strategy};
//!
//! let report = compare("Hello, world! How are you today?", &Options::default()).unwrap();
//! assert_eq!(report.rows.len(), Strategy::all().len());
//! assert!(report.reference > 0);
//! ```

mod counter;

pub use counter::{ReferenceCounter, ReferenceEncoding};

use serde::Serialize;

use crate::error::Result;
use crate::estimate::{estimate_text, Options, Strategy};

/// One strategy's estimate against the reference count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyDeviation {
    /// Strategy that produced the estimate
    pub strategy: Strategy,
    /// Estimated tokens
    pub estimated: usize,
    /// Signed deviation from the reference, in percent
    pub deviation_pct: f64,
}

/// Every strategy compared with one reference count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Encoding used as ground truth
    pub encoding: ReferenceEncoding,
    /// Exact token count
    pub reference: usize,
    /// One row per concrete strategy
    pub rows: Vec<StrategyDeviation>,
}

impl Comparison {
    /// Row with the smallest absolute deviation
    pub fn best(&self) -> Option<&StrategyDeviation> {
        self.rows
            .iter()
            .min_by(|a, b| a.deviation_pct.abs().total_cmp(&b.deviation_pct.abs()))
    }
}

/// `(estimated - actual) / actual * 100`; 0 when `actual` is 0.
///
/// Positive values are overestimates.
pub fn deviation(estimated: usize, actual: usize) -> f64 {
    if actual == 0 {
        return 0.0;
    }
    (estimated as f64 - actual as f64) / actual as f64 * 100.0
}

/// Run every strategy on `text` and compare with the reference tokenizer
/// for `opts.model`.
///
/// `opts.strategy` is ignored; everything else (profile, multiplier) applies.
pub fn compare(text: &str, opts: &Options) -> Result<Comparison> {
    let counter = ReferenceCounter::for_model(&opts.model);
    let reference = counter.count(text)?;

    let rows = Strategy::all()
        .iter()
        .map(|&strategy| {
            let opts = opts.clone().with_strategy(strategy).with_explain(false);
            let estimated = estimate_text(text, &opts).tokens;
            StrategyDeviation {
                strategy,
                estimated,
                deviation_pct: deviation(estimated, reference),
            }
        })
        .collect();

    Ok(Comparison {
        encoding: counter.encoding(),
        reference,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deviation() {
        assert_eq!(deviation(110, 100), 10.0);
        assert_eq!(deviation(90, 100), -10.0);
        assert_eq!(deviation(5, 0), 0.0);
        assert_eq!(deviation(0, 4), -100.0);
    }

    #[test]
    fn test_compare_rows_in_strategy_order() {
        let report = compare("The quick brown fox jumps over the lazy dog.", &Options::default())
            .unwrap();
        let order: Vec<_> = report.rows.iter().map(|r| r.strategy).collect();
        assert_eq!(order, Strategy::all());
        assert_eq!(report.encoding, ReferenceEncoding::Cl100kBase);
        for row in &report.rows {
            assert_eq!(row.deviation_pct, deviation(row.estimated, report.reference));
        }
    }

    #[test]
    fn test_compare_empty_text() {
        let report = compare("", &Options::default()).unwrap();
        assert_eq!(report.reference, 0);
        assert!(report.rows.iter().all(|r| r.deviation_pct == 0.0));
    }

    #[test]
    fn test_best_row() {
        let report = Comparison {
            encoding: ReferenceEncoding::Cl100kBase,
            reference: 10,
            rows: vec![
                StrategyDeviation {
                    strategy: Strategy::UltraFast,
                    estimated: 14,
                    deviation_pct: 40.0,
                },
                StrategyDeviation {
                    strategy: Strategy::Weighted,
                    estimated: 9,
                    deviation_pct: -10.0,
                },
            ],
        };
        assert_eq!(report.best().map(|r| r.strategy), Some(Strategy::Weighted));
    }
}
