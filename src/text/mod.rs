//! Text analysis primitives shared by the estimators.
//!
//! - [`classify`]: O(1) code-point category lookup
//! - [`segment`]: single-pass split into maximal same-category runs
//! - [`base_units`]: per-run unit rules shared by the weighted and ZR strategies
//! - [`TextStats`]: code-point counts gathered during a scan
//!
//! # Example
//!
//! ```
//! use tokenest::text::{segment_str, SegmentKind};
//!
//! let words = segment_str("GET /v1/chat HTTP/1.1")
//!     .filter(|s| s.kind == SegmentKind::Other)
//!     .count();
//! assert_eq!(words, 6);
//! ```

mod classify;
mod scan;
mod segment;
mod stats;
mod units;

pub use classify::{
    classify, is_at_sign, is_cjk, is_cjk_unified, is_emoji, is_hex, is_latin_alnum,
    is_math_symbol, is_punct, is_punct_or_quote, is_url_delim, language_chars_per_token,
    CharClass,
};
pub use scan::{scan, BaseCounter, SegmentVisitor};
pub use segment::{segment, segment_str, segment_with, Segment, SegmentKind, Segments};
pub use stats::TextStats;
pub use units::{base_units, is_numeric, RunShape, UnitRules};
