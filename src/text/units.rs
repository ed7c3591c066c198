//! Base-unit rules for a single non-whitespace run.

use super::classify::{is_cjk, is_latin_alnum, is_punct, language_chars_per_token};

/// Tunables for converting a run into base units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitRules {
    /// Characters per token for plain Latin-alphanumeric runs
    pub chars_per_token: f64,
    /// Runs of at most this many code points count as one unit
    pub short_threshold: usize,
}

impl UnitRules {
    /// Rules used by the weighted estimator
    pub const WEIGHTED: UnitRules = UnitRules {
        chars_per_token: 6.0,
        short_threshold: 3,
    };
}

impl Default for UnitRules {
    fn default() -> Self {
        Self::WEIGHTED
    }
}

/// Which rule decided a run's unit count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunShape {
    /// Every code point is CJK; one unit each
    Cjk,
    /// Digits with one separator style; one unit
    Number,
    /// At or below the short threshold; one unit
    Short,
    /// Contains tokenizer punctuation; one unit per two code points
    Punctuated,
    /// Latin alphanumeric; `ceil(len / chars_per_token)`
    Latin,
    /// Mixed or non-Latin script; one unit per code point
    Mixed,
}

/// Count base units for a run, returning the rule that fired.
///
/// Rules are tried in order: CJK, numeric, short, punctuated, Latin, mixed.
///
/// # Example
/// ```
/// use tokenest::text::{base_units, RunShape, UnitRules};
///
/// let rules = UnitRules::WEIGHTED;
/// assert_eq!(base_units("你好", &rules), (RunShape::Cjk, 2));
/// assert_eq!(base_units("2024", &rules), (RunShape::Number, 1));
/// assert_eq!(base_units("the", &rules), (RunShape::Short, 1));
/// assert_eq!(base_units("tokenization", &rules), (RunShape::Latin, 2));
/// ```
pub fn base_units(run: &str, rules: &UnitRules) -> (RunShape, usize) {
    let len = run.chars().count();
    if len == 0 {
        return (RunShape::Mixed, 0);
    }

    if run.chars().all(is_cjk) {
        return (RunShape::Cjk, len);
    }

    if is_numeric(run) {
        return (RunShape::Number, 1);
    }

    if len <= rules.short_threshold {
        return (RunShape::Short, 1);
    }

    if run.chars().any(is_punct) {
        return (RunShape::Punctuated, len.div_ceil(2));
    }

    if run.chars().all(is_latin_alnum) {
        let cpt = language_chars_per_token(run).unwrap_or(rules.chars_per_token);
        let cpt = if cpt > 0.0 { cpt } else { UnitRules::WEIGHTED.chars_per_token };
        return (RunShape::Latin, (len as f64 / cpt).ceil() as usize);
    }

    (RunShape::Mixed, len)
}

/// Digits separated by a single separator style (`.` or `,`).
///
/// Leading, trailing, doubled, or mixed separators disqualify the run.
pub fn is_numeric(run: &str) -> bool {
    let mut has_digit = false;
    let mut style: Option<char> = None;
    // Start as if a separator was just seen so a leading one is rejected
    let mut prev_separator = true;

    for c in run.chars() {
        match c {
            '0'..='9' => {
                has_digit = true;
                prev_separator = false;
            },
            '.' | ',' => {
                if prev_separator || style.is_some_and(|s| s != c) {
                    return false;
                }
                style = Some(c);
                prev_separator = true;
            },
            _ => return false,
        }
    }

    has_digit && !prev_separator
}
