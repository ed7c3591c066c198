//! Segment-weighted heuristic.
//!
//! Stage A tallies base units per [`Category`] in one scan; stage B scores
//! the tallies against a [`WeightProfile`].

use super::{ceil_tokens, Scored};
use crate::estimate::CategoryBreakdown;
use crate::profile::{Category, WeightProfile};
use crate::text::{
    base_units, is_at_sign, is_emoji, is_math_symbol, is_punct_or_quote, is_url_delim, scan,
    RunShape, Segment, SegmentKind, SegmentVisitor, UnitRules,
};

/// Score `bytes` with the given weights.
///
/// # Example
/// ```
/// use tokenest::profile::OPENAI_WEIGHTS;
/// use tokenest::strategy::weighted;
///
/// let scored = weighted(b"123", &OPENAI_WEIGHTS, true);
/// assert_eq!(scored.tokens, 1);
/// assert_eq!(scored.breakdown[0].category, "number");
/// ```
pub fn weighted(bytes: &[u8], weights: &WeightProfile, explain: bool) -> Scored {
    if bytes.is_empty() {
        return Scored::default();
    }
    WeightedTally::count(bytes).score(weights, explain)
}

/// Per-category base units
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedTally {
    units: [usize; Category::COUNT],
}

impl WeightedTally {
    /// Tally every segment of `bytes`
    pub fn count(bytes: &[u8]) -> Self {
        let mut tally = Self::default();
        scan(bytes, &mut tally);
        tally
    }

    /// Units accumulated for one category
    pub fn units(&self, category: Category) -> usize {
        self.units[category.index()]
    }

    /// Apply weights and round up once, after summation
    pub fn score(&self, weights: &WeightProfile, explain: bool) -> Scored {
        let mut total = 0.0;
        let mut breakdown = Vec::new();

        for category in Category::ALL {
            let units = self.units(category);
            if units == 0 {
                continue;
            }
            let weight = weights.weight(category);
            let tokens = units as f64 * weight;
            total += tokens;
            if explain && tokens > 0.0 {
                breakdown.push(CategoryBreakdown::new(category.name(), units as f64, weight));
            }
        }

        Scored {
            tokens: ceil_tokens(total),
            breakdown,
        }
    }

    fn add(&mut self, category: Category, units: usize) {
        self.units[category.index()] += units;
    }

    fn visit_whitespace(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.add(Category::Newline, 1);
            } else {
                self.add(Category::Space, 1);
            }
        }
    }

    /// At-signs, URL delimiters and math symbols break a punctuation run;
    /// whatever generic symbols precede them are flushed at two per unit.
    fn visit_punctuation(&mut self, text: &str) {
        let mut pending = 0usize;
        for c in text.chars() {
            let special = if is_at_sign(c) {
                Category::AtSign
            } else if is_url_delim(c) {
                Category::UrlDelim
            } else if is_math_symbol(c) {
                Category::MathSymbol
            } else {
                pending += 1;
                continue;
            };
            self.add(Category::Symbol, pending.div_ceil(2));
            pending = 0;
            self.add(special, 1);
        }
        self.add(Category::Symbol, pending.div_ceil(2));
    }

    /// Emoji sub-runs cost per code point; the rest go through the word rules.
    fn visit_other(&mut self, text: &str) {
        let mut start = 0;
        let mut current: Option<bool> = None;
        for (idx, c) in text.char_indices() {
            let emoji = is_emoji(c);
            if let Some(prev) = current {
                if prev != emoji {
                    self.visit_sub_run(&text[start..idx], prev);
                    start = idx;
                }
            }
            current = Some(emoji);
        }
        if let Some(prev) = current {
            self.visit_sub_run(&text[start..], prev);
        }
    }

    fn visit_sub_run(&mut self, run: &str, emoji: bool) {
        if emoji {
            self.add(Category::Emoji, run.chars().count());
            return;
        }

        let (shape, units) = base_units(run, &UnitRules::WEIGHTED);
        let category = match shape {
            RunShape::Cjk => Category::Cjk,
            RunShape::Number => Category::Number,
            RunShape::Punctuated => Category::Symbol,
            RunShape::Short | RunShape::Latin | RunShape::Mixed => Category::Word,
        };
        self.add(category, units);
    }
}

impl SegmentVisitor for WeightedTally {
    // Quotes are symbols here, not part of the adjacent word
    const PUNCT: fn(char) -> bool = is_punct_or_quote;

    fn visit(&mut self, segment: &Segment<'_>) {
        match segment.kind {
            SegmentKind::Whitespace => self.visit_whitespace(segment.text),
            SegmentKind::Punctuation => self.visit_punctuation(segment.text),
            SegmentKind::Other => self.visit_other(segment.text),
            // Corrupt input overcounts rather than aborting
            SegmentKind::Invalid => self.add(Category::Symbol, 1),
        }
    }
}
