//! Per-profile category weights for the weighted estimator.

use serde::{Deserialize, Serialize};

/// Accounting category used by the weighted estimator.
///
/// Declaration order is the canonical breakdown order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Latin or mixed-script word pieces
    Word,
    /// Numeric literals
    Number,
    /// CJK code points
    Cjk,
    /// Generic punctuation runs
    Symbol,
    /// `+ - * / = ^ < >`
    MathSymbol,
    /// `: / . ? & = # %`
    UrlDelim,
    /// `@`
    AtSign,
    /// Emoji code points
    Emoji,
    /// `\n`
    Newline,
    /// Any other whitespace
    Space,
}

impl Category {
    /// Number of categories
    pub const COUNT: usize = 10;

    /// All categories in canonical order
    pub const ALL: [Category; Category::COUNT] = [
        Category::Word,
        Category::Number,
        Category::Cjk,
        Category::Symbol,
        Category::MathSymbol,
        Category::UrlDelim,
        Category::AtSign,
        Category::Emoji,
        Category::Newline,
        Category::Space,
    ];

    /// Stable tag used in breakdowns
    pub fn name(&self) -> &'static str {
        match self {
            Category::Word => "word",
            Category::Number => "number",
            Category::Cjk => "cjk",
            Category::Symbol => "symbol",
            Category::MathSymbol => "math_symbol",
            Category::UrlDelim => "url_delim",
            Category::AtSign => "at_sign",
            Category::Emoji => "emoji",
            Category::Newline => "newline",
            Category::Space => "space",
        }
    }

    /// Position in [`Category::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Weight applied to each category's base units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightProfile {
    /// Word weight
    pub word: f64,
    /// Number weight
    pub number: f64,
    /// CJK weight
    pub cjk: f64,
    /// Generic symbol weight
    pub symbol: f64,
    /// Math symbol weight
    pub math_symbol: f64,
    /// URL delimiter weight
    pub url_delim: f64,
    /// At-sign weight
    pub at_sign: f64,
    /// Emoji weight
    pub emoji: f64,
    /// Newline weight
    pub newline: f64,
    /// Space weight
    pub space: f64,
}

impl WeightProfile {
    /// Weight for one category
    pub fn weight(&self, category: Category) -> f64 {
        match category {
            Category::Word => self.word,
            Category::Number => self.number,
            Category::Cjk => self.cjk,
            Category::Symbol => self.symbol,
            Category::MathSymbol => self.math_symbol,
            Category::UrlDelim => self.url_delim,
            Category::AtSign => self.at_sign,
            Category::Emoji => self.emoji,
            Category::Newline => self.newline,
            Category::Space => self.space,
        }
    }
}

// Weight table v1. Any change to these values must bump WEIGHT_TABLE_VERSION.

/// Version of the baked weight table
pub const WEIGHT_TABLE_VERSION: u32 = 1;

/// OpenAI (cl100k/o200k) weights
pub static OPENAI_WEIGHTS: WeightProfile = WeightProfile {
    word: 1.00,
    number: 1.00,
    cjk: 1.05,
    symbol: 1.00,
    math_symbol: 1.00,
    url_delim: 0.90,
    at_sign: 1.00,
    emoji: 2.00,
    newline: 0.50,
    space: 0.00,
};

/// Claude weights
pub static CLAUDE_WEIGHTS: WeightProfile = WeightProfile {
    word: 1.10,
    number: 1.20,
    cjk: 1.30,
    symbol: 1.10,
    math_symbol: 1.00,
    url_delim: 1.00,
    at_sign: 1.00,
    emoji: 2.50,
    newline: 0.60,
    space: 0.05,
};

/// Gemini weights
pub static GEMINI_WEIGHTS: WeightProfile = WeightProfile {
    word: 1.00,
    number: 1.10,
    cjk: 0.80,
    symbol: 1.00,
    math_symbol: 1.00,
    url_delim: 0.90,
    at_sign: 1.00,
    emoji: 1.50,
    newline: 0.50,
    space: 0.00,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_discriminants() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
    }

    #[test]
    fn test_weight_lookup() {
        assert_eq!(OPENAI_WEIGHTS.weight(Category::Number), OPENAI_WEIGHTS.number);
        assert_eq!(CLAUDE_WEIGHTS.weight(Category::Emoji), 2.5);
        assert_eq!(GEMINI_WEIGHTS.weight(Category::Cjk), 0.8);
    }

    #[test]
    fn test_weights_non_negative() {
        for profile in [&OPENAI_WEIGHTS, &CLAUDE_WEIGHTS, &GEMINI_WEIGHTS] {
            for category in Category::ALL {
                assert!(profile.weight(category) >= 0.0, "{category}");
            }
        }
    }

    #[test]
    fn test_category_serde_tag_matches_name() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.name()));
        }
    }
}
