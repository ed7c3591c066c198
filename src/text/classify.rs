//! Code-point classification.
//!
//! Every predicate here is a fixed range or set lookup so that
//! classification stays O(1) and allocation-free.

use phf::{phf_set, Set};
use serde::{Deserialize, Serialize};

/// Coarse category of a single code point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    /// Unicode `White_Space`
    Whitespace,
    /// Fixed ASCII punctuation set (see [`is_punct`])
    Punctuation,
    /// CJK ideographs, symbols, kana and Hangul
    Cjk,
    /// Pictographic emoji blocks
    Emoji,
    /// Letters, digits and everything else
    Other,
}

/// Classify one code point.
///
/// Whitespace wins over punctuation, punctuation over CJK, CJK over emoji.
///
/// # Example
/// ```
/// use tokenest::text::{classify, CharClass};
///
/// assert_eq!(classify(' '), CharClass::Whitespace);
/// assert_eq!(classify('{'), CharClass::Punctuation);
/// assert_eq!(classify('你'), CharClass::Cjk);
/// assert_eq!(classify('😀'), CharClass::Emoji);
/// assert_eq!(classify('é'), CharClass::Other);
/// ```
pub fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if is_punct(c) {
        CharClass::Punctuation
    } else if is_cjk(c) {
        CharClass::Cjk
    } else if is_emoji(c) {
        CharClass::Emoji
    } else {
        CharClass::Other
    }
}

/// Punctuation that tokenizers commonly split on, without quotes.
///
/// This is the set the ZR statistics and segmentation use. The weighted and
/// sampling estimators use [`is_punct_or_quote`].
pub fn is_punct(c: char) -> bool {
    matches!(
        c,
        '.' | ','
            | '!'
            | '?'
            | ';'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | '<'
            | '>'
            | ':'
            | '/'
            | '\\'
            | '|'
            | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '&'
            | '*'
            | '+'
            | '='
            | '`'
            | '~'
            | '_'
            | '-'
    )
}

/// [`is_punct`] plus `"` and `'`.
///
/// Splits runs for the weighted estimator and drives the sampling
/// estimator's density pass.
pub fn is_punct_or_quote(c: char) -> bool {
    is_punct(c) || c == '"' || c == '\''
}

/// CJK ideographs, CJK symbol/radical blocks, kana, and Hangul
pub fn is_cjk(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF     // Unified ideographs
            | 0x3400..=0x4DBF // Extension A
            | 0x3000..=0x303F // Symbols and punctuation
            | 0xFF00..=0xFFEF // Halfwidth and fullwidth forms
            | 0x30A0..=0x30FF // Katakana
            | 0x3040..=0x309F // Hiragana
            | 0x2E80..=0x2EFF // Radicals supplement
            | 0x31C0..=0x31EF // Strokes
            | 0x3200..=0x32FF // Enclosed letters and months
            | 0x3300..=0x33FF // Compatibility
            | 0xAC00..=0xD7AF // Hangul syllables
            | 0x1100..=0x11FF // Hangul Jamo
            | 0x3130..=0x318F // Hangul compatibility Jamo
            | 0xA960..=0xA97F // Hangul Jamo extended-A
            | 0xD7B0..=0xD7FF // Hangul Jamo extended-B
    )
}

/// CJK unified ideographs only (U+4E00..=U+9FFF)
pub fn is_cjk_unified(c: char) -> bool {
    matches!(c as u32, 0x4E00..=0x9FFF)
}

/// Pictographic emoji and dingbat blocks
pub fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1F5FF
            | 0x1F600..=0x1F64F
            | 0x1F680..=0x1F6FF
            | 0x1F700..=0x1F77F
            | 0x1F900..=0x1F9FF
            | 0x1FA00..=0x1FAFF
            | 0x2600..=0x26FF
            | 0x2700..=0x27BF
    )
}

/// ASCII letters and digits plus Latin-1 supplement letters (× and ÷ excluded)
pub fn is_latin_alnum(c: char) -> bool {
    c.is_ascii_alphanumeric() || (matches!(c as u32, 0xC0..=0xFF) && c != '×' && c != '÷')
}

/// `@`
pub fn is_at_sign(c: char) -> bool {
    c == '@'
}

/// Characters that delimit URL components
pub fn is_url_delim(c: char) -> bool {
    matches!(c, ':' | '/' | '.' | '?' | '&' | '=' | '#' | '%')
}

/// Arithmetic and comparison operators
pub fn is_math_symbol(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '=' | '^' | '<' | '>')
}

/// `[0-9a-fA-F]`
pub fn is_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

// Diacritics that identify a language family. Accented words in these
// languages split into noticeably shorter tokens than plain English.

static GERMAN: Set<char> = phf_set! {
    '\u{00E4}', '\u{00F6}', '\u{00FC}', '\u{00DF}', '\u{1E9E}',
};

static FRENCH_SPANISH: Set<char> = phf_set! {
    '\u{00E9}', '\u{00E8}', '\u{00EA}', '\u{00EB}', '\u{00E0}', '\u{00E2}', '\u{00EE}',
    '\u{00EF}', '\u{00F4}', '\u{00FB}', '\u{00F9}', '\u{00FC}', '\u{00FF}', '\u{00E7}',
    '\u{0153}', '\u{00E6}', '\u{00E1}', '\u{00ED}', '\u{00F3}', '\u{00FA}', '\u{00F1}',
};

static POLISH_CZECH: Set<char> = phf_set! {
    '\u{0105}', '\u{0107}', '\u{0119}', '\u{0142}', '\u{0144}', '\u{00F3}', '\u{015B}',
    '\u{017A}', '\u{017C}', '\u{011B}', '\u{0161}', '\u{010D}', '\u{0159}', '\u{017E}',
    '\u{00FD}', '\u{016F}', '\u{00FA}', '\u{010F}', '\u{0165}', '\u{0148}',
};

/// Diacritic tables in match order, paired with their characters-per-token
static LANGUAGE_TABLES: [(&Set<char>, f64); 3] =
    [(&GERMAN, 3.0), (&FRENCH_SPANISH, 3.0), (&POLISH_CZECH, 3.5)];

/// Characters-per-token override for a run containing a diagnostic diacritic.
///
/// Tables are checked in a fixed order and the first one with any hit wins,
/// so `ü` (German and French) always resolves to the German entry.
pub fn language_chars_per_token(run: &str) -> Option<f64> {
    LANGUAGE_TABLES
        .iter()
        .find(|(set, _)| run.chars().any(|c| set.contains(&c)))
        .map(|(_, cpt)| *cpt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_precedence() {
        assert_eq!(classify('\n'), CharClass::Whitespace);
        assert_eq!(classify('\u{00A0}'), CharClass::Whitespace);
        assert_eq!(classify('@'), CharClass::Punctuation);
        assert_eq!(classify('"'), CharClass::Other);
        assert_eq!(classify('한'), CharClass::Cjk);
        assert_eq!(classify('カ'), CharClass::Cjk);
        assert_eq!(classify('。'), CharClass::Cjk);
        assert_eq!(classify('🚀'), CharClass::Emoji);
        assert_eq!(classify('☀'), CharClass::Emoji);
        assert_eq!(classify('a'), CharClass::Other);
        assert_eq!(classify('7'), CharClass::Other);
    }

    #[test]
    fn test_punct_or_quote_includes_quotes() {
        assert!(is_punct_or_quote('"'));
        assert!(is_punct_or_quote('\''));
        assert!(is_punct_or_quote(';'));
        assert!(!is_punct('"'));
        assert!(!is_punct('\''));
    }

    #[test]
    fn test_cjk_unified_is_ideographs_only() {
        assert!(is_cjk_unified('你'));
        assert!(is_cjk_unified('\u{9FFF}'));
        assert!(!is_cjk_unified('한'));
        assert!(!is_cjk_unified('こ'));
        assert!(!is_cjk_unified('。'));
        assert!(is_cjk('한') && is_cjk('こ'));
    }

    #[test]
    fn test_latin_alnum() {
        assert!(is_latin_alnum('z'));
        assert!(is_latin_alnum('Q'));
        assert!(is_latin_alnum('0'));
        assert!(is_latin_alnum('é'));
        assert!(is_latin_alnum('Ø'));
        assert!(!is_latin_alnum('×'));
        assert!(!is_latin_alnum('÷'));
        assert!(!is_latin_alnum('ł'));
        assert!(!is_latin_alnum('-'));
    }

    #[test]
    fn test_symbol_predicates_overlap() {
        // '/' and '=' are both URL delimiters and math symbols
        assert!(is_url_delim('/') && is_math_symbol('/'));
        assert!(is_url_delim('=') && is_math_symbol('='));
        assert!(is_url_delim('?') && !is_math_symbol('?'));
        assert!(is_math_symbol('^') && !is_url_delim('^'));
        assert!(is_at_sign('@'));
    }

    #[test]
    fn test_language_chars_per_token() {
        assert_eq!(language_chars_per_token("strasse"), None);
        assert_eq!(language_chars_per_token("straße"), Some(3.0));
        assert_eq!(language_chars_per_token("garçon"), Some(3.0));
        assert_eq!(language_chars_per_token("źdźbło"), Some(3.5));
        // ü is in both German and French tables; German is checked first
        assert_eq!(language_chars_per_token("über"), Some(3.0));
        // ó appears in French/Spanish before Polish/Czech
        assert_eq!(language_chars_per_token("córka"), Some(3.0));
    }

    #[test]
    fn test_hex() {
        assert!("0123456789abcdefABCDEF".chars().all(is_hex));
        assert!(!is_hex('g'));
    }
}
