//! Per-call code-point statistics.

use super::classify::{is_cjk, is_hex, is_punct};

/// Fine-grained code-point counts gathered during a scan.
///
/// `total` counts non-whitespace code points only; whitespace is tracked
/// separately in `space` so ratios are taken against visible content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Non-whitespace code points (invalid bytes count as one each)
    pub total: usize,
    /// CJK code points
    pub cjk: usize,
    /// Punctuation code points
    pub punct: usize,
    /// ASCII digits
    pub digit: usize,
    /// Whitespace code points
    pub space: usize,
    /// Uppercase code points
    pub upper: usize,
    /// Hexadecimal digit code points
    pub hex: usize,
}

impl TextStats {
    /// Record a whitespace run of `count` code points
    pub fn record_whitespace(&mut self, count: usize) {
        self.space += count;
    }

    /// Record every code point of a non-whitespace run
    pub fn record_run(&mut self, run: &str) {
        for c in run.chars() {
            self.total += 1;
            if is_cjk(c) {
                self.cjk += 1;
            }
            if is_punct(c) {
                self.punct += 1;
            }
            if c.is_ascii_digit() {
                self.digit += 1;
            }
            if c.is_uppercase() {
                self.upper += 1;
            }
            if is_hex(c) {
                self.hex += 1;
            }
        }
    }

    /// Record an undecodable byte
    pub fn record_invalid(&mut self) {
        self.total += 1;
    }

    /// `count / total`, or 0 when nothing visible was seen
    pub fn ratio(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_run() {
        let mut stats = TextStats::default();
        stats.record_run("Ab3;你");
        assert_eq!(stats.total, 5);
        assert_eq!(stats.cjk, 1);
        assert_eq!(stats.punct, 1);
        assert_eq!(stats.digit, 1);
        assert_eq!(stats.upper, 1);
        // A, b, 3
        assert_eq!(stats.hex, 3);
    }

    #[test]
    fn test_ratio_against_visible_total() {
        let mut stats = TextStats::default();
        assert_eq!(stats.ratio(stats.cjk), 0.0);

        stats.record_run("ab");
        stats.record_whitespace(6);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.ratio(stats.space), 3.0);
    }
}
