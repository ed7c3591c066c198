//! Bounded-sample density heuristic.

use super::ceil_tokens;
use crate::text::{is_cjk_unified, is_punct_or_quote};

/// Inputs up to this many bytes are scanned in full
pub const FAST_SAMPLE_LIMIT: usize = 1000;

/// Size of each head/middle/tail sample window
pub const FAST_WINDOW: usize = 256;

/// Estimate from CJK and punctuation density.
///
/// Long inputs are sampled with three windows; the divisor is
/// `clamp(4 - 1.5·cjk - 1.0·punct, 2, 4)` applied to the full byte length.
///
/// # Example
/// ```
/// use tokenest::strategy::fast;
///
/// assert_eq!(fast(b"hello world"), 3);
/// assert_eq!(fast("你好世界".as_bytes()), 5);
/// ```
pub fn fast(bytes: &[u8]) -> usize {
    if bytes.is_empty() {
        return 0;
    }

    let mut density = Density::default();
    for window in sample_windows(bytes) {
        density.observe(window);
    }
    if density.total == 0 {
        return 0;
    }

    let cjk_ratio = density.cjk as f64 / density.total as f64;
    let punct_ratio = density.punct as f64 / density.total as f64;
    let divisor = (4.0 - cjk_ratio * 1.5 - punct_ratio * 1.0).clamp(2.0, 4.0);

    ceil_tokens(bytes.len() as f64 / divisor)
}

#[derive(Debug, Default)]
struct Density {
    total: usize,
    cjk: usize,
    punct: usize,
}

impl Density {
    fn observe(&mut self, window: &[u8]) {
        for chunk in window.utf8_chunks() {
            for c in chunk.valid().chars() {
                self.total += 1;
                if is_cjk_unified(c) {
                    self.cjk += 1;
                }
                if is_punct_or_quote(c) {
                    self.punct += 1;
                }
            }
            // Each undecodable byte is one code point of neither kind
            self.total += chunk.invalid().len();
        }
    }
}

/// Whole input when short, otherwise head, middle and tail windows
fn sample_windows(bytes: &[u8]) -> Vec<&[u8]> {
    let len = bytes.len();
    if len <= FAST_SAMPLE_LIMIT {
        return vec![bytes];
    }

    let mid_start = len / 2 - FAST_WINDOW / 2;
    vec![
        snap_window(bytes, 0, FAST_WINDOW),
        snap_window(bytes, mid_start, mid_start + FAST_WINDOW),
        snap_window(bytes, len - FAST_WINDOW, len),
    ]
}

/// Slice `[start, end)` with both edges moved inward onto code-point
/// boundaries. A window made entirely of continuation bytes shrinks to empty.
fn snap_window(bytes: &[u8], start: usize, end: usize) -> &[u8] {
    let len = bytes.len();
    let end = end.min(len);
    let mut start = start.min(end);
    while start < end && is_continuation(bytes[start]) {
        start += 1;
    }

    // `end` is a boundary when it is the input end or starts a new code point
    let mut end = end;
    while end > start && end < len && is_continuation(bytes[end]) {
        end -= 1;
    }

    &bytes[start..end]
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_empty() {
        assert_eq!(fast(b""), 0);
    }

    #[test]
    fn test_fast_punctuation_lowers_divisor() {
        // 10 bytes, all punctuation: divisor 3.0
        assert_eq!(fast(b"{}[]();:,."), 4);
        // Quotes count toward density
        assert_eq!(fast(b"''''''''''"), 4);
    }

    #[test]
    fn test_fast_mixed_cjk_and_punctuation() {
        // 7 code points, 4 CJK and 3 punctuation: divisor 4 - 6/7 - 3/7 = 19/7
        let text = "你,好,你,好";
        assert_eq!(text.len(), 15);
        assert_eq!(fast(text.as_bytes()), 6);
    }

    #[test]
    fn test_fast_divisor_bounds() {
        // Pure CJK bottoms out at 2.5 bytes per token; plain ASCII stays at 4
        assert_eq!(fast("中".repeat(10).as_bytes()), 12);
        assert_eq!(fast(b"abcdefgh"), 2);
    }

    #[test]
    fn test_fast_hangul_and_kana_keep_ascii_divisor() {
        // Only unified ideographs lower the divisor
        let korean = "안녕하세요";
        let japanese = "こんにちは";
        assert_eq!(korean.len(), 15);
        assert_eq!(japanese.len(), 15);
        assert_eq!(fast(korean.as_bytes()), 4);
        assert_eq!(fast(japanese.as_bytes()), 4);
        assert_eq!(fast("你好世界".as_bytes()), 5);
    }

    #[test]
    fn test_fast_uses_full_length_not_sample() {
        let text = "a".repeat(10_000);
        assert_eq!(fast(text.as_bytes()), 2_500);
    }

    #[test]
    fn test_sample_windows_short_input_is_whole() {
        let bytes = vec![b'x'; FAST_SAMPLE_LIMIT];
        let windows = sample_windows(&bytes);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].len(), FAST_SAMPLE_LIMIT);
    }

    #[test]
    fn test_sample_windows_respect_char_boundaries() {
        // 3-byte CJK characters never land on window edges cleanly
        let text = "中".repeat(500);
        for window in sample_windows(text.as_bytes()) {
            assert!(std::str::from_utf8(window).is_ok());
            assert!(window.len() <= FAST_WINDOW);
            assert!(!window.is_empty());
        }
    }

    #[test]
    fn test_snap_window_degenerates_to_empty() {
        let bytes = [0x80u8; 16];
        assert!(snap_window(&bytes, 2, 10).is_empty());
    }

    #[test]
    fn test_fast_pathological_continuation_bytes() {
        // Only continuation bytes: windows collapse, estimate degrades to 0
        let bytes = vec![0x80u8; 4096];
        assert_eq!(fast(&bytes), 0);
    }

    #[test]
    fn test_fast_invalid_bytes_in_short_input() {
        // Invalid bytes count as code points of neither kind
        assert_eq!(fast(&[0xFF, 0xFE, 0xFD, 0xFC]), 1);
    }
}
