//! Constant-time byte heuristic.

/// `ceil(len / 4)` over raw, undecoded bytes.
///
/// # Example
/// ```
/// use tokenest::strategy::ultrafast;
///
/// assert_eq!(ultrafast(b""), 0);
/// assert_eq!(ultrafast(b"abcd"), 1);
/// assert_eq!(ultrafast(b"abcde"), 2);
/// ```
pub fn ultrafast(bytes: &[u8]) -> usize {
    // Round up to avoid underestimating
    (bytes.len() + 3) / 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ultrafast_ignores_encoding() {
        assert_eq!(ultrafast(&[0xFF; 9]), 3);
        assert_eq!(ultrafast("你好".as_bytes()), 2);
    }

    #[test]
    fn test_ultrafast_never_zero_for_non_empty() {
        for len in 1..=16 {
            assert!(ultrafast(&vec![b'x'; len]) >= 1);
        }
    }
}
