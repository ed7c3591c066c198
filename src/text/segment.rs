//! Left-to-right segmentation into maximal same-category runs.

use std::ops::Range;
use std::str::Utf8Chunks;

use super::classify::is_punct;

/// Coarse segment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Run of whitespace
    Whitespace,
    /// Run of ASCII punctuation
    Punctuation,
    /// Run of anything else (words, digits, CJK, emoji)
    Other,
    /// A single byte that does not start a valid UTF-8 sequence
    Invalid,
}

impl SegmentKind {
    /// Coarse kind of `c` when `punct` is the punctuation set
    pub fn of(c: char, punct: fn(char) -> bool) -> Self {
        if c.is_whitespace() {
            SegmentKind::Whitespace
        } else if punct(c) {
            SegmentKind::Punctuation
        } else {
            SegmentKind::Other
        }
    }
}

/// One maximal run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Coarse category shared by every code point in the run
    pub kind: SegmentKind,
    /// Byte range within the scanned input
    pub span: Range<usize>,
    /// Decoded text of the run; empty for [`SegmentKind::Invalid`]
    pub text: &'a str,
}

impl Segment<'_> {
    /// Number of code points in the run (1 for an invalid byte)
    pub fn char_count(&self) -> usize {
        match self.kind {
            SegmentKind::Invalid => 1,
            _ => self.text.chars().count(),
        }
    }
}

/// Iterator over the segments of a byte slice.
///
/// Created by [`segment`]. Never backtracks; each input byte is decoded once.
pub struct Segments<'a> {
    chunks: Utf8Chunks<'a>,
    valid: &'a str,
    invalid: &'a [u8],
    offset: usize,
    punct: fn(char) -> bool,
}

/// Segment raw bytes.
///
/// Boundaries fall exactly where the coarse category changes. Every byte that
/// cannot be decoded becomes its own one-byte [`SegmentKind::Invalid`] segment,
/// so corrupt input is still fully covered.
///
/// # Example
/// ```
/// use tokenest::text::{segment, SegmentKind};
///
/// let kinds: Vec<_> = segment(b"hi, you").map(|s| s.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         SegmentKind::Other,
///         SegmentKind::Punctuation,
///         SegmentKind::Whitespace,
///         SegmentKind::Other,
///     ]
/// );
/// ```
pub fn segment(bytes: &[u8]) -> Segments<'_> {
    segment_with(bytes, is_punct)
}

/// Segment raw bytes, splitting punctuation runs on `punct` instead of
/// [`is_punct`].
///
/// # Example
/// ```
/// use tokenest::text::{is_punct_or_quote, segment, segment_with};
///
/// let plain: Vec<_> = segment(br#""hi""#).map(|s| s.text).collect();
/// assert_eq!(plain, vec![r#""hi""#]);
///
/// let quoted: Vec<_> = segment_with(br#""hi""#, is_punct_or_quote).map(|s| s.text).collect();
/// assert_eq!(quoted, vec!["\"", "hi", "\""]);
/// ```
pub fn segment_with(bytes: &[u8], punct: fn(char) -> bool) -> Segments<'_> {
    Segments {
        chunks: bytes.utf8_chunks(),
        valid: "",
        invalid: &[],
        offset: 0,
        punct,
    }
}

/// Segment already-decoded text
pub fn segment_str(text: &str) -> Segments<'_> {
    segment(text.as_bytes())
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(first) = self.valid.chars().next() {
                let kind = SegmentKind::of(first, self.punct);
                let end = self
                    .valid
                    .char_indices()
                    .skip(1)
                    .find(|(_, c)| SegmentKind::of(*c, self.punct) != kind)
                    .map(|(idx, _)| idx)
                    .unwrap_or(self.valid.len());

                let (run, rest) = self.valid.split_at(end);
                let start = self.offset;
                self.valid = rest;
                self.offset += end;
                return Some(Segment {
                    kind,
                    span: start..self.offset,
                    text: run,
                });
            }

            if let Some((_, rest)) = self.invalid.split_first() {
                let start = self.offset;
                self.invalid = rest;
                self.offset += 1;
                return Some(Segment {
                    kind: SegmentKind::Invalid,
                    span: start..self.offset,
                    text: "",
                });
            }

            let chunk = self.chunks.next()?;
            self.valid = chunk.valid();
            self.invalid = chunk.invalid();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::is_punct_or_quote;

    fn texts(input: &str) -> Vec<&str> {
        segment_str(input).map(|s| s.text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(segment(b"").count(), 0);
    }

    #[test]
    fn test_boundaries_at_category_change() {
        assert_eq!(
            texts("fn main() {\n    42\n}"),
            vec!["fn", " ", "main", "()", " ", "{", "\n    ", "42", "\n", "}"]
        );
    }

    #[test]
    fn test_cjk_and_emoji_join_other_runs() {
        let segs: Vec<_> = segment_str("你好😀abc").collect();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].kind, SegmentKind::Other);
        assert_eq!(segs[0].char_count(), 6);
    }

    #[test]
    fn test_spans_cover_input() {
        let input = "a.b  c—d 你好!";
        let mut expected_start = 0;
        for seg in segment_str(input) {
            assert_eq!(seg.span.start, expected_start);
            assert!(!seg.span.is_empty());
            assert_eq!(&input[seg.span.clone()], seg.text);
            expected_start = seg.span.end;
        }
        assert_eq!(expected_start, input.len());
    }

    #[test]
    fn test_invalid_bytes_are_single_segments() {
        let input = [b'a', b'b', 0xFF, 0xFE, b'c', 0xE2, 0x82];
        let segs: Vec<_> = segment(&input).collect();
        let kinds: Vec<_> = segs.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentKind::Other,
                SegmentKind::Invalid,
                SegmentKind::Invalid,
                SegmentKind::Other,
                SegmentKind::Invalid,
                SegmentKind::Invalid,
            ]
        );
        assert_eq!(segs[1].span, 2..3);
        assert_eq!(segs[5].span, 6..7);
        assert_eq!(segs[5].char_count(), 1);
    }

    #[test]
    fn test_quotes_split_only_with_quote_set() {
        assert_eq!(texts("say \"hello\""), vec!["say", " ", "\"hello\""]);

        let quoted: Vec<_> = segment_with(b"say 'hello'", is_punct_or_quote)
            .map(|s| (s.kind, s.text))
            .collect();
        assert_eq!(
            quoted,
            vec![
                (SegmentKind::Other, "say"),
                (SegmentKind::Whitespace, " "),
                (SegmentKind::Punctuation, "'"),
                (SegmentKind::Other, "hello"),
                (SegmentKind::Punctuation, "'"),
            ]
        );
    }

    #[test]
    fn test_no_adjacent_segments_share_kind() {
        let input = "x = y + 1;\n\t// comment ✓ done";
        let segs: Vec<_> = segment_str(input).collect();
        for pair in segs.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
        }
    }
}
