//! Shared segment scan with pluggable accumulators.
//!
//! Strategies that need segment-level accounting implement
//! [`SegmentVisitor`] instead of re-implementing the scan loop.

use super::classify::is_punct;
use super::segment::{segment_with, Segment, SegmentKind};
use super::stats::TextStats;
use super::units::{base_units, UnitRules};

/// Accumulator fed one segment at a time
pub trait SegmentVisitor {
    /// Punctuation set that splits runs for this visitor
    const PUNCT: fn(char) -> bool = is_punct;

    /// Consume one segment
    fn visit(&mut self, segment: &Segment<'_>);
}

/// Drive `visitor` over every segment of `bytes`
pub fn scan<V: SegmentVisitor>(bytes: &[u8], visitor: &mut V) {
    for seg in segment_with(bytes, V::PUNCT) {
        visitor.visit(&seg);
    }
}

/// Base-unit total plus [`TextStats`] for an input.
///
/// Every non-whitespace segment (punctuation included) is scored with
/// [`base_units`]; each invalid byte is one unit.
#[derive(Debug, Clone, Copy)]
pub struct BaseCounter {
    rules: UnitRules,
    /// Sum of base units
    pub base: usize,
    /// Statistics gathered alongside
    pub stats: TextStats,
}

impl BaseCounter {
    /// Create a counter with the given rules
    pub fn new(rules: UnitRules) -> Self {
        Self {
            rules,
            base: 0,
            stats: TextStats::default(),
        }
    }

    /// Scan `bytes` and return the filled counter
    pub fn count(bytes: &[u8], rules: UnitRules) -> Self {
        let mut counter = Self::new(rules);
        scan(bytes, &mut counter);
        counter
    }
}

impl SegmentVisitor for BaseCounter {
    fn visit(&mut self, segment: &Segment<'_>) {
        match segment.kind {
            SegmentKind::Whitespace => self.stats.record_whitespace(segment.char_count()),
            SegmentKind::Invalid => {
                self.stats.record_invalid();
                self.base += 1;
            },
            SegmentKind::Punctuation | SegmentKind::Other => {
                self.stats.record_run(segment.text);
                self.base += base_units(segment.text, &self.rules).1;
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_counter_plain_text() {
        let counter = BaseCounter::count(b"hello world", UnitRules::WEIGHTED);
        // "hello" -> ceil(5/6) = 1, "world" -> 1
        assert_eq!(counter.base, 2);
        assert_eq!(counter.stats.total, 10);
        assert_eq!(counter.stats.space, 1);
    }

    #[test]
    fn test_base_counter_whitespace_only() {
        let counter = BaseCounter::count(b" \n\t ", UnitRules::WEIGHTED);
        assert_eq!(counter.base, 0);
        assert_eq!(counter.stats.total, 0);
        assert_eq!(counter.stats.space, 4);
    }

    #[test]
    fn test_base_counter_invalid_bytes() {
        let counter = BaseCounter::count(&[0xFF, b' ', 0xC0], UnitRules::WEIGHTED);
        assert_eq!(counter.base, 2);
        assert_eq!(counter.stats.total, 2);
    }

    #[test]
    fn test_base_counter_punctuation_segments() {
        // "a" 1, "::" 1, "b" 1, "-------" ceil(7/2)=4
        let counter = BaseCounter::count(b"a::b-------", UnitRules::WEIGHTED);
        assert_eq!(counter.base, 7);
        assert_eq!(counter.stats.punct, 9);
    }

    struct KindCounter(usize);

    impl SegmentVisitor for KindCounter {
        fn visit(&mut self, segment: &Segment<'_>) {
            if segment.kind == SegmentKind::Other {
                self.0 += 1;
            }
        }
    }

    #[test]
    fn test_custom_visitor() {
        let mut visitor = KindCounter(0);
        scan("one, two; three".as_bytes(), &mut visitor);
        assert_eq!(visitor.0, 3);
    }
}
