//! Property tests over arbitrary input.

use proptest::prelude::*;

use tokenest::profile::{Profile, OPENAI_WEIGHTS};
use tokenest::strategy::{ultrafast, weighted};
use tokenest::text::segment;
use tokenest::{estimate_bytes, estimate_input, estimate_text, ImageCounts, Options, Strategy};

fn any_strategy() -> impl proptest::strategy::Strategy<Value = Strategy> {
    prop::sample::select(Strategy::all().to_vec())
}

fn any_profile() -> impl proptest::strategy::Strategy<Value = Profile> {
    prop::sample::select(vec![
        Profile::Auto,
        Profile::OpenAI,
        Profile::Claude,
        Profile::Gemini,
    ])
}

/// Mixed-script text biased toward the interesting classes
fn mixed_text() -> impl proptest::strategy::Strategy<Value = String> {
    "[a-zA-Z0-9 \n\t.,;:!?@/#&=+*<>\\-_()\\[\\]{}\"'你好世界日本語한국어😀🎉👋é]{0,400}"
}

proptest! {
    #[test]
    fn prop_ultrafast_is_quarter_length(bytes in prop::collection::vec(any::<u8>(), 0..2048)) {
        prop_assert_eq!(ultrafast(&bytes), bytes.len().div_ceil(4));
    }

    #[test]
    fn prop_segments_cover_input(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut next = 0;
        for seg in segment(&bytes) {
            prop_assert_eq!(seg.span.start, next);
            prop_assert!(seg.span.end > seg.span.start);
            next = seg.span.end;
        }
        prop_assert_eq!(next, bytes.len());
    }

    #[test]
    fn prop_segments_cover_text(text in mixed_text()) {
        let rebuilt: String = segment(text.as_bytes()).map(|seg| seg.text).collect();
        prop_assert_eq!(rebuilt, text);
    }

    #[test]
    fn prop_estimates_are_deterministic(
        bytes in prop::collection::vec(any::<u8>(), 0..1500),
        strategy in any_strategy(),
        profile in any_profile(),
    ) {
        let opts = Options::new().with_strategy(strategy).with_profile(profile).with_explain(true);
        prop_assert_eq!(estimate_bytes(&bytes, &opts), estimate_bytes(&bytes, &opts));
    }

    #[test]
    fn prop_empty_breakdown_without_explain(text in mixed_text(), strategy in any_strategy()) {
        let opts = Options::new().with_strategy(strategy);
        prop_assert!(estimate_text(&text, &opts).breakdown.is_empty());
    }

    #[test]
    fn prop_weighted_breakdown_sums_to_tokens(text in mixed_text()) {
        let scored = weighted(text.as_bytes(), &OPENAI_WEIGHTS, true);
        let sum: f64 = scored.breakdown.iter().map(|entry| entry.tokens).sum();
        prop_assert_eq!(tokenest::strategy::ceil_tokens(sum), scored.tokens);
        prop_assert!(scored.breakdown.iter().all(|entry| entry.tokens > 0.0));
    }

    #[test]
    fn prop_multiplier_never_decreases(
        text in mixed_text(),
        strategy in any_strategy(),
        multiplier in 1.0f64..4.0,
    ) {
        let base = estimate_text(&text, &Options::new().with_strategy(strategy)).tokens;
        let scaled = estimate_text(
            &text,
            &Options::new().with_strategy(strategy).with_multiplier(multiplier),
        )
        .tokens;
        prop_assert!(scaled >= base);
    }

    #[test]
    fn prop_input_includes_overhead(
        text in mixed_text(),
        strategy in any_strategy(),
        low in 0usize..4,
        high in 0usize..4,
        unknown in 0usize..4,
        messages in 0usize..16,
    ) {
        let opts = Options::new().with_strategy(strategy);
        let images = ImageCounts { low_detail: low, high_detail: high, unknown };
        let overhead = 50 + messages * 4 + low * 85 + high * 765 + unknown * 500;
        let input = estimate_input(&text, images, messages, &opts).tokens;
        prop_assert_eq!(input, overhead + estimate_text(&text, &opts).tokens);
    }
}
