//! Composite cache keys.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::sync::OnceLock;

use crate::estimate::{
    ImageCounts, Options, Strategy, BASE_OVERHEAD, IMAGE_TOKENS_DEFAULT, IMAGE_TOKENS_HIGH,
    IMAGE_TOKENS_LOW, PER_MESSAGE_OVERHEAD,
};
use crate::profile::Profile;

/// Which entry point produced the cached value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputKind {
    Bytes,
    Text,
    Input,
}

impl InputKind {
    fn tag(self) -> u8 {
        match self {
            InputKind::Bytes => b'b',
            InputKind::Text => b't',
            InputKind::Input => b'i',
        }
    }

    /// Strategy that `Auto` resolves to for this entry point
    pub(crate) fn auto_strategy(self) -> Strategy {
        match self {
            InputKind::Bytes => Strategy::UltraFast,
            InputKind::Text | InputKind::Input => Strategy::Fast,
        }
    }
}

fn seed() -> &'static RandomState {
    static SEED: OnceLock<RandomState> = OnceLock::new();
    SEED.get_or_init(RandomState::new)
}

fn strategy_tag(strategy: Strategy) -> u64 {
    match strategy {
        Strategy::Auto => 0,
        Strategy::UltraFast => 1,
        Strategy::Fast => 2,
        Strategy::Weighted => 3,
        Strategy::Zr => 4,
    }
}

fn profile_tag(profile: Profile) -> u64 {
    match profile {
        Profile::Auto => 0,
        Profile::OpenAI => 1,
        Profile::Claude => 2,
        Profile::Gemini => 3,
    }
}

/// Hash every input that can change the result, in a fixed order.
///
/// Strategy and profile are hashed after resolution so that `Auto` and the
/// choice it resolves to share an entry. The overhead constants are hashed
/// too, since `Input` results include them.
pub(crate) fn cache_key(
    kind: InputKind,
    payload: &[u8],
    images: ImageCounts,
    message_count: usize,
    opts: &Options,
) -> u64 {
    let strategy = opts.strategy.or(kind.auto_strategy());
    let profile = opts.resolved_profile();

    let mut h = seed().build_hasher();
    h.write_u64(u64::from(kind.tag()));
    h.write_u64(strategy_tag(strategy));
    h.write_u64(profile_tag(profile));
    h.write_u64(opts.multiplier.to_bits());
    h.write_u64(u64::from(opts.explain));
    h.write_u64(message_count as u64);
    h.write_u64(images.low_detail as u64);
    h.write_u64(images.high_detail as u64);
    h.write_u64(images.unknown as u64);
    for constant in [
        BASE_OVERHEAD,
        PER_MESSAGE_OVERHEAD,
        IMAGE_TOKENS_LOW,
        IMAGE_TOKENS_HIGH,
        IMAGE_TOKENS_DEFAULT,
    ] {
        h.write_u64(constant as u64);
    }
    h.write(payload);
    h.finish()
}
