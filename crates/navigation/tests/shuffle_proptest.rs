//! Property-based tests for the shuffle order and play-list line parsing.

#![allow(clippy::arithmetic_side_effects, clippy::indexing_slicing, missing_docs)]

use navigation::{PlaylistKind, ShuffleGenerator};

proptest::proptest! {
    /// One cycle of `period` draws from a fresh generator visits every
    /// position exactly once.
    #[test]
    fn cycle_covers_every_position(period in 4u16..=64, seed in proptest::num::u64::ANY, start in 0u16..64) {
        let start = start % period;
        let mut rng = ShuffleGenerator::new(seed);
        let mut seen = vec![0u8; usize::from(period)];
        let mut pos = start;
        for _ in 0..period {
            pos = rng.next(pos, period);
            assert!(pos < period, "draw {pos} outside period {period}");
            seen[usize::from(pos)] += 1;
        }
        assert!(seen.iter().all(|&n| n == 1), "period {period} seed {seed}: {seen:?}");
    }

    /// The first draw never repeats the position it starts from.
    #[test]
    fn first_draw_moves(period in 2u16..=512, seed in proptest::num::u64::ANY, start in 0u16..512) {
        let start = start % period;
        let mut rng = ShuffleGenerator::new(seed);
        assert_ne!(rng.next(start, period), start);
    }

    /// Draws stay inside the list whatever position is fed back, including
    /// out-of-range ones.
    #[test]
    fn draws_stay_in_range(period in 1u16..=2000, seed in proptest::num::u64::ANY, start in proptest::num::u16::ANY) {
        let mut rng = ShuffleGenerator::new(seed);
        let mut pos = start;
        for _ in 0..32 {
            pos = rng.next(pos, period);
            assert!(pos < period);
        }
    }

    /// Parsing any line never panics and only returns a suffix of it.
    #[test]
    fn parse_line_returns_suffix(line in "\\PC{0,40}") {
        for kind in [PlaylistKind::M3u, PlaylistKind::Pls, PlaylistKind::Smp] {
            if let Some(path) = kind.parse_line(&line) {
                assert!(line.trim_end_matches(['\r', '\n']).ends_with(path));
                assert!(!path.is_empty() || kind != PlaylistKind::M3u);
            }
        }
    }
}
