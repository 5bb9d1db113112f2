//! Non-repeating shuffle order over `[0, period)`.
//!
//! The generator is a linear congruential generator `x' = (a·x + c) mod m`
//! with `m = period` and `a = 4m + 1`. Since `a ≡ 1 (mod m)` every step adds
//! `c` modulo `m`, and because `c` is a prime that does not divide `m` the
//! orbit of any start value covers all `m` residues.
//!
//! For `m > 3` only values of one parity are returned, the parity flipping at
//! every reseed. The orbit therefore yields every value of that parity once
//! and comes back to the seed; the draw after that reseeds with the other
//! parity. Over `m` consecutive draws after a reseed each position is returned
//! exactly once, and the first draw never equals the supplied position.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::log::nav_trace;

/// Increment candidates; all prime.
const INCREMENTS: [u16; 16] = [
    6113, 7129, 7753, 9767, 8821, 4229, 2851, 3697, 2999, 887, 3469, 2111, 3413, 1229, 2447, 103,
];

/// Retries of the increment search when the first step would land next to
/// the seed.
const NEIGHBOUR_RETRIES: usize = 10;

/// Periods above this reject increments whose first step lands next to the
/// seed.
const NEIGHBOUR_CHECK_MIN_PERIOD: u16 = 6;

/// Periods above this return values of a single parity between reseeds.
const PARITY_MIN_PERIOD: u16 = 3;

/// Largest forward jump drawn while the period is unknown.
const UNKNOWN_PERIOD_JUMP_MASK: u8 = 0x1F;

/// Shuffle sequence generator.
///
/// # Example
///
/// ```
/// use navigation::ShuffleGenerator;
///
/// let mut rng = ShuffleGenerator::new(1);
/// let mut pos = 0;
/// let mut seen = [false; 8];
/// for _ in 0..8 {
///     pos = rng.next(pos, 8);
///     seen[usize::from(pos)] = true;
/// }
/// assert!(seen.iter().all(|&s| s));
/// ```
#[derive(Debug, Clone)]
pub struct ShuffleGenerator {
    rng: SmallRng,
    multiplier: u32,
    increment: u32,
    modulus: u16,
    seed_position: u16,
    odd: bool,
    restart: bool,
}

impl ShuffleGenerator {
    /// Create a generator; the first draw reseeds.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            multiplier: 1,
            increment: 0,
            modulus: 0,
            seed_position: u16::MAX,
            odd: false,
            restart: true,
        }
    }

    /// Forget the current parameters so the next draw reseeds, and flag the
    /// walkers to restart the shuffled pass from the first entry.
    pub fn reset(&mut self) {
        self.modulus = 0;
        self.restart = true;
    }

    /// Consume the restart flag set by [`ShuffleGenerator::reset`].
    pub fn take_restart(&mut self) -> bool {
        core::mem::replace(&mut self.restart, false)
    }

    /// Current LCG parameters `(a, c, m)`; `m == 0` before the first draw.
    #[must_use]
    pub const fn parameters(&self) -> (u32, u32, u16) {
        (self.multiplier, self.increment, self.modulus)
    }

    /// Next position after `current` in a list of `period` entries.
    ///
    /// With `period == 0` (size not known yet) the result is a short random
    /// jump forward, `current + 1 + (0..=31)`, and the next real draw
    /// reseeds.
    pub fn next(&mut self, current: u16, period: u16) -> u16 {
        if period == 0 {
            self.modulus = 0;
            let jump = self.rng.random::<u8>() & UNKNOWN_PERIOD_JUMP_MASK;
            return current.wrapping_add(1).wrapping_add(u16::from(jump));
        }

        let mut current = current;
        if self.modulus != period || current == self.seed_position {
            current = self.reseed(current, period);
        }
        if current >= self.modulus {
            current = current.checked_rem(self.modulus).unwrap_or(0);
        }

        let mut value = self.step(current);
        if self.modulus > PARITY_MIN_PERIOD {
            // Bounded: the orbit visits every residue, both parities occur.
            for _ in 0..self.modulus {
                if self.parity_matches(value) {
                    break;
                }
                value = self.step(value);
            }
        }
        value
    }

    fn reseed(&mut self, current: u16, period: u16) -> u16 {
        self.modulus = period;
        self.multiplier = u32::from(period).wrapping_mul(4).wrapping_add(1);

        let mut current = current.checked_rem(period).unwrap_or(0);
        if period > PARITY_MIN_PERIOD {
            self.odd = !self.odd;
            current = if self.odd { current | 1 } else { current & !1 };
            if current >= period {
                // period odd and current == period - 1: nearest odd value.
                current = period.saturating_sub(2);
            }
        }
        self.seed_position = current;

        let m = u32::from(period);
        let next = u32::from(current).wrapping_add(1).checked_rem(m).unwrap_or(0);
        let prev = u32::from(current)
            .wrapping_add(m)
            .wrapping_sub(1)
            .checked_rem(m)
            .unwrap_or(0);
        for _ in 0..=NEIGHBOUR_RETRIES {
            self.increment = u32::from(self.pick_increment(period));
            let expected = self.lcg(u32::from(current));
            let neighbour = expected == next || expected == prev;
            if !(neighbour && period > NEIGHBOUR_CHECK_MIN_PERIOD) {
                break;
            }
        }

        nav_trace!(
            "shuffle reseed: a={} c={} m={} seed={}",
            self.multiplier,
            self.increment,
            self.modulus,
            self.seed_position
        );
        current
    }

    /// Random table entry coprime with `period`.
    fn pick_increment(&mut self, period: u16) -> u16 {
        let start = usize::from(self.rng.random::<u8>());
        (0..INCREMENTS.len())
            .filter_map(|i| {
                let slot = start.wrapping_add(i).checked_rem(INCREMENTS.len())?;
                INCREMENTS.get(slot).copied()
            })
            .find(|&c| period.checked_rem(c) != Some(0))
            // Two table primes multiply past u16::MAX, so at most one divides.
            .unwrap_or(1)
    }

    fn lcg(&self, x: u32) -> u32 {
        let v = u64::from(self.multiplier)
            .wrapping_mul(u64::from(x))
            .wrapping_add(u64::from(self.increment))
            .checked_rem(u64::from(self.modulus))
            .unwrap_or(0);
        // v < m <= u16::MAX
        u32::try_from(v).unwrap_or(0)
    }

    fn step(&self, x: u16) -> u16 {
        u16::try_from(self.lcg(u32::from(x))).unwrap_or(0)
    }

    const fn parity_matches(&self, value: u16) -> bool {
        (value & 1 == 1) == self.odd
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;

    fn cycle(seed: u64, start: u16, period: u16) -> Vec<u16> {
        let mut rng = ShuffleGenerator::new(seed);
        let mut pos = start;
        (0..period)
            .map(|_| {
                pos = rng.next(pos, period);
                pos
            })
            .collect()
    }

    #[test]
    fn test_full_coverage_small_periods() {
        for period in 1..=40u16 {
            for start in 0..period {
                let mut seen = cycle(u64::from(period), start, period);
                seen.sort_unstable();
                let expected: Vec<u16> = (0..period).collect();
                assert_eq!(seen, expected, "period {period} start {start}");
            }
        }
    }

    #[test]
    fn test_first_draw_differs_from_start() {
        for period in 2..=64u16 {
            for start in 0..period {
                let first = cycle(7, start, period)[0];
                assert_ne!(first, start, "period {period} start {start}");
            }
        }
    }

    #[test]
    fn test_period_one_always_zero() {
        let mut rng = ShuffleGenerator::new(3);
        for _ in 0..5 {
            assert_eq!(rng.next(0, 1), 0);
        }
    }

    #[test]
    fn test_unknown_period_jumps_forward() {
        let mut rng = ShuffleGenerator::new(9);
        for _ in 0..100 {
            let v = rng.next(10, 0);
            assert!((11..=42).contains(&v), "{v}");
        }
        assert_eq!(rng.parameters().2, 0);
    }

    #[test]
    fn test_period_change_reseeds() {
        let mut rng = ShuffleGenerator::new(5);
        rng.next(0, 10);
        assert_eq!(rng.parameters().2, 10);
        let v = rng.next(3, 20);
        assert!(v < 20);
        let (a, c, m) = rng.parameters();
        assert_eq!(m, 20);
        assert_eq!(a, 81);
        assert_ne!(20 % c, 0);
    }

    #[test]
    fn test_out_of_range_position_is_normalised() {
        let mut rng = ShuffleGenerator::new(11);
        assert!(rng.next(crate::POS_NONE, 12) < 12);
    }

    #[test]
    fn test_restart_flag() {
        let mut rng = ShuffleGenerator::new(0);
        assert!(rng.take_restart());
        assert!(!rng.take_restart());
        rng.reset();
        assert!(rng.take_restart());
    }
}
