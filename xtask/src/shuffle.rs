//! xtask shuffle: print one cycle of the shuffle generator.

use anyhow::Result;
use colored::Colorize;
use navigation::ShuffleGenerator;

/// Entry point called from main.rs
pub fn run(period: u16, seed: u64) -> Result<()> {
    if period == 0 {
        anyhow::bail!("--period must be at least 1");
    }

    let mut rng = ShuffleGenerator::new(seed);
    let order = cycle(&mut rng, period);
    let (multiplier, increment, modulus) = rng.parameters();

    println!();
    println!(
        "{}",
        format!("Shuffle cycle: period {period}, seed {seed:#x}").cyan().bold()
    );
    println!("  x' = ({multiplier} * x + {increment}) mod {modulus}");
    println!();

    for (i, pos) in order.iter().enumerate() {
        println!("  {:>5}  {pos}", i.saturating_add(1));
    }
    println!();

    match coverage(&order, period) {
        Coverage::Exact => println!("{}", "✓ Every position visited exactly once".green()),
        Coverage::Missing(n) => {
            println!("{}", format!("⚠ {n} positions not visited").yellow());
        }
    }
    println!();
    Ok(())
}

/// Draw `period` positions starting from position 0.
pub(crate) fn cycle(rng: &mut ShuffleGenerator, period: u16) -> Vec<u16> {
    let mut pos = 0;
    (0..period)
        .map(|_| {
            pos = rng.next(pos, period);
            pos
        })
        .collect()
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Coverage {
    Exact,
    Missing(usize),
}

pub(crate) fn coverage(order: &[u16], period: u16) -> Coverage {
    let mut seen = vec![false; usize::from(period)];
    for &pos in order {
        if let Some(slot) = seen.get_mut(usize::from(pos)) {
            *slot = true;
        }
    }
    match seen.iter().filter(|s| !**s).count() {
        0 => Coverage::Exact,
        n => Coverage::Missing(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cycle_is_a_permutation() {
        for period in [1u16, 2, 3, 10, 97, 256] {
            let mut rng = ShuffleGenerator::new(7);
            let order = cycle(&mut rng, period);
            assert_eq!(order.len(), usize::from(period));
            assert_eq!(coverage(&order, period), Coverage::Exact, "period {period}");
        }
    }

    #[test]
    fn coverage_counts_gaps() {
        assert_eq!(coverage(&[0, 0, 2], 4), Coverage::Missing(2));
    }
}
