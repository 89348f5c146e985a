// Official lottery odds by seed.

use serde::{Deserialize, Serialize};

use super::{LOTTERY_TEAMS, TOTAL_COMBINATIONS};

/// Combinations held by seeds 1 through 14.
pub const SEED_COMBINATIONS: [u32; LOTTERY_TEAMS] =
    [140, 140, 140, 125, 105, 90, 75, 60, 45, 30, 20, 15, 10, 5];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeedOdds {
    pub seed: u8,
    pub combinations: u32,
    /// Chance of the first pick, in percent.
    pub percentage: f64,
}

/// Odds for a lottery seed, or `None` outside 1-14.
pub fn odds_for_seed(seed: u8) -> Option<SeedOdds> {
    let idx = (seed as usize).checked_sub(1)?;
    let combinations = *SEED_COMBINATIONS.get(idx)?;
    Some(SeedOdds {
        seed,
        combinations,
        percentage: combinations as f64 / TOTAL_COMBINATIONS as f64 * 100.0,
    })
}

/// The full 14-row table.
pub fn odds_table() -> Vec<SeedOdds> {
    (1..=LOTTERY_TEAMS as u8).filter_map(odds_for_seed).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinations_sum_to_total() {
        assert_eq!(SEED_COMBINATIONS.iter().sum::<u32>(), TOTAL_COMBINATIONS);
        assert_eq!(
            odds_table().iter().map(|o| o.combinations).sum::<u32>(),
            TOTAL_COMBINATIONS
        );
    }

    #[test]
    fn lookup_matches_official_table() {
        let first = odds_for_seed(1).unwrap();
        assert_eq!(first.combinations, 140);
        assert!((first.percentage - 14.0).abs() < 1e-9);

        let fourth = odds_for_seed(4).unwrap();
        assert_eq!(fourth.combinations, 125);
        assert!((fourth.percentage - 12.5).abs() < 1e-9);

        let last = odds_for_seed(14).unwrap();
        assert_eq!(last.combinations, 5);
        assert!((last.percentage - 0.5).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_seeds() {
        assert_eq!(odds_for_seed(0), None);
        assert_eq!(odds_for_seed(15), None);
    }

    #[test]
    fn odds_never_increase_with_seed() {
        let table = odds_table();
        assert_eq!(table.len(), 14);
        assert!(table.windows(2).all(|w| w[0].combinations >= w[1].combinations));
    }
}
