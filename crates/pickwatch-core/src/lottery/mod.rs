// Draft lottery: odds table, single draws, and multi-run aggregation.

pub mod aggregate;
pub mod draw;
pub mod odds;
pub mod seeding;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::teams::Team;

pub use aggregate::{
    run_multiple_simulations, run_parallel_simulations, AggregatedResults, LotteryAccumulator,
    TeamOutlook,
};
pub use draw::simulate;
pub use odds::{odds_for_seed, odds_table, SeedOdds};
pub use seeding::{create_lottery_teams, parse_wins, TeamRecord};

/// Number of teams in the lottery.
pub const LOTTERY_TEAMS: usize = 14;

/// Picks decided by weighted draw; the rest follow seed order.
pub const LOTTERY_DRAWS: usize = 4;

/// Combinations across all 14 seeds.
pub const TOTAL_COMBINATIONS: u32 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LotteryError {
    #[error("lottery requires exactly {expected} teams, got {found}")]
    TeamCount { expected: usize, found: usize },

    #[error("lottery seed {seed} is outside 1-14")]
    SeedOutOfRange { seed: u8 },

    #[error("lottery seed {seed} assigned to more than one team")]
    DuplicateSeed { seed: u8 },

    #[error("remaining lottery teams hold zero combinations")]
    NoCombinations,

    #[error("simulation run count must be greater than 0")]
    ZeroRuns,

    #[error("{team} holds pick {pick} from seed {seed}; both must be 1-14")]
    PickOutOfRange { team: Team, seed: u8, pick: u8 },

    #[error("cannot read win count from record '{record}' for {team}")]
    InvalidRecord { team: Team, record: String },
}

/// A lottery-eligible team with its seed and official odds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotteryTeam {
    pub team: Team,
    /// 1 = worst record.
    pub seed: u8,
    /// Won-lost record as reported by the standings feed, e.g. "22-60".
    pub record: String,
    pub odds_percentage: f64,
    /// Combinations out of [`TOTAL_COMBINATIONS`].
    pub combinations: u32,
}

/// Where one team landed in a single draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryPick {
    pub team: Team,
    pub original_seed: u8,
    pub final_pick: u8,
    /// Drawn into one of the top four picks.
    pub won_lottery: bool,
    /// Slots fallen below the seed; zero for lottery winners.
    pub dropped_slots: u8,
}

/// Outcome of one draw: every seed mapped to exactly one pick 1-14,
/// ordered by final pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    picks: Vec<LotteryPick>,
}

impl SimulationResult {
    pub(crate) fn new(picks: Vec<LotteryPick>) -> Self {
        Self { picks }
    }

    /// Picks in final order (index 0 is pick 1).
    pub fn picks(&self) -> &[LotteryPick] {
        &self.picks
    }

    pub fn pick_for(&self, team: Team) -> Option<&LotteryPick> {
        self.picks.iter().find(|p| p.team == team)
    }

    /// The team holding the first pick.
    pub fn winner(&self) -> Option<Team> {
        self.picks.first().map(|p| p.team)
    }

    /// Check that every seed and pick lies in 1-14. Draws from [`simulate`]
    /// always pass; deserialized ones may not.
    pub fn validate(&self) -> Result<(), LotteryError> {
        let in_range = |n: u8| n >= 1 && n as usize <= LOTTERY_TEAMS;
        match self
            .picks
            .iter()
            .find(|p| !in_range(p.original_seed) || !in_range(p.final_pick))
        {
            Some(p) => Err(LotteryError::PickOutOfRange {
                team: p.team,
                seed: p.original_seed,
                pick: p.final_pick,
            }),
            None => Ok(()),
        }
    }

    /// Teams that moved into the top four from outside it.
    pub fn jumpers(&self) -> Vec<&LotteryPick> {
        self.picks
            .iter()
            .filter(|p| p.won_lottery && p.original_seed as usize > LOTTERY_DRAWS)
            .collect()
    }
}

/// Reject anything but 14 teams holding seeds 1-14 exactly once.
pub(crate) fn validate_teams(teams: &[LotteryTeam]) -> Result<(), LotteryError> {
    if teams.len() != LOTTERY_TEAMS {
        return Err(LotteryError::TeamCount {
            expected: LOTTERY_TEAMS,
            found: teams.len(),
        });
    }

    let mut seen = [false; LOTTERY_TEAMS];
    for entry in teams {
        if entry.seed == 0 || entry.seed as usize > LOTTERY_TEAMS {
            return Err(LotteryError::SeedOutOfRange { seed: entry.seed });
        }
        let slot = &mut seen[entry.seed as usize - 1];
        if *slot {
            return Err(LotteryError::DuplicateSeed { seed: entry.seed });
        }
        *slot = true;
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::standard_field;
    use super::*;

    #[test]
    fn validate_accepts_standard_field() {
        assert!(validate_teams(&standard_field()).is_ok());
    }

    #[test]
    fn validate_rejects_wrong_counts() {
        let mut field = standard_field();
        field.pop();
        assert_eq!(
            validate_teams(&field),
            Err(LotteryError::TeamCount {
                expected: 14,
                found: 13
            })
        );

        let mut field = standard_field();
        let extra = field[0].clone();
        field.push(extra);
        assert_eq!(
            validate_teams(&field),
            Err(LotteryError::TeamCount {
                expected: 14,
                found: 15
            })
        );
    }

    #[test]
    fn validate_rejects_bad_seeds() {
        let mut field = standard_field();
        field[3].seed = 0;
        assert_eq!(
            validate_teams(&field),
            Err(LotteryError::SeedOutOfRange { seed: 0 })
        );

        let mut field = standard_field();
        field[3].seed = 2;
        assert_eq!(
            validate_teams(&field),
            Err(LotteryError::DuplicateSeed { seed: 2 })
        );
    }
}
