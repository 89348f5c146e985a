// A single lottery draw.

use rand::Rng;
use tracing::trace;

use super::{
    validate_teams, LotteryError, LotteryPick, LotteryTeam, SimulationResult, LOTTERY_DRAWS,
};

/// Run one lottery draw.
///
/// 1. Picks 1-4 are drawn by weighted sampling without replacement over the
///    remaining teams' combinations, walking the field in seed order.
/// 2. Everyone else fills picks 5-14 in seed order.
///
/// Fails unless `teams` holds exactly 14 entries with seeds 1-14.
pub fn simulate<R: Rng + ?Sized>(
    teams: &[LotteryTeam],
    rng: &mut R,
) -> Result<SimulationResult, LotteryError> {
    validate_teams(teams)?;

    let mut remaining: Vec<&LotteryTeam> = teams.iter().collect();
    remaining.sort_by_key(|t| t.seed);

    let mut picks = Vec::with_capacity(teams.len());

    for pick in 1..=LOTTERY_DRAWS as u8 {
        let total: u32 = remaining.iter().map(|t| t.combinations).sum();
        if total == 0 {
            return Err(LotteryError::NoCombinations);
        }

        let draw = rng.gen_range(0..total);
        let mut cumulative = 0;
        let idx = remaining
            .iter()
            .position(|t| {
                cumulative += t.combinations;
                cumulative > draw
            })
            .unwrap_or(remaining.len() - 1);

        let winner = remaining.remove(idx);
        trace!("pick {pick}: seed {} ({}) on draw {draw}/{total}", winner.seed, winner.team);
        picks.push(LotteryPick {
            team: winner.team,
            original_seed: winner.seed,
            final_pick: pick,
            won_lottery: true,
            dropped_slots: 0,
        });
    }

    for (offset, entry) in remaining.into_iter().enumerate() {
        let final_pick = (LOTTERY_DRAWS + offset + 1) as u8;
        picks.push(LotteryPick {
            team: entry.team,
            original_seed: entry.seed,
            final_pick,
            won_lottery: false,
            dropped_slots: final_pick.saturating_sub(entry.seed),
        });
    }

    Ok(SimulationResult::new(picks))
}
