// Multi-run lottery aggregation.
//
// Counts are accumulated per team across runs and only turned into
// probabilities when the batch is finished. Each batch owns its accumulator.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::draw::simulate;
use super::{validate_teams, LotteryError, LotteryTeam, SimulationResult, LOTTERY_TEAMS};
use crate::teams::Team;

/// Runs handled by one parallel worker chunk.
const PARALLEL_CHUNK_RUNS: usize = 10_000;

/// Running counts for one team.
#[derive(Debug, Clone)]
struct TeamTally {
    team: Team,
    seed: u8,
    /// Index `i` counts landings on pick `i + 1`.
    pick_counts: [u64; LOTTERY_TEAMS],
    best_pick: u8,
    worst_pick: u8,
    top1: u64,
    top3: u64,
    top4: u64,
}

impl TeamTally {
    fn new(team: Team, seed: u8) -> Self {
        Self {
            team,
            seed,
            pick_counts: [0; LOTTERY_TEAMS],
            best_pick: u8::MAX,
            worst_pick: 0,
            top1: 0,
            top3: 0,
            top4: 0,
        }
    }

    fn record(&mut self, pick: u8) {
        self.pick_counts[pick as usize - 1] += 1;
        self.best_pick = self.best_pick.min(pick);
        self.worst_pick = self.worst_pick.max(pick);
        if pick == 1 {
            self.top1 += 1;
        }
        if pick <= 3 {
            self.top3 += 1;
        }
        if pick <= 4 {
            self.top4 += 1;
        }
    }

    fn merge(&mut self, other: &TeamTally) {
        for (mine, theirs) in self.pick_counts.iter_mut().zip(other.pick_counts.iter()) {
            *mine += theirs;
        }
        self.best_pick = self.best_pick.min(other.best_pick);
        self.worst_pick = self.worst_pick.max(other.worst_pick);
        self.top1 += other.top1;
        self.top3 += other.top3;
        self.top4 += other.top4;
    }
}

/// Per-team counts for one aggregation batch.
#[derive(Debug, Clone)]
pub struct LotteryAccumulator {
    runs: u64,
    /// Indexed by seed - 1.
    tallies: Vec<TeamTally>,
}

impl LotteryAccumulator {
    /// Empty accumulator for a validated 14-team field.
    pub fn new(teams: &[LotteryTeam]) -> Result<Self, LotteryError> {
        validate_teams(teams)?;
        let mut tallies: Vec<TeamTally> =
            teams.iter().map(|t| TeamTally::new(t.team, t.seed)).collect();
        tallies.sort_by_key(|t| t.seed);
        Ok(Self { runs: 0, tallies })
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Add one draw to the counts. A draw with a seed or pick outside 1-14
    /// is rejected and nothing is counted.
    pub fn record(&mut self, result: &SimulationResult) -> Result<(), LotteryError> {
        result.validate()?;
        for pick in result.picks() {
            if let Some(tally) = self.tallies.get_mut(pick.original_seed as usize - 1) {
                tally.record(pick.final_pick);
            }
        }
        self.runs += 1;
        Ok(())
    }

    /// Fold another batch's counts for the same field into this one.
    pub fn merge(&mut self, other: &LotteryAccumulator) {
        for (mine, theirs) in self.tallies.iter_mut().zip(other.tallies.iter()) {
            mine.merge(theirs);
        }
        self.runs += other.runs;
    }

    /// Convert counts into percentages. Fails if nothing was recorded.
    pub fn finish(&self) -> Result<AggregatedResults, LotteryError> {
        if self.runs == 0 {
            return Err(LotteryError::ZeroRuns);
        }
        let runs = self.runs as f64;
        let percent = |count: u64| count as f64 / runs * 100.0;

        let teams = self
            .tallies
            .iter()
            .map(|tally| {
                let pick_distribution: Vec<f64> =
                    tally.pick_counts.iter().map(|c| percent(*c)).collect();
                let average_pick: f64 = tally
                    .pick_counts
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (i + 1) as f64 * (*c as f64 / runs))
                    .sum();
                TeamOutlook {
                    team: tally.team,
                    seed: tally.seed,
                    pick_distribution,
                    average_pick,
                    best_pick: tally.best_pick,
                    worst_pick: tally.worst_pick,
                    top1_probability: percent(tally.top1),
                    top3_probability: percent(tally.top3),
                    top4_probability: percent(tally.top4),
                }
            })
            .collect();

        Ok(AggregatedResults {
            runs: self.runs,
            teams,
        })
    }
}

/// Empirical outlook for one team over a batch of draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamOutlook {
    pub team: Team,
    pub seed: u8,
    /// Percent of runs landing on picks 1-14 (index 0 is pick 1).
    pub pick_distribution: Vec<f64>,
    pub average_pick: f64,
    pub best_pick: u8,
    pub worst_pick: u8,
    pub top1_probability: f64,
    pub top3_probability: f64,
    pub top4_probability: f64,
}

/// Finished aggregation, one outlook per seed in seed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResults {
    pub runs: u64,
    pub teams: Vec<TeamOutlook>,
}

impl AggregatedResults {
    pub fn outlook_for(&self, team: Team) -> Option<&TeamOutlook> {
        self.teams.iter().find(|o| o.team == team)
    }
}

/// Run `count` draws on one generator and aggregate them.
pub fn run_multiple_simulations<R: Rng + ?Sized>(
    teams: &[LotteryTeam],
    count: usize,
    rng: &mut R,
) -> Result<AggregatedResults, LotteryError> {
    if count == 0 {
        return Err(LotteryError::ZeroRuns);
    }
    let mut acc = LotteryAccumulator::new(teams)?;
    for _ in 0..count {
        acc.record(&simulate(teams, &mut *rng)?)?;
    }
    debug!("aggregated {count} lottery draws");
    acc.finish()
}

/// Run `count` draws across the rayon pool and aggregate them.
///
/// Each chunk draws from its own ChaCha stream derived from `seed`, so the
/// result depends only on `seed` and `count`, not on scheduling.
pub fn run_parallel_simulations(
    teams: &[LotteryTeam],
    count: usize,
    seed: u64,
) -> Result<AggregatedResults, LotteryError> {
    if count == 0 {
        return Err(LotteryError::ZeroRuns);
    }
    let empty = LotteryAccumulator::new(teams)?;
    let chunks = count.div_ceil(PARALLEL_CHUNK_RUNS);
    info!("running {count} lottery draws in {chunks} parallel chunks");

    let total = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(chunk as u64);
            let start = chunk * PARALLEL_CHUNK_RUNS;
            let runs = PARALLEL_CHUNK_RUNS.min(count - start);

            let mut acc = empty.clone();
            for _ in 0..runs {
                acc.record(&simulate(teams, &mut rng)?)?;
            }
            Ok::<_, LotteryError>(acc)
        })
        .try_reduce(
            || empty.clone(),
            |mut a, b| {
                a.merge(&b);
                Ok(a)
            },
        )?;

    total.finish()
}
