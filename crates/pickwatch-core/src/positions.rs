// Projected draft positions supplied by the standings feed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::lottery::{LotteryError, SimulationResult, LOTTERY_TEAMS};
use crate::teams::Team;

/// Position assumed for any team missing from the map. Several multi-team
/// formulas rely on "unknown means worst".
pub const WORST_POSITION: u8 = 30;

/// Team -> projected draft position (1 = earliest pick, 30 = latest).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectedPositions {
    positions: HashMap<Team, u8>,
}

impl ProjectedPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the projected position for a team.
    pub fn insert(&mut self, team: Team, position: u8) {
        self.positions.insert(team, position);
    }

    /// Projected position for `team`, or [`WORST_POSITION`] when unknown.
    pub fn position(&self, team: Team) -> u8 {
        self.positions.get(&team).copied().unwrap_or(WORST_POSITION)
    }

    /// Whether the feed actually supplied a position for `team`.
    pub fn contains(&self, team: Team) -> bool {
        self.positions.contains_key(&team)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate `(team, position)` pairs ordered by position, then team.
    pub fn ordered(&self) -> Vec<(Team, u8)> {
        let mut entries: Vec<(Team, u8)> = self.positions.iter().map(|(t, p)| (*t, *p)).collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        entries
    }

    /// Copy of this map with the lottery teams moved to their drawn picks.
    ///
    /// Teams outside the draw keep their projected positions, except that one
    /// projected inside the lottery range is moved to the first pick after it.
    pub fn with_lottery_result(&self, result: &SimulationResult) -> Result<Self, LotteryError> {
        result.validate()?;
        let first_after_lottery = LOTTERY_TEAMS as u8 + 1;

        let mut updated = self.clone();
        for (team, position) in updated.positions.iter_mut() {
            if *position < first_after_lottery && result.pick_for(*team).is_none() {
                warn!(
                    "{} projected at {} but not in the lottery draw; moving to {}",
                    team, position, first_after_lottery
                );
                *position = first_after_lottery;
            }
        }
        for pick in result.picks() {
            updated.insert(pick.team, pick.final_pick);
        }
        Ok(updated)
    }
}

impl FromIterator<(Team, u8)> for ProjectedPositions {
    fn from_iter<I: IntoIterator<Item = (Team, u8)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}
