// Lottery seeding from won-lost records.

use serde::{Deserialize, Serialize};

use super::{odds_for_seed, LotteryError, LotteryTeam, LOTTERY_TEAMS};
use crate::teams::Team;

/// A team's current record as supplied by the standings feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team: Team,
    /// "W-L", e.g. "22-60".
    pub record: String,
}

impl TeamRecord {
    pub fn new(team: Team, record: impl Into<String>) -> Self {
        Self {
            team,
            record: record.into(),
        }
    }
}

/// Win count from a "W-L" record string.
pub fn parse_wins(record: &str) -> Option<u32> {
    let (wins, _) = record.trim().split_once('-')?;
    wins.trim().parse().ok()
}

/// Seed the lottery from records: fewest wins first, bottom 14 kept, seeds
/// 1-14 assigned in that order with the official odds attached.
///
/// Teams with equal win counts keep their input order. Fewer than 14 records
/// yield a shorter field, which [`super::simulate`] rejects.
pub fn create_lottery_teams(records: &[TeamRecord]) -> Result<Vec<LotteryTeam>, LotteryError> {
    let mut by_wins = Vec::with_capacity(records.len());
    for entry in records {
        let wins = parse_wins(&entry.record).ok_or_else(|| LotteryError::InvalidRecord {
            team: entry.team,
            record: entry.record.clone(),
        })?;
        by_wins.push((wins, entry));
    }
    // Stable: ties preserve input order.
    by_wins.sort_by_key(|(wins, _)| *wins);

    Ok(by_wins
        .into_iter()
        .take(LOTTERY_TEAMS)
        .zip(1u8..)
        .filter_map(|((_, entry), seed)| {
            let odds = odds_for_seed(seed)?;
            Some(LotteryTeam {
                team: entry.team,
                seed,
                record: entry.record.clone(),
                odds_percentage: odds.percentage,
                combinations: odds.combinations,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn league_records() -> Vec<TeamRecord> {
        Team::ALL
            .iter()
            .enumerate()
            .map(|(i, team)| TeamRecord::new(*team, format!("{}-{}", 60 - i, 22 + i)))
            .collect()
    }

    #[test]
    fn parse_wins_reads_leading_number() {
        assert_eq!(parse_wins("22-60"), Some(22));
        assert_eq!(parse_wins(" 7 - 75 "), Some(7));
        assert_eq!(parse_wins("41-41-0"), Some(41));
        assert_eq!(parse_wins("abc"), None);
        assert_eq!(parse_wins("-60"), None);
        assert_eq!(parse_wins(""), None);
    }

    #[test]
    fn worst_records_get_lowest_seeds() {
        let field = create_lottery_teams(&league_records()).unwrap();
        assert_eq!(field.len(), 14);
        // Team::ALL[29] has the fewest wins (31).
        assert_eq!(field[0].team, Team::WashingtonWizards);
        assert_eq!(field[0].seed, 1);
        assert_eq!(field[0].combinations, 140);
        assert_eq!(field[13].team, Team::ALL[16]);
        assert_eq!(field[13].seed, 14);
        assert_eq!(field[13].combinations, 5);
        assert_eq!(field.iter().map(|t| t.combinations).sum::<u32>(), 1000);
    }

    #[test]
    fn seeds_are_one_through_fourteen() {
        let field = create_lottery_teams(&league_records()).unwrap();
        let seeds: Vec<u8> = field.iter().map(|t| t.seed).collect();
        assert_eq!(seeds, (1..=14).collect::<Vec<u8>>());
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            TeamRecord::new(Team::MiamiHeat, "20-62"),
            TeamRecord::new(Team::AtlantaHawks, "20-62"),
            TeamRecord::new(Team::UtahJazz, "18-64"),
        ];
        let field = create_lottery_teams(&records).unwrap();
        let order: Vec<Team> = field.iter().map(|t| t.team).collect();
        assert_eq!(
            order,
            vec![Team::UtahJazz, Team::MiamiHeat, Team::AtlantaHawks]
        );
    }

    #[test]
    fn unreadable_record_is_an_error() {
        let records = vec![
            TeamRecord::new(Team::UtahJazz, "18-64"),
            TeamRecord::new(Team::MiamiHeat, "n/a"),
        ];
        assert_eq!(
            create_lottery_teams(&records).unwrap_err(),
            LotteryError::InvalidRecord {
                team: Team::MiamiHeat,
                record: "n/a".into()
            }
        );
    }

    #[test]
    fn short_feed_yields_short_field() {
        let records: Vec<TeamRecord> = league_records().into_iter().take(10).collect();
        let field = create_lottery_teams(&records).unwrap();
        assert_eq!(field.len(), 10);
    }
}
