// Traded pick ledger: resolves the current owner of every traded pick.
//
// A pick tagged with a scenario key goes to the overrides registry; every
// other pick has its protection text parsed and evaluated.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::overrides::OverrideRegistry;
use crate::positions::ProjectedPositions;
use crate::protection::{parse, Evaluator, Rule};
use crate::teams::{deserialize_code, Team};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("pick {pick}: protection '{text}' needs manual classification")]
    UnparseableProtection { pick: String, text: String },

    #[error("pick {pick}: unknown complex scenario '{key}'")]
    UnknownScenario { pick: String, key: String },

    #[error("pick {pick}: unknown team code '{code}'")]
    UnknownTeam { pick: String, code: String },

    #[error("pick {pick}: position range {range} is empty or starts below 1")]
    MalformedRange { pick: String, range: String },
}

/// One traded pick as recorded by an editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradedPick {
    pub season: u16,
    pub round: u8,
    /// Team whose draft position determines the pick.
    #[serde(deserialize_with = "deserialize_code")]
    pub original_team: Team,
    /// Team the trade sends the pick to.
    #[serde(deserialize_with = "deserialize_code")]
    pub holder: Team,
    #[serde(default)]
    pub protection: String,
    /// Key into the overrides registry for multi-team arrangements.
    #[serde(default)]
    pub scenario: Option<String>,
}

impl TradedPick {
    /// Short identifier, e.g. `2026-r1-okc`.
    pub fn id(&self) -> String {
        format!(
            "{}-r{}-{}",
            self.season,
            self.round,
            self.original_team.abbreviation().to_ascii_lowercase()
        )
    }

    /// Scenario key, either set explicitly or written as "Complex: key".
    fn scenario_key(&self) -> Option<String> {
        if let Some(key) = &self.scenario {
            return Some(key.clone());
        }
        match parse(&self.protection) {
            Some(Rule::ComplexManual { scenario }) => Some(scenario),
            _ => None,
        }
    }
}

/// A traded pick with its current owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPick {
    pub id: String,
    pub pick: TradedPick,
    /// Rule used, absent when resolved through a scenario key or when the
    /// protection text could not be parsed.
    pub rule: Option<Rule>,
    pub owner: Team,
    /// Owner differs from the original team.
    pub conveyed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickLedger {
    #[serde(default)]
    pub picks: Vec<TradedPick>,
}

impl PickLedger {
    pub fn new(picks: Vec<TradedPick>) -> Self {
        Self { picks }
    }

    pub fn picks(&self) -> &[TradedPick] {
        &self.picks
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Check every pick can be resolved: scenario keys must be registered,
    /// free-text protections must parse, every team they name must exist, and
    /// their position ranges must be non-empty.
    pub fn validate(&self, registry: &OverrideRegistry) -> Result<(), LedgerError> {
        for pick in &self.picks {
            if let Some(key) = pick.scenario_key() {
                if !registry.contains(&key) {
                    return Err(LedgerError::UnknownScenario {
                        pick: pick.id(),
                        key,
                    });
                }
                continue;
            }
            let Some(rule) = parse(&pick.protection) else {
                return Err(LedgerError::UnparseableProtection {
                    pick: pick.id(),
                    text: pick.protection.clone(),
                });
            };
            if let Some(code) = rule
                .team_codes()
                .into_iter()
                .find(|code| Team::from_code(code).is_none())
            {
                return Err(LedgerError::UnknownTeam {
                    pick: pick.id(),
                    code: code.to_string(),
                });
            }
            if let Some(range) = rule.range().filter(|r| !r.is_well_formed()) {
                return Err(LedgerError::MalformedRange {
                    pick: pick.id(),
                    range: range.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Current owner of one pick.
    pub fn resolve(
        &self,
        pick: &TradedPick,
        evaluator: &Evaluator<'_>,
        positions: &ProjectedPositions,
    ) -> ResolvedPick {
        let original = pick.original_team;

        let (rule, owner) = if let Some(key) = &pick.scenario {
            let owner = evaluator
                .registry()
                .resolve(key, original, positions)
                .unwrap_or_else(|| {
                    warn!("pick {}: scenario '{key}' not registered; keeping original", pick.id());
                    original
                });
            (None, owner)
        } else {
            match parse(&pick.protection) {
                // Unconditional: the pick already belongs to the holder.
                Some(Rule::None) => (Some(Rule::None), pick.holder),
                Some(rule) => {
                    let owner = evaluator.evaluate_with_recipient(
                        &rule,
                        original,
                        Some(pick.holder),
                        positions,
                    );
                    (Some(rule), owner)
                }
                None => {
                    warn!(
                        "pick {}: unparseable protection '{}'; keeping original",
                        pick.id(),
                        pick.protection
                    );
                    (None, original)
                }
            }
        };

        debug!("pick {} resolves to {}", pick.id(), owner);
        ResolvedPick {
            id: pick.id(),
            pick: pick.clone(),
            rule,
            owner,
            conveyed: owner != original,
        }
    }

    /// Current owner of every pick, in ledger order.
    pub fn resolve_all(
        &self,
        evaluator: &Evaluator<'_>,
        positions: &ProjectedPositions,
    ) -> Vec<ResolvedPick> {
        self.picks
            .iter()
            .map(|pick| self.resolve(pick, evaluator, positions))
            .collect()
    }
}
