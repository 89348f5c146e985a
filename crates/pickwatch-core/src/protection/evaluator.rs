// Protection rule evaluation against projected draft positions.
//
// Never fails: a rule with an unknown team code, an inverted range, or a
// missing caller-supplied recipient leaves the pick with its original team.

use tracing::{debug, warn};

use super::rule::{PositionRange, Rule};
use crate::overrides::OverrideRegistry;
use crate::positions::ProjectedPositions;
use crate::teams::Team;

/// Resolves the current owner of a pick from its protection rule.
///
/// Holds the overrides registry so `complex_manual` rules can be delegated.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    registry: &'a OverrideRegistry,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a OverrideRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a OverrideRegistry {
        self.registry
    }

    /// Current owner of `original`'s pick under `rule`.
    ///
    /// `inverse_conditional` rules need a caller-supplied recipient; use
    /// [`Evaluator::evaluate_with_recipient`] for those.
    pub fn evaluate(&self, rule: &Rule, original: Team, positions: &ProjectedPositions) -> Team {
        self.evaluate_with_recipient(rule, original, None, positions)
    }

    /// Current owner of `original`'s pick, with `recipient` naming the team
    /// that receives an `inverse_conditional` pick when the condition holds.
    pub fn evaluate_with_recipient(
        &self,
        rule: &Rule,
        original: Team,
        recipient: Option<Team>,
        positions: &ProjectedPositions,
    ) -> Team {
        let owner = match self.try_evaluate(rule, original, recipient, positions) {
            Some(owner) => owner,
            None => {
                warn!(
                    "malformed {} rule for {}; pick stays with original team",
                    rule.kind(),
                    original
                );
                original
            }
        };
        debug!(
            "{} rule on {} (position {}) resolves to {}",
            rule.kind(),
            original,
            positions.position(original),
            owner
        );
        owner
    }

    /// `None` means the rule is malformed.
    fn try_evaluate(
        &self,
        rule: &Rule,
        original: Team,
        recipient: Option<Team>,
        positions: &ProjectedPositions,
    ) -> Option<Team> {
        let position = positions.position(original);

        match rule {
            Rule::None => Some(original),

            Rule::ProtectedRange { range, recipient }
            | Rule::InverseRange {
                range, recipient, ..
            } => {
                let range = checked_range(range)?;
                let recipient = team_for(recipient)?;
                if range.contains(position) {
                    Some(original)
                } else {
                    Some(recipient)
                }
            }

            // Opposite polarity to the two arms above.
            Rule::InverseConditional { range, .. } => {
                let range = checked_range(range)?;
                let recipient = recipient?;
                if range.contains(position) {
                    Some(recipient)
                } else {
                    Some(original)
                }
            }

            Rule::MoreFavorableSwap {
                teams: [a, b],
                beneficiary,
                range,
            } => {
                let a = team_for(a)?;
                let b = team_for(b)?;
                let beneficiary = match beneficiary {
                    Some(code) => Some(team_for(code)?),
                    None => None,
                };
                let range = match range {
                    Some(range) => Some(checked_range(range)?),
                    None => None,
                };

                if let (Some(ben), Some(range)) = (beneficiary, range) {
                    if range.contains(positions.position(ben)) {
                        return Some(ben);
                    }
                }

                let better = more_favorable(a, b, positions);
                // A named beneficiary takes the pick whichever side is better.
                Some(beneficiary.unwrap_or(better))
            }

            Rule::LessFavorableSwap { teams: [a, b] } => {
                let a = team_for(a)?;
                let b = team_for(b)?;
                Some(less_favorable(a, b, positions))
            }

            Rule::ComplexManual { scenario } => {
                match self.registry.resolve(scenario, original, positions) {
                    Some(owner) => Some(owner),
                    None => {
                        warn!("no complex scenario registered under '{scenario}'");
                        None
                    }
                }
            }
        }
    }
}

/// The team holding the earlier pick. Ties go to the team that sorts first,
/// so the result does not depend on argument order.
pub fn more_favorable(a: Team, b: Team, positions: &ProjectedPositions) -> Team {
    let key = |t: Team| (positions.position(t), t);
    if key(a) <= key(b) {
        a
    } else {
        b
    }
}

/// The team holding the later pick. Ties go to the team that sorts last.
pub fn less_favorable(a: Team, b: Team, positions: &ProjectedPositions) -> Team {
    let key = |t: Team| (positions.position(t), t);
    if key(a) >= key(b) {
        a
    } else {
        b
    }
}

fn team_for(code: &str) -> Option<Team> {
    let team = Team::from_code(code);
    if team.is_none() {
        warn!("unknown team code '{code}' in protection rule");
    }
    team
}

fn checked_range(range: &PositionRange) -> Option<PositionRange> {
    range.is_well_formed().then_some(*range)
}
