// Structured pick protection rules produced by the parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive draft position range, e.g. `1-4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionRange {
    pub min: u8,
    pub max: u8,
}

impl PositionRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// `min <= position <= max`.
    pub const fn contains(&self, position: u8) -> bool {
        self.min <= position && position <= self.max
    }

    /// A range with `min > max` or a zero bound cannot match a real pick.
    pub fn is_well_formed(&self) -> bool {
        self.min >= 1 && self.min <= self.max
    }
}

impl fmt::Display for PositionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// A parsed protection rule.
///
/// Team references are kept as the uppercase codes the editor wrote; the
/// evaluator canonicalizes them and treats an unknown code as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// Pick conveys unconditionally.
    None,
    /// Original team keeps the pick inside `range`, otherwise it goes to
    /// `recipient`.
    ProtectedRange { range: PositionRange, recipient: String },
    /// Same evaluation as [`Rule::ProtectedRange`], authored as
    /// "TEAM X-Y; Y+1-Z to OTHER". `keeper` is the team named first.
    InverseRange {
        keeper: String,
        range: PositionRange,
        recipient: String,
    },
    /// Pick moves to the caller-supplied recipient only inside `range`.
    /// `team` is the team named in the clause.
    InverseConditional { team: String, range: PositionRange },
    /// Beneficiary (or whichever team sits higher) takes the better of the
    /// two picks. With `range`, a beneficiary already inside it keeps its own.
    MoreFavorableSwap {
        teams: [String; 2],
        beneficiary: Option<String>,
        range: Option<PositionRange>,
    },
    /// Resolves to whichever team sits lower in the order.
    LessFavorableSwap { teams: [String; 2] },
    /// Handled by a named resolver in the overrides registry.
    ComplexManual { scenario: String },
}

impl Rule {
    /// Short machine-readable name of the rule kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Rule::None => "none",
            Rule::ProtectedRange { .. } => "protected_range",
            Rule::InverseRange { .. } => "inverse_range",
            Rule::InverseConditional { .. } => "inverse_conditional",
            Rule::MoreFavorableSwap { .. } => "more_favorable_swap",
            Rule::LessFavorableSwap { .. } => "less_favorable_swap",
            Rule::ComplexManual { .. } => "complex_manual",
        }
    }

    /// The position range the rule tests, if it has one.
    pub fn range(&self) -> Option<&PositionRange> {
        match self {
            Rule::ProtectedRange { range, .. }
            | Rule::InverseRange { range, .. }
            | Rule::InverseConditional { range, .. } => Some(range),
            Rule::MoreFavorableSwap { range, .. } => range.as_ref(),
            Rule::None | Rule::LessFavorableSwap { .. } | Rule::ComplexManual { .. } => None,
        }
    }

    /// Every team code the rule mentions, in authored order.
    pub fn team_codes(&self) -> Vec<&str> {
        match self {
            Rule::None | Rule::ComplexManual { .. } => Vec::new(),
            Rule::ProtectedRange { recipient, .. } => vec![recipient.as_str()],
            Rule::InverseRange {
                keeper, recipient, ..
            } => vec![keeper.as_str(), recipient.as_str()],
            Rule::InverseConditional { team, .. } => vec![team.as_str()],
            Rule::MoreFavorableSwap {
                teams: [a, b],
                beneficiary,
                ..
            } => beneficiary
                .iter()
                .map(String::as_str)
                .chain([a.as_str(), b.as_str()])
                .collect(),
            Rule::LessFavorableSwap { teams: [a, b] } => vec![a.as_str(), b.as_str()],
        }
    }
}

/// Canonical text rendering. Every rule the parser produces re-parses from
/// this text to an equal rule.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::None => write!(f, "Unprotected"),
            Rule::ProtectedRange { range, recipient } => write!(
                f,
                "Protected {range} only; if {}-30 goes to {recipient}",
                range.max.saturating_add(1).min(99)
            ),
            Rule::InverseRange {
                keeper,
                range,
                recipient,
            } => write!(
                f,
                "{keeper} {range}; {}-30 to {recipient}",
                range.max.saturating_add(1).min(99)
            ),
            Rule::InverseConditional { team, range } => {
                write!(f, "Conveys only if {team} picks {range}")
            }
            Rule::MoreFavorableSwap {
                teams: [a, b],
                beneficiary,
                range,
            } => match (beneficiary, range) {
                (Some(ben), Some(range)) => write!(
                    f,
                    "{ben} keeps own if {range}; otherwise more favorable of {a}/{b}"
                ),
                (Some(ben), None) => write!(f, "{ben} receives more favorable of {a}/{b}"),
                (None, _) => write!(f, "More favorable of {a}/{b}"),
            },
            Rule::LessFavorableSwap { teams: [a, b] } => {
                write!(f, "Less favorable of {a}/{b}")
            }
            Rule::ComplexManual { scenario } => write!(f, "Complex: {scenario}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_contains_is_inclusive() {
        let range = PositionRange::new(1, 4);
        assert!(range.contains(1));
        assert!(range.contains(4));
        assert!(!range.contains(5));
        assert!(!range.contains(0));
    }

    #[test]
    fn range_well_formed() {
        assert!(PositionRange::new(1, 4).is_well_formed());
        assert!(PositionRange::new(7, 7).is_well_formed());
        assert!(!PositionRange::new(5, 4).is_well_formed());
        assert!(!PositionRange::new(0, 4).is_well_formed());
    }

    #[test]
    fn range_accessor_covers_ranged_kinds() {
        let protected = Rule::ProtectedRange {
            range: PositionRange::new(1, 4),
            recipient: "BOS".into(),
        };
        assert_eq!(protected.range(), Some(&PositionRange::new(1, 4)));
        let swap = Rule::MoreFavorableSwap {
            teams: ["MIL".into(), "NOP".into()],
            beneficiary: None,
            range: None,
        };
        assert_eq!(swap.range(), None);
        assert_eq!(Rule::None.range(), None);
    }

    #[test]
    fn display_renders_canonical_text() {
        let rule = Rule::ProtectedRange {
            range: PositionRange::new(1, 4),
            recipient: "BOS".into(),
        };
        assert_eq!(rule.to_string(), "Protected 1-4 only; if 5-30 goes to BOS");

        let rule = Rule::LessFavorableSwap {
            teams: ["MIL".into(), "NOP".into()],
        };
        assert_eq!(rule.to_string(), "Less favorable of MIL/NOP");
    }

    #[test]
    fn team_codes_lists_every_mention() {
        let rule = Rule::MoreFavorableSwap {
            teams: ["PHX".into(), "ORL".into()],
            beneficiary: Some("MEM".into()),
            range: None,
        };
        assert_eq!(rule.team_codes(), vec!["MEM", "PHX", "ORL"]);
        assert!(Rule::None.team_codes().is_empty());
        assert!(Rule::ComplexManual {
            scenario: "x".into()
        }
        .team_codes()
        .is_empty());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let rule = Rule::InverseConditional {
            team: "HOU".into(),
            range: PositionRange::new(1, 4),
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["kind"], "inverse_conditional");
        assert_eq!(json["range"]["max"], 4);
        assert_eq!(rule.kind(), "inverse_conditional");
    }
}
