// Protection description parser.
//
// Editors describe protections in free text. Each recognized phrasing has a
// dedicated pattern; patterns are anchored at both ends so at most one can
// match a given string, and they are tried in a fixed order.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::rule::{PositionRange, Rule};

lazy_static! {
    /// "Unprotected"
    static ref UNPROTECTED: Regex = Regex::new(r"^unprotected\.?$").expect("Invalid regex pattern");

    /// "Complex: atl-sas-cle-mega-2026-r1"
    static ref COMPLEX: Regex =
        Regex::new(r"^complex(?:\s+manual)?\s*:\s*([a-z0-9][a-z0-9-]*)$")
            .expect("Invalid regex pattern");

    /// "Protected 1-4 only; if 5-30 goes to BOS"
    static ref PROTECTED_RANGE: Regex = Regex::new(
        r"^protected\s+(\d{1,2})\s*-\s*(\d{1,2})(?:\s+only)?\s*[;,]?\s*if\s+(\d{1,2})\s*-\s*(\d{1,2})\s*,?\s+(?:goes|conveys)\s+to\s+([a-z]{2,4})\.?$"
    )
    .expect("Invalid regex pattern");

    /// "Top-4 protected; otherwise to BOS"
    static ref TOP_N_PROTECTED: Regex = Regex::new(
        r"^top[\s-]?(\d{1,2})\s+protected\s*[;,]?\s*(?:otherwise|else)\s+(?:goes\s+|conveys\s+)?to\s+([a-z]{2,4})\.?$"
    )
    .expect("Invalid regex pattern");

    /// "UTA 1-8; 9-30 to OKC"
    static ref INVERSE_RANGE: Regex = Regex::new(
        r"^([a-z]{2,4})\s+(\d{1,2})\s*-\s*(\d{1,2})\s*;\s*(\d{1,2})\s*-\s*(\d{1,2})\s+to\s+([a-z]{2,4})\.?$"
    )
    .expect("Invalid regex pattern");

    /// "Conveys only if HOU picks 1-4"
    static ref INVERSE_CONDITIONAL: Regex = Regex::new(
        r"^(?:conveys\s+)?only\s+if\s+([a-z]{2,4})\s+picks\s+(\d{1,2})\s*-\s*(\d{1,2})\.?$"
    )
    .expect("Invalid regex pattern");

    /// "LAL keeps own if 1-10; otherwise more favorable of LAL/ATL"
    static ref KEEPER_SWAP: Regex = Regex::new(
        r"^([a-z]{2,4})\s+keeps\s+own(?:\s+pick)?\s+if\s+(\d{1,2})\s*-\s*(\d{1,2})\s*[;,]\s*otherwise\s+(?:receives\s+)?(?:the\s+)?more\s+favorable\s+of\s+([a-z]{2,4})\s*(?:/|and)\s*([a-z]{2,4})\.?$"
    )
    .expect("Invalid regex pattern");

    /// "LAL receives more favorable of LAL/ATL" or "More favorable of LAL/ATL"
    static ref MORE_FAVORABLE: Regex = Regex::new(
        r"^(?:([a-z]{2,4})\s+receives\s+)?(?:the\s+)?more\s+favorable\s+of\s+([a-z]{2,4})\s*(?:/|and)\s*([a-z]{2,4})\.?$"
    )
    .expect("Invalid regex pattern");

    /// "LAL has swap rights with ATL"
    static ref SWAP_RIGHTS: Regex = Regex::new(
        r"^([a-z]{2,4})\s+(?:has\s+)?swap\s+rights\s+with\s+([a-z]{2,4})\.?$"
    )
    .expect("Invalid regex pattern");

    /// "Less favorable of MIL/NOP" (an optional "BOS receives" prefix is ignored)
    static ref LESS_FAVORABLE: Regex = Regex::new(
        r"^(?:[a-z]{2,4}\s+receives\s+)?(?:the\s+)?(?:less|least)\s+favorable\s+of\s+([a-z]{2,4})\s*(?:/|and)\s*([a-z]{2,4})\.?$"
    )
    .expect("Invalid regex pattern");
}

/// Parse a free-text protection description into a [`Rule`].
///
/// Returns `None` when no pattern matches; such picks must be classified by
/// hand as complex scenarios. Blank text and descriptive "via ..." notes
/// without swap or protection language parse to [`Rule::None`].
pub fn parse(text: &str) -> Option<Rule> {
    let normalized = normalize(text);

    if normalized.is_empty() {
        return Some(Rule::None);
    }
    if UNPROTECTED.is_match(&normalized) {
        return Some(Rule::None);
    }
    if normalized.starts_with("via")
        && !normalized.contains("swap")
        && !normalized.contains("protected")
    {
        return Some(Rule::None);
    }

    if let Some(caps) = COMPLEX.captures(&normalized) {
        return Some(Rule::ComplexManual {
            scenario: caps[1].to_string(),
        });
    }

    if let Some(caps) = PROTECTED_RANGE.captures(&normalized) {
        return Some(Rule::ProtectedRange {
            range: range_at(&caps, 1, 2)?,
            recipient: code_at(&caps, 5),
        });
    }

    if let Some(caps) = TOP_N_PROTECTED.captures(&normalized) {
        return Some(Rule::ProtectedRange {
            range: PositionRange::new(1, number_at(&caps, 1)?),
            recipient: code_at(&caps, 2),
        });
    }

    if let Some(caps) = INVERSE_RANGE.captures(&normalized) {
        return Some(Rule::InverseRange {
            keeper: code_at(&caps, 1),
            range: range_at(&caps, 2, 3)?,
            recipient: code_at(&caps, 6),
        });
    }

    if let Some(caps) = INVERSE_CONDITIONAL.captures(&normalized) {
        return Some(Rule::InverseConditional {
            team: code_at(&caps, 1),
            range: range_at(&caps, 2, 3)?,
        });
    }

    if let Some(caps) = KEEPER_SWAP.captures(&normalized) {
        return Some(Rule::MoreFavorableSwap {
            teams: [code_at(&caps, 4), code_at(&caps, 5)],
            beneficiary: Some(code_at(&caps, 1)),
            range: Some(range_at(&caps, 2, 3)?),
        });
    }

    if let Some(caps) = MORE_FAVORABLE.captures(&normalized) {
        return Some(Rule::MoreFavorableSwap {
            teams: [code_at(&caps, 2), code_at(&caps, 3)],
            beneficiary: caps.get(1).map(|m| m.as_str().to_ascii_uppercase()),
            range: None,
        });
    }

    if let Some(caps) = SWAP_RIGHTS.captures(&normalized) {
        let holder = code_at(&caps, 1);
        return Some(Rule::MoreFavorableSwap {
            teams: [holder.clone(), code_at(&caps, 2)],
            beneficiary: Some(holder),
            range: None,
        });
    }

    if let Some(caps) = LESS_FAVORABLE.captures(&normalized) {
        return Some(Rule::LessFavorableSwap {
            teams: [code_at(&caps, 1), code_at(&caps, 2)],
        });
    }

    None
}

/// Lowercase, unify dash variants, and collapse runs of whitespace.
fn normalize(text: &str) -> String {
    text.replace(['\u{2013}', '\u{2014}'], "-")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn code_at(caps: &Captures<'_>, idx: usize) -> String {
    caps[idx].to_ascii_uppercase()
}

fn number_at(caps: &Captures<'_>, idx: usize) -> Option<u8> {
    caps[idx].parse().ok()
}

fn range_at(caps: &Captures<'_>, min_idx: usize, max_idx: usize) -> Option<PositionRange> {
    Some(PositionRange::new(
        number_at(caps, min_idx)?,
        number_at(caps, max_idx)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: u8, max: u8) -> PositionRange {
        PositionRange::new(min, max)
    }

    #[test]
    fn blank_text_is_unprotected() {
        assert_eq!(parse(""), Some(Rule::None));
        assert_eq!(parse("   \t\n"), Some(Rule::None));
        assert_eq!(parse("Unprotected"), Some(Rule::None));
    }

    #[test]
    fn descriptive_via_note_is_unprotected() {
        assert_eq!(parse("via LAL in the 2023 deadline deal"), Some(Rule::None));
        assert_eq!(parse("Via CHA"), Some(Rule::None));
    }

    #[test]
    fn via_note_with_protection_language_is_not_descriptive() {
        assert_eq!(parse("via LAL, protected somehow"), None);
        assert_eq!(parse("via LAL with swap"), None);
    }

    #[test]
    fn protected_range_pattern() {
        assert_eq!(
            parse("Protected 1-4 only; if 5-30 goes to BOS"),
            Some(Rule::ProtectedRange {
                range: range(1, 4),
                recipient: "BOS".into(),
            })
        );
        assert_eq!(
            parse("protected 1-10, if 11-30, conveys to okc."),
            Some(Rule::ProtectedRange {
                range: range(1, 10),
                recipient: "OKC".into(),
            })
        );
    }

    #[test]
    fn en_dash_ranges_are_accepted() {
        assert_eq!(
            parse("Protected 1\u{2013}4 only; if 5\u{2013}30 goes to BOS"),
            Some(Rule::ProtectedRange {
                range: range(1, 4),
                recipient: "BOS".into(),
            })
        );
    }

    #[test]
    fn top_n_protected_pattern() {
        assert_eq!(
            parse("Top-6 protected; otherwise to SAS"),
            Some(Rule::ProtectedRange {
                range: range(1, 6),
                recipient: "SAS".into(),
            })
        );
    }

    #[test]
    fn inverse_range_pattern() {
        assert_eq!(
            parse("UTA 1-8; 9-30 to OKC"),
            Some(Rule::InverseRange {
                keeper: "UTA".into(),
                range: range(1, 8),
                recipient: "OKC".into(),
            })
        );
    }

    #[test]
    fn only_if_clause_is_inverse_conditional_not_protected_range() {
        let rule = parse("Conveys only if HOU picks 1-4").unwrap();
        assert_eq!(
            rule,
            Rule::InverseConditional {
                team: "HOU".into(),
                range: range(1, 4),
            }
        );
        assert_eq!(rule.kind(), "inverse_conditional");
        assert_eq!(
            parse("only if DAL picks 1-14"),
            Some(Rule::InverseConditional {
                team: "DAL".into(),
                range: range(1, 14),
            })
        );
    }

    #[test]
    fn more_favorable_with_beneficiary() {
        assert_eq!(
            parse("LAL receives more favorable of LAL/ATL"),
            Some(Rule::MoreFavorableSwap {
                teams: ["LAL".into(), "ATL".into()],
                beneficiary: Some("LAL".into()),
                range: None,
            })
        );
    }

    #[test]
    fn more_favorable_without_beneficiary() {
        assert_eq!(
            parse("More favorable of MIL and NOP"),
            Some(Rule::MoreFavorableSwap {
                teams: ["MIL".into(), "NOP".into()],
                beneficiary: None,
                range: None,
            })
        );
    }

    #[test]
    fn keeper_swap_carries_override_range() {
        assert_eq!(
            parse("LAL keeps own if 1-10; otherwise more favorable of LAL/ATL"),
            Some(Rule::MoreFavorableSwap {
                teams: ["LAL".into(), "ATL".into()],
                beneficiary: Some("LAL".into()),
                range: Some(range(1, 10)),
            })
        );
    }

    #[test]
    fn swap_rights_phrasing() {
        assert_eq!(
            parse("PHX has swap rights with WAS"),
            Some(Rule::MoreFavorableSwap {
                teams: ["PHX".into(), "WAS".into()],
                beneficiary: Some("PHX".into()),
                range: None,
            })
        );
    }

    #[test]
    fn less_favorable_pattern() {
        assert_eq!(
            parse("Less favorable of MIL/NOP"),
            Some(Rule::LessFavorableSwap {
                teams: ["MIL".into(), "NOP".into()],
            })
        );
        assert_eq!(
            parse("BOS receives least favorable of MIL and NOP"),
            Some(Rule::LessFavorableSwap {
                teams: ["MIL".into(), "NOP".into()],
            })
        );
    }

    #[test]
    fn complex_scenario_reference() {
        assert_eq!(
            parse("Complex: atl-sas-cle-mega-2026-r1"),
            Some(Rule::ComplexManual {
                scenario: "atl-sas-cle-mega-2026-r1".into(),
            })
        );
    }

    #[test]
    fn unmatched_text_needs_manual_classification() {
        assert_eq!(parse("Second most favorable of OKC, HOU, LAC"), None);
        assert_eq!(parse("protected"), None);
        assert_eq!(parse("lottery protected through 2027"), None);
        assert_eq!(parse("42"), None);
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(
            parse("PROTECTED 1-4 ONLY; IF 5-30 GOES TO BOS"),
            parse("protected 1-4 only; if 5-30 goes to bos")
        );
    }

    #[test]
    fn out_of_range_numbers_fail_to_match() {
        assert_eq!(parse("Protected 1-400 only; if 401-500 goes to BOS"), None);
    }

    #[test]
    fn canonical_rendering_reparses_to_same_rule() {
        let samples = [
            "",
            "Protected 1-4 only; if 5-30 goes to BOS",
            "Top-6 protected; otherwise to SAS",
            "UTA 1-8; 9-30 to OKC",
            "Conveys only if HOU picks 1-4",
            "LAL keeps own if 1-10; otherwise more favorable of LAL/ATL",
            "LAL receives more favorable of LAL/ATL",
            "More favorable of MIL/NOP",
            "PHX has swap rights with WAS",
            "BOS receives less favorable of MIL/NOP",
            "Complex: okc-hou-lac-2026-r1",
        ];
        for text in samples {
            let rule = parse(text).unwrap_or_else(|| panic!("should parse: {text}"));
            let rendered = rule.to_string();
            assert_eq!(parse(&rendered), Some(rule), "round trip failed for {text:?}");
        }
    }

    #[test]
    fn parsing_is_deterministic() {
        let text = "LAL receives more favorable of LAL/ATL";
        assert_eq!(parse(text), parse(text));
    }
}
