// Team vocabulary: the 30 franchises and their canonical slugs.
//
// Every component resolves shorthand (abbreviations, display names) through
// this table so that parser, evaluator, registry, and lottery agree on ids.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown team: {0}")]
pub struct UnknownTeam(pub String);

/// One of the 30 franchises. Serialized as its lowercase-hyphenated slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Team {
    AtlantaHawks,
    BostonCeltics,
    BrooklynNets,
    CharlotteHornets,
    ChicagoBulls,
    ClevelandCavaliers,
    DallasMavericks,
    DenverNuggets,
    DetroitPistons,
    GoldenStateWarriors,
    HoustonRockets,
    IndianaPacers,
    LosAngelesClippers,
    LosAngelesLakers,
    MemphisGrizzlies,
    MiamiHeat,
    MilwaukeeBucks,
    MinnesotaTimberwolves,
    NewOrleansPelicans,
    NewYorkKnicks,
    OklahomaCityThunder,
    OrlandoMagic,
    #[serde(rename = "philadelphia-76ers")]
    Philadelphia76ers,
    PhoenixSuns,
    PortlandTrailBlazers,
    SacramentoKings,
    SanAntonioSpurs,
    TorontoRaptors,
    UtahJazz,
    WashingtonWizards,
}

/// Alternate abbreviations seen in editor-authored trade notes. Each maps to
/// exactly one team and never collides with a primary abbreviation.
const ALTERNATE_CODES: &[(&str, Team)] = &[
    ("BRK", Team::BrooklynNets),
    ("CHO", Team::CharlotteHornets),
    ("GS", Team::GoldenStateWarriors),
    ("NO", Team::NewOrleansPelicans),
    ("NY", Team::NewYorkKnicks),
    ("SA", Team::SanAntonioSpurs),
    ("PHO", Team::PhoenixSuns),
    ("UTAH", Team::UtahJazz),
    ("WSH", Team::WashingtonWizards),
];

impl Team {
    /// All 30 teams in slug order.
    pub const ALL: [Team; 30] = [
        Team::AtlantaHawks,
        Team::BostonCeltics,
        Team::BrooklynNets,
        Team::CharlotteHornets,
        Team::ChicagoBulls,
        Team::ClevelandCavaliers,
        Team::DallasMavericks,
        Team::DenverNuggets,
        Team::DetroitPistons,
        Team::GoldenStateWarriors,
        Team::HoustonRockets,
        Team::IndianaPacers,
        Team::LosAngelesClippers,
        Team::LosAngelesLakers,
        Team::MemphisGrizzlies,
        Team::MiamiHeat,
        Team::MilwaukeeBucks,
        Team::MinnesotaTimberwolves,
        Team::NewOrleansPelicans,
        Team::NewYorkKnicks,
        Team::OklahomaCityThunder,
        Team::OrlandoMagic,
        Team::Philadelphia76ers,
        Team::PhoenixSuns,
        Team::PortlandTrailBlazers,
        Team::SacramentoKings,
        Team::SanAntonioSpurs,
        Team::TorontoRaptors,
        Team::UtahJazz,
        Team::WashingtonWizards,
    ];

    /// Canonical lowercase-hyphenated slug (e.g. `denver-nuggets`).
    pub fn slug(&self) -> &'static str {
        match self {
            Team::AtlantaHawks => "atlanta-hawks",
            Team::BostonCeltics => "boston-celtics",
            Team::BrooklynNets => "brooklyn-nets",
            Team::CharlotteHornets => "charlotte-hornets",
            Team::ChicagoBulls => "chicago-bulls",
            Team::ClevelandCavaliers => "cleveland-cavaliers",
            Team::DallasMavericks => "dallas-mavericks",
            Team::DenverNuggets => "denver-nuggets",
            Team::DetroitPistons => "detroit-pistons",
            Team::GoldenStateWarriors => "golden-state-warriors",
            Team::HoustonRockets => "houston-rockets",
            Team::IndianaPacers => "indiana-pacers",
            Team::LosAngelesClippers => "los-angeles-clippers",
            Team::LosAngelesLakers => "los-angeles-lakers",
            Team::MemphisGrizzlies => "memphis-grizzlies",
            Team::MiamiHeat => "miami-heat",
            Team::MilwaukeeBucks => "milwaukee-bucks",
            Team::MinnesotaTimberwolves => "minnesota-timberwolves",
            Team::NewOrleansPelicans => "new-orleans-pelicans",
            Team::NewYorkKnicks => "new-york-knicks",
            Team::OklahomaCityThunder => "oklahoma-city-thunder",
            Team::OrlandoMagic => "orlando-magic",
            Team::Philadelphia76ers => "philadelphia-76ers",
            Team::PhoenixSuns => "phoenix-suns",
            Team::PortlandTrailBlazers => "portland-trail-blazers",
            Team::SacramentoKings => "sacramento-kings",
            Team::SanAntonioSpurs => "san-antonio-spurs",
            Team::TorontoRaptors => "toronto-raptors",
            Team::UtahJazz => "utah-jazz",
            Team::WashingtonWizards => "washington-wizards",
        }
    }

    /// Primary three-letter abbreviation.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Team::AtlantaHawks => "ATL",
            Team::BostonCeltics => "BOS",
            Team::BrooklynNets => "BKN",
            Team::CharlotteHornets => "CHA",
            Team::ChicagoBulls => "CHI",
            Team::ClevelandCavaliers => "CLE",
            Team::DallasMavericks => "DAL",
            Team::DenverNuggets => "DEN",
            Team::DetroitPistons => "DET",
            Team::GoldenStateWarriors => "GSW",
            Team::HoustonRockets => "HOU",
            Team::IndianaPacers => "IND",
            Team::LosAngelesClippers => "LAC",
            Team::LosAngelesLakers => "LAL",
            Team::MemphisGrizzlies => "MEM",
            Team::MiamiHeat => "MIA",
            Team::MilwaukeeBucks => "MIL",
            Team::MinnesotaTimberwolves => "MIN",
            Team::NewOrleansPelicans => "NOP",
            Team::NewYorkKnicks => "NYK",
            Team::OklahomaCityThunder => "OKC",
            Team::OrlandoMagic => "ORL",
            Team::Philadelphia76ers => "PHI",
            Team::PhoenixSuns => "PHX",
            Team::PortlandTrailBlazers => "POR",
            Team::SacramentoKings => "SAC",
            Team::SanAntonioSpurs => "SAS",
            Team::TorontoRaptors => "TOR",
            Team::UtahJazz => "UTA",
            Team::WashingtonWizards => "WAS",
        }
    }

    /// Full display name (e.g. "Denver Nuggets").
    pub fn display_name(&self) -> &'static str {
        match self {
            Team::AtlantaHawks => "Atlanta Hawks",
            Team::BostonCeltics => "Boston Celtics",
            Team::BrooklynNets => "Brooklyn Nets",
            Team::CharlotteHornets => "Charlotte Hornets",
            Team::ChicagoBulls => "Chicago Bulls",
            Team::ClevelandCavaliers => "Cleveland Cavaliers",
            Team::DallasMavericks => "Dallas Mavericks",
            Team::DenverNuggets => "Denver Nuggets",
            Team::DetroitPistons => "Detroit Pistons",
            Team::GoldenStateWarriors => "Golden State Warriors",
            Team::HoustonRockets => "Houston Rockets",
            Team::IndianaPacers => "Indiana Pacers",
            Team::LosAngelesClippers => "Los Angeles Clippers",
            Team::LosAngelesLakers => "Los Angeles Lakers",
            Team::MemphisGrizzlies => "Memphis Grizzlies",
            Team::MiamiHeat => "Miami Heat",
            Team::MilwaukeeBucks => "Milwaukee Bucks",
            Team::MinnesotaTimberwolves => "Minnesota Timberwolves",
            Team::NewOrleansPelicans => "New Orleans Pelicans",
            Team::NewYorkKnicks => "New York Knicks",
            Team::OklahomaCityThunder => "Oklahoma City Thunder",
            Team::OrlandoMagic => "Orlando Magic",
            Team::Philadelphia76ers => "Philadelphia 76ers",
            Team::PhoenixSuns => "Phoenix Suns",
            Team::PortlandTrailBlazers => "Portland Trail Blazers",
            Team::SacramentoKings => "Sacramento Kings",
            Team::SanAntonioSpurs => "San Antonio Spurs",
            Team::TorontoRaptors => "Toronto Raptors",
            Team::UtahJazz => "Utah Jazz",
            Team::WashingtonWizards => "Washington Wizards",
        }
    }

    /// Resolve any known shorthand to a team.
    ///
    /// Accepts, case-insensitively and ignoring surrounding whitespace:
    /// - primary abbreviations ("DEN")
    /// - alternate abbreviations ("BRK", "GS", "WSH", ...)
    /// - slugs ("denver-nuggets")
    /// - display names ("Denver Nuggets")
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        let upper = code.to_ascii_uppercase();

        if let Some(team) = Team::ALL.iter().find(|t| t.abbreviation() == upper) {
            return Some(*team);
        }
        if let Some((_, team)) = ALTERNATE_CODES.iter().find(|(alt, _)| *alt == upper) {
            return Some(*team);
        }
        Team::ALL.iter().copied().find(|t| {
            t.slug().eq_ignore_ascii_case(code) || t.display_name().eq_ignore_ascii_case(code)
        })
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for Team {
    type Err = UnknownTeam;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Team::from_code(s).ok_or_else(|| UnknownTeam(s.trim().to_string()))
    }
}

/// Serde helper for hand-edited files: accepts any code [`Team::from_code`]
/// understands instead of only the slug.
pub fn deserialize_code<'de, D>(deserializer: D) -> Result<Team, D::Error>
where
    D: Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    code.parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_is_complete_and_unique() {
        let slugs: HashSet<_> = Team::ALL.iter().map(|t| t.slug()).collect();
        let abbrs: HashSet<_> = Team::ALL.iter().map(|t| t.abbreviation()).collect();
        assert_eq!(slugs.len(), 30);
        assert_eq!(abbrs.len(), 30);
    }

    #[test]
    fn every_code_maps_back_to_its_team() {
        for team in Team::ALL {
            assert_eq!(Team::from_code(team.abbreviation()), Some(team));
            assert_eq!(Team::from_code(team.slug()), Some(team));
            assert_eq!(Team::from_code(team.display_name()), Some(team));
        }
    }

    #[test]
    fn alternate_codes_never_shadow_primary_codes() {
        for (alt, team) in ALTERNATE_CODES {
            assert!(
                Team::ALL.iter().all(|t| t.abbreviation() != *alt),
                "alternate code {alt} collides with a primary abbreviation"
            );
            assert_eq!(Team::from_code(alt), Some(*team));
        }
    }

    #[test]
    fn from_code_case_insensitive() {
        assert_eq!(Team::from_code("den"), Some(Team::DenverNuggets));
        assert_eq!(Team::from_code("  Okc "), Some(Team::OklahomaCityThunder));
        assert_eq!(Team::from_code("DENVER-NUGGETS"), Some(Team::DenverNuggets));
        assert_eq!(Team::from_code("golden state warriors"), Some(Team::GoldenStateWarriors));
        assert_eq!(Team::from_code("wsh"), Some(Team::WashingtonWizards));
    }

    #[test]
    fn from_code_unknown() {
        assert_eq!(Team::from_code(""), None);
        assert_eq!(Team::from_code("XYZ"), None);
        assert_eq!(Team::from_code("Seattle SuperSonics"), None);
    }

    #[test]
    fn serializes_as_slug() {
        let json = serde_json::to_string(&Team::Philadelphia76ers).unwrap();
        assert_eq!(json, "\"philadelphia-76ers\"");
        let json = serde_json::to_string(&Team::PortlandTrailBlazers).unwrap();
        assert_eq!(json, "\"portland-trail-blazers\"");
        let team: Team = serde_json::from_str("\"oklahoma-city-thunder\"").unwrap();
        assert_eq!(team, Team::OklahomaCityThunder);
    }

    #[test]
    fn serde_slug_matches_slug_method() {
        for team in Team::ALL {
            let json = serde_json::to_string(&team).unwrap();
            assert_eq!(json, format!("\"{}\"", team.slug()));
        }
    }

    #[test]
    fn from_str_uses_any_code() {
        assert_eq!("LAL".parse::<Team>(), Ok(Team::LosAngelesLakers));
        assert_eq!(
            "Sonics".parse::<Team>(),
            Err(UnknownTeam("Sonics".into()))
        );
    }

    #[test]
    fn display_is_slug() {
        assert_eq!(Team::DenverNuggets.to_string(), "denver-nuggets");
    }
}
