// Complex multi-team pick arrangements.
//
// Three-to-five team trades with nested "most/least favorable" clauses and
// per-leg protections do not fit the two-team rule grammar. Each one is a
// named pure resolver registered under a scenario key.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::positions::ProjectedPositions;
use crate::protection::PositionRange;
use crate::teams::Team;

/// Resolves the current owner of `original`'s pick within one arrangement.
/// Teams not involved in the arrangement resolve to themselves.
pub type Resolver = fn(Team, &ProjectedPositions) -> Team;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown complex scenario: {key}")]
    UnknownScenario { key: String },

    #[error("complex scenario registered twice: {key}")]
    DuplicateScenario { key: String },
}

/// One registered multi-team arrangement.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    /// Teams whose original picks are governed by this arrangement.
    pub teams: &'static [Team],
    /// Every team that can end up owning one of those picks.
    pub recipients: &'static [Team],
    resolver: Resolver,
}

impl Scenario {
    pub fn new(
        key: &'static str,
        description: &'static str,
        teams: &'static [Team],
        recipients: &'static [Team],
        resolver: Resolver,
    ) -> Self {
        Self {
            key,
            description,
            teams,
            recipients,
            resolver,
        }
    }

    pub fn resolve(&self, original: Team, positions: &ProjectedPositions) -> Team {
        (self.resolver)(original, positions)
    }
}

/// Dispatch table from scenario key to resolver.
#[derive(Debug, Clone, Default)]
pub struct OverrideRegistry {
    scenarios: BTreeMap<&'static str, Scenario>,
}

impl OverrideRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every known arrangement.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for scenario in standard_scenarios() {
            let registered = registry.register(scenario);
            debug_assert!(registered.is_ok(), "{registered:?}");
        }
        registry
    }

    pub fn register(&mut self, scenario: Scenario) -> Result<(), RegistryError> {
        if self.scenarios.contains_key(scenario.key) {
            return Err(RegistryError::DuplicateScenario {
                key: scenario.key.to_string(),
            });
        }
        self.scenarios.insert(scenario.key, scenario);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Scenario> {
        self.scenarios.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.scenarios.contains_key(key)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.scenarios.keys().copied()
    }

    pub fn scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.values()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Owner of `original`'s pick under scenario `key`, or `None` for an
    /// unregistered key.
    pub fn resolve(
        &self,
        key: &str,
        original: Team,
        positions: &ProjectedPositions,
    ) -> Option<Team> {
        self.get(key).map(|s| s.resolve(original, positions))
    }

    /// Check that every referenced key is registered. Run this when data is
    /// loaded so an unknown key never reaches evaluation.
    pub fn validate_keys<'k, I>(&self, keys: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = &'k str>,
    {
        for key in keys {
            if !self.contains(key) {
                return Err(RegistryError::UnknownScenario {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Teams ordered from most to least favorable pick. Ties keep the listed
/// order, which is the order the trade language names them.
pub fn rank_by_position(teams: &[Team], positions: &ProjectedPositions) -> Vec<Team> {
    let mut ranked = teams.to_vec();
    ranked.sort_by_key(|t| positions.position(*t));
    ranked
}

// ---------------------------------------------------------------------------
// Registered arrangements
// ---------------------------------------------------------------------------

use Team::{
    AtlantaHawks as ATL, BrooklynNets as BKN, ClevelandCavaliers as CLE, DallasMavericks as DAL,
    HoustonRockets as HOU, LosAngelesClippers as LAC, MemphisGrizzlies as MEM,
    NewYorkKnicks as NYK, OklahomaCityThunder as OKC, OrlandoMagic as ORL, PhoenixSuns as PHX,
    SanAntonioSpurs as SAS, UtahJazz as UTA, WashingtonWizards as WAS,
};

fn standard_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "okc-hou-lac-2026-r1",
            "OKC receives the two most favorable of OKC, HOU (protected 1-4) and LAC; \
             WAS receives the least favorable",
            &[OKC, HOU, LAC],
            &[OKC, WAS, HOU],
            okc_hou_lac_2026_r1,
        ),
        Scenario::new(
            "atl-sas-cle-mega-2026-r1",
            "SAS receives the more favorable of ATL/SAS; ATL receives the more favorable \
             of the remaining ATL/SAS pick and CLE; UTA receives the other",
            &[ATL, SAS, CLE],
            &[SAS, ATL, UTA],
            atl_sas_cle_mega_2026_r1,
        ),
        Scenario::new(
            "phx-orl-mem-was-2026-r1",
            "MEM receives the most favorable of PHX, ORL and WAS (protected 1-8); \
             PHX receives the rest",
            &[PHX, ORL, WAS],
            &[MEM, PHX, WAS],
            phx_orl_mem_was_2026_r1,
        ),
        Scenario::new(
            "bkn-phx-nyk-dal-2027-r1",
            "BKN receives the most favorable of BKN, PHX, NYK and DAL; HOU receives the \
             second and third most favorable; PHX receives the least favorable",
            &[BKN, PHX, NYK, DAL],
            &[BKN, HOU, PHX],
            bkn_phx_nyk_dal_2027_r1,
        ),
        Scenario::new(
            "lac-okc-uta-2027-r1",
            "OKC receives the more favorable of LAC and UTA (protected 1-10); LAC keeps \
             the less favorable; if UTA's pick is protected OKC receives LAC's pick",
            &[LAC, UTA],
            &[OKC, LAC, UTA],
            lac_okc_uta_2027_r1,
        ),
    ]
}

fn okc_hou_lac_2026_r1(original: Team, positions: &ProjectedPositions) -> Team {
    const HOU_PROTECTION: PositionRange = PositionRange::new(1, 4);

    let hou_protected = HOU_PROTECTION.contains(positions.position(HOU));
    if original == HOU && hou_protected {
        return HOU;
    }

    let pool: Vec<Team> = if hou_protected {
        vec![OKC, LAC]
    } else {
        vec![OKC, HOU, LAC]
    };
    if !pool.contains(&original) {
        return original;
    }

    // OKC keeps everything but the least favorable pick in play.
    let ranked = rank_by_position(&pool, positions);
    let kept = &ranked[..ranked.len() - 1];
    if kept.contains(&original) {
        OKC
    } else {
        WAS
    }
}

fn atl_sas_cle_mega_2026_r1(original: Team, positions: &ProjectedPositions) -> Team {
    if ![ATL, SAS, CLE].contains(&original) {
        return original;
    }

    let first_leg = rank_by_position(&[ATL, SAS], positions);
    let (best, leftover) = (first_leg[0], first_leg[1]);
    if original == best {
        return SAS;
    }

    let second_leg = rank_by_position(&[leftover, CLE], positions);
    if original == second_leg[0] {
        ATL
    } else {
        UTA
    }
}

fn phx_orl_mem_was_2026_r1(original: Team, positions: &ProjectedPositions) -> Team {
    const WAS_PROTECTION: PositionRange = PositionRange::new(1, 8);

    let was_protected = WAS_PROTECTION.contains(positions.position(WAS));
    if original == WAS && was_protected {
        return WAS;
    }

    let pool: Vec<Team> = if was_protected {
        vec![PHX, ORL]
    } else {
        vec![PHX, ORL, WAS]
    };
    if !pool.contains(&original) {
        return original;
    }

    let ranked = rank_by_position(&pool, positions);
    if ranked[0] == original {
        MEM
    } else {
        PHX
    }
}

fn bkn_phx_nyk_dal_2027_r1(original: Team, positions: &ProjectedPositions) -> Team {
    let pool = [BKN, PHX, NYK, DAL];
    let ranked = rank_by_position(&pool, positions);
    match ranked.iter().position(|t| *t == original) {
        Some(0) => BKN,
        Some(1) | Some(2) => HOU,
        Some(_) => PHX,
        None => original,
    }
}

fn lac_okc_uta_2027_r1(original: Team, positions: &ProjectedPositions) -> Team {
    const UTA_PROTECTION: PositionRange = PositionRange::new(1, 10);

    if original != LAC && original != UTA {
        return original;
    }

    if UTA_PROTECTION.contains(positions.position(UTA)) {
        return if original == UTA { UTA } else { OKC };
    }

    let ranked = rank_by_position(&[LAC, UTA], positions);
    if ranked[0] == original {
        OKC
    } else {
        LAC
    }
}
