// Command implementations behind the `pickwatch` binary. Each returns the
// text to print so the binary stays a thin shell around them.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use pickwatch_core::lottery::{
    create_lottery_teams, odds_table, run_multiple_simulations, run_parallel_simulations,
    simulate, AggregatedResults, SimulationResult,
};
use pickwatch_core::{parse, Evaluator, OverrideRegistry, PickLedger, ResolvedPick};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use tracing::info;

use crate::config::Config;
use crate::feed::{CachedStandings, CsvStandingsSource};
use crate::ledger_file::load_ledger;

/// Config, registry, and a cached standings feed rooted at `base_dir`.
pub struct Session {
    pub base_dir: PathBuf,
    pub config: Config,
    pub registry: OverrideRegistry,
    pub standings: CachedStandings<CsvStandingsSource>,
}

impl Session {
    pub fn new(base_dir: &Path, config: Config) -> Self {
        let source = CsvStandingsSource::new(base_dir.join(&config.data.standings));
        let ttl = Duration::from_secs(config.feed.cache_ttl_secs);
        Self {
            base_dir: base_dir.to_path_buf(),
            registry: OverrideRegistry::standard(),
            standings: CachedStandings::new(source, ttl),
            config,
        }
    }

    fn ledger(&self) -> anyhow::Result<PickLedger> {
        let path = self.base_dir.join(&self.config.data.picks);
        load_ledger(&path, &self.registry).context("failed to load traded pick ledger")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimulateOptions {
    pub runs: Option<usize>,
    pub seed: Option<u64>,
    pub json: bool,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// `pickwatch parse <TEXT>`
pub fn parse_command(text: &str) -> anyhow::Result<String> {
    match parse(text) {
        Some(rule) => {
            let mut out = serde_json::to_string_pretty(&rule)?;
            write!(out, "\ncanonical: {rule}")?;
            Ok(out)
        }
        None => Ok(format!("needs manual classification: {text:?}")),
    }
}

/// `pickwatch odds`
pub fn odds_command() -> String {
    let mut out = String::from("SEED  COMBOS  FIRST PICK\n");
    for odds in odds_table() {
        let _ = writeln!(
            out,
            "{:>4}  {:>6}  {:>9.1}%",
            odds.seed, odds.combinations, odds.percentage
        );
    }
    out
}

/// `pickwatch scenarios`
pub fn scenarios_command(registry: &OverrideRegistry) -> String {
    let mut out = String::new();
    for scenario in registry.scenarios() {
        let teams: Vec<&str> = scenario.teams.iter().map(|t| t.abbreviation()).collect();
        let _ = writeln!(out, "{}  [{}]", scenario.key, teams.join(", "));
        let _ = writeln!(out, "    {}", scenario.description);
    }
    out
}

/// `pickwatch resolve [--json]`
pub async fn resolve_command(session: &Session, as_json: bool) -> anyhow::Result<String> {
    let ledger = session.ledger()?;
    let snapshot = session
        .standings
        .get()
        .await
        .context("failed to load standings")?;

    let evaluator = Evaluator::new(&session.registry);
    let resolved = ledger.resolve_all(&evaluator, &snapshot.positions());
    let conveyed = resolved.iter().filter(|r| r.conveyed).count();
    info!("Resolved {} picks, {} conveying", resolved.len(), conveyed);

    if as_json {
        return Ok(serde_json::to_string_pretty(&resolved)?);
    }
    Ok(ownership_table(&resolved))
}

/// `pickwatch simulate [--runs N] [--seed S] [--json]`
///
/// One run prints a single draw and who owns each traded pick under it;
/// more runs print per-team outlooks.
pub async fn simulate_command(
    session: &Session,
    options: SimulateOptions,
) -> anyhow::Result<String> {
    let snapshot = session
        .standings
        .get()
        .await
        .context("failed to load standings")?;
    let field = create_lottery_teams(&snapshot.records()).context("failed to seed lottery")?;

    let lottery = &session.config.lottery;
    let runs = options.runs.unwrap_or(lottery.runs);
    let seed = options.seed.or(lottery.seed);

    if runs == 1 {
        let draw = match seed {
            Some(seed) => simulate(&field, &mut ChaCha8Rng::seed_from_u64(seed)),
            None => simulate(&field, &mut rand::thread_rng()),
        }
        .context("lottery draw failed")?;

        let ledger = session.ledger()?;
        let evaluator = Evaluator::new(&session.registry);
        let positions = snapshot
            .positions()
            .with_lottery_result(&draw)
            .context("failed to apply lottery draw to standings")?;
        let resolved = ledger.resolve_all(&evaluator, &positions);

        if options.json {
            let body = json!({ "draw": draw, "ownership": resolved });
            return Ok(serde_json::to_string_pretty(&body)?);
        }
        let mut out = draw_table(&draw);
        out.push('\n');
        out.push_str(&ownership_table(&resolved));
        return Ok(out);
    }

    let results = if lottery.parallel {
        let seed = seed.unwrap_or_else(rand::random);
        run_parallel_simulations(&field, runs, seed)
    } else {
        match seed {
            Some(seed) => {
                run_multiple_simulations(&field, runs, &mut ChaCha8Rng::seed_from_u64(seed))
            }
            None => run_multiple_simulations(&field, runs, &mut rand::thread_rng()),
        }
    }
    .context("lottery simulation failed")?;
    info!("Simulated {} lottery draws", results.runs);

    if options.json {
        return Ok(serde_json::to_string_pretty(&results)?);
    }
    Ok(outlook_table(&results))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn ownership_table(resolved: &[ResolvedPick]) -> String {
    let mut out = String::from("PICK          HOLDER  OWNER  RULE\n");
    for entry in resolved {
        let rule = match (&entry.pick.scenario, &entry.rule) {
            (Some(key), _) => format!("scenario {key}"),
            (None, Some(rule)) => rule.to_string(),
            (None, None) => "unparsed; stays with original team".into(),
        };
        let marker = if entry.conveyed { "" } else { " (kept)" };
        let _ = writeln!(
            out,
            "{:<12}  {:<6}  {:<5}  {}{}",
            entry.id,
            entry.pick.holder.abbreviation(),
            entry.owner.abbreviation(),
            rule,
            marker
        );
    }
    out
}

fn draw_table(draw: &SimulationResult) -> String {
    let mut out = String::from("PICK  TEAM  SEED  MOVE\n");
    for pick in draw.picks() {
        let movement = if pick.won_lottery && pick.final_pick < pick.original_seed {
            format!("up {}", pick.original_seed - pick.final_pick)
        } else if pick.dropped_slots > 0 {
            format!("down {}", pick.dropped_slots)
        } else {
            "-".into()
        };
        let _ = writeln!(
            out,
            "{:>4}  {:<4}  {:>4}  {}",
            pick.final_pick,
            pick.team.abbreviation(),
            pick.original_seed,
            movement
        );
    }
    out
}

fn outlook_table(results: &AggregatedResults) -> String {
    let mut out = format!(
        "{} draws\nSEED  TEAM   #1 %   TOP4 %   AVG  BEST  WORST\n",
        results.runs
    );
    for o in &results.teams {
        let _ = writeln!(
            out,
            "{:>4}  {:<4}  {:>5.1}  {:>7.1}  {:>4.2}  {:>4}  {:>5}",
            o.seed,
            o.team.abbreviation(),
            o.top1_probability,
            o.top4_probability,
            o.average_pick,
            o.best_pick,
            o.worst_pick
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DataPaths, FeedConfig, LoggingConfig, LotteryConfig};

    fn fixture_session(parallel: bool) -> Session {
        let base = Path::new(env!("CARGO_MANIFEST_DIR"));
        let config = Config {
            data: DataPaths {
                standings: "tests/fixtures/standings.csv".into(),
                picks: "tests/fixtures/picks.toml".into(),
            },
            feed: FeedConfig { cache_ttl_secs: 60 },
            lottery: LotteryConfig {
                runs: 2_000,
                seed: Some(7),
                parallel,
            },
            logging: LoggingConfig {
                dir: "logs".into(),
                filter: "pickwatch=debug".into(),
            },
        };
        Session::new(base, config)
    }

    #[test]
    fn parse_prints_rule_and_canonical_text() {
        let out = parse_command("Protected 1-4 only; if 5-30 goes to BOS").unwrap();
        assert!(out.contains("\"kind\": \"protected_range\""));
        assert!(out.contains("canonical: Protected 1-4 only; if 5-30 goes to BOS"));
    }

    #[test]
    fn parse_reports_manual_classification() {
        let out = parse_command("two of three via rollover").unwrap();
        assert!(out.starts_with("needs manual classification"));
    }

    #[test]
    fn odds_lists_fourteen_seeds() {
        let out = odds_command();
        assert_eq!(out.lines().count(), 15);
        assert!(out.contains("14.0%"));
        assert!(out.contains("0.5%"));
    }

    #[test]
    fn scenarios_lists_registered_keys() {
        let out = scenarios_command(&OverrideRegistry::standard());
        assert!(out.contains("okc-hou-lac-2026-r1  [OKC, HOU, LAC]"));
        assert!(out.contains("lac-okc-uta-2027-r1"));
    }

    #[tokio::test]
    async fn resolve_reports_owner_of_every_pick() {
        let session = fixture_session(true);
        let out = resolve_command(&session, false).await.unwrap();
        // UTA sits 2nd: inside 1-8, kept.
        assert!(out.contains("2026-r1-uta   OKC     UTA"));
        // PHI sits 8th: outside 1-4, conveys.
        assert!(out.contains("2026-r1-phi   OKC     OKC"));
        // OKC 30th is the least favorable of OKC/HOU/LAC.
        assert!(out.contains("2026-r1-okc   WAS     WAS"));
        assert_eq!(out.lines().count(), 12);
    }

    #[tokio::test]
    async fn resolve_json_is_an_array() {
        let session = fixture_session(true);
        let out = resolve_command(&session, true).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let picks = value.as_array().unwrap();
        assert_eq!(picks.len(), 11);
        assert_eq!(picks[0]["owner"], "utah-jazz");
        assert_eq!(picks[0]["conveyed"], false);
    }

    #[tokio::test]
    async fn single_seeded_draw_is_reproducible() {
        let session = fixture_session(true);
        let options = SimulateOptions {
            runs: Some(1),
            seed: Some(99),
            json: true,
        };
        let a = simulate_command(&session, options).await.unwrap();
        let b = simulate_command(&session, options).await.unwrap();
        assert_eq!(a, b);
        let value: serde_json::Value = serde_json::from_str(&a).unwrap();
        assert_eq!(value["draw"]["picks"].as_array().unwrap().len(), 14);
        assert_eq!(value["ownership"].as_array().unwrap().len(), 11);
    }

    #[tokio::test]
    async fn aggregated_simulation_prints_outlooks() {
        for parallel in [true, false] {
            let session = fixture_session(parallel);
            let out = simulate_command(&session, SimulateOptions::default())
                .await
                .unwrap();
            assert!(out.starts_with("2000 draws"));
            // Header lines plus one per seed.
            assert_eq!(out.lines().count(), 16);
        }
    }

    #[tokio::test]
    async fn zero_runs_is_an_error() {
        let session = fixture_session(false);
        let options = SimulateOptions {
            runs: Some(0),
            ..SimulateOptions::default()
        };
        assert!(simulate_command(&session, options).await.is_err());
    }
}
