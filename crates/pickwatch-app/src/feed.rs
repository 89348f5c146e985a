// Standings feed: a source of current records and projected draft
// positions, plus a time-to-live cache in front of it.
//
// The cache reads the current time through an injected `Clock` so expiry
// can be tested without sleeping.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pickwatch_core::lottery::TeamRecord;
use pickwatch_core::positions::WORST_POSITION;
use pickwatch_core::{ProjectedPositions, Team};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("row {row}: unknown team '{code}'")]
    UnknownTeam { row: usize, code: String },

    #[error("{team}: projected pick {position} is outside 1-30")]
    InvalidPosition { team: Team, position: u8 },
}

// ---------------------------------------------------------------------------
// Rows and snapshots
// ---------------------------------------------------------------------------

/// One team's line in the standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingsRow {
    pub team: Team,
    /// "W-L".
    pub record: String,
    pub projected_pick: u8,
}

#[derive(Debug, Deserialize)]
struct RawStandingsRow {
    team: String,
    record: String,
    projected_pick: u8,
}

/// Standings as of `fetched_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingsSnapshot {
    pub rows: Vec<StandingsRow>,
    pub fetched_at: DateTime<Utc>,
}

impl StandingsSnapshot {
    pub fn positions(&self) -> ProjectedPositions {
        self.rows
            .iter()
            .map(|row| (row.team, row.projected_pick))
            .collect()
    }

    pub fn records(&self) -> Vec<TeamRecord> {
        self.rows
            .iter()
            .map(|row| TeamRecord::new(row.team, row.record.clone()))
            .collect()
    }
}

/// Parse standings CSV with columns `team,record,projected_pick`.
///
/// Rows that fail to deserialize are skipped with a warning. An unknown team
/// or a position outside 1-30 fails the whole feed, since either would skew
/// every pick resolved against it.
pub fn parse_standings<R: Read>(rdr: R, path: &str) -> Result<Vec<StandingsRow>, FeedError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);
    // Fail early on an unreadable header rather than skipping every row.
    reader.headers().map_err(|e| FeedError::Csv {
        path: path.to_string(),
        source: e,
    })?;

    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<RawStandingsRow>().enumerate() {
        // Header is line 1.
        let row = idx + 2;
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed standings row {row}: {}", e);
                continue;
            }
        };
        let team = Team::from_code(&raw.team).ok_or_else(|| FeedError::UnknownTeam {
            row,
            code: raw.team.clone(),
        })?;
        if raw.projected_pick == 0 || raw.projected_pick > WORST_POSITION {
            return Err(FeedError::InvalidPosition {
                team,
                position: raw.projected_pick,
            });
        }
        rows.push(StandingsRow {
            team,
            record: raw.record,
            projected_pick: raw.projected_pick,
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Anything that can produce the current standings.
#[async_trait]
pub trait StandingsSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<StandingsRow>, FeedError>;
}

/// Standings read from a CSV file on each fetch.
#[derive(Debug, Clone)]
pub struct CsvStandingsSource {
    path: PathBuf,
}

impl CsvStandingsSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StandingsSource for CsvStandingsSource {
    async fn fetch(&self) -> Result<Vec<StandingsRow>, FeedError> {
        let shown = self.path.display().to_string();
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| FeedError::Io {
                path: shown.clone(),
                source: e,
            })?;
        let rows = parse_standings(bytes.as_slice(), &shown)?;
        info!("Loaded {} standings rows from {}", rows.len(), shown);
        Ok(rows)
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Reuses a standings snapshot until it is `ttl` old.
///
/// When a refresh fails and an older snapshot exists, the stale snapshot is
/// served and the failure logged.
pub struct CachedStandings<S, C = SystemClock> {
    source: S,
    clock: C,
    ttl: Duration,
    cached: Mutex<Option<StandingsSnapshot>>,
}

impl<S: StandingsSource> CachedStandings<S, SystemClock> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self::with_clock(source, SystemClock, ttl)
    }
}

impl<S: StandingsSource, C: Clock> CachedStandings<S, C> {
    pub fn with_clock(source: S, clock: C, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl,
            cached: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current snapshot, refreshed from the source once the cached one expires.
    pub async fn get(&self) -> Result<StandingsSnapshot, FeedError> {
        let mut cached = self.cached.lock().await;
        let now = self.clock.now();

        if let Some(snapshot) = cached.as_ref() {
            if self.is_fresh(snapshot, now) {
                debug!("standings cache hit (fetched {})", snapshot.fetched_at);
                return Ok(snapshot.clone());
            }
        }

        match self.source.fetch().await {
            Ok(rows) => {
                let snapshot = StandingsSnapshot {
                    rows,
                    fetched_at: now,
                };
                *cached = Some(snapshot.clone());
                Ok(snapshot)
            }
            Err(e) => match cached.as_ref() {
                Some(stale) => {
                    warn!(
                        "standings refresh failed, serving snapshot from {}: {}",
                        stale.fetched_at, e
                    );
                    Ok(stale.clone())
                }
                None => Err(e),
            },
        }
    }

    /// Drop the cached snapshot so the next `get` reads the source.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    fn is_fresh(&self, snapshot: &StandingsSnapshot, now: DateTime<Utc>) -> bool {
        match now.signed_duration_since(snapshot.fetched_at).to_std() {
            Ok(age) => age < self.ttl,
            // Clock moved backwards.
            Err(_) => true,
        }
    }
}
