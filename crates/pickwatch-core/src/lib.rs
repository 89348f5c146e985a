// Library root: draft pick ownership engine. Parses protection text,
// evaluates it against projected draft positions, resolves multi-team
// arrangements, and simulates the draft lottery.

pub mod ledger;
pub mod lottery;
pub mod overrides;
pub mod positions;
pub mod protection;
pub mod teams;

pub use ledger::{LedgerError, PickLedger, ResolvedPick, TradedPick};
pub use overrides::{OverrideRegistry, RegistryError, Scenario};
pub use positions::ProjectedPositions;
pub use protection::{parse, Evaluator, PositionRange, Rule};
pub use teams::Team;
