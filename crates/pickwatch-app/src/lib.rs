// Library root: configuration, the standings feed, the ledger file loader,
// and the commands the `pickwatch` binary dispatches to.

pub mod commands;
pub mod config;
pub mod feed;
pub mod ledger_file;
