// NOTE: cardwall Architecture Rationale
//
// Why Refetch (not patch in place)?
// - Server-side project automation moves cards as a side effect of status
//   changes, so one mutation can invalidate an unknown set of rows
// - Patching the table in place drifts from the server within a few edits
// - A full snapshot swap plus key-index rebuild keeps every render
//   self-consistent; the index never outlives the snapshot that built it
//
// Why Blocking Calls on the UI thread?
// - One action in flight at a time matches how a board is actually worked
// - No channels or interleaving to reason about; command, refetch, redraw
//   happen in program order
// - Trade-off: the UI stalls for the duration of a call (sub-second board
//   queries in practice)

mod args;
mod commands;
pub mod config;
mod handlers;
pub mod tui;

pub use args::Cli;
pub use commands::run;
