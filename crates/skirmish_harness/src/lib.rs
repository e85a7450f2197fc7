//! # Skirmish Harness
//!
//! Headless match runner: scripted bots trading fire over the
//! in-process relay, with a JSON report at the end. This is how the
//! replication core gets exercised without an engine on top:
//!
//! - **CI verification**: a short match per run, report diffed
//! - **Soak tests**: long matches watching for drift between replicas
//! - **Late-join checks**: a mid-match joiner validates buffered replay
//!
//! The binary wires a [`runner::MatchRunner`] to CLI flags; tests use
//! the runner directly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod report;
pub mod runner;
pub mod scenario;

pub use error::{HarnessError, Result};
pub use report::MatchReport;
pub use runner::MatchRunner;
pub use scenario::Scenario;
