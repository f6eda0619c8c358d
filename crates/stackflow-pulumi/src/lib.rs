//! Pulumi CLI backend for stackflow
//!
//! This crate implements the `StackTool` trait by shelling out to the
//! `pulumi` CLI, one process per operation.
//!
//! # Requirements
//!
//! - `pulumi` CLI must be installed (or configured via `pulumi_bin` /
//!   `STACKFLOW_PULUMI_BIN`)
//! - Backend login and secrets are managed by the Pulumi CLI itself
//!
//! # Example
//!
//! ```ignore
//! use stackflow_core::{Layout, Orchestrator, RunOptions, Target};
//! use stackflow_pulumi::PulumiCli;
//!
//! let orchestrator = Orchestrator::new(Layout::new("."), PulumiCli::new("pulumi"));
//! let outcome = orchestrator.run(&RunOptions::new("dev", Target::All)).await;
//! std::process::exit(outcome.exit_code() as i32);
//! ```

pub mod cli;
pub mod error;

pub use cli::PulumiCli;
pub use error::{PulumiError, Result};
