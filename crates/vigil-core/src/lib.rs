//! Core scan lifecycle engine for the Vigil client.
//!
//! Vigil drives a remote composition-analysis scanning service: it
//! authenticates, resolves a project, submits source code (a repository URL or
//! a zipped local directory), polls the scan job until it reaches a terminal
//! state, retrieves the structured report and evaluates it against configured
//! severity thresholds. The scanning itself happens server-side; this crate
//! only orchestrates the lifecycle.
//!
//! The entry point is [`scan::ScanOrchestrator`]; higher-level callers usually
//! go through the `vigil-sdk` crate instead.

pub mod api;
pub mod config;
pub mod error;
pub mod package;
pub mod scan;

pub use error::{VigilError, VigilResult};
