//! Conformance testing harness for libft.
//!
//! This crate provides:
//! - Fixture loading: JSON case files naming a function, its inputs and the
//!   expected output
//! - Execution: dispatch of each case to the safe `libft-core` implementation
//! - Verification: comparison, diff rendering and aggregate summaries
//! - Reporting: markdown/JSON reports carrying a SHA-256 digest per fixture file
//! - Structured logging: a JSONL contract for verification runs

#![forbid(unsafe_code)]

pub mod diff;
pub mod error;
pub mod exec;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureCase, FixtureFile, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
