//! Conformance tooling for the fputs binding.
//!
//! This crate provides:
//! - Scenario verification: run the write-behaviour scenarios against real
//!   temp files and produce a machine-readable report.
//! - The `fputs-harness` CLI wrapping the binding and the scenarios.

#![forbid(unsafe_code)]

pub mod scenarios;

pub use scenarios::{Expectation, SCENARIOS, Scenario, ScenarioResult, VerifyReport, run_all};
