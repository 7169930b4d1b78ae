//! Core library for the `loadcheck` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, payload synthesis, bounded-concurrency dispatch, request
//! execution, metrics aggregation, and verdict reporting. The primary
//! user-facing interface is the `loadcheck` command-line application;
//! library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod metrics;
pub mod payload;
pub mod report;
pub mod shutdown;
pub mod system;
