//! # cascade CLI
//!
//! Library half of the `cascade` binary: configuration, schema loading and
//! the subcommand handlers, kept here so they can be tested without a
//! process boundary.

pub mod commands;
pub mod config;
pub mod schema;
