//! Subcommand handlers.
//!
//! Each handler returns the process exit code: 0 on success, 1 when the
//! schema or the instance is found invalid. Operational errors propagate as
//! `Err` and map to 2 in `main`.

pub mod check;
pub mod plan;

pub use check::{CheckArgs, run_check};
pub use plan::{PlanArgs, run_plan};
