//! `cascade plan`: compile a schema and show the resulting validator plans.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use cascade_validator::prelude::*;
use clap::Args;

use crate::config::Config;
use crate::schema;

/// Arguments for the `cascade plan` subcommand.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Schema file (JSON, or YAML by extension).
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,

    /// Compile only this type, marked or not.
    #[arg(long = "type", value_name = "NAME")]
    pub type_name: Option<String>,

    /// Write one `<namespace>/<Name>.plan` file per plan under this directory.
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

/// Execute the plan subcommand.
pub fn run_plan(args: &PlanArgs, config: &Config) -> Result<u8> {
    let schema = schema::load_schema(&args.schema)?;
    let synth = schema::synthesizer(&schema, config.synth_options());

    let (plans, mut failures) = match &args.type_name {
        Some(name) => {
            let description = schema::find_type(&schema, name)?;
            match synth.compile(description) {
                Ok(plan) => (vec![plan], Vec::new()),
                Err(error) => {
                    let cause: &dyn std::error::Error = &error;
                    tracing::warn!(ty = %description.name, error = cause, "validator synthesis failed");
                    (Vec::new(), vec![error])
                }
            }
        }
        None => {
            let mut registry = RuleRegistry::with_builtin();
            let report = synth.synthesize(&schema.types, &mut registry);
            (report.plans, report.failures)
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for plan in &plans {
        match &args.out {
            Some(dir) => match emit_plan(dir, plan) {
                Ok(path) => writeln!(out, "{}", path.display())?,
                Err(error) => {
                    let cause: &dyn std::error::Error = &error;
                    tracing::warn!(ty = %plan.source_type(), error = cause, "plan emission failed");
                    failures.push(error);
                }
            },
            None => writeln!(out, "{plan}")?,
        }
    }
    out.flush().context("failed to write plans")?;

    tracing::info!(
        plans = plans.len(),
        failed = failures.len(),
        "plan finished"
    );
    Ok(u8::from(!failures.is_empty()))
}
