//! `cascade check`: validate one instance against a synthesized validator.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use cascade_validator::prelude::*;
use clap::Args;
use serde_json::Value;

use crate::config::{Config, OutputFormat};
use crate::schema;

/// Arguments for the `cascade check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema file (JSON, or YAML by extension).
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,

    /// Type the instance is validated as.
    #[arg(long = "type", value_name = "NAME")]
    pub type_name: String,

    /// Instance file (JSON, or YAML by extension).
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,

    /// Stop at the first violation.
    #[arg(long)]
    pub fail_fast: bool,

    /// Output format; overrides the configured one.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, config: &Config) -> Result<u8> {
    let schema = schema::load_schema(&args.schema)?;
    let description = schema::find_type(&schema, &args.type_name)?;
    let synth = schema::synthesizer(&schema, config.synth_options());

    let mut registry = RuleRegistry::with_builtin();
    let report = synth.synthesize(&schema.types, &mut registry);
    let validator = resolve(&synth, description, report, &registry)?;

    let input: Value = schema::read_document(&args.input)?;
    let ctx = ValidationContext::builder()
        .fail_fast(config.fail_fast)
        .build();
    let violations = validator.validate(Some(&input), &ctx);

    tracing::info!(
        ty = %description.name,
        violations = violations.len(),
        "check finished"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.format {
        OutputFormat::Text if violations.is_empty() => {
            writeln!(out, "{}: valid", description.name)?;
        }
        OutputFormat::Text => {
            for violation in &violations {
                writeln!(out, "{violation}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &violations)?;
            writeln!(out)?;
        }
    }
    out.flush().context("failed to write violations")?;

    Ok(u8::from(!violations.is_empty()))
}

/// The validator of `description`: the synthesized one, or one assembled on
/// the spot when the type carries no marker.
fn resolve(
    synth: &Synthesizer,
    description: &TypeDescription,
    report: SynthReport,
    registry: &RuleRegistry,
) -> Result<Arc<dyn Validator>> {
    if let Some(validator) = registry.validator(&description.name) {
        return Ok(validator);
    }
    if let Some(failure) = report
        .failures
        .into_iter()
        .find(|failure| failure.type_ref() == Some(&description.name))
    {
        return Err(failure.into());
    }

    tracing::debug!(ty = %description.name, "assembling unmarked type");
    let plan = synth.compile(description)?;
    let validator = CompositeValidator::assemble(plan, registry)
        .with_context(|| format!("failed to assemble validator for `{}`", description.name))?;
    Ok(Arc::new(validator))
}
