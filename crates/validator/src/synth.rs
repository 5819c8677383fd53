//! Batch synthesis: from type descriptions to registered validators.
//!
//! The [`Synthesizer`] compiles every marked type of a batch, isolating
//! failures per type, then assembles the compiled plans in dependency order
//! so that a cascading type is assembled after the types it cascades into.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assembly::{CompositeValidator, RuleRegistry};
use crate::catalog::RuleCatalog;
use crate::compose::{RuleRef, ValidatorPlan};
use crate::error::{AssemblyError, SynthError};
use crate::metadata::{MetadataExtractor, SynthOptions, TypeDescription, TypeRef};

// ============================================================================
// SYNTHESIZER
// ============================================================================

/// Drives extraction, composition and assembly over a batch of types.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    catalog: RuleCatalog,
    options: SynthOptions,
}

impl Synthesizer {
    /// Creates a synthesizer resolving rules through `catalog`.
    #[must_use]
    pub fn new(catalog: RuleCatalog) -> Self {
        Self {
            catalog,
            options: SynthOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_options(mut self, options: SynthOptions) -> Self {
        self.options = options;
        self
    }

    /// The catalog in use.
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// The options in use.
    pub fn options(&self) -> SynthOptions {
        self.options
    }

    /// Whether `description` carries the type marker.
    pub fn is_marked(&self, description: &TypeDescription) -> bool {
        description.has_annotation(&self.catalog.markers().validated)
    }

    /// Extracts and composes the plan of one type. The type marker is not
    /// required.
    ///
    /// # Errors
    ///
    /// Extraction errors, see [`MetadataExtractor::extract`].
    pub fn compile(&self, description: &TypeDescription) -> Result<ValidatorPlan, SynthError> {
        let meta = MetadataExtractor::new(&self.catalog)
            .with_options(self.options)
            .extract(description)?;
        Ok(ValidatorPlan::from_meta(&meta))
    }

    /// Synthesizes every marked type of `types` and registers the assembled
    /// validators in `registry`.
    ///
    /// A type that fails is reported and never affects the others. A plan
    /// whose cascaded types never get a validator, because none is registered
    /// or because the cascade is cyclic, is reported as an assembly failure.
    pub fn synthesize<'a>(
        &self,
        types: impl IntoIterator<Item = &'a TypeDescription>,
        registry: &mut RuleRegistry,
    ) -> SynthReport {
        let mut report = SynthReport::default();
        let mut pending = Vec::new();

        for description in types {
            if !self.is_marked(description) {
                tracing::trace!(ty = %description.name, "skipping unmarked type");
                report.skipped.push(description.name.clone());
                continue;
            }
            match self.compile(description) {
                Ok(plan) => pending.push(plan),
                Err(error) => report.fail(error),
            }
        }

        loop {
            let (ready, blocked): (Vec<_>, Vec<_>) = pending.into_iter().partition(|plan| {
                plan.dependencies()
                    .all(|ty| registry.contains_validator(ty))
            });
            pending = blocked;
            if ready.is_empty() {
                break;
            }

            for plan in ready {
                let ty = plan.source_type().clone();
                match CompositeValidator::assemble(plan.clone(), registry) {
                    Ok(validator) => {
                        registry.register_validator(ty.clone(), Arc::new(validator));
                        report.assembled.push(ty);
                    }
                    Err(source) => report.fail(SynthError::Assembly { ty, source }),
                }
                report.plans.push(plan);
            }
        }

        for plan in pending {
            if let Some(source) = unresolved_dependency(&plan, registry) {
                report.fail(SynthError::Assembly {
                    ty: plan.source_type().clone(),
                    source,
                });
            }
            report.plans.push(plan);
        }

        tracing::info!(
            assembled = report.assembled.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            "synthesis finished"
        );

        report
    }
}

fn unresolved_dependency(plan: &ValidatorPlan, registry: &RuleRegistry) -> Option<AssemblyError> {
    plan.parameters().iter().find_map(|handle| match handle.rule() {
        RuleRef::Nested(ty) if !registry.contains_validator(ty) => {
            Some(AssemblyError::MissingValidator {
                handle: handle.name().to_owned(),
                ty: ty.clone(),
            })
        }
        _ => None,
    })
}

// ============================================================================
// REPORT
// ============================================================================

/// Outcome of [`Synthesizer::synthesize`].
#[derive(Debug, Default)]
pub struct SynthReport {
    /// Every compiled plan, assembled or not, in assembly order.
    pub plans: Vec<ValidatorPlan>,
    /// Types whose validator was assembled and registered, in order.
    pub assembled: Vec<TypeRef>,
    /// Types without the type marker.
    pub skipped: Vec<TypeRef>,
    /// Per-type failures.
    pub failures: Vec<SynthError>,
}

impl SynthReport {
    /// Whether no type failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// The compiled plan of `ty`, if any.
    pub fn plan(&self, ty: &TypeRef) -> Option<&ValidatorPlan> {
        self.plans.iter().find(|plan| plan.source_type() == ty)
    }

    fn fail(&mut self, error: SynthError) {
        let cause: &dyn std::error::Error = &error;
        match error.type_ref() {
            Some(ty) => tracing::warn!(ty = %ty, error = cause, "validator synthesis failed"),
            None => tracing::warn!(error = cause, "validator synthesis failed"),
        }
        self.failures.push(error);
    }
}

// ============================================================================
// EMISSION
// ============================================================================

/// Writes the rendered `plan` to `<dir>/<namespace>/<ImplementationSimpleName>.plan`,
/// one directory level per `::` segment of the implementation's namespace,
/// creating directories as needed. Returns the written path.
///
/// # Errors
///
/// [`SynthError::Emission`] when the directory or file cannot be written.
pub fn emit_plan(dir: &Path, plan: &ValidatorPlan) -> Result<PathBuf, SynthError> {
    let path = plan_path(dir, &plan.validator_type().implementation_type);

    path.parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| fs::write(&path, plan.to_string()))
        .map_err(|source| SynthError::Emission {
            path: path.clone(),
            source,
        })?;

    tracing::debug!(path = %path.display(), "emitted validator plan");
    Ok(path)
}

fn plan_path(dir: &Path, implementation: &TypeRef) -> PathBuf {
    let package = implementation
        .namespace()
        .into_iter()
        .flat_map(|ns| ns.split("::"))
        .fold(dir.to_path_buf(), |path, segment| path.join(segment));
    package.join(format!("{}.plan", implementation.simple_name()))
}
