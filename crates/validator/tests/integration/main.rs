//! Integration tests for cascade-validator.

mod dedup;
mod fail_fast;
mod paths;
mod scenario;
mod strict;
mod synthesis;

use std::sync::Arc;

use cascade_validator::prelude::*;

/// The shop schema shared by the integration tests.
pub fn shop() -> Schema {
    serde_json::from_str(include_str!("../fixtures/shop.json")).expect("fixture parses")
}

/// Synthesizes `schema` with the built-in catalog and registry.
pub fn synthesize(schema: &Schema, options: SynthOptions) -> (SynthReport, RuleRegistry) {
    let mut catalog = RuleCatalog::with_builtin();
    catalog.extend(schema.annotation_types.iter().cloned());

    let mut registry = RuleRegistry::with_builtin();
    let report = Synthesizer::new(catalog)
        .with_options(options)
        .synthesize(&schema.types, &mut registry);
    (report, registry)
}

/// The assembled validator of `ty` in the shop schema.
pub fn validator(ty: &str) -> Arc<dyn Validator> {
    let (_, registry) = synthesize(&shop(), SynthOptions::default());
    registry
        .validator(&TypeRef::new(ty))
        .unwrap_or_else(|| panic!("no validator for {ty}"))
}

/// `(path, message)` pairs, for compact assertions.
pub fn pairs(violations: &[Violation]) -> Vec<(&str, &str)> {
    violations
        .iter()
        .map(|v| (v.path.as_str(), v.message.as_ref()))
        .collect()
}
