//! One rule instance per distinct configuration.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cascade_validator::compose::RuleRef;
use cascade_validator::constraints::NotBlank;
use cascade_validator::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

struct CountingFactory {
    created: Arc<AtomicUsize>,
}

impl ConstraintFactory for CountingFactory {
    fn create(&self, _: &Parameters) -> Result<Arc<dyn Validator>, ParameterError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(NotBlank))
    }
}

fn contact() -> TypeDescription {
    let trimmed = || Annotation::new("Trimmed").arg("max", 40).arg("mode", "strict");
    let reordered = || Annotation::new("Trimmed").arg("mode", "strict").arg("max", 40);

    TypeDescription::record("Contact")
        .member(MemberDescription::new("first", "String").annotated(trimmed()))
        .member(MemberDescription::new("last", "String").annotated(reordered()))
        .member(
            MemberDescription::new("email", "String")
                .annotated(Annotation::new("Trimmed").arg("max", 80).arg("mode", "strict")),
        )
}

fn catalog() -> RuleCatalog {
    RuleCatalog::new().with(AnnotationType::new("Trimmed").annotated(
        Annotation::new("ValidatedBy").arg("value", ParamValue::reference("TrimmedFactory")),
    ))
}

#[test]
fn identical_factories_are_instantiated_once() {
    let created = Arc::new(AtomicUsize::new(0));
    let mut registry = RuleRegistry::new();
    registry.register_factory(
        "TrimmedFactory",
        Arc::new(CountingFactory {
            created: Arc::clone(&created),
        }),
    );

    let plan = Synthesizer::new(catalog()).compile(&contact()).unwrap();
    let names: Vec<_> = plan.parameters().iter().map(|h| h.name()).collect();
    assert_eq!(names, ["constraint_0_0", "constraint_2_0"]);

    let validator = CompositeValidator::assemble(plan, &registry).unwrap();
    assert_eq!(created.load(Ordering::SeqCst), 2);

    let violations = validator.validate(Some(&json!({})), &ValidationContext::new());
    assert_eq!(violations.len(), 3);
}

#[test]
fn cascades_share_one_validator_per_type() {
    let synth = Synthesizer::new(RuleCatalog::with_builtin());
    let home = TypeDescription::record("Household")
        .member(
            MemberDescription::new("owner", "shop::Person").annotated(Annotation::new("Validated")),
        )
        .member(
            MemberDescription::new("tenant", "shop::Person")
                .nullable()
                .annotated(Annotation::new("Validated")),
        );

    let plan = synth.compile(&home).unwrap();

    assert_eq!(plan.parameters().len(), 1);
    assert_eq!(
        plan.parameters()[0].rule(),
        &RuleRef::Nested(TypeRef::new("shop::Person"))
    );
}
