//! Batch synthesis over the shop schema.

use cascade_validator::prelude::*;
use pretty_assertions::assert_eq;

use crate::{shop, synthesize};

#[test]
fn synthesizes_marked_types_in_dependency_order() {
    let (report, registry) = synthesize(&shop(), SynthOptions::default());

    let assembled: Vec<_> = report.assembled.iter().map(ToString::to_string).collect();
    assert_eq!(assembled, ["shop::Address", "shop::Person", "shop::Order"]);
    assert_eq!(report.skipped, [TypeRef::new("shop::Note")]);
    assert!(registry.contains_validator(&TypeRef::new("shop::Order")));
}

#[test]
fn ineligible_type_is_reported_alone() {
    let (report, _) = synthesize(&shop(), SynthOptions::default());

    assert_eq!(report.failures.len(), 1);
    assert_eq!(
        report.failures[0].to_string(),
        "validator can't be synthesized for interface `shop::Shape`"
    );
}

#[test]
fn malformed_annotation_fails_only_its_type() {
    let mut schema = shop();
    schema.annotation_types.push(
        AnnotationType::new("Broken").annotated(Annotation::new("ValidatedBy").arg("value", 42)),
    );
    schema.types.push(
        TypeDescription::record("shop::Coupon")
            .annotated(Annotation::new("Validated"))
            .member(MemberDescription::new("code", "String").annotated(Annotation::new("Broken"))),
    );

    let (report, _) = synthesize(&schema, SynthOptions::default());

    assert!(report.failures.iter().any(|e| matches!(
        e,
        SynthError::MalformedRuleDeclaration { member, .. } if member == "code"
    )));
    assert_eq!(report.assembled.len(), 3);
}

#[test]
fn missing_factory_is_an_assembly_failure() {
    let mut schema = shop();
    schema.annotation_types.push(AnnotationType::new("Iban").annotated(
        Annotation::new("ValidatedBy").arg("value", ParamValue::reference("IbanFactory")),
    ));
    schema.types.push(
        TypeDescription::record("shop::Payment")
            .annotated(Annotation::new("Validated"))
            .member(MemberDescription::new("iban", "String").annotated(Annotation::new("Iban"))),
    );

    let (report, _) = synthesize(&schema, SynthOptions::default());

    let failure = report
        .failures
        .iter()
        .find(|e| e.type_ref() == Some(&TypeRef::new("shop::Payment")))
        .unwrap();
    assert!(matches!(
        failure,
        SynthError::Assembly {
            source: AssemblyError::MissingFactory { .. },
            ..
        }
    ));
    assert!(report.plan(&TypeRef::new("shop::Payment")).is_some());
}

#[test]
fn emitted_plans_are_stable() {
    let (report, _) = synthesize(&shop(), SynthOptions::default());
    let dir = tempfile::tempdir().unwrap();

    for plan in &report.plans {
        emit_plan(dir.path(), plan).unwrap();
    }

    let person = std::fs::read_to_string(dir.path().join("shop/PersonValidator.plan")).unwrap();
    insta::assert_snapshot!(person.trim_end(), @r"
    shop::PersonValidator implements Validator<shop::Person>
    parameters:
      constraint_0_0 = NotBlankFactory<String>
      validator_1_0 = Validator<shop::Address>
    fields:
      name <- name(): constraint_0_0
      address? <- address(): validator_1_0
    ");
}
