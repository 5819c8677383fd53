//! Strict presence mode.

use cascade_validator::compose::RuleStep;
use cascade_validator::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{pairs, shop, synthesize};

fn strict() -> SynthOptions {
    SynthOptions {
        strict_presence: true,
    }
}

#[test]
fn absent_non_nullable_members_are_reported() {
    let (report, registry) = synthesize(&shop(), strict());
    let person = registry.validator(&TypeRef::new("shop::Person")).unwrap();

    let plan = report.plan(&TypeRef::new("shop::Person")).unwrap();
    assert_eq!(plan.fields()[0].steps()[0], RuleStep::Presence);

    let violations = person.validate(Some(&json!({})), &ValidationContext::new());
    assert_eq!(pairs(&violations), [("name", "must not be null")]);
}

#[test]
fn presence_failure_skips_remaining_rules_of_the_field() {
    let (_, registry) = synthesize(&shop(), strict());
    let order = registry.validator(&TypeRef::new("shop::Order")).unwrap();

    let violations = order.validate(Some(&json!({"couponCode": "ABCD"})), &ValidationContext::new());

    assert_eq!(
        pairs(&violations),
        [("lines", "must not be null"), ("buyer", "must not be null")]
    );
}

#[test]
fn fail_fast_returns_after_presence_violation() {
    let (_, registry) = synthesize(&shop(), strict());
    let order = registry.validator(&TypeRef::new("shop::Order")).unwrap();

    let violations = order.validate(Some(&json!({})), &ValidationContext::fail_fast());

    assert_eq!(pairs(&violations), [("lines", "must not be null")]);
}

#[test]
fn keeps_members_without_rules() {
    let point = TypeDescription::record("Point")
        .member(MemberDescription::new("x", "i64"))
        .member(MemberDescription::new("label", "String").nullable());
    let synth = Synthesizer::new(RuleCatalog::with_builtin()).with_options(strict());

    let plan = synth.compile(&point).unwrap();
    let validator = CompositeValidator::assemble(plan, &RuleRegistry::new()).unwrap();

    assert_eq!(validator.plan().fields().len(), 1);
    assert!(validator.validate(Some(&json!({"x": 0})), &ValidationContext::new()).is_empty());
    assert_eq!(
        pairs(&validator.validate(Some(&json!({"x": null})), &ValidationContext::new())),
        [("x", "must not be null")]
    );
}
