//! Violation paths across cascades and context prefixes.

use std::sync::Arc;

use cascade_validator::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{pairs, validator};

#[test]
fn nested_fields_are_dotted() {
    let order = validator("shop::Order");
    let input = json!({
        "lines": [{}],
        "buyer": {"name": "Ann", "address": {"city": " "}},
        "couponCode": "ABCD"
    });

    let violations = order.validate(Some(&input), &ValidationContext::new());

    assert_eq!(pairs(&violations), [("buyer.address.city", "must not be blank")]);
    assert_eq!(violations[0].to_string(), "buyer.address.city: must not be blank");
}

#[test]
fn context_prefix_is_kept() {
    let person = validator("shop::Person");
    let ctx = ValidationContext::builder().path("request.body").build();

    let violations = person.validate(Some(&json!({"name": ""})), &ctx);

    assert_eq!(pairs(&violations), [("request.body.name", "must not be blank")]);
}

#[test]
fn absent_non_nullable_cascade_reports_null_input_at_field() {
    let order = validator("shop::Order");
    let input = json!({"lines": [{}], "couponCode": "ABCD"});

    let violations = order.validate(Some(&input), &ValidationContext::new());

    assert_eq!(pairs(&violations), [("buyer", "Input value is null")]);
}

#[test]
fn hand_written_validators_index_elements() {
    let person = validator("shop::Person");
    let people = from_fn(move |value, ctx| {
        value
            .and_then(|v| v.as_array())
            .into_iter()
            .flatten()
            .enumerate()
            .flat_map(|(i, item)| person.validate(Some(item), &ctx.add_index(i)))
            .collect()
    });

    let mut registry = RuleRegistry::with_builtin();
    registry.register_validator("List<shop::Person>", Arc::new(people));
    let team = TypeDescription::record("Team").member(
        MemberDescription::new("members", "List<shop::Person>")
            .annotated(Annotation::new("Validated")),
    );
    let plan = Synthesizer::new(RuleCatalog::with_builtin())
        .compile(&team)
        .unwrap();
    let validator = CompositeValidator::assemble(plan, &registry).unwrap();

    let input = json!({"members": [{"name": "Ann"}, {"name": ""}]});
    let violations = validator.validate(Some(&input), &ValidationContext::new());

    assert_eq!(pairs(&violations), [("members[1].name", "must not be blank")]);
}
