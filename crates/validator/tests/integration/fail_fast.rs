//! Fail-fast short-circuiting.

use cascade_validator::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::{pairs, validator};

fn bad_order() -> Value {
    json!({
        "lines": [],
        "buyer": {"name": "", "address": {"city": ""}},
        "couponCode": "nope"
    })
}

#[rstest]
#[case::accumulate(false, &[
    ("lines", "size must be in range from '1' to '3', but was smaller: 0"),
    ("buyer.name", "must not be blank"),
    ("buyer.address.city", "must not be blank"),
    ("coupon", "must match `[A-Z]{4}`"),
])]
#[case::fail_fast(true, &[
    ("lines", "size must be in range from '1' to '3', but was smaller: 0"),
])]
fn order(#[case] fail_fast: bool, #[case] expected: &[(&str, &str)]) {
    let order = validator("shop::Order");
    let ctx = ValidationContext::builder().fail_fast(fail_fast).build();

    let violations = order.validate(Some(&bad_order()), &ctx);

    assert_eq!(pairs(&violations), expected);
}

#[test]
fn nested_call_ends_fail_fast_run_even_when_clean() {
    let order = validator("shop::Order");
    let input = json!({
        "lines": [{}],
        "buyer": {"name": "Ann"},
        "couponCode": "nope"
    });

    assert!(order.validate(Some(&input), &ValidationContext::fail_fast()).is_empty());
    assert_eq!(
        pairs(&order.validate(Some(&input), &ValidationContext::new())),
        [("coupon", "must match `[A-Z]{4}`")]
    );
}

#[test]
fn nested_violation_stops_later_fields() {
    let order = validator("shop::Order");
    let input = json!({
        "lines": [{}],
        "buyer": {"name": "", "address": {"city": ""}},
        "couponCode": "nope"
    });

    let violations = order.validate(Some(&input), &ValidationContext::fail_fast());

    assert_eq!(pairs(&violations), [("buyer.name", "must not be blank")]);
}
