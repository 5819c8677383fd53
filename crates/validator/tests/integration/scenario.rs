//! The Person/Address scenario.

use cascade_validator::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{pairs, validator};

#[test]
fn blank_name_and_absent_address() {
    let person = validator("shop::Person");
    let input = json!({"name": "", "address": null});

    let violations = person.validate(Some(&input), &ValidationContext::new());

    assert_eq!(pairs(&violations), [("name", "must not be blank")]);
}

#[test]
fn missing_address_key_is_absent() {
    let person = validator("shop::Person");

    let violations = person.validate(Some(&json!({"name": "Ann"})), &ValidationContext::new());

    assert!(violations.is_empty());
}

#[test]
fn blank_name_and_blank_city() {
    let person = validator("shop::Person");
    let input = json!({"name": "", "address": {"city": ""}});

    let violations = person.validate(Some(&input), &ValidationContext::new());

    assert_eq!(
        pairs(&violations),
        [
            ("name", "must not be blank"),
            ("address.city", "must not be blank")
        ]
    );
}

#[test]
fn fail_fast_keeps_first_violation_only() {
    let person = validator("shop::Person");
    let input = json!({"name": "", "address": {"city": ""}});

    let violations = person.validate(Some(&input), &ValidationContext::fail_fast());

    assert_eq!(pairs(&violations), [("name", "must not be blank")]);
}

#[test]
fn valid_person() {
    let person = validator("shop::Person");
    let input = json!({"name": "Ann", "nickname": null, "address": {"city": "Oslo", "zip": null}});

    assert!(person.validate(Some(&input), &ValidationContext::new()).is_empty());
}

#[test]
fn absent_input_reports_null_input() {
    let person = validator("shop::Person");

    for ctx in [ValidationContext::new(), ValidationContext::fail_fast()] {
        let violations = person.validate(None, &ctx);
        assert_eq!(pairs(&violations), [("", "Input value is null")]);
    }
}

#[test]
fn typed_values_go_through_serde() {
    #[derive(serde::Serialize)]
    struct Address<'a> {
        city: &'a str,
    }

    #[derive(serde::Serialize)]
    struct Person<'a> {
        name: &'a str,
        address: Option<Address<'a>>,
    }

    let person = validator("shop::Person");
    let input = Person {
        name: "Ann",
        address: Some(Address { city: " " }),
    };

    let violations = validate_serialized(&*person, Some(&input), &ValidationContext::new()).unwrap();

    assert_eq!(pairs(&violations), [("address.city", "must not be blank")]);
}
