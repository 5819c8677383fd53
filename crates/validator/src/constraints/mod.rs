//! Built-in constraints
//!
//! | Annotation | Factory | Parameters |
//! |---|---|---|
//! | `NotNull` | `NotNullFactory` | |
//! | `NotBlank` | `NotBlankFactory` | |
//! | `NotEmpty` | `NotEmptyFactory` | |
//! | `Size` | `SizeFactory` | `from` (default 0), `to` (default `i64::MAX`) |
//! | `Range` | `RangeFactory` | `from`, `to` |
//! | `Pattern` | `PatternFactory` | `regexp`, optional `message` |
//!
//! Every built-in reports an absent value as a violation.

mod pattern;
mod presence;
mod range;
mod size;

use std::sync::Arc;

pub use pattern::{Pattern, PatternFactory};
pub use presence::{NotBlank, NotEmpty, NotNull};
pub use range::{Range, RangeFactory};
pub use size::{Size, SizeFactory};

use crate::assembly::RuleRegistry;
use crate::catalog::Markers;
use crate::foundation::{ConstraintFactory, DefaultFactory};
use crate::metadata::{Annotation, AnnotationType, ParamValue};

/// Factory of [`NotNull`].
pub type NotNullFactory = DefaultFactory<NotNull>;
/// Factory of [`NotBlank`].
pub type NotBlankFactory = DefaultFactory<NotBlank>;
/// Factory of [`NotEmpty`].
pub type NotEmptyFactory = DefaultFactory<NotEmpty>;

fn builtins() -> [(&'static str, &'static str, Arc<dyn ConstraintFactory>); 6] {
    [
        ("NotNull", "NotNullFactory", Arc::new(NotNullFactory::new())),
        ("NotBlank", "NotBlankFactory", Arc::new(NotBlankFactory::new())),
        ("NotEmpty", "NotEmptyFactory", Arc::new(NotEmptyFactory::new())),
        ("Size", "SizeFactory", Arc::new(SizeFactory)),
        ("Range", "RangeFactory", Arc::new(RangeFactory)),
        ("Pattern", "PatternFactory", Arc::new(PatternFactory)),
    ]
}

/// The built-in annotation types, each rule-backed through `markers`.
pub fn annotation_types(markers: &Markers) -> Vec<AnnotationType> {
    builtins()
        .into_iter()
        .map(|(annotation, factory, _)| {
            AnnotationType::new(annotation).annotated(
                Annotation::new(markers.validated_by.clone())
                    .arg(markers.factory_argument.clone(), ParamValue::reference(factory)),
            )
        })
        .collect()
}

/// Registers the built-in factories.
pub fn register(registry: &mut RuleRegistry) {
    for (_, name, factory) in builtins() {
        registry.register_factory(name, factory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RuleCatalog;
    use crate::metadata::{MemberDescription, TypeRef};

    #[test]
    fn every_annotation_resolves_to_a_registered_factory() {
        let catalog = RuleCatalog::with_builtin();
        let registry = RuleRegistry::with_builtin();

        for annotation_type in annotation_types(catalog.markers()) {
            let member = MemberDescription::new("x", "String")
                .annotated(Annotation::new(annotation_type.name.clone()));
            let constraints = catalog
                .resolve_constraints(&TypeRef::new("T"), &member)
                .unwrap();

            assert_eq!(constraints.len(), 1, "{}", annotation_type.name);
            assert!(registry.factory(constraints[0].factory.rule_type.name()).is_some());
        }
    }

    #[test]
    fn follows_custom_markers() {
        let markers = Markers {
            validated: TypeRef::new("Valid"),
            validated_by: TypeRef::new("Constraint"),
            factory_argument: "by".into(),
        };
        let catalog = RuleCatalog::with_markers(markers.clone()).with(
            annotation_types(&markers)
                .into_iter()
                .find(|a| a.name.name() == "NotBlank")
                .unwrap(),
        );
        let member = MemberDescription::new("x", "String").annotated(Annotation::new("NotBlank"));

        let constraints = catalog
            .resolve_constraints(&TypeRef::new("T"), &member)
            .unwrap();
        assert_eq!(constraints[0].factory.rule_type.to_string(), "NotBlankFactory<String>");
    }
}
