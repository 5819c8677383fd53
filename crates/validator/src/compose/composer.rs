//! Builds a [`ValidatorPlan`] from a [`ValidatorMeta`].

use super::{DeduplicationIndex, FieldPlan, RuleStep, ValidatorPlan};
use crate::metadata::ValidatorMeta;

/// Composes the traversal plan of `meta`, interning every rule in `index`.
///
/// Fields keep declaration order. Within a field the presence check (strict
/// mode only) comes first, then constraints, then nested validations, each
/// in declaration order. The index is consumed: its arena becomes the plan's
/// constructor parameters.
pub fn compose(meta: &ValidatorMeta, mut index: DeduplicationIndex) -> ValidatorPlan {
    let mut fields = Vec::with_capacity(meta.fields().len());

    for (i, field) in meta.fields().iter().enumerate() {
        let mut steps = Vec::with_capacity(
            usize::from(field.requires_presence())
                + field.constraints().len()
                + field.nested_validations().len(),
        );

        if field.requires_presence() {
            steps.push(RuleStep::Presence);
        }
        for (j, constraint) in field.constraints().iter().enumerate() {
            steps.push(RuleStep::Constraint(
                index.intern_constraint(&constraint.factory, i, j),
            ));
        }
        for (j, nested) in field.nested_validations().iter().enumerate() {
            steps.push(RuleStep::Nested(
                index.intern_nested(&nested.validated_type, i, j),
            ));
        }

        fields.push(FieldPlan {
            name: field.name().to_owned(),
            accessor_path: field.accessor_path().to_owned(),
            accessor: field.accessor(),
            nullable: field.is_nullable(),
            steps,
        });
    }

    let plan = ValidatorPlan {
        source_type: meta.source_type().clone(),
        validator_type: meta.validator_type().clone(),
        handles: index.into_handles(),
        fields,
    };

    tracing::debug!(
        ty = %plan.source_type,
        fields = plan.fields.len(),
        handles = plan.handles.len(),
        "composed validator plan"
    );

    plan
}

impl ValidatorPlan {
    /// Composes `meta` with a fresh [`DeduplicationIndex`].
    pub fn from_meta(meta: &ValidatorMeta) -> Self {
        compose(meta, DeduplicationIndex::new())
    }
}
