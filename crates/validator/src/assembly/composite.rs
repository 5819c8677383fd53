//! Executable validator bound from a [`ValidatorPlan`].

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::RuleRegistry;
use crate::compose::{Handle, RuleRef, RuleStep, ValidatorPlan};
use crate::error::AssemblyError;
use crate::foundation::{
    NOT_NULL_MESSAGE, NULL_INPUT_MESSAGE, ValidationContext, Validator, Violation,
};

// ============================================================================
// COMPOSITE VALIDATOR
// ============================================================================

/// A composed validator: one shared rule instance per plan handle.
///
/// Immutable once built; every call keeps its state in the context chain and
/// its own violation vector.
///
/// # Traversal
///
/// 1. An absent value yields exactly one `Input value is null` violation.
/// 2. Each field is validated at `context.add_path(field)`, in order.
/// 3. A presence step reports an absent value and skips the field's
///    remaining steps.
/// 4. Constraints append their violations; in fail-fast mode the first
///    non-empty result ends the call.
/// 5. Nested validators are skipped for an absent nullable value, otherwise
///    invoked; in fail-fast mode the call ends after the first invocation,
///    whatever it returned.
pub struct CompositeValidator {
    plan: ValidatorPlan,
    rules: Vec<Arc<dyn Validator>>,
}

impl CompositeValidator {
    /// Binds `plan` to `rules`, one instance per handle in handle order.
    ///
    /// # Errors
    ///
    /// [`AssemblyError::Arity`] when the number of rules differs from the
    /// number of handles.
    pub fn new(plan: ValidatorPlan, rules: Vec<Arc<dyn Validator>>) -> Result<Self, AssemblyError> {
        if rules.len() != plan.parameters().len() {
            return Err(AssemblyError::Arity {
                expected: plan.parameters().len(),
                actual: rules.len(),
            });
        }
        Ok(Self { plan, rules })
    }

    /// Builds every handle of `plan` from `registry` and binds them.
    ///
    /// Constraint handles invoke the factory registered under the rule type's
    /// name with the declared parameters; nested handles use the validator
    /// registered for the validated type.
    ///
    /// # Errors
    ///
    /// The first handle that cannot be built, as
    /// [`AssemblyError::MissingFactory`], [`AssemblyError::MissingValidator`]
    /// or [`AssemblyError::Parameter`].
    pub fn assemble(plan: ValidatorPlan, registry: &RuleRegistry) -> Result<Self, AssemblyError> {
        let rules = plan
            .parameters()
            .iter()
            .map(|handle| build_rule(handle, registry))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            ty = %plan.source_type(),
            handles = rules.len(),
            "assembled composite validator"
        );

        Self::new(plan, rules)
    }

    /// The plan this validator executes.
    pub fn plan(&self) -> &ValidatorPlan {
        &self.plan
    }
}

fn build_rule(handle: &Handle, registry: &RuleRegistry) -> Result<Arc<dyn Validator>, AssemblyError> {
    match handle.rule() {
        RuleRef::Constraint(factory) => {
            let rule_type = &factory.rule_type;
            let builder =
                registry
                    .factory(rule_type.name())
                    .ok_or_else(|| AssemblyError::MissingFactory {
                        handle: handle.name().to_owned(),
                        factory: rule_type.clone(),
                    })?;
            builder
                .create(&factory.parameters)
                .map_err(|source| AssemblyError::Parameter {
                    handle: handle.name().to_owned(),
                    factory: rule_type.clone(),
                    source,
                })
        }
        RuleRef::Nested(ty) => registry
            .validator(ty)
            .ok_or_else(|| AssemblyError::MissingValidator {
                handle: handle.name().to_owned(),
                ty: ty.clone(),
            }),
    }
}

impl Validator for CompositeValidator {
    fn validate(&self, value: Option<&Value>, context: &ValidationContext) -> Vec<Violation> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return vec![context.violates(NULL_INPUT_MESSAGE)];
        };

        let fail_fast = context.is_fail_fast();
        let mut violations = Vec::new();

        for field in self.plan.fields() {
            let child = context.add_path(field.name());
            let field_value = value.get(field.accessor_path()).filter(|v| !v.is_null());

            for step in field.steps() {
                match *step {
                    RuleStep::Presence => {
                        if field_value.is_none() {
                            violations.push(child.violates(NOT_NULL_MESSAGE));
                            if fail_fast {
                                return violations;
                            }
                            break;
                        }
                    }
                    RuleStep::Constraint(id) => {
                        violations.extend(self.rules[id.index()].validate(field_value, &child));
                        if fail_fast && !violations.is_empty() {
                            return violations;
                        }
                    }
                    RuleStep::Nested(id) => {
                        if field.is_nullable() && field_value.is_none() {
                            continue;
                        }
                        violations.extend(self.rules[id.index()].validate(field_value, &child));
                        if fail_fast {
                            return violations;
                        }
                    }
                }
            }
        }

        violations
    }
}

impl fmt::Debug for CompositeValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeValidator")
            .field("validator", &self.plan.validator_type().implementation_type)
            .field("rules", &self.rules.len())
            .finish()
    }
}
