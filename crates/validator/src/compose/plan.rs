//! The composed traversal plan of a validator.

use std::fmt;

use super::{Handle, HandleId, RuleRef};
use crate::metadata::{TypeRef, ValidatorType};

/// One step of a field's rule chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStep {
    /// Report `must not be null` when the value is absent.
    Presence,
    /// Apply a constraint.
    Constraint(HandleId),
    /// Cascade into a nested validator.
    Nested(HandleId),
}

/// Rule chain of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlan {
    pub(crate) name: String,
    pub(crate) accessor_path: String,
    pub(crate) accessor: String,
    pub(crate) nullable: bool,
    pub(crate) steps: Vec<RuleStep>,
}

impl FieldPlan {
    /// Path segment reported for this field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key the field's value is read from.
    pub fn accessor_path(&self) -> &str {
        &self.accessor_path
    }

    /// Whether an absent value skips nested validation.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[RuleStep] {
        &self.steps
    }
}

/// Ordered traversal of a source type: constructor parameters plus the rule
/// chain of each field.
///
/// Plain data, so two compositions of the same metadata compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorPlan {
    pub(crate) source_type: TypeRef,
    pub(crate) validator_type: ValidatorType,
    pub(crate) handles: Vec<Handle>,
    pub(crate) fields: Vec<FieldPlan>,
}

impl ValidatorPlan {
    /// The validated type.
    pub fn source_type(&self) -> &TypeRef {
        &self.source_type
    }

    /// Contract and implementation names.
    pub fn validator_type(&self) -> &ValidatorType {
        &self.validator_type
    }

    /// Constructor parameters, one per handle, in order.
    pub fn parameters(&self) -> &[Handle] {
        &self.handles
    }

    /// Looks up a handle of this plan.
    pub fn handle(&self, id: HandleId) -> Option<&Handle> {
        self.handles.get(id.index())
    }

    /// Field plans in declaration order.
    pub fn fields(&self) -> &[FieldPlan] {
        &self.fields
    }

    /// Types whose validators this plan cascades into, in handle order.
    pub fn dependencies(&self) -> impl Iterator<Item = &TypeRef> {
        self.handles.iter().filter_map(|handle| match handle.rule() {
            RuleRef::Nested(ty) => Some(ty),
            RuleRef::Constraint(_) => None,
        })
    }

    fn step_name(&self, step: RuleStep) -> &str {
        match step {
            RuleStep::Presence => "present",
            RuleStep::Constraint(id) | RuleStep::Nested(id) => {
                self.handle(id).map_or("?", Handle::name)
            }
        }
    }
}

impl fmt::Display for ValidatorPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} implements {}",
            self.validator_type.implementation_type, self.validator_type.contract_type
        )?;

        writeln!(f, "parameters:")?;
        for handle in &self.handles {
            writeln!(f, "  {handle}")?;
        }

        writeln!(f, "fields:")?;
        for field in &self.fields {
            let marker = if field.nullable { "?" } else { "" };
            write!(f, "  {}{marker} <- {}:", field.name, field.accessor)?;
            for (i, step) in field.steps.iter().enumerate() {
                let sep = if i == 0 { " " } else { ", " };
                write!(f, "{sep}{}", self.step_name(*step))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
