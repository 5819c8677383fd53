//! The metadata model a validator is composed from.
//!
//! Built once per source type by the [`MetadataExtractor`](super::MetadataExtractor)
//! and immutable afterwards.

use std::sync::Arc;

use super::{ParamValue, Parameters, TypeDescription, TypeRef};

// ============================================================================
// RULE DECLARATIONS
// ============================================================================

/// How to build a constraint instance: the rule type and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factory {
    /// Factory type, generic over the field's value type.
    pub rule_type: TypeRef,
    /// Parameters copied verbatim from the member annotation.
    pub parameters: Parameters,
}

impl Factory {
    /// The deduplication key: rule type plus parameters sorted by name.
    pub fn key(&self) -> RuleKey {
        RuleKey {
            rule_type: self.rule_type.clone(),
            parameters: self.parameters.canonical(),
        }
    }
}

/// Normalized descriptor of a constraint configuration.
///
/// Two factories with equal keys share one rule instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    rule_type: TypeRef,
    parameters: Vec<(String, ParamValue)>,
}

/// A constraint declared on a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintDecl {
    /// The member annotation that declared it.
    pub annotation_type: TypeRef,
    /// The factory it resolves to.
    pub factory: Factory,
}

/// A request to cascade validation into the member's own validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NestedValidationDecl {
    /// The type whose validator is invoked.
    pub validated_type: TypeRef,
}

// ============================================================================
// FIELD
// ============================================================================

/// A member that carries at least one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) accessor_path: String,
    pub(crate) value_type: TypeRef,
    pub(crate) is_record_component: bool,
    pub(crate) is_nullable: bool,
    pub(crate) requires_presence: bool,
    pub(crate) constraints: Vec<ConstraintDecl>,
    pub(crate) nested_validations: Vec<NestedValidationDecl>,
}

impl Field {
    /// Member name; the path segment reported in violations.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key the value is read from.
    pub fn accessor_path(&self) -> &str {
        &self.accessor_path
    }

    /// How the value is reached: `name()` for record components, `name` for
    /// plain fields.
    pub fn accessor(&self) -> String {
        if self.is_record_component {
            format!("{}()", self.accessor_path)
        } else {
            self.accessor_path.clone()
        }
    }

    /// Declared value type.
    pub fn value_type(&self) -> &TypeRef {
        &self.value_type
    }

    /// Whether the member is a component of a record.
    pub fn is_record_component(&self) -> bool {
        self.is_record_component
    }

    /// Whether the declared type admits absence.
    pub fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    /// Whether absence must be reported before any rule runs.
    pub fn requires_presence(&self) -> bool {
        self.requires_presence
    }

    /// Constraints in declaration order.
    pub fn constraints(&self) -> &[ConstraintDecl] {
        &self.constraints
    }

    /// Nested validations in declaration order.
    pub fn nested_validations(&self) -> &[NestedValidationDecl] {
        &self.nested_validations
    }
}

// ============================================================================
// VALIDATOR META
// ============================================================================

/// Names of the validator synthesized for a source type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorType {
    /// The contract, `Validator<Source>`.
    pub contract_type: TypeRef,
    /// The implementation, `SourceValidator` next to the source type.
    pub implementation_type: TypeRef,
}

impl ValidatorType {
    /// Derives the validator names for `source`.
    pub fn for_source(source: &TypeRef) -> Self {
        Self {
            contract_type: TypeRef::generic("Validator", [source.clone()]),
            implementation_type: source.sibling(&format!("{}Validator", source.simple_name())),
        }
    }
}

/// Everything needed to compose the validator of one source type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorMeta {
    pub(crate) source_type: TypeRef,
    pub(crate) declaration: Arc<TypeDescription>,
    pub(crate) validator_type: ValidatorType,
    pub(crate) fields: Vec<Field>,
}

impl ValidatorMeta {
    /// The validated type.
    pub fn source_type(&self) -> &TypeRef {
        &self.source_type
    }

    /// The description this meta was extracted from, for diagnostics.
    pub fn declaration(&self) -> &TypeDescription {
        &self.declaration
    }

    /// Contract and implementation names.
    pub fn validator_type(&self) -> &ValidatorType {
        &self.validator_type
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}
