//! Rule catalog: resolves member annotations into rule declarations.
//!
//! The catalog knows the annotation types in play and the two markers that
//! drive synthesis:
//!
//! - the **cascade marker** (`Validated`), which on a type selects it for
//!   synthesis and on a member requests nested validation;
//! - the **rule-backed meta-annotation** (`ValidatedBy`), which on an
//!   annotation type names the factory building its constraint.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use crate::metadata::{
    Annotation, AnnotationType, ConstraintDecl, Factory, MemberDescription, NestedValidationDecl,
    ParamValue, TypeRef,
};

// ============================================================================
// MARKERS
// ============================================================================

/// Names of the marker annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Type marker and member cascade marker.
    pub validated: TypeRef,
    /// Meta-annotation designating a rule-backed annotation type.
    pub validated_by: TypeRef,
    /// Argument of `validated_by` naming the factory type.
    pub factory_argument: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            validated: TypeRef::new("Validated"),
            validated_by: TypeRef::new("ValidatedBy"),
            factory_argument: "value".to_owned(),
        }
    }
}

// ============================================================================
// RULE CATALOG
// ============================================================================

/// Registry of annotation types used to resolve member rule declarations.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    markers: Markers,
    annotation_types: IndexMap<TypeRef, AnnotationType>,
}

impl RuleCatalog {
    /// Creates an empty catalog with the default markers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty catalog with custom markers.
    #[must_use]
    pub fn with_markers(markers: Markers) -> Self {
        Self {
            markers,
            annotation_types: IndexMap::new(),
        }
    }

    /// Creates a catalog knowing the built-in constraint annotations.
    #[cfg(feature = "builtin")]
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut catalog = Self::new();
        catalog.extend(crate::constraints::annotation_types(&catalog.markers));
        catalog
    }

    /// Registers an annotation type, replacing a previous one of the same name.
    pub fn register(&mut self, annotation_type: AnnotationType) {
        self.annotation_types
            .insert(annotation_type.name.clone(), annotation_type);
    }

    /// Registers several annotation types.
    pub fn extend(&mut self, annotation_types: impl IntoIterator<Item = AnnotationType>) {
        for annotation_type in annotation_types {
            self.register(annotation_type);
        }
    }

    /// Builder form of [`register`](Self::register).
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, annotation_type: AnnotationType) -> Self {
        self.register(annotation_type);
        self
    }

    /// The markers in use.
    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Looks up an annotation type.
    pub fn annotation_type(&self, name: &TypeRef) -> Option<&AnnotationType> {
        self.annotation_types.get(name)
    }

    /// Resolves the constraint declarations of `member`, in declaration order.
    ///
    /// Annotations whose type is unknown, or known but not rule-backed, are
    /// not constraints and are skipped. When an annotation type carries the
    /// rule-backed meta-annotation more than once, the first one wins.
    ///
    /// # Errors
    ///
    /// [`SynthError::MalformedRuleDeclaration`] when the meta-annotation does
    /// not name a factory type.
    pub fn resolve_constraints(
        &self,
        owner: &TypeRef,
        member: &MemberDescription,
    ) -> Result<Vec<ConstraintDecl>, SynthError> {
        let mut constraints = Vec::new();

        for annotation in &member.annotations {
            let Some(validated_by) = self.rule_backing(&annotation.ty) else {
                tracing::trace!(member = %member.name, annotation = %annotation.ty, "not a constraint");
                continue;
            };

            let factory_type = self
                .factory_type(validated_by)
                .map_err(|reason| SynthError::MalformedRuleDeclaration {
                    owner: owner.clone(),
                    member: member.name.clone(),
                    annotation: annotation.clone(),
                    reason,
                })?;

            constraints.push(ConstraintDecl {
                annotation_type: annotation.ty.clone(),
                factory: Factory {
                    rule_type: TypeRef::generic(factory_type.name(), [member.ty.clone()]),
                    parameters: annotation.arguments.clone(),
                },
            });
        }

        Ok(constraints)
    }

    /// Resolves the nested validations of `member`: one declaration for the
    /// member's own type when it carries the cascade marker.
    pub fn resolve_nested(&self, member: &MemberDescription) -> Vec<NestedValidationDecl> {
        if member
            .annotations
            .iter()
            .any(|a| a.is(&self.markers.validated))
        {
            vec![NestedValidationDecl {
                validated_type: member.ty.clone(),
            }]
        } else {
            Vec::new()
        }
    }

    fn rule_backing(&self, annotation_type: &TypeRef) -> Option<&Annotation> {
        self.annotation_types
            .get(annotation_type)?
            .annotations
            .iter()
            .find(|meta| meta.is(&self.markers.validated_by))
    }

    fn factory_type(&self, validated_by: &Annotation) -> Result<TypeRef, String> {
        let argument = &self.markers.factory_argument;
        match validated_by.arguments.get(argument) {
            Some(ParamValue::Ref { path } | ParamValue::Str(path)) => path
                .parse()
                .map_err(|e| format!("`{argument}` does not name a type: {e}")),
            Some(other) => Err(format!("`{argument}` must name a factory type, got `{other}`")),
            None => Err(format!(
                "{} is missing the `{argument}` argument",
                self.markers.validated_by
            )),
        }
    }
}
