//! Builds a [`ValidatorMeta`] from a [`TypeDescription`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{DeclarationKind, Field, TypeDescription, ValidatorMeta, ValidatorType};
use crate::catalog::RuleCatalog;
use crate::error::SynthError;

/// Switches that change which fields are extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthOptions {
    /// Keep non-nullable members without rules and report their absence with
    /// a presence check.
    pub strict_presence: bool,
}

/// Extracts validator metadata, resolving rules through a [`RuleCatalog`].
#[derive(Debug, Clone, Copy)]
pub struct MetadataExtractor<'a> {
    catalog: &'a RuleCatalog,
    options: SynthOptions,
}

impl<'a> MetadataExtractor<'a> {
    /// Creates an extractor with default options.
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self {
            catalog,
            options: SynthOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: SynthOptions) -> Self {
        self.options = options;
        self
    }

    /// Extracts the metadata of `description`.
    ///
    /// Members without rules are dropped, unless strict presence keeps a
    /// non-nullable one.
    ///
    /// # Errors
    ///
    /// - [`SynthError::UnsupportedDeclaration`] for interfaces, enums and
    ///   annotation types.
    /// - [`SynthError::MalformedRuleDeclaration`] when a member's constraint
    ///   annotation does not resolve to a factory.
    pub fn extract(&self, description: &TypeDescription) -> Result<ValidatorMeta, SynthError> {
        if !description.kind.holds_instance_state() {
            return Err(SynthError::UnsupportedDeclaration {
                ty: description.name.clone(),
                kind: description.kind,
            });
        }

        let is_record = description.kind == DeclarationKind::Record;
        let mut fields = Vec::with_capacity(description.members.len());

        for member in &description.members {
            let constraints = self
                .catalog
                .resolve_constraints(&description.name, member)?;
            let nested_validations = self.catalog.resolve_nested(member);
            let requires_presence = self.options.strict_presence && !member.nullable;

            if constraints.is_empty() && nested_validations.is_empty() && !requires_presence {
                continue;
            }

            fields.push(Field {
                name: member.name.clone(),
                accessor_path: member.accessor_path().to_owned(),
                value_type: member.ty.clone(),
                is_record_component: is_record,
                is_nullable: member.nullable,
                requires_presence,
                constraints,
                nested_validations,
            });
        }

        Ok(ValidatorMeta {
            source_type: description.name.clone(),
            validator_type: ValidatorType::for_source(&description.name),
            declaration: Arc::new(description.clone()),
            fields,
        })
    }
}
