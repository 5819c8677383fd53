//! Metadata model
//!
//! Two layers live here:
//!
//! - the **declarative input surface** ([`TypeDescription`],
//!   [`MemberDescription`], [`Annotation`], [`AnnotationType`], [`Schema`]):
//!   what discovery hands over;
//! - the **resolved model** ([`ValidatorMeta`], [`Field`], [`ConstraintDecl`],
//!   [`NestedValidationDecl`]): what the composer consumes, produced by
//!   [`MetadataExtractor`].

mod description;
mod extract;
mod model;
mod param;
mod types;

pub use description::{
    Annotation, AnnotationType, DeclarationKind, MemberDescription, Schema, TypeDescription,
};
pub use extract::{MetadataExtractor, SynthOptions};
pub use model::{
    ConstraintDecl, Factory, Field, NestedValidationDecl, RuleKey, ValidatorMeta, ValidatorType,
};
pub use param::{ParamValue, Parameters};
pub use types::{TypeRef, TypeRefParseError};
