//! Declarative input surface: descriptions of types, members and annotations.
//!
//! These are what a discovery step (a derive, a schema file, a reflection
//! layer) hands to the synthesizer. They are plain serde data so they can be
//! loaded from JSON or YAML.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ParamValue, Parameters, TypeRef};

// ============================================================================
// DECLARATION KIND
// ============================================================================

/// The shape of a described type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// Immutable product type whose members are components.
    Record,
    /// Type with instance fields.
    Class,
    /// Abstract contract without instance state.
    Interface,
    /// Enumeration.
    Enum,
    /// Annotation type.
    Annotation,
}

impl DeclarationKind {
    /// Whether instances of this kind carry state a validator can walk.
    pub fn holds_instance_state(self) -> bool {
        matches!(self, Self::Record | Self::Class)
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Record => "record",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Annotation => "annotation",
        })
    }
}

// ============================================================================
// ANNOTATION
// ============================================================================

/// An annotation instance attached to a type, member or annotation type.
///
/// # Examples
///
/// ```
/// use cascade_validator::metadata::Annotation;
///
/// let size = Annotation::new("Size").arg("from", 1).arg("to", 64);
/// assert_eq!(size.to_string(), "#[Size(from = 1, to = 64)]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// The annotation type.
    #[serde(rename = "type")]
    pub ty: TypeRef,

    /// Arguments in declaration order.
    #[serde(default, skip_serializing_if = "Parameters::is_empty")]
    pub arguments: Parameters,
}

impl Annotation {
    /// Creates an annotation without arguments.
    pub fn new(ty: impl Into<TypeRef>) -> Self {
        Self {
            ty: ty.into(),
            arguments: Parameters::new(),
        }
    }

    /// Adds an argument.
    #[must_use = "builder methods must be chained or built"]
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.arguments = self.arguments.with(name, value);
        self
    }

    /// Whether this annotation is of type `ty`.
    pub fn is(&self, ty: &TypeRef) -> bool {
        &self.ty == ty
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arguments.is_empty() {
            write!(f, "#[{}]", self.ty)
        } else {
            write!(f, "#[{}({})]", self.ty, self.arguments)
        }
    }
}

// ============================================================================
// MEMBER DESCRIPTION
// ============================================================================

/// One member of a described type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescription {
    /// Member name, used as the path segment in violations.
    pub name: String,

    /// Declared value type, without nullability.
    #[serde(rename = "type")]
    pub ty: TypeRef,

    /// Whether the declared type admits absence.
    #[serde(default)]
    pub nullable: bool,

    /// Key under which the value is stored, when it differs from `name`
    /// (e.g. a serde rename).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessor: Option<String>,

    /// Attached annotations in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl MemberDescription {
    /// Creates a non-nullable member without annotations.
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            nullable: false,
            accessor: None,
            annotations: Vec::new(),
        }
    }

    /// Marks the member nullable.
    #[must_use = "builder methods must be chained or built"]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Reads the value from `key` instead of the member name.
    #[must_use = "builder methods must be chained or built"]
    pub fn accessor(mut self, key: impl Into<String>) -> Self {
        self.accessor = Some(key.into());
        self
    }

    /// Attaches an annotation.
    #[must_use = "builder methods must be chained or built"]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// The key the value is read from.
    pub fn accessor_path(&self) -> &str {
        self.accessor.as_deref().unwrap_or(&self.name)
    }
}

// ============================================================================
// TYPE DESCRIPTION
// ============================================================================

/// A described type: its kind, members and type-level annotations.
///
/// # Examples
///
/// ```
/// use cascade_validator::metadata::{Annotation, MemberDescription, TypeDescription};
///
/// let address = TypeDescription::record("shop::Address")
///     .annotated(Annotation::new("Validated"))
///     .member(MemberDescription::new("city", "String").annotated(Annotation::new("NotBlank")));
///
/// assert_eq!(address.members.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescription {
    /// Fully qualified type name.
    pub name: TypeRef,

    /// Declaration kind.
    pub kind: DeclarationKind,

    /// Members in declaration order.
    #[serde(default)]
    pub members: Vec<MemberDescription>,

    /// Type-level annotations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl TypeDescription {
    /// Creates an empty description of the given kind.
    pub fn new(name: impl Into<TypeRef>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            members: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Creates an empty record description.
    pub fn record(name: impl Into<TypeRef>) -> Self {
        Self::new(name, DeclarationKind::Record)
    }

    /// Creates an empty class description.
    pub fn class(name: impl Into<TypeRef>) -> Self {
        Self::new(name, DeclarationKind::Class)
    }

    /// Appends a member.
    #[must_use = "builder methods must be chained or built"]
    pub fn member(mut self, member: MemberDescription) -> Self {
        self.members.push(member);
        self
    }

    /// Attaches a type-level annotation.
    #[must_use = "builder methods must be chained or built"]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Whether the type carries an annotation of type `marker`.
    pub fn has_annotation(&self, marker: &TypeRef) -> bool {
        self.annotations.iter().any(|a| a.is(marker))
    }
}

// ============================================================================
// ANNOTATION TYPE
// ============================================================================

/// Declaration of an annotation type together with its meta-annotations.
///
/// An annotation type carrying the rule-backed meta-annotation turns every
/// use of it on a member into a constraint declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationType {
    /// Annotation type name.
    pub name: TypeRef,

    /// Meta-annotations in declaration order.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl AnnotationType {
    /// Creates an annotation type without meta-annotations.
    pub fn new(name: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    /// Attaches a meta-annotation.
    #[must_use = "builder methods must be chained or built"]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// A bundle of annotation types and type descriptions, as loaded from a
/// schema file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Annotation types declared in addition to the catalog's own.
    #[serde(default)]
    pub annotation_types: Vec<AnnotationType>,

    /// Types to synthesize validators for.
    #[serde(default)]
    pub types: Vec<TypeDescription>,
}

impl Schema {
    /// Finds a type by its fully qualified or simple name.
    pub fn find(&self, name: &str) -> Option<&TypeDescription> {
        self.types
            .iter()
            .find(|t| t.name.name() == name)
            .or_else(|| self.types.iter().find(|t| t.name.simple_name() == name))
    }
}
