//! Deduplication of rule declarations into shared handles.

use std::collections::HashMap;
use std::fmt;

use crate::metadata::{Factory, RuleKey, TypeRef};

// ============================================================================
// HANDLE
// ============================================================================

/// Position of a handle in the arena, which is also its constructor
/// parameter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(usize);

impl HandleId {
    /// Arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The rule a handle stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleRef {
    /// A constraint instance built by a factory.
    Constraint(Factory),
    /// The validator of a cascaded type.
    Nested(TypeRef),
}

/// One shared rule instance of a composed validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handle {
    name: String,
    rule: RuleRef,
}

impl Handle {
    /// Parameter name, e.g. `constraint_0_1` or `validator_2_0`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What the handle is bound to.
    pub fn rule(&self) -> &RuleRef {
        &self.rule
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule {
            RuleRef::Constraint(factory) if factory.parameters.is_empty() => {
                write!(f, "{} = {}", self.name, factory.rule_type)
            }
            RuleRef::Constraint(factory) => write!(
                f,
                "{} = {}({})",
                self.name, factory.rule_type, factory.parameters
            ),
            RuleRef::Nested(ty) => write!(f, "{} = Validator<{ty}>", self.name),
        }
    }
}

// ============================================================================
// DEDUPLICATION INDEX
// ============================================================================

/// Maps normalized rule descriptors to handles, scoped to one composition.
///
/// Constraints key on [`Factory::key`]; nested validations key on the
/// validated type. The first declaration of a key names the handle after its
/// field and position; later equal declarations reuse it.
///
/// # Examples
///
/// ```
/// use cascade_validator::compose::DeduplicationIndex;
/// use cascade_validator::metadata::{Factory, Parameters};
///
/// let not_blank = Factory {
///     rule_type: "NotBlankFactory<String>".into(),
///     parameters: Parameters::new(),
/// };
///
/// let mut index = DeduplicationIndex::new();
/// let first = index.intern_constraint(&not_blank, 0, 0);
/// let second = index.intern_constraint(&not_blank, 3, 1);
///
/// assert_eq!(first, second);
/// assert_eq!(index.handle(first).name(), "constraint_0_0");
/// assert_eq!(index.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeduplicationIndex {
    handles: Vec<Handle>,
    constraints: HashMap<RuleKey, HandleId>,
    nested: HashMap<TypeRef, HandleId>,
}

impl DeduplicationIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle of `factory`, creating `constraint_{field}_{position}`
    /// if no equivalent factory was interned before.
    pub fn intern_constraint(&mut self, factory: &Factory, field: usize, position: usize) -> HandleId {
        if let Some(&id) = self.constraints.get(&factory.key()) {
            return id;
        }
        let id = self.push(
            format!("constraint_{field}_{position}"),
            RuleRef::Constraint(factory.clone()),
        );
        self.constraints.insert(factory.key(), id);
        id
    }

    /// Returns the handle of the validator for `ty`, creating
    /// `validator_{field}_{position}` on first use.
    pub fn intern_nested(&mut self, ty: &TypeRef, field: usize, position: usize) -> HandleId {
        if let Some(&id) = self.nested.get(ty) {
            return id;
        }
        let id = self.push(
            format!("validator_{field}_{position}"),
            RuleRef::Nested(ty.clone()),
        );
        self.nested.insert(ty.clone(), id);
        id
    }

    /// Looks up an interned handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this index.
    pub fn handle(&self, id: HandleId) -> &Handle {
        &self.handles[id.0]
    }

    /// Handles in first-intern order.
    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    /// Number of distinct handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether nothing was interned.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Consumes the index, returning its arena.
    pub fn into_handles(self) -> Vec<Handle> {
        self.handles
    }

    fn push(&mut self, name: String, rule: RuleRef) -> HandleId {
        let id = HandleId(self.handles.len());
        self.handles.push(Handle { name, rule });
        id
    }
}
