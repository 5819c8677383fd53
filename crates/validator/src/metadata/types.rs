//! Structural type references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A reference to a (possibly generic) type, e.g. `List<shop::Item>`.
///
/// Equality and hashing are structural, which is what the deduplication
/// index keys on. Namespaces are separated by `::`.
///
/// # Examples
///
/// ```
/// use cascade_validator::metadata::TypeRef;
///
/// let ty: TypeRef = "Map<String, List<shop::Item>>".parse().unwrap();
/// assert_eq!(ty.name(), "Map");
/// assert_eq!(ty.args().len(), 2);
/// assert_eq!(ty.to_string(), "Map<String, List<shop::Item>>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    name: String,
    args: Vec<TypeRef>,
}

impl TypeRef {
    /// Creates a non-generic reference. `name` is taken verbatim.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Creates a generic reference `name<args...>`.
    pub fn generic(name: impl Into<String>, args: impl IntoIterator<Item = TypeRef>) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    /// The fully qualified name without generic arguments.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generic arguments, empty for non-generic types.
    pub fn args(&self) -> &[TypeRef] {
        &self.args
    }

    /// The last path segment of the name: `shop::Item` → `Item`.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }

    /// The namespace part of the name, if any: `shop::Item` → `shop`.
    pub fn namespace(&self) -> Option<&str> {
        self.name.rsplit_once("::").map(|(ns, _)| ns)
    }

    /// Returns a sibling type in the same namespace: `shop::Item` + `ItemValidator`
    /// → `shop::ItemValidator`.
    #[must_use]
    pub fn sibling(&self, simple_name: &str) -> Self {
        match self.namespace() {
            Some(ns) => Self::new(format!("{ns}::{simple_name}")),
            None => Self::new(simple_name),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl From<&str> for TypeRef {
    /// Parses `s`, falling back to a verbatim non-generic name when it is not
    /// valid type syntax. Use [`str::parse`] to reject malformed input.
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| Self::new(s))
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> Self {
        ty.to_string()
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeRefParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Error returned when a type string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid type reference `{input}` at offset {offset}: {reason}")]
pub struct TypeRefParseError {
    /// The full input.
    pub input: String,
    /// Byte offset where parsing failed.
    pub offset: usize,
    /// What was expected.
    pub reason: &'static str,
}

impl FromStr for TypeRef {
    type Err = TypeRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { input: s, pos: 0 };
        let ty = parser.type_ref()?;
        parser.skip_ws();
        if parser.pos != s.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(ty)
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn type_ref(&mut self) -> Result<TypeRef, TypeRefParseError> {
        self.skip_ws();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | ':' | '.' | '$') {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.error("expected a type name"));
        }
        let name = self.input[start..self.pos].to_owned();

        self.skip_ws();
        let mut args = Vec::new();
        if self.peek() == Some('<') {
            self.pos += 1;
            loop {
                args.push(self.type_ref()?);
                self.skip_ws();
                match self.peek() {
                    Some(',') => self.pos += 1,
                    Some('>') => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err(self.error("expected `,` or `>`")),
                }
            }
        }

        Ok(TypeRef { name, args })
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, reason: &'static str) -> TypeRefParseError {
        TypeRefParseError {
            input: self.input.to_owned(),
            offset: self.pos,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("String", "String")]
    #[case("shop::Item", "shop::Item")]
    #[case("List<String>", "List<String>")]
    #[case(" Map< String ,List<i64> > ", "Map<String, List<i64>>")]
    fn parse_and_display(#[case] input: &str, #[case] expected: &str) {
        let ty: TypeRef = input.parse().unwrap();
        assert_eq!(ty.to_string(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("List<")]
    #[case("List<String")]
    #[case("List<>")]
    #[case("A B")]
    fn parse_rejects_malformed(#[case] input: &str) {
        assert!(input.parse::<TypeRef>().is_err());
    }

    #[test]
    fn structural_equality() {
        let a: TypeRef = "List<String>".parse().unwrap();
        let b = TypeRef::generic("List", [TypeRef::new("String")]);
        assert_eq!(a, b);
        assert_ne!(a, TypeRef::new("List"));
    }

    #[test]
    fn names_and_siblings() {
        let ty = TypeRef::new("shop::orders::Order");
        assert_eq!(ty.simple_name(), "Order");
        assert_eq!(ty.namespace(), Some("shop::orders"));
        assert_eq!(
            ty.sibling("OrderValidator"),
            TypeRef::new("shop::orders::OrderValidator")
        );
        assert_eq!(TypeRef::new("Order").sibling("OrderValidator").name(), "OrderValidator");
    }

    #[test]
    fn from_str_ref_parses_generics() {
        assert_eq!(TypeRef::from("List<String>").args().len(), 1);
        assert_eq!(TypeRef::from("not a type").name(), "not a type");
    }

    #[test]
    fn serde_uses_string_form() {
        let ty: TypeRef = serde_json::from_str("\"List<shop::Item>\"").unwrap();
        assert_eq!(ty.args()[0].simple_name(), "Item");
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"List<shop::Item>\"");
    }
}
