//! Macros for declaring constraints with minimal boilerplate.

// ============================================================================
// CONSTRAINT MACRO
// ============================================================================

/// Declares a constraint: struct definition plus [`Validator`] implementation.
///
/// The `check` block sees the (possibly absent) value and evaluates to
/// `Option<Cow<'static, str>>`: `None` when the value satisfies the rule,
/// otherwise the violation message, reported at the context path.
///
/// # Variants
///
/// **Unit constraint** (`Default`, no configuration):
/// ```rust,ignore
/// constraint! {
///     pub NotNull;
///     check(value) { value.is_none().then(|| "must not be null".into()) }
/// }
/// ```
///
/// **Configured constraint** (public fields, built by its factory):
/// ```rust,ignore
/// constraint! {
///     pub MaxChars { max: usize };
///     check(self, value) {
///         let n = value.and_then(Value::as_str).map_or(0, |s| s.chars().count());
///         (n > self.max).then(|| format!("at most {} chars", self.max).into())
///     }
/// }
/// ```
///
/// [`Validator`]: crate::foundation::Validator
macro_rules! constraint {
    // ── Unit constraint ──────────────────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident;
        check($value:ident) $check:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::foundation::Validator for $name {
            fn validate(
                &self,
                $value: ::core::option::Option<&::serde_json::Value>,
                context: &$crate::foundation::ValidationContext,
            ) -> ::std::vec::Vec<$crate::foundation::Violation> {
                let message: ::core::option::Option<::std::borrow::Cow<'static, str>> = $check;
                message.map(|m| context.violates(m)).into_iter().collect()
            }
        }
    };

    // ── Configured constraint ────────────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? };
        check($self_:ident, $value:ident) $check:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $crate::foundation::Validator for $name {
            fn validate(
                &$self_,
                $value: ::core::option::Option<&::serde_json::Value>,
                context: &$crate::foundation::ValidationContext,
            ) -> ::std::vec::Vec<$crate::foundation::Violation> {
                let message: ::core::option::Option<::std::borrow::Cow<'static, str>> = $check;
                message.map(|m| context.violates(m)).into_iter().collect()
            }
        }
    };
}
