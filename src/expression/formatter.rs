//! Closed registry of runtime formatters a compiled binding may reference.

/// Closed registry of runtime formatters a compiled binding may reference.
///
/// The runtime binding layer registers one callback per variant under
/// [`runtime_name`](Formatter::runtime_name). Keeping this a closed enum
/// makes it impossible to construct a formatter node that references an
/// unregistered runtime function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// Structural evaluator: re-evaluates the serialized boolean/compare/
    /// if-else body of a compiled binding from its resolved part values.
    Evaluate,
}

impl Formatter {
    /// Name the runtime registers the formatter callback under.
    pub fn runtime_name(self) -> &'static str {
        match self {
            Self::Evaluate => "bindkit.evaluate",
        }
    }
}
