use crate::kind::Kind;

/// All errors returned by `pixarith-core`.
///
/// Every error is raised before the first element of any array is written,
/// so a failed call never leaves a caller-visible array half-updated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArithError {
    /// An operand's kind is not one the operator accepts.
    #[error(
        "the {operator} operator can only accept {expected} operands, \
         but its {operand} operand has type {kind}"
    )]
    TypeMismatch {
        operator: &'static str,
        operand: &'static str,
        kind: Kind,
        expected: &'static str,
    },

    /// Operand shapes or sizes violate the broadcasting rules.
    #[error("{operator}: shapes {left:?} and {right:?} are incompatible ({reason})")]
    ShapeMismatch {
        operator: &'static str,
        left: Vec<usize>,
        right: Vec<usize>,
        reason: &'static str,
    },

    /// The kind has no element representation (packed bits).
    #[error("{operation} does not support the {kind} type")]
    UnsupportedKind { kind: Kind, operation: &'static str },

    /// The backing buffer could not be obtained.
    #[error("could not allocate {bytes} bytes: {reason}")]
    Allocation { bytes: usize, reason: String },

    /// A code path that a correct build never reaches.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

/// Convenience alias used throughout `pixarith-core`.
pub type Result<T> = std::result::Result<T, ArithError>;
