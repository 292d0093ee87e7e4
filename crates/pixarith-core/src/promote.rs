//! Output kind selection for mixed-kind operations.

use crate::error::{ArithError, Result};
use crate::kind::Kind;

/// The kind two operands promote to.
///
/// Kinds are ordered
/// `logical < uint8 < int8 < uint16 < int16 < uint32 < int32 < uint64 < int64 < float32 < float64`
/// and the higher one wins. For the float-only engines this is simply
/// "float64 dominates float32".
///
/// ```
/// # use pixarith_core::{promote, Kind};
/// assert_eq!(promote(Kind::Float32, Kind::Float64).unwrap(), Kind::Float64);
/// assert_eq!(promote(Kind::UInt16, Kind::Int16).unwrap(), Kind::Int16);
/// ```
pub fn promote(a: Kind, b: Kind) -> Result<Kind> {
    for kind in [a, b] {
        kind.require_width("type promotion")?;
    }
    Ok(if b.rank() > a.rank() { b } else { a })
}

/// Fail with `TypeMismatch` unless `kind` is a float kind.
pub(crate) fn require_float(
    operator: &'static str,
    operand: &'static str,
    kind: Kind,
) -> Result<()> {
    if kind.is_float() {
        Ok(())
    } else {
        Err(ArithError::TypeMismatch {
            operator,
            operand,
            kind,
            expected: "single or double precision floating point",
        })
    }
}
