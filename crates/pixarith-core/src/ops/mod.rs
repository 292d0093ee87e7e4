//! Element-wise operations over [`ArrayValue`]s.
//!
//! | Operation | Operand kinds | Output |
//! |-----------|---------------|--------|
//! | [`cast`] | any | requested kind |
//! | [`logical_not`] | any | logical |
//! | [`unary_float_op`] | float32, float64 | input kind |
//! | [`binary_float_op`] | float32, float64 | promoted kind |
//! | [`where_select`] | any output, logical condition | in place |
//!
//! # Ownership
//!
//! Operands are passed as [`Operand`]s. A borrowed array (`&a`) is only
//! read and stays with the caller. An owned array (`a`) is consumed: it is
//! released once the output is complete, or, when the caller asks for
//! [`ReusePolicy::ReuseIfEligible`], its buffer may become the output.
//! If an operation fails, owned operands are dropped without having been
//! modified.

mod binary;
mod cast;
mod logical;
mod operator;
mod select;
mod unary;

pub use binary::{BinaryFloatOp, binary_float_op};
pub use cast::cast;
pub use logical::logical_not;
pub use operator::{Operator, ParseOperatorError};
pub use select::where_select;
pub use unary::{UnaryFloatOp, unary_float_op};

use core::ops::Deref;

use tracing::{debug, trace};

use crate::array::ArrayValue;
use crate::error::{ArithError, Result};
use crate::kind::Kind;

// ======================================================================
// Ownership policy
// ======================================================================

/// An input array, either borrowed from the caller or handed over.
#[derive(Debug)]
pub enum Operand<'a> {
    Borrowed(&'a ArrayValue),
    Owned(ArrayValue),
}

impl Operand<'_> {
    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self, Operand::Owned(_))
    }

    /// Take the owned array as the output buffer of an operation producing
    /// `size` elements of `kind`, or give the operand back unchanged.
    pub(crate) fn reclaim(
        self,
        kind: Kind,
        size: usize,
        reuse: ReusePolicy,
    ) -> core::result::Result<ArrayValue, Self> {
        if reuse == ReusePolicy::AllocateNew {
            return Err(self);
        }
        match self {
            Operand::Owned(array) if array.kind() == kind && array.size() == size => {
                debug!(%kind, size, "reusing operand buffer as output");
                Ok(array)
            }
            other => {
                trace!(
                    %kind,
                    size,
                    owned = other.is_owned(),
                    "operand not reusable, falling back to allocation"
                );
                Err(other)
            }
        }
    }
}

impl Deref for Operand<'_> {
    type Target = ArrayValue;

    fn deref(&self) -> &ArrayValue {
        match self {
            Operand::Borrowed(array) => array,
            Operand::Owned(array) => array,
        }
    }
}

impl From<ArrayValue> for Operand<'_> {
    fn from(array: ArrayValue) -> Self {
        Operand::Owned(array)
    }
}

impl<'a> From<&'a ArrayValue> for Operand<'a> {
    fn from(array: &'a ArrayValue) -> Self {
        Operand::Borrowed(array)
    }
}

/// Whether an operation may write its result into an owned operand.
///
/// Reuse is a request, not a guarantee: when no operand is owned with the
/// output's kind and size, a new buffer is allocated. Compare
/// [`ArrayValue::buffer_ptr`] to find out which happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReusePolicy {
    #[default]
    AllocateNew,
    ReuseIfEligible,
}

// ======================================================================
// Dispatch by operator
// ======================================================================

/// Run a single-operand operator (`not`, a cast, or a float function).
pub fn apply_unary<'a>(
    op: Operator,
    input: impl Into<Operand<'a>>,
    reuse: ReusePolicy,
) -> Result<ArrayValue> {
    match op {
        Operator::Not => logical_not(input),
        Operator::Cast(kind) => cast(input, kind),
        Operator::Unary(f) => unary_float_op(f, input, reuse),
        Operator::Binary(_) | Operator::Where => Err(ArithError::InternalInvariant(format!(
            "operator `{op}` takes {} operands, not 1",
            op.arity()
        ))),
    }
}

/// Run a two-operand float function.
pub fn apply_binary<'l, 'r>(
    op: Operator,
    left: impl Into<Operand<'l>>,
    right: impl Into<Operand<'r>>,
    reuse: ReusePolicy,
) -> Result<ArrayValue> {
    match op {
        Operator::Binary(f) => binary_float_op(f, left, right, reuse),
        Operator::Not | Operator::Where | Operator::Cast(_) | Operator::Unary(_) => {
            Err(ArithError::InternalInvariant(format!(
                "operator `{op}` takes {} operands, not 2",
                op.arity()
            )))
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_from() {
        let a = ArrayValue::scalar(1.0_f64).unwrap();
        assert!(!Operand::from(&a).is_owned());
        assert!(Operand::from(a).is_owned());
    }

    #[test]
    fn test_reclaim_owned_matching() {
        let a = ArrayValue::from_vec(vec![1.0_f32, 2.0], vec![2]).unwrap();
        let ptr = a.buffer_ptr();
        let out = Operand::from(a)
            .reclaim(Kind::Float32, 2, ReusePolicy::ReuseIfEligible)
            .unwrap();
        assert_eq!(out.buffer_ptr(), ptr);
    }

    #[test]
    fn test_reclaim_refuses() {
        let a = ArrayValue::from_vec(vec![1.0_f32, 2.0], vec![2]).unwrap();
        assert!(Operand::from(&a)
            .reclaim(Kind::Float32, 2, ReusePolicy::ReuseIfEligible)
            .is_err());
        let b = a.try_clone().unwrap();
        let b = Operand::from(b)
            .reclaim(Kind::Float64, 2, ReusePolicy::ReuseIfEligible)
            .unwrap_err();
        let b = b.reclaim(Kind::Float32, 3, ReusePolicy::ReuseIfEligible).unwrap_err();
        assert!(b.reclaim(Kind::Float32, 2, ReusePolicy::AllocateNew).is_err());
    }

    #[test]
    fn test_apply_unary_routes() {
        let a = ArrayValue::from_vec(vec![4.0_f64, 9.0], vec![2]).unwrap();
        let r = apply_unary("sqrt".parse().unwrap(), &a, ReusePolicy::AllocateNew).unwrap();
        assert_eq!(r.as_slice::<f64>().unwrap(), &[2.0, 3.0]);

        let r = apply_unary("int32".parse().unwrap(), &a, ReusePolicy::AllocateNew).unwrap();
        assert_eq!(r.as_slice::<i32>().unwrap(), &[4, 9]);

        let r = apply_unary(Operator::Not, &a, ReusePolicy::AllocateNew).unwrap();
        assert_eq!(r.as_slice::<u8>().unwrap(), &[0, 0]);
    }

    #[test]
    fn test_apply_unary_rejects_binary_operator() {
        let a = ArrayValue::scalar(2.0_f64).unwrap();
        let err = apply_unary(Operator::Binary(BinaryFloatOp::Pow), &a, ReusePolicy::AllocateNew)
            .unwrap_err();
        assert!(matches!(err, ArithError::InternalInvariant(_)));
    }

    #[test]
    fn test_apply_binary_routes() {
        let a = ArrayValue::from_vec(vec![2.0_f64, 3.0], vec![2]).unwrap();
        let b = ArrayValue::scalar(2.0_f64).unwrap();
        let r = apply_binary("pow".parse().unwrap(), &a, &b, ReusePolicy::AllocateNew).unwrap();
        assert_eq!(r.as_slice::<f64>().unwrap(), &[4.0, 9.0]);
    }

    #[test]
    fn test_apply_binary_rejects_where() {
        let a = ArrayValue::scalar(2.0_f64).unwrap();
        let err = apply_binary(Operator::Where, &a, &a, ReusePolicy::AllocateNew).unwrap_err();
        assert!(matches!(err, ArithError::InternalInvariant(_)));
    }
}
