//! Two-operand float functions with single-element broadcasting.

use crate::array::ArrayValue;
use crate::dtype::{FloatElement, dispatch_float};
use crate::error::{ArithError, Result};
use crate::kernel::{self, stride};
use crate::promote::{promote, require_float};

use super::{Operand, ReusePolicy};

/// A float function of two arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryFloatOp {
    /// `left` raised to the power `right`.
    Pow,
    /// Four-quadrant arc tangent of `left / right`, in radians.
    Atan2,
}

impl BinaryFloatOp {
    pub fn name(self) -> &'static str {
        match self {
            BinaryFloatOp::Pow => "pow",
            BinaryFloatOp::Atan2 => "atan2",
        }
    }

    /// The element function. Operands are widened to `f64` and the result
    /// is rounded back to the output kind.
    pub fn function(self) -> fn(f64, f64) -> f64 {
        match self {
            BinaryFloatOp::Pow => f64::powf,
            BinaryFloatOp::Atan2 => f64::atan2,
        }
    }
}

/// Apply `op` element-wise to two float32 or float64 arrays.
///
/// Sizes must be equal, or one operand must hold a single element, which is
/// then paired with every element of the other. The output kind is the
/// promotion of both kinds. Shape and coordinate metadata come from the
/// left operand, unless the left one is a single element and the right one
/// is not. The output's `min_map_size` is the smaller of the two.
///
/// With [`ReusePolicy::ReuseIfEligible`] the output is written into an
/// owned operand of the output's kind and size, the left one first.
///
/// ```
/// # use pixarith_core::{binary_float_op, ArrayValue, BinaryFloatOp, ReusePolicy};
/// let base = ArrayValue::from_vec(vec![1.0_f64, 2.0, 3.0], vec![3]).unwrap();
/// let two = ArrayValue::scalar(2.0_f64).unwrap();
/// let r = binary_float_op(BinaryFloatOp::Pow, &base, &two, ReusePolicy::AllocateNew).unwrap();
/// assert_eq!(r.as_slice::<f64>().unwrap(), &[1.0, 4.0, 9.0]);
/// ```
pub fn binary_float_op<'l, 'r>(
    op: BinaryFloatOp,
    left: impl Into<Operand<'l>>,
    right: impl Into<Operand<'r>>,
    reuse: ReusePolicy,
) -> Result<ArrayValue> {
    let (left, right) = (left.into(), right.into());
    let operator = op.name();
    require_float(operator, "first", left.kind())?;
    require_float(operator, "second", right.kind())?;
    if !left.is_broadcast_compatible(&right) {
        return Err(ArithError::ShapeMismatch {
            operator,
            left: left.shape().to_vec(),
            right: right.shape().to_vec(),
            reason: "sizes differ and neither operand is a single element",
        });
    }

    let kind = promote(left.kind(), right.kind())?;
    let size = if left.is_scalar() { right.size() } else { left.size() };
    let f = op.function();

    dispatch_float!(kind, operator, |O| {
        dispatch_float!(left.kind(), operator, |L| {
            dispatch_float!(right.kind(), operator, |R| {
                evaluate::<L, R, O>(f, left, right, size, reuse)
            })
        })
    })
}

fn evaluate<L, R, O>(
    f: fn(f64, f64) -> f64,
    left: Operand<'_>,
    right: Operand<'_>,
    size: usize,
    reuse: ReusePolicy,
) -> Result<ArrayValue>
where
    L: FloatElement,
    R: FloatElement,
    O: FloatElement,
{
    let left = match left.reclaim(O::KIND, size, reuse) {
        Ok(mut out) => {
            let r = right.as_slice::<R>()?;
            let rs = stride(r.len());
            kernel::update(out.as_mut_slice::<O>()?, |i, x| {
                O::from_f64(f(x.as_(), r[i * rs].as_()))
            });
            return Ok(out);
        }
        Err(left) => left,
    };
    // The right operand only carries the output shape when it is the shape
    // source or matches the left shape exactly.
    let right_shaped = (left.is_scalar() && !right.is_scalar()) || left.same_dims(&right);
    let right_reuse = if right_shaped { reuse } else { ReusePolicy::AllocateNew };
    let right = match right.reclaim(O::KIND, size, right_reuse) {
        Ok(mut out) => {
            let l = left.as_slice::<L>()?;
            let ls = stride(l.len());
            kernel::update(out.as_mut_slice::<O>()?, |i, x| {
                O::from_f64(f(l[i * ls].as_(), x.as_()))
            });
            return Ok(out);
        }
        Err(right) => right,
    };

    let source = if left.is_scalar() && !right.is_scalar() { &right } else { &left };
    let mut out = ArrayValue::allocate(
        O::KIND,
        source.shape().to_vec(),
        source.coord().cloned(),
        left.min_map_size().min(right.min_map_size()),
    )?;
    let (l, r) = (left.as_slice::<L>()?, right.as_slice::<R>()?);
    let (ls, rs) = (stride(l.len()), stride(r.len()));
    kernel::fill(out.as_mut_slice::<O>()?, |i| {
        O::from_f64(f(l[i * ls].as_(), r[i * rs].as_()))
    });
    Ok(out)
}
