//! Single-operand float functions.

use num_traits::Float;

use crate::array::ArrayValue;
use crate::dtype::{FloatElement, dispatch_float};
use crate::error::Result;
use crate::kernel;
use crate::promote::require_float;

use super::{Operand, ReusePolicy};

/// A float function of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryFloatOp {
    Sqrt,
    /// Natural logarithm.
    Log,
    Log10,
}

impl UnaryFloatOp {
    pub fn name(self) -> &'static str {
        match self {
            UnaryFloatOp::Sqrt => "sqrt",
            UnaryFloatOp::Log => "log",
            UnaryFloatOp::Log10 => "log10",
        }
    }

    /// The element function, evaluated in `T`'s own precision.
    pub fn function<T: FloatElement>(self) -> fn(T) -> T {
        match self {
            UnaryFloatOp::Sqrt => <T as Float>::sqrt,
            UnaryFloatOp::Log => <T as Float>::ln,
            UnaryFloatOp::Log10 => <T as Float>::log10,
        }
    }
}

/// Apply `op` to every element of a float32 or float64 array.
///
/// The output has the input's kind, shape and metadata. Domain errors
/// follow IEEE 754: `sqrt(-1)` and `log(-1)` are NaN, `log(0)` is negative
/// infinity. Integer and logical inputs fail with `TypeMismatch`.
///
/// With [`ReusePolicy::ReuseIfEligible`] an owned input is overwritten and
/// returned as the output.
///
/// ```
/// # use pixarith_core::{unary_float_op, ArrayValue, ReusePolicy, UnaryFloatOp};
/// let a = ArrayValue::from_vec(vec![4.0_f32, 9.0], vec![2]).unwrap();
/// let r = unary_float_op(UnaryFloatOp::Sqrt, &a, ReusePolicy::AllocateNew).unwrap();
/// assert_eq!(r.as_slice::<f32>().unwrap(), &[2.0, 3.0]);
/// ```
pub fn unary_float_op<'a>(
    op: UnaryFloatOp,
    input: impl Into<Operand<'a>>,
    reuse: ReusePolicy,
) -> Result<ArrayValue> {
    let input = input.into();
    let (kind, size) = (input.kind(), input.size());
    require_float(op.name(), "first", kind)?;

    dispatch_float!(kind, op.name(), |T| {
        let f = op.function::<T>();
        match input.reclaim(kind, size, reuse) {
            Ok(mut out) => {
                kernel::update(out.as_mut_slice::<T>()?, |_, x| f(x));
                Ok(out)
            }
            Err(input) => {
                let mut out = ArrayValue::allocate(
                    kind,
                    input.shape().to_vec(),
                    input.coord().cloned(),
                    input.min_map_size(),
                )?;
                let src = input.as_slice::<T>()?;
                kernel::fill(out.as_mut_slice::<T>()?, |i| f(src[i]));
                Ok(out)
            }
        }
    })
}
