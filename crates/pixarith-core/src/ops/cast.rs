//! Type conversion between kinds.

use num_traits::AsPrimitive;

use crate::array::ArrayValue;
use crate::dtype::{Element, dispatch_kind};
use crate::error::Result;
use crate::kernel;
use crate::kind::Kind;

use super::Operand;

/// Convert `input` to `target`, keeping its shape and coordinate metadata.
///
/// Elements follow Rust's primitive `as` conversions: floats truncate
/// toward zero (saturating at the integer bounds, NaN becomes 0), integer
/// narrowing wraps, and wide integers may round when converted to floats.
/// A logical target stores 1 for every non-zero element.
///
/// A borrowed input of the target kind is copied; an owned one is returned
/// as is.
///
/// ```
/// # use pixarith_core::{cast, ArrayValue, Kind};
/// let a = ArrayValue::from_vec(vec![1_i32, 2, 3], vec![3]).unwrap();
/// let b = cast(&a, Kind::Float64).unwrap();
/// assert_eq!(b.as_slice::<f64>().unwrap(), &[1.0, 2.0, 3.0]);
/// ```
pub fn cast<'a>(input: impl Into<Operand<'a>>, target: Kind) -> Result<ArrayValue> {
    let input = input.into();
    input.kind().require_width("cast")?;
    target.require_width("cast")?;

    if input.kind() == target {
        return match input {
            Operand::Owned(array) => Ok(array),
            Operand::Borrowed(array) => array.try_clone(),
        };
    }

    let mut out = ArrayValue::allocate(
        target,
        input.shape().to_vec(),
        input.coord().cloned(),
        input.min_map_size(),
    )?;

    dispatch_kind!(input.kind(), "cast", |S| {
        let src = input.as_slice::<S>()?;
        if target == Kind::Logical {
            to_logical::<S>(src, out.as_mut_slice::<u8>()?);
            Ok(())
        } else {
            dispatch_kind!(target, "cast", |D| {
                convert::<S, D>(src, out.as_mut_slice::<D>()?);
                Ok(())
            })
        }
    })?;
    Ok(out)
}

fn convert<S, D>(src: &[S], dst: &mut [D])
where
    S: Element + AsPrimitive<D>,
    D: Element,
{
    kernel::fill(dst, |i| src[i].as_());
}

fn to_logical<S: Element>(src: &[S], dst: &mut [u8]) {
    kernel::fill(dst, |i| u8::from(!src[i].is_zero()));
}
