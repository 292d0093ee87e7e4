//! Logical negation.

use crate::array::ArrayValue;
use crate::dtype::{Element, dispatch_kind};
use crate::error::Result;
use crate::kernel;
use crate::kind::Kind;

use super::Operand;

/// Element-wise logical negation: 1 where the input is zero, 0 elsewhere.
///
/// Accepts every kind except [`Kind::Bit`] and always produces a logical
/// array of the input's shape. NaN is not zero, so it negates to 0. The
/// output never shares the input's buffer; an owned input is released
/// once the result is complete.
///
/// ```
/// # use pixarith_core::{logical_not, ArrayValue, Kind};
/// let a = ArrayValue::from_vec(vec![0_i16, 2, 0, 5], vec![4]).unwrap();
/// let n = logical_not(&a).unwrap();
/// assert_eq!(n.kind(), Kind::Logical);
/// assert_eq!(n.as_slice::<u8>().unwrap(), &[1, 0, 1, 0]);
/// ```
pub fn logical_not<'a>(input: impl Into<Operand<'a>>) -> Result<ArrayValue> {
    let input = input.into();
    input.kind().require_width("not")?;

    let mut out = ArrayValue::allocate(
        Kind::Logical,
        input.shape().to_vec(),
        input.coord().cloned(),
        input.min_map_size(),
    )?;
    let dst = out.as_mut_slice::<u8>()?;
    dispatch_kind!(input.kind(), "not", |T| {
        negate::<T>(input.as_slice::<T>()?, dst);
        Ok(())
    })?;
    Ok(out)
}

fn negate<T: Element>(src: &[T], dst: &mut [u8]) {
    kernel::fill(dst, |i| u8::from(src[i].is_zero()));
}
