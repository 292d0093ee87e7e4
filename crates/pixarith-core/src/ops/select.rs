//! Masked replacement (`where`).

use num_traits::AsPrimitive;

use crate::array::ArrayValue;
use crate::dtype::{Element, dispatch_kind};
use crate::error::{ArithError, Result};
use crate::kernel::{self, stride};
use crate::kind::Kind;

use super::Operand;

/// Overwrite `output[i]` with `iftrue[i]` wherever `cond[i]` is non-zero.
///
/// `cond` must be a logical array with exactly the output's dimensions.
/// `iftrue` may be of any kind and holds either a single element, used for
/// every selected position, or one element per output element. Values are
/// converted to the output's kind with the rules of [`cast`](super::cast).
/// Unselected positions keep their bytes.
///
/// Every check runs before the first write, so on error `output` is
/// unchanged. Owned `cond` and `iftrue` arrays are released on return.
///
/// ```
/// # use pixarith_core::{where_select, ArrayValue};
/// let mut out = ArrayValue::from_vec(vec![1_i32, 1, 1], vec![3]).unwrap();
/// let cond = ArrayValue::logical(&[true, false, true], vec![3]).unwrap();
/// let fill = ArrayValue::from_vec(vec![9_i32, 9, 9], vec![3]).unwrap();
/// where_select(&mut out, &cond, &fill).unwrap();
/// assert_eq!(out.as_slice::<i32>().unwrap(), &[9, 1, 9]);
/// ```
pub fn where_select<'c, 't>(
    output: &mut ArrayValue,
    cond: impl Into<Operand<'c>>,
    iftrue: impl Into<Operand<'t>>,
) -> Result<()> {
    let (cond, iftrue) = (cond.into(), iftrue.into());
    output.kind().require_width("where")?;
    iftrue.kind().require_width("where")?;
    if cond.kind() != Kind::Logical {
        return Err(ArithError::TypeMismatch {
            operator: "where",
            operand: "condition",
            kind: cond.kind(),
            expected: "logical",
        });
    }
    if !cond.same_dims(output) {
        return Err(ArithError::ShapeMismatch {
            operator: "where",
            left: output.shape().to_vec(),
            right: cond.shape().to_vec(),
            reason: "the condition must have the output's dimensions",
        });
    }
    if iftrue.size() != 1 && iftrue.size() != output.size() {
        return Err(ArithError::ShapeMismatch {
            operator: "where",
            left: output.shape().to_vec(),
            right: iftrue.shape().to_vec(),
            reason: "the replacement must be a single element or one per output element",
        });
    }

    let mask = cond.as_slice::<u8>()?;
    let to_logical = output.kind() == Kind::Logical;
    dispatch_kind!(iftrue.kind(), "where", |S| {
        let src = iftrue.as_slice::<S>()?;
        if to_logical {
            select_logical::<S>(mask, src, output.as_mut_slice::<u8>()?);
            Ok(())
        } else {
            dispatch_kind!(output.kind(), "where", |D| {
                select::<S, D>(mask, src, output.as_mut_slice::<D>()?);
                Ok(())
            })
        }
    })
}

fn select<S, D>(mask: &[u8], src: &[S], dst: &mut [D])
where
    S: Element + AsPrimitive<D>,
    D: Element,
{
    let ts = stride(src.len());
    kernel::update(dst, |i, x| if mask[i] != 0 { src[i * ts].as_() } else { x });
}

fn select_logical<S: Element>(mask: &[u8], src: &[S], dst: &mut [u8]) {
    let ts = stride(src.len());
    kernel::update(dst, |i, x| {
        if mask[i] != 0 {
            u8::from(!src[i * ts].is_zero())
        } else {
            x
        }
    });
}
