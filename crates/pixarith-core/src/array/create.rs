//! Array construction: explicit allocation and construction from host data.

use crate::dtype::Element;
use crate::error::{ArithError, Result};
use crate::kind::Kind;
use crate::storage::Storage;

use super::{ArrayValue, CoordMeta, element_count};

impl ArrayValue {
    /// Allocate a zero-filled array of `kind` and `shape`.
    ///
    /// The buffer is memory-mapped when its byte size exceeds
    /// `min_map_size`; pass `usize::MAX` to keep it resident. [`Kind::Bit`]
    /// arrays are packed eight elements to a byte so that they can be
    /// carried around, but no operation accepts them. Fails with
    /// `Allocation` when the byte size overflows or the memory cannot be
    /// obtained.
    ///
    /// ```
    /// # use pixarith_core::{ArrayValue, Kind};
    /// let a = ArrayValue::allocate(Kind::Int16, vec![2, 3], None, usize::MAX).unwrap();
    /// assert_eq!(a.size(), 6);
    /// assert_eq!(a.nbytes(), 12);
    /// ```
    pub fn allocate(
        kind: Kind,
        shape: Vec<usize>,
        coord: Option<CoordMeta>,
        min_map_size: usize,
    ) -> Result<Self> {
        let overflow = || ArithError::Allocation {
            bytes: usize::MAX,
            reason: format!("{shape:?} elements of {kind} overflow the address space"),
        };
        let size = element_count(&shape).ok_or_else(overflow)?;
        let nbytes = kind.nbytes(size).ok_or_else(overflow)?;
        let storage = Storage::allocate(nbytes, min_map_size)?;
        Ok(Self {
            kind,
            shape,
            size,
            storage,
            min_map_size,
            coord,
        })
    }

    /// A resident, zero-filled array with no coordinate metadata.
    pub fn zeros(kind: Kind, shape: Vec<usize>) -> Result<Self> {
        Self::allocate(kind, shape, None, usize::MAX)
    }

    /// Build an array of `T`'s kind from a flat slice (copies the data).
    pub fn from_slice<T: Element>(data: &[T], shape: Vec<usize>) -> Result<Self> {
        if element_count(&shape) != Some(data.len()) {
            return Err(ArithError::ShapeMismatch {
                operator: "from_slice",
                left: shape,
                right: vec![data.len()],
                reason: "shape product does not match data length",
            });
        }
        let mut out = Self::zeros(T::KIND, shape)?;
        out.storage
            .as_bytes_mut()
            .copy_from_slice(bytemuck::cast_slice(data));
        Ok(out)
    }

    /// Build an array of `T`'s kind from a flat vector.
    ///
    /// ```
    /// # use pixarith_core::{ArrayValue, Kind};
    /// let a = ArrayValue::from_vec(vec![1_i32, 2, 3], vec![3]).unwrap();
    /// assert_eq!(a.kind(), Kind::Int32);
    /// ```
    pub fn from_vec<T: Element>(data: Vec<T>, shape: Vec<usize>) -> Result<Self> {
        Self::from_slice(&data, shape)
    }

    /// A 0-dimensional single-element array.
    pub fn scalar<T: Element>(value: T) -> Result<Self> {
        Self::from_slice(&[value], vec![])
    }

    /// A logical array from booleans.
    pub fn logical(values: &[bool], shape: Vec<usize>) -> Result<Self> {
        let bytes: Vec<u8> = values.iter().map(|&b| u8::from(b)).collect();
        let mut out = Self::from_slice(&bytes, shape)?;
        out.kind = Kind::Logical;
        Ok(out)
    }
}
