//! Runtime-typed, shaped array buffers.
//!
//! An [`ArrayValue`] is a flat, row-major byte buffer tagged with a [`Kind`]
//! and a shape. The kind is only known at runtime; typed access goes through
//! [`ArrayValue::as_slice`], which checks the requested element type against
//! the tag.

mod create;
mod display;

use core::any::Any;
use core::fmt;
use std::sync::Arc;

use crate::dtype::Element;
use crate::error::{ArithError, Result};
use crate::kind::Kind;
use crate::storage::Storage;

/// Opaque coordinate metadata carried alongside an array.
///
/// Arithmetic never looks inside it; outputs share the handle of the input
/// whose shape they take.
#[derive(Clone)]
pub struct CoordMeta(Arc<dyn Any + Send + Sync>);

impl CoordMeta {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the wrapped value if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether both handles refer to the same metadata object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CoordMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CoordMeta(..)")
    }
}

/// A typed, shaped buffer whose element kind is chosen at runtime.
///
/// The buffer always holds exactly `kind.nbytes(size())` bytes. It is either
/// resident or memory-mapped depending on `min_map_size`; nothing outside
/// allocation cares which.
pub struct ArrayValue {
    kind: Kind,
    shape: Vec<usize>,
    size: usize,
    storage: Storage,
    min_map_size: usize,
    coord: Option<CoordMeta>,
}

impl ArrayValue {
    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The dimension sizes, slowest-varying first.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements (1 for a 0-dimensional array).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether the array holds exactly one element and so broadcasts.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.size == 1
    }

    /// Size of the buffer in bytes.
    #[inline]
    pub fn nbytes(&self) -> usize {
        self.storage.as_bytes().len()
    }

    /// Whether the buffer is backed by a memory map rather than the heap.
    #[inline]
    pub fn is_mapped(&self) -> bool {
        self.storage.is_mapped()
    }

    /// Byte threshold above which buffers derived from this array are mapped.
    #[inline]
    pub fn min_map_size(&self) -> usize {
        self.min_map_size
    }

    #[inline]
    pub fn coord(&self) -> Option<&CoordMeta> {
        self.coord.as_ref()
    }

    /// Replace the coordinate metadata.
    pub fn with_coord(mut self, coord: Option<CoordMeta>) -> Self {
        self.coord = coord;
        self
    }

    /// Address of the first byte of the buffer.
    ///
    /// Two arrays with the same address share a buffer; this is how callers
    /// observe whether an in-place request was honoured.
    #[inline]
    pub fn buffer_ptr(&self) -> *const u8 {
        self.storage.as_bytes().as_ptr()
    }

    /// The raw buffer in native byte order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.storage.as_bytes()
    }

    // ------------------------------------------------------------------
    // Typed views
    // ------------------------------------------------------------------

    /// View the buffer as elements of `T`.
    ///
    /// Fails with `TypeMismatch` unless `T` is the storage type of this
    /// array's kind (`u8` for logical arrays).
    pub fn as_slice<T: Element>(&self) -> Result<&[T]> {
        self.check_element::<T>()?;
        bytemuck::try_cast_slice(self.storage.as_bytes())
            .map_err(|e| ArithError::InternalInvariant(format!("typed view failed: {e}")))
    }

    /// Mutable counterpart of [`as_slice`](Self::as_slice).
    pub fn as_mut_slice<T: Element>(&mut self) -> Result<&mut [T]> {
        self.check_element::<T>()?;
        bytemuck::try_cast_slice_mut(self.storage.as_bytes_mut())
            .map_err(|e| ArithError::InternalInvariant(format!("typed view failed: {e}")))
    }

    /// Copy the elements out into a `Vec<T>`.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.as_slice::<T>().map(<[T]>::to_vec)
    }

    fn check_element<T: Element>(&self) -> Result<()> {
        if self.kind.storage() == T::KIND {
            Ok(())
        } else {
            Err(ArithError::TypeMismatch {
                operator: "element access",
                operand: "requested",
                kind: self.kind,
                expected: T::KIND.name(),
            })
        }
    }

    // ------------------------------------------------------------------
    // Shape relations
    // ------------------------------------------------------------------

    /// Exact dimension equality, as required where broadcasting is not
    /// allowed.
    pub fn same_dims(&self, other: &ArrayValue) -> bool {
        self.shape == other.shape
    }

    /// Sizes are equal, or at least one side is a single element.
    pub fn is_broadcast_compatible(&self, other: &ArrayValue) -> bool {
        self.size == other.size || self.size == 1 || other.size == 1
    }

    // ------------------------------------------------------------------
    // Copies
    // ------------------------------------------------------------------

    /// Deep copy. A mapped buffer is copied into a new map.
    pub fn try_clone(&self) -> Result<ArrayValue> {
        Ok(ArrayValue {
            kind: self.kind,
            shape: self.shape.clone(),
            size: self.size,
            storage: self.storage.try_clone()?,
            min_map_size: self.min_map_size,
            coord: self.coord.clone(),
        })
    }
}

impl fmt::Debug for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayValue")
            .field("kind", &self.kind)
            .field("shape", &self.shape)
            .field("mapped", &self.is_mapped())
            .field("min_map_size", &self.min_map_size)
            .field("coord", &self.coord)
            .finish_non_exhaustive()
    }
}

/// Equal kind, shape and bytes. Coordinate metadata is not compared.
impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.shape == other.shape && self.as_bytes() == other.as_bytes()
    }
}

// ======================================================================
// Utility functions
// ======================================================================

/// Number of elements for `shape`, or `None` on overflow.
pub(crate) fn element_count(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}
