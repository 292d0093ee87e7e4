//! Element type hierarchy and runtime-kind dispatch.
//!
//! The trait hierarchy is:
//! ```text
//! Element        (u8, i8, u16, i16, u32, i32, u64, i64, f32, f64)
//!   └── FloatElement  (f32, f64)
//! ```
//!
//! Operations are written once as generic functions over these traits. The
//! [`dispatch_kind!`] and [`dispatch_float!`] macros turn a runtime [`Kind`]
//! into the matching concrete type so that each generic function is
//! instantiated once per kind instead of being duplicated by hand.

use core::fmt;

use bytemuck::Pod;
use num_traits::{AsPrimitive, Float, Zero};

use crate::kind::Kind;

// ---------------------------------------------------------------------------
// Element: every type that can back an array buffer
// ---------------------------------------------------------------------------

/// A plain scalar that can be viewed directly inside an array buffer.
///
/// `Pod` guarantees any bit pattern is valid, which is what lets a byte
/// buffer be reinterpreted as `&[Self]` without copying.
pub trait Element:
    Pod + Zero + PartialEq + fmt::Debug + fmt::Display + Default + Send + Sync + 'static
{
    /// Storage kind of this element type.
    const KIND: Kind;
}

// ---------------------------------------------------------------------------
// FloatElement: operands of the float-domain engines
// ---------------------------------------------------------------------------

/// Floating-point element types (`f32`, `f64`).
pub trait FloatElement: Element + Float + AsPrimitive<f64> {
    /// Round a double-precision result into this type.
    fn from_f64(v: f64) -> Self;
}

macro_rules! impl_element {
    ($ty:ty, $kind:expr) => {
        impl Element for $ty {
            const KIND: Kind = $kind;
        }
    };
}

impl_element!(u8, Kind::UInt8);
impl_element!(i8, Kind::Int8);
impl_element!(u16, Kind::UInt16);
impl_element!(i16, Kind::Int16);
impl_element!(u32, Kind::UInt32);
impl_element!(i32, Kind::Int32);
impl_element!(u64, Kind::UInt64);
impl_element!(i64, Kind::Int64);
impl_element!(f32, Kind::Float32);
impl_element!(f64, Kind::Float64);

impl FloatElement for f32 {
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl FloatElement for f64 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }
}

// ===========================================================================
// Dispatch
// ===========================================================================

/// Bind `$T` to the element type of `$kind` and evaluate `$body`.
///
/// `$body` must evaluate to a `Result`. [`Kind::Bit`] short-circuits with
/// `UnsupportedKind`, naming `$operation`.
macro_rules! dispatch_kind {
    ($kind:expr, $operation:expr, |$T:ident| $body:expr) => {
        match $kind {
            $crate::kind::Kind::Logical | $crate::kind::Kind::UInt8 => {
                type $T = u8;
                $body
            }
            $crate::kind::Kind::Int8 => {
                type $T = i8;
                $body
            }
            $crate::kind::Kind::UInt16 => {
                type $T = u16;
                $body
            }
            $crate::kind::Kind::Int16 => {
                type $T = i16;
                $body
            }
            $crate::kind::Kind::UInt32 => {
                type $T = u32;
                $body
            }
            $crate::kind::Kind::Int32 => {
                type $T = i32;
                $body
            }
            $crate::kind::Kind::UInt64 => {
                type $T = u64;
                $body
            }
            $crate::kind::Kind::Int64 => {
                type $T = i64;
                $body
            }
            $crate::kind::Kind::Float32 => {
                type $T = f32;
                $body
            }
            $crate::kind::Kind::Float64 => {
                type $T = f64;
                $body
            }
            $crate::kind::Kind::Bit => Err($crate::error::ArithError::UnsupportedKind {
                kind: $crate::kind::Kind::Bit,
                operation: $operation,
            }),
        }
    };
}

/// Float-only counterpart of [`dispatch_kind!`].
///
/// Callers validate kinds up front, so a non-float kind here is an internal
/// error rather than a user-facing `TypeMismatch`.
macro_rules! dispatch_float {
    ($kind:expr, $operation:expr, |$T:ident| $body:expr) => {
        match $kind {
            $crate::kind::Kind::Float32 => {
                type $T = f32;
                $body
            }
            $crate::kind::Kind::Float64 => {
                type $T = f64;
                $body
            }
            other => Err($crate::error::ArithError::InternalInvariant(format!(
                "{} reached a float-only kernel with type {}",
                $operation, other
            ))),
        }
    };
}

pub(crate) use {dispatch_float, dispatch_kind};
