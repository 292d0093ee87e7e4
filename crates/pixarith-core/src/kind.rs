//! Runtime scalar kinds.
//!
//! Every [`ArrayValue`](crate::ArrayValue) carries a [`Kind`] tag naming the
//! representation of its elements. The set is closed:
//!
//! ```text
//! Bit                       (packed, rejected by every operation)
//! Logical                   (one byte per element, 0 = false)
//! UInt8  Int8  UInt16 Int16 UInt32 Int32 UInt64 Int64
//! Float32 Float64
//! ```

use core::fmt;
use core::str::FromStr;

use crate::error::{ArithError, Result};

/// Scalar representation of an array's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Packed bits. Exists so that I/O layers can carry it; no operation in
    /// this crate accepts it.
    Bit,
    Logical,
    UInt8,
    Int8,
    UInt16,
    Int16,
    UInt32,
    Int32,
    UInt64,
    Int64,
    Float32,
    Float64,
}

impl Kind {
    /// Every kind that has an element representation, in promotion order.
    pub const NUMERIC: [Kind; 11] = [
        Kind::Logical,
        Kind::UInt8,
        Kind::Int8,
        Kind::UInt16,
        Kind::Int16,
        Kind::UInt32,
        Kind::Int32,
        Kind::UInt64,
        Kind::Int64,
        Kind::Float32,
        Kind::Float64,
    ];

    /// Width of one element in bytes, or `None` for [`Kind::Bit`].
    pub const fn width(self) -> Option<usize> {
        match self {
            Kind::Bit => None,
            Kind::Logical | Kind::UInt8 | Kind::Int8 => Some(1),
            Kind::UInt16 | Kind::Int16 => Some(2),
            Kind::UInt32 | Kind::Int32 | Kind::Float32 => Some(4),
            Kind::UInt64 | Kind::Int64 | Kind::Float64 => Some(8),
        }
    }

    /// Bytes needed to hold `size` elements, or `None` on overflow.
    ///
    /// Bits are packed eight to a byte.
    pub const fn nbytes(self, size: usize) -> Option<usize> {
        match self.width() {
            Some(width) => size.checked_mul(width),
            None => Some(size.div_ceil(8)),
        }
    }

    /// Like [`width`](Self::width), failing with `UnsupportedKind` for
    /// [`Kind::Bit`].
    pub fn require_width(self, operation: &'static str) -> Result<usize> {
        self.width().ok_or(ArithError::UnsupportedKind {
            kind: self,
            operation,
        })
    }

    /// The kind whose Rust element type backs this kind's buffer.
    ///
    /// Logical arrays are stored as `u8`; every other kind is its own
    /// storage kind.
    #[inline]
    pub const fn storage(self) -> Kind {
        match self {
            Kind::Logical => Kind::UInt8,
            other => other,
        }
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Kind::Float32 | Kind::Float64)
    }

    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Kind::Int8 | Kind::Int16 | Kind::Int32 | Kind::Int64 | Kind::Float32 | Kind::Float64
        )
    }

    /// Position in the promotion order (see [`promote`](crate::promote)).
    pub(crate) const fn rank(self) -> u8 {
        match self {
            Kind::Bit => 0,
            Kind::Logical => 1,
            Kind::UInt8 => 2,
            Kind::Int8 => 3,
            Kind::UInt16 => 4,
            Kind::Int16 => 5,
            Kind::UInt32 => 6,
            Kind::Int32 => 7,
            Kind::UInt64 => 8,
            Kind::Int64 => 9,
            Kind::Float32 => 10,
            Kind::Float64 => 11,
        }
    }

    /// Canonical lower-case name, also used as the cast operator token.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Bit => "bit",
            Kind::Logical => "logical",
            Kind::UInt8 => "uint8",
            Kind::Int8 => "int8",
            Kind::UInt16 => "uint16",
            Kind::Int16 => "int16",
            Kind::UInt32 => "uint32",
            Kind::Int32 => "int32",
            Kind::UInt64 => "uint64",
            Kind::Int64 => "int64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known [`Kind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized type name `{0}`")]
pub struct ParseKindError(pub String);

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s {
            "bit" => Ok(Kind::Bit),
            "logical" | "bool" => Ok(Kind::Logical),
            "uint8" | "uchar" => Ok(Kind::UInt8),
            "int8" | "char" => Ok(Kind::Int8),
            "uint16" | "ushort" => Ok(Kind::UInt16),
            "int16" | "short" => Ok(Kind::Int16),
            "uint32" | "uint" => Ok(Kind::UInt32),
            "int32" | "int" => Ok(Kind::Int32),
            "uint64" | "ulong" => Ok(Kind::UInt64),
            "int64" | "long" | "longlong" => Ok(Kind::Int64),
            "float32" | "float" => Ok(Kind::Float32),
            "float64" | "double" => Ok(Kind::Float64),
            other => Err(ParseKindError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(Kind::Logical.width(), Some(1));
        assert_eq!(Kind::Int16.width(), Some(2));
        assert_eq!(Kind::Float32.width(), Some(4));
        assert_eq!(Kind::UInt64.width(), Some(8));
        assert_eq!(Kind::Bit.width(), None);
    }

    #[test]
    fn test_nbytes() {
        assert_eq!(Kind::Float64.nbytes(3), Some(24));
        assert_eq!(Kind::Bit.nbytes(9), Some(2));
        assert_eq!(Kind::Int32.nbytes(usize::MAX), None);
    }

    #[test]
    fn test_require_width_bit() {
        let err = Kind::Bit.require_width("allocate").unwrap_err();
        assert!(matches!(err, ArithError::UnsupportedKind { kind: Kind::Bit, .. }));
    }

    #[test]
    fn test_storage_kind() {
        assert_eq!(Kind::Logical.storage(), Kind::UInt8);
        assert_eq!(Kind::Int32.storage(), Kind::Int32);
    }

    #[test]
    fn test_names_round_trip() {
        for kind in Kind::NUMERIC.iter().copied().chain([Kind::Bit]) {
            assert_eq!(kind.name().parse::<Kind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_legacy_names() {
        assert_eq!("double".parse::<Kind>().unwrap(), Kind::Float64);
        assert_eq!("uchar".parse::<Kind>().unwrap(), Kind::UInt8);
        assert!("complex64".parse::<Kind>().is_err());
    }

    #[test]
    fn test_numeric_is_in_rank_order() {
        assert!(Kind::NUMERIC.windows(2).all(|w| w[0].rank() < w[1].rank()));
    }
}
