//! `pixarith-core`: element-wise arithmetic over runtime-typed arrays.
//!
//! Provides the [`ArrayValue`] buffer, the kind promotion rules, and the
//! operations an arithmetic expression evaluator dispatches to: casts,
//! logical negation, float functions of one and two arguments, and masked
//! replacement (`where`).
//!
//! # Design
//!
//! - The element kind of an array is a runtime [`Kind`] tag. Operations are
//!   written once as generic functions over [`Element`] / [`FloatElement`]
//!   and instantiated per kind by a dispatch macro.
//! - Callers pass operands either borrowed or owned (see [`Operand`]); owned
//!   operands may donate their buffer to the output.
//! - Large buffers can live in anonymous memory maps
//!   ([`MemoryConfig`]); the operations never see the difference.
//! - Every error is detected before anything is written.
//!
//! ```
//! use pixarith_core::{cast, promote, ArrayValue, Kind};
//!
//! let a = ArrayValue::from_vec(vec![1_u8, 0, 3], vec![3]).unwrap();
//! let f = cast(&a, Kind::Float32).unwrap();
//! assert_eq!(promote(f.kind(), Kind::Float64).unwrap(), Kind::Float64);
//! ```

pub mod array;
pub mod config;
pub mod dtype;
pub mod error;
mod kernel;
pub mod kind;
pub mod ops;
pub mod promote;
mod storage;

// Re-export key types at crate root for convenience.
pub use array::{ArrayValue, CoordMeta};
pub use config::MemoryConfig;
pub use dtype::{Element, FloatElement};
pub use error::{ArithError, Result};
pub use kind::{Kind, ParseKindError};
pub use ops::{
    BinaryFloatOp, Operand, Operator, ParseOperatorError, ReusePolicy, UnaryFloatOp, apply_binary,
    apply_unary, binary_float_op, cast, logical_not, unary_float_op, where_select,
};
pub use promote::promote;

/// Items intended for glob-import: `use pixarith_core::prelude::*;`
pub mod prelude {
    pub use crate::array::{ArrayValue, CoordMeta};
    pub use crate::config::MemoryConfig;
    pub use crate::error::{ArithError, Result};
    pub use crate::kind::Kind;
    pub use crate::ops::{
        BinaryFloatOp, Operand, Operator, ReusePolicy, UnaryFloatOp, apply_binary, apply_unary,
        binary_float_op, cast, logical_not, unary_float_op, where_select,
    };
    pub use crate::promote::promote;
}
