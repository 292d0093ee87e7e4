//! # pixarith
//!
//! Element-wise arithmetic on runtime-typed pixel arrays: casts between the
//! eleven numeric kinds, logical negation, `sqrt` / `log` / `log10`,
//! `pow` / `atan2` with single-element broadcasting, and masked `where`
//! replacement.
//!
//! One `use pixarith::prelude::*;` brings in the array type, the
//! operations and their error type.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Arrays, kinds, promotion and every operation |

#[cfg(feature = "core")]
pub use pixarith_core as core;

/// Glob-import convenience: `use pixarith::prelude::*;`
pub mod prelude {
    #[cfg(feature = "core")]
    pub use pixarith_core::prelude::*;
}
