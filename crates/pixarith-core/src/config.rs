//! Memory residency configuration.

use tracing::warn;

use crate::array::{ArrayValue, CoordMeta};
use crate::error::Result;
use crate::kind::Kind;

/// Environment variable read by [`MemoryConfig::from_env`].
pub const MIN_MAP_SIZE_ENV: &str = "PIXARITH_MIN_MAP_SIZE";

/// Where newly allocated buffers live.
///
/// Buffers larger than `min_map_size` bytes are backed by an anonymous
/// memory map; smaller ones stay on the heap. The default never maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryConfig {
    pub min_map_size: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            min_map_size: usize::MAX,
        }
    }
}

impl MemoryConfig {
    pub fn with_min_map_size(mut self, bytes: usize) -> Self {
        self.min_map_size = bytes;
        self
    }

    /// Defaults overridden by `PIXARITH_MIN_MAP_SIZE`, if set to a byte
    /// count. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(MIN_MAP_SIZE_ENV) {
            Ok(raw) => config.with_env_value(&raw),
            Err(_) => config,
        }
    }

    fn with_env_value(self, raw: &str) -> Self {
        match raw.trim().parse::<usize>() {
            Ok(bytes) => self.with_min_map_size(bytes),
            Err(e) => {
                warn!(value = raw, error = %e, "ignoring invalid {MIN_MAP_SIZE_ENV}");
                self
            }
        }
    }

    /// [`ArrayValue::allocate`] with this configuration's threshold.
    pub fn allocate(
        &self,
        kind: Kind,
        shape: Vec<usize>,
        coord: Option<CoordMeta>,
    ) -> Result<ArrayValue> {
        ArrayValue::allocate(kind, shape, coord, self.min_map_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_never_maps() {
        let config = MemoryConfig::default();
        assert_eq!(config.min_map_size, usize::MAX);
        let a = config.allocate(Kind::Float64, vec![1 << 16], None).unwrap();
        assert!(!a.is_mapped());
    }

    #[test]
    fn test_small_threshold_maps() {
        let config = MemoryConfig::default().with_min_map_size(64);
        let a = config.allocate(Kind::Float64, vec![16], None).unwrap();
        assert!(a.is_mapped());
        let b = config.allocate(Kind::Float64, vec![8], None).unwrap();
        assert!(!b.is_mapped());
    }

    #[test]
    fn test_env_value_parsing() {
        let base = MemoryConfig::default();
        assert_eq!(base.with_env_value(" 4096 ").min_map_size, 4096);
        assert_eq!(base.with_env_value("lots").min_map_size, usize::MAX);
        assert_eq!(base.with_env_value("-1").min_map_size, usize::MAX);
    }
}
