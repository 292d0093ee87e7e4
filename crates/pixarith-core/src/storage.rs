//! Backing bytes for array buffers.
//!
//! A buffer is either resident (heap memory) or backed by an anonymous
//! memory map. The choice is made once at allocation time from the array's
//! `min_map_size`; everything above this module sees plain byte slices.

use core::fmt;

use memmap2::MmapMut;
use tracing::debug;

use crate::error::{ArithError, Result};

const WORD: usize = core::mem::size_of::<u64>();

pub(crate) enum Storage {
    /// Heap words, so that any element type up to 8 bytes is aligned.
    Resident { words: Vec<u64>, len: usize },
    /// Page-aligned anonymous map of exactly `len()` bytes.
    Mapped(MmapMut),
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let residency = if self.is_mapped() { "Mapped" } else { "Resident" };
        f.debug_struct(residency)
            .field("nbytes", &self.as_bytes().len())
            .finish()
    }
}

impl Storage {
    /// Zero-filled storage of `nbytes` bytes.
    ///
    /// Maps the buffer when `nbytes > min_map_size`. Empty buffers are
    /// always resident.
    pub(crate) fn allocate(nbytes: usize, min_map_size: usize) -> Result<Self> {
        if nbytes > min_map_size && nbytes > 0 {
            let map = MmapMut::map_anon(nbytes).map_err(|e| ArithError::Allocation {
                bytes: nbytes,
                reason: e.to_string(),
            })?;
            debug!(nbytes, min_map_size, "array buffer backed by anonymous map");
            return Ok(Storage::Mapped(map));
        }

        let nwords = nbytes.div_ceil(WORD);
        let mut words = Vec::new();
        words
            .try_reserve_exact(nwords)
            .map_err(|e| ArithError::Allocation {
                bytes: nbytes,
                reason: e.to_string(),
            })?;
        words.resize(nwords, 0);
        Ok(Storage::Resident { words, len: nbytes })
    }

    #[inline]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        match self {
            Storage::Resident { words, len } => &bytemuck::cast_slice::<u64, u8>(words)[..*len],
            Storage::Mapped(map) => map,
        }
    }

    #[inline]
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Storage::Resident { words, len } => {
                &mut bytemuck::cast_slice_mut::<u64, u8>(words)[..*len]
            }
            Storage::Mapped(map) => map,
        }
    }

    #[inline]
    pub(crate) fn is_mapped(&self) -> bool {
        matches!(self, Storage::Mapped(_))
    }

    /// Copy into fresh storage with the same residency.
    pub(crate) fn try_clone(&self) -> Result<Self> {
        let bytes = self.as_bytes();
        let threshold = if self.is_mapped() { 0 } else { usize::MAX };
        let mut copy = Storage::allocate(bytes.len(), threshold)?;
        copy.as_bytes_mut().copy_from_slice(bytes);
        Ok(copy)
    }
}
