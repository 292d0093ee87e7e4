//! Index loops shared by every operation.
//!
//! Each output position depends only on the same position of the inputs
//! (or on a broadcast single element), so long loops are split across the
//! rayon pool without changing results. In-place loops read a position
//! before writing it and never touch any other position.

use rayon::prelude::*;

/// Loops shorter than this run on the calling thread.
pub(crate) const PARALLEL_MIN_LEN: usize = 1 << 16;

/// `out[i] = f(i)` for every `i`.
pub(crate) fn fill<O, F>(out: &mut [O], f: F)
where
    O: Send,
    F: Fn(usize) -> O + Sync,
{
    if out.len() >= PARALLEL_MIN_LEN {
        out.par_iter_mut().enumerate().for_each(|(i, o)| *o = f(i));
    } else {
        for (i, o) in out.iter_mut().enumerate() {
            *o = f(i);
        }
    }
}

/// `out[i] = f(i, out[i])` for every `i`.
pub(crate) fn update<O, F>(out: &mut [O], f: F)
where
    O: Copy + Send,
    F: Fn(usize, O) -> O + Sync,
{
    if out.len() >= PARALLEL_MIN_LEN {
        out.par_iter_mut().enumerate().for_each(|(i, o)| *o = f(i, *o));
    } else {
        for (i, o) in out.iter_mut().enumerate() {
            *o = f(i, *o);
        }
    }
}

/// Index multiplier for an operand of `len` elements: 0 when it broadcasts
/// as a single element, 1 otherwise.
#[inline]
pub(crate) fn stride(len: usize) -> usize {
    usize::from(len != 1)
}
