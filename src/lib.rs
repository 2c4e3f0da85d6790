//! Core logic for the Revenant checksum-search codec.
//!
//! A payload is split into fixed-size blocks and each block is reduced to
//! a pair of short checksums (CRC-16-CCITT and a truncated byte sum).
//! "Decompression" reconstructs each block by searching the candidate
//! space for a byte sequence whose checksums match, taking the
//! numerically lowest match as the winner. Checksums are many-to-one, so
//! the recovered payload is *a* preimage, not necessarily the original;
//! the scheme trades information for an `8·N`-bit-to-32-bit ratio and is
//! intentionally lossy.
//!
//! Two engines are provided: a sequential [`bounded_search`] over a
//! restricted [`Alphabet`], and the exhaustive [`GpuDigestMatcher`] that
//! grids the full byte space across independent workers (OpenCL with the
//! `gpu` feature, a thread-striped CPU simulation otherwise). Both
//! resolve ties the same way, so reconstruction is reproducible across
//! engines, runs and schedules.

pub mod bounded;
pub mod candidate;
pub mod digest;
pub mod error;
pub mod gpu;
pub mod io_utils;
pub mod reconstruct;
pub mod stats;
pub mod stream;

pub use bounded::{bounded_search, BoundedEngine, CancelToken};
pub use candidate::{block_to_index, candidate_count, index_to_block, Alphabet};
pub use digest::{crc16, sum16, DigestRecord};
pub use error::RevenantError;
pub use gpu::GpuDigestMatcher;
pub use reconstruct::{
    reconstruct, reconstruct_batch, reconstruct_with_progress, strip_trailing_zeros, SearchEngine,
    SearchResult,
};
pub use stats::SearchStats;
pub use stream::DigestStream;

/// Largest block size the exhaustive parallel engine accepts.
///
/// A worker holds all candidate bytes in fixed local storage and the
/// per-block candidate count `256^n` must stay within practical launch
/// sizes; `n = 4` is already 4.3 billion candidates per block.
pub const MAX_EXHAUSTIVE_BLOCK_SIZE: usize = 4;
