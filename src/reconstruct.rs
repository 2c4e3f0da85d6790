//! Reconstruction driver.
//!
//! Walks a digest stream in record order, asks a search engine for the
//! winning candidate of every block, concatenates the results and strips
//! the zero padding appended at encode time. The first per-block failure
//! aborts the whole reconstruction; no partial payload is ever returned.
//! Callers that want partial recovery must drive the engines per block
//! themselves.

use crate::digest::DigestRecord;
use crate::gpu::GpuDigestMatcher;
use crate::stream::DigestStream;
use crate::RevenantError;

/// Per-block outcome of an exhaustive search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub block_index: usize,
    /// Lowest-valued matching block, or `None` if the block's cell still
    /// held the sentinel after the grid retired.
    pub winning: Option<Vec<u8>>,
}

/// A per-block reconstruction strategy.
pub trait SearchEngine {
    /// Return the winning candidate for `target`, or the appropriate
    /// error. `block_index` is carried for error reporting only.
    fn search_block(
        &self,
        block_index: usize,
        target: DigestRecord,
        block_size: usize,
    ) -> Result<Vec<u8>, RevenantError>;
}

impl SearchEngine for GpuDigestMatcher {
    fn search_block(
        &self,
        block_index: usize,
        target: DigestRecord,
        block_size: usize,
    ) -> Result<Vec<u8>, RevenantError> {
        check_block_size(block_size, self.block_size())?;
        let results = self.solve(std::slice::from_ref(&target))?;
        match results.into_iter().next() {
            Some(SearchResult {
                winning: Some(block),
                ..
            }) => Ok(block),
            _ => Err(RevenantError::NoCandidate(block_index)),
        }
    }
}

/// Reconstruct the payload a digest stream was computed from, block by
/// block, using `engine`.
pub fn reconstruct<E: SearchEngine + ?Sized>(
    stream: &DigestStream,
    engine: &E,
) -> Result<Vec<u8>, RevenantError> {
    reconstruct_with_progress(stream, engine, |_| {})
}

/// Like [`reconstruct`], invoking `on_block` with each block index as it
/// is solved. Used by the CLI to drive a progress bar.
pub fn reconstruct_with_progress<E, F>(
    stream: &DigestStream,
    engine: &E,
    mut on_block: F,
) -> Result<Vec<u8>, RevenantError>
where
    E: SearchEngine + ?Sized,
    F: FnMut(usize),
{
    let n = stream.block_size as usize;
    let mut out = Vec::with_capacity(stream.records.len() * n);
    for (i, rec) in stream.records.iter().enumerate() {
        let block = engine.search_block(i, *rec, n)?;
        out.extend_from_slice(&block);
        on_block(i);
    }
    strip_trailing_zeros(&mut out);
    Ok(out)
}

/// Reconstruct via the exhaustive matcher's batch interface, solving all
/// blocks in a single grid launch instead of one launch per block.
pub fn reconstruct_batch(
    stream: &DigestStream,
    matcher: &GpuDigestMatcher,
) -> Result<Vec<u8>, RevenantError> {
    let n = stream.block_size as usize;
    check_block_size(n, matcher.block_size())?;
    let results = matcher.solve(&stream.records)?;
    let mut out = Vec::with_capacity(results.len() * n);
    for res in results {
        match res.winning {
            Some(block) => out.extend_from_slice(&block),
            None => return Err(RevenantError::NoCandidate(res.block_index)),
        }
    }
    strip_trailing_zeros(&mut out);
    Ok(out)
}

/// Remove the zero bytes appended when the final block was padded.
///
/// Stripping is lossy if the original payload itself ended in zero
/// bytes; that is an accepted, documented limitation of the scheme.
pub fn strip_trailing_zeros(buf: &mut Vec<u8>) {
    let keep = buf
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |pos| pos + 1);
    buf.truncate(keep);
}

fn check_block_size(stream_n: usize, engine_n: usize) -> Result<(), RevenantError> {
    if stream_n != engine_n {
        return Err(RevenantError::Format(format!(
            "stream block size {stream_n} does not match engine block size {engine_n}"
        )));
    }
    Ok(())
}
