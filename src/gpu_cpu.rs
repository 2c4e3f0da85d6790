use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use crate::candidate::{candidate_count, index_to_block};
use crate::digest::DigestRecord;
use crate::{RevenantError, SearchResult, MAX_EXHAUSTIVE_BLOCK_SIZE};

/// CPU simulation of the GPU digest matcher.
///
/// Runs the same two-dimensional grid as the OpenCL kernel, collapsed
/// onto host threads: the candidate axis is striped across one thread per
/// core and every thread checks each candidate against all block targets.
/// Per-block best-index cells are updated only through an atomic minimum,
/// so the winning index is the lowest matching `gid` regardless of how
/// the stripes are scheduled.
pub struct GpuDigestMatcher {
    block_size: usize,
}

impl GpuDigestMatcher {
    /// Create a matcher for `block_size`-byte blocks. Sizes outside
    /// `1..=4` are rejected outright.
    pub fn new(block_size: usize) -> Result<Self, RevenantError> {
        if block_size == 0 || block_size > MAX_EXHAUSTIVE_BLOCK_SIZE {
            return Err(RevenantError::UnsupportedBlockSize(block_size));
        }
        Ok(Self { block_size })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Search the full candidate space for every target at once.
    ///
    /// Each result carries the lowest matching candidate for its block,
    /// or `None` if the block's cell still holds the sentinel after all
    /// stripes retire.
    pub fn solve(&self, targets: &[DigestRecord]) -> Result<Vec<SearchResult>, RevenantError> {
        let n = self.block_size;
        let total = candidate_count(n);
        let sentinel = total;
        let cells: Vec<AtomicU64> = targets.iter().map(|_| AtomicU64::new(sentinel)).collect();

        if !targets.is_empty() {
            let workers = thread::available_parallelism()
                .map(|p| p.get() as u64)
                .unwrap_or(1);
            let stripe = total.div_ceil(workers);
            thread::scope(|s| {
                for w in 0..workers {
                    let cells = &cells;
                    let start = w * stripe;
                    let end = (start + stripe).min(total);
                    s.spawn(move || {
                        let mut buf = vec![0u8; n];
                        for gid in start..end {
                            decode_gid(gid, &mut buf);
                            let rec = DigestRecord::of(&buf);
                            for (cell, target) in cells.iter().zip(targets) {
                                if rec == *target {
                                    cell.fetch_min(gid, Ordering::Relaxed);
                                }
                            }
                        }
                    });
                }
            });
        }

        Ok(cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let gid = cell.load(Ordering::Relaxed);
                SearchResult {
                    block_index: i,
                    winning: (gid < sentinel).then(|| index_to_block(gid, n)),
                }
            })
            .collect())
    }
}

/// Write the big-endian base-256 digits of `gid` into `buf`.
fn decode_gid(gid: u64, buf: &mut [u8]) {
    let mut val = gid;
    for i in (0..buf.len()).rev() {
        buf[i] = (val & 0xFF) as u8;
        val >>= 8;
    }
}
