use ocl::{Buffer, ProQue};

use crate::candidate::{candidate_count, index_to_block};
use crate::digest::DigestRecord;
use crate::{RevenantError, SearchResult, MAX_EXHAUSTIVE_BLOCK_SIZE};

/// GPU accelerated digest matcher backed by OpenCL.
///
/// Launches a two-dimensional grid: one axis over the candidate index
/// `gid`, one over the block being solved. Workers that find a match
/// write into their block's best-index cell with `atom_min`, so the cell
/// ends up holding the lowest matching `gid` no matter how the device
/// schedules work items.
///
/// If OpenCL initialization fails at runtime the matcher falls back to a
/// pure CPU scan so existing callers do not need to handle errors
/// differently.
pub struct GpuDigestMatcher {
    pro_que: Option<ProQue>,
    block_size: usize,
}

impl GpuDigestMatcher {
    /// Create a matcher for `block_size`-byte blocks. Sizes outside
    /// `1..=4` are rejected outright; the kernel holds candidate bytes in
    /// fixed private storage of four bytes.
    pub fn new(block_size: usize) -> Result<Self, RevenantError> {
        if block_size == 0 || block_size > MAX_EXHAUSTIVE_BLOCK_SIZE {
            return Err(RevenantError::UnsupportedBlockSize(block_size));
        }
        let src = include_str!("kernels/brute_digest.cl");
        let pro_que = ProQue::builder().src(src).build().ok();
        Ok(Self {
            pro_que,
            block_size,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Search the full candidate space for every target at once.
    pub fn solve(&self, targets: &[DigestRecord]) -> Result<Vec<SearchResult>, RevenantError> {
        let pq = match &self.pro_que {
            Some(p) => p,
            None => return self.cpu_solve(targets),
        };
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        let n = self.block_size;
        let total = candidate_count(n);
        let sentinel = total;

        let crc_targets: Vec<u16> = targets.iter().map(|t| t.crc16).collect();
        let sum_targets: Vec<u16> = targets.iter().map(|t| t.sum16).collect();

        let queue = pq.queue();
        let crc_buf = Buffer::<u16>::builder()
            .queue(queue.clone())
            .len(targets.len())
            .copy_host_slice(&crc_targets)
            .build()
            .map_err(|e| RevenantError::Search(format!("{e}")))?;
        let sum_buf = Buffer::<u16>::builder()
            .queue(queue.clone())
            .len(targets.len())
            .copy_host_slice(&sum_targets)
            .build()
            .map_err(|e| RevenantError::Search(format!("{e}")))?;
        // Every cell starts at the sentinel so "no match" stays
        // distinguishable from a legitimate index-zero match.
        let best_buf = Buffer::<u64>::builder()
            .queue(queue.clone())
            .len(targets.len())
            .fill_val(sentinel)
            .build()
            .map_err(|e| RevenantError::Search(format!("{e}")))?;

        let kernel = pq
            .kernel_builder("brute_digest")
            .arg(&crc_buf)
            .arg(&sum_buf)
            .arg(&best_buf)
            .arg(targets.len() as u32)
            .arg(n as u32)
            .build()
            .map_err(|e| RevenantError::Search(format!("{e}")))?;

        unsafe {
            kernel
                .cmd()
                .global_work_size((total as usize, targets.len()))
                .enq()
                .map_err(|e| RevenantError::Search(format!("{e}")))?;
        }

        let mut best = vec![0u64; targets.len()];
        best_buf
            .read(&mut best)
            .enq()
            .map_err(|e| RevenantError::Search(format!("{e}")))?;

        Ok(best
            .iter()
            .enumerate()
            .map(|(i, &gid)| SearchResult {
                block_index: i,
                winning: (gid < sentinel).then(|| index_to_block(gid, n)),
            })
            .collect())
    }

    fn cpu_solve(&self, targets: &[DigestRecord]) -> Result<Vec<SearchResult>, RevenantError> {
        if targets.is_empty() {
            return Ok(Vec::new());
        }
        let n = self.block_size;
        let total = candidate_count(n);
        let mut winners: Vec<Option<u64>> = vec![None; targets.len()];
        let mut unsolved = targets.len();
        let mut buf = vec![0u8; n];
        // Ascending scan, so the first match per block is the lowest gid.
        'scan: for gid in 0..total {
            let mut val = gid;
            for i in (0..n).rev() {
                buf[i] = (val & 0xFF) as u8;
                val >>= 8;
            }
            let rec = DigestRecord::of(&buf);
            for (winner, target) in winners.iter_mut().zip(targets) {
                if winner.is_none() && rec == *target {
                    *winner = Some(gid);
                    unsolved -= 1;
                    if unsolved == 0 {
                        break 'scan;
                    }
                }
            }
        }
        Ok(winners
            .iter()
            .enumerate()
            .map(|(i, winner)| SearchResult {
                block_index: i,
                winning: winner.map(|gid| index_to_block(gid, n)),
            })
            .collect())
    }
}
