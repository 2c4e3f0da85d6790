//! Sequential bounded-alphabet search engine.
//!
//! Reconstructs one block given its digest record and a restricted
//! candidate alphabet, for callers that know the source data is
//! constrained (printable text, say). Candidates are enumerated in
//! lexicographic order over the sorted alphabet, so the first match is
//! also the numerically lowest one.
//!
//! Worst case cost is `O(|alphabet|^n)` digest evaluations. This is only
//! viable for small `n` and/or small alphabets; 95^2 printable-ASCII
//! candidates at `n = 2` is cheap, 95^4 is not. Callers own that
//! trade-off; the engine accepts any positive `n`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::candidate::Alphabet;
use crate::digest::DigestRecord;
use crate::reconstruct::SearchEngine;
use crate::RevenantError;

/// How many candidates are evaluated between cancellation checks.
const CANCEL_CHECK_INTERVAL: u64 = 4096;

/// Shared flag for aborting a long-running bounded search.
///
/// The search polls the token between candidate evaluations, so
/// cancellation is cooperative and takes effect within
/// [`CANCEL_CHECK_INTERVAL`] evaluations.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that any search holding this token stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Enumerate `alphabet^block_size` in lexicographic order and return the
/// first candidate whose digest matches `target`.
///
/// Fails with [`RevenantError::NoCandidate`] once the space is exhausted.
/// That is an expected outcome, not a defect: padding can push a trailing
/// block's true content outside the alphabet, and the original data may
/// simply not be drawn from it. Fails with [`RevenantError::Cancelled`]
/// if `cancel` fires mid-search.
pub fn bounded_search(
    target: DigestRecord,
    block_size: usize,
    alphabet: &Alphabet,
    cancel: &CancelToken,
) -> Result<Vec<u8>, RevenantError> {
    if block_size == 0 {
        return Err(RevenantError::UnsupportedBlockSize(0));
    }
    let mut cursor = alphabet.enumerate(block_size);
    let mut tested = 0u64;
    while let Some(candidate) = cursor.advance() {
        if DigestRecord::of(candidate) == target {
            return Ok(candidate.to_vec());
        }
        tested += 1;
        if tested % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            return Err(RevenantError::Cancelled);
        }
    }
    Err(RevenantError::NoCandidate(0))
}

/// Bounded engine bundled with its alphabet and cancellation token, for
/// use through the [`SearchEngine`] seam.
#[derive(Debug, Clone)]
pub struct BoundedEngine {
    alphabet: Alphabet,
    cancel: CancelToken,
}

impl BoundedEngine {
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            cancel: CancelToken::new(),
        }
    }

    /// Token shared with every search issued through this engine.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

impl SearchEngine for BoundedEngine {
    fn search_block(
        &self,
        block_index: usize,
        target: DigestRecord,
        block_size: usize,
    ) -> Result<Vec<u8>, RevenantError> {
        bounded_search(target, block_size, &self.alphabet, &self.cancel).map_err(|e| match e {
            RevenantError::NoCandidate(_) => RevenantError::NoCandidate(block_index),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_own_preimage() {
        let target = DigestRecord::of(b"AB");
        let found =
            bounded_search(target, 2, &Alphabet::printable(), &CancelToken::new()).unwrap();
        assert_eq!(DigestRecord::of(&found), target);
    }

    #[test]
    fn impossible_sum_exhausts() {
        // One byte sums to at most 255; 0xFFFF has no preimage at n = 1.
        let target = DigestRecord {
            crc16: 0x1234,
            sum16: 0xFFFF,
        };
        let err =
            bounded_search(target, 1, &Alphabet::full(), &CancelToken::new()).unwrap_err();
        assert!(matches!(err, RevenantError::NoCandidate(_)));
    }

    #[test]
    fn tiny_alphabet_exhausts() {
        let alphabet = Alphabet::from_bytes(&[0x41, 0x42]).unwrap();
        let target = DigestRecord {
            crc16: 0xBEEF,
            sum16: 0x0001,
        };
        let err = bounded_search(target, 1, &alphabet, &CancelToken::new()).unwrap_err();
        assert!(matches!(err, RevenantError::NoCandidate(_)));
    }

    #[test]
    fn cancellation_aborts() {
        let token = CancelToken::new();
        token.cancel();
        // An unsatisfiable target over the full space would otherwise run
        // through all 65536 two-byte candidates.
        let target = DigestRecord {
            crc16: 0x0000,
            sum16: 0xFFFF,
        };
        let err = bounded_search(target, 2, &Alphabet::full(), &token).unwrap_err();
        assert!(matches!(err, RevenantError::Cancelled));
    }

    #[test]
    fn zero_block_size_rejected() {
        let target = DigestRecord::of(b"A");
        let err =
            bounded_search(target, 0, &Alphabet::full(), &CancelToken::new()).unwrap_err();
        assert!(matches!(err, RevenantError::UnsupportedBlockSize(0)));
    }
}
