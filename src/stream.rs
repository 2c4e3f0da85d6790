//! Digest stream codec.
//!
//! The digest stream is the sole persisted artifact: one header byte for
//! the block size followed by fixed 4-byte records, back to back. Record
//! size is fixed and known from the header, so no framing markers are
//! needed.
//!
//! Wire layout:
//!
//! ```text
//! byte 0:   block_size N (1..=255)
//! bytes 1.. repeated records, each:
//!             u16 big-endian  crc16
//!             u16 big-endian  sum16
//! ```
//!
//! Total length is `1 + 4 * record_count`. Serialization round-trips
//! exactly.

use crate::digest::DigestRecord;
use crate::RevenantError;

/// Size of one serialized [`DigestRecord`] in bytes.
pub const RECORD_SIZE: usize = 4;

/// An ordered sequence of digest records plus the block size they were
/// computed with. Produced once by the encoder, consumed once by the
/// decoder, immutable in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestStream {
    /// Fixed block size in bytes the payload was split with.
    pub block_size: u8,
    pub records: Vec<DigestRecord>,
}

impl DigestStream {
    /// Digest `payload` into a stream of records at block size `n`.
    ///
    /// The payload is split into consecutive `n`-byte chunks; the final
    /// chunk is right-padded with zero bytes. One record is appended per
    /// chunk, so `records.len() == payload.len().div_ceil(n)`.
    pub fn encode(payload: &[u8], n: u8) -> Result<Self, RevenantError> {
        if n == 0 {
            return Err(RevenantError::UnsupportedBlockSize(0));
        }
        let n_usize = n as usize;
        let mut records = Vec::with_capacity(payload.len().div_ceil(n_usize));
        let mut padded = vec![0u8; n_usize];
        for chunk in payload.chunks(n_usize) {
            if chunk.len() == n_usize {
                records.push(DigestRecord::of(chunk));
            } else {
                padded[..chunk.len()].copy_from_slice(chunk);
                padded[chunk.len()..].fill(0);
                records.push(DigestRecord::of(&padded));
            }
        }
        Ok(Self {
            block_size: n,
            records,
        })
    }

    /// Serialize to the wire layout described in the module docs.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + RECORD_SIZE * self.records.len());
        out.push(self.block_size);
        for rec in &self.records {
            out.extend_from_slice(&rec.to_bytes());
        }
        out
    }

    /// Parse a serialized stream.
    ///
    /// Fails fast with [`RevenantError::Format`] on an empty input, a zero
    /// block size, or a body whose length is not a multiple of the record
    /// size. Engine-specific block size limits are checked by the engines
    /// themselves.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, RevenantError> {
        let (&block_size, body) = bytes
            .split_first()
            .ok_or_else(|| RevenantError::Format("empty digest stream".into()))?;
        if block_size == 0 {
            return Err(RevenantError::Format("zero block size".into()));
        }
        if body.len() % RECORD_SIZE != 0 {
            return Err(RevenantError::Format(format!(
                "body length {} is not a multiple of the record size",
                body.len()
            )));
        }
        let records = body
            .chunks_exact(RECORD_SIZE)
            .map(|c| DigestRecord::from_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Ok(Self {
            block_size,
            records,
        })
    }

    /// Serialized size in bytes.
    pub fn serialized_len(&self) -> usize {
        1 + RECORD_SIZE * self.records.len()
    }
}
