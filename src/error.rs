use thiserror::Error;

#[derive(Error, Debug)]
pub enum RevenantError {
    /// Malformed digest stream header or body.
    #[error("format error: {0}")]
    Format(String),

    /// Block size outside the supported range for the requested engine.
    #[error("unsupported block size {0}")]
    UnsupportedBlockSize(usize),

    /// The search space was exhausted without a matching candidate.
    #[error("no candidate found for block {0}")]
    NoCandidate(usize),

    /// Caller-requested abort of a running search.
    #[error("search cancelled")]
    Cancelled,

    /// Search engine related failure.
    #[error("search error: {0}")]
    Search(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch all for unexpected internal problems.
    #[error("internal error: {0}")]
    Internal(String),
}
