use thiserror::Error;

/// Errors raised at the engine's parsing boundaries. All of them signal bad
/// input rather than transient conditions, so callers are expected to report
/// them instead of retrying.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("malformed FEN: {0}")]
    BadFen(String),
    #[error("badly formatted move: {0}")]
    BadMoveString(String),
    #[error("illegal move: {0}")]
    IllegalMove(String),
}
