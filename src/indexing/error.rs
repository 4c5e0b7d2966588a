//! Error types for the indexing core

use super::token::TokenKind;
use std::ops::Range;
use thiserror::Error;

/// Errors raised by an [IndexingSession](super::session::IndexingSession)
///
/// Classification, word scanning and TODO scanning are total, so the only failures are
/// a token stream that breaks its contract and misuse of the session API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// The token's declared range disagrees with its text. Aborts the session.
    #[error(
        "malformed {kind:?} token at {range:?}: range spans {declared_len} bytes but text has {actual_len}"
    )]
    MalformedToken {
        kind: TokenKind,
        range: Range<usize>,
        declared_len: usize,
        actual_len: usize,
    },

    /// An operation was called in a state that does not allow it
    #[error("cannot {operation} an indexing session in state {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
}
