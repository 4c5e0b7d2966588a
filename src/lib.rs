//! # template-index
//!
//! Builds the per-document search indices of a template language that mixes a host
//! markup language with an embedded expression language:
//!
//! - the occurrence index, mapping every word to the contexts it was seen in
//!   (code, plain text, comments, strings, foreign language), and
//! - the TODO index, counting configured marker patterns found in comments.
//!
//! The token stream is produced by a lexer outside of the indexing core. A reference
//! lexer for Angular-style templates lives in [lexer] and is what the `tmpl-index`
//! binary uses.
//!
//! ## Testing
//!
//! Index assertions should go through [indexing::testing::assert_index].

pub mod config;
pub mod formats;
pub mod indexing;
pub mod lexer;

pub use indexing::{
    AlgorithmVersion, AttributeInfo, AttributeType, ContextCategory, IndexError, IndexedDocument,
    Indexer, IndexingSession, OccurrenceIndex, TodoIndex, Token, TokenKind,
};
