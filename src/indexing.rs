//! Token classification and index accumulation
//!
//!     One indexing pass walks the token stream of a single document. Every token is
//!     classified into a [ClassificationAction](classifier::ClassificationAction), which
//!     decides how its text contributes to the two per-document indices.
//!
//! Pipeline
//!
//!     Token stream -> TokenClassifier -> WordScanner / TodoScanner -> builders
//!
//!     The classifier is a pure function over the static [tables]. Word and TODO
//!     scanning only look at character classes and marker patterns, never at grammar.
//!     All mutation happens in the [builders], which are owned by one
//!     [IndexingSession](session::IndexingSession) and only handed out once the pass
//!     completed without errors.
//!
//! Versioning
//!
//!     Both indices carry an [AlgorithmVersion](builders::AlgorithmVersion). Any change to
//!     the classification rules must bump the matching constant so persisted indices
//!     get recomputed instead of reused.

pub mod attribute;
pub mod builders;
pub mod classifier;
pub mod context;
pub mod error;
pub mod session;
pub mod tables;
pub mod testing;
pub mod todo;
pub mod token;
pub mod words;

pub use attribute::{AttributeInfo, AttributeType};
pub use builders::{
    AlgorithmVersion, OccurrenceIndex, TodoIndex, OCCURRENCE_INDEX_VERSION, TODO_INDEX_VERSION,
};
pub use classifier::{ClassificationAction, TokenClassifier};
pub use context::ContextCategory;
pub use error::IndexError;
pub use session::{
    CommentOracle, IndexedDocument, Indexer, IndexingSession, NeverInComment, SessionState,
};
pub use tables::{ClassificationTables, TEMPLATE_TABLES};
pub use todo::{TodoPattern, TodoScanner};
pub use token::{Language, Token, TokenKind, TokenSet};
pub use words::{WordScanner, Words};
