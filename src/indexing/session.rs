//! Indexing sessions
//!
//!     An [IndexingSession] runs one pass over one document's token stream:
//!
//!         Ready --run--> Scanning --> Finished
//!                            |
//!                            +--malformed token--> Aborted
//!
//!     Results are only reachable in `Finished`. A pass that hits a malformed token drops
//!     everything accumulated so far: a partial index persisted for a document would never
//!     be overwritten on retry. Sessions are single use; indexing a document again takes a
//!     new session.
//!
//!     The [Indexer] holds the immutable settings shared by all sessions (tables, word
//!     scanner, TODO patterns). It is `Send + Sync`, so one indexer can serve sessions on
//!     many threads at once; sessions themselves share no mutable state.

use super::builders::{OccurrenceIndex, OccurrenceIndexBuilder, TodoIndex, TodoIndexBuilder};
use super::classifier::{ClassificationAction, TokenClassifier};
use super::context::ContextCategory;
use super::error::IndexError;
use super::tables::{ClassificationTables, TEMPLATE_TABLES};
use super::todo::TodoScanner;
use super::token::Token;
use super::words::WordScanner;
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

/// Answers whether a token of an unsupported language sits inside a comment
///
/// Supplied by the host lexer, which is the only party that knows the embedded
/// language's comment syntax.
pub trait CommentOracle {
    fn is_inside_comment(&self, token: &Token) -> bool;
}

impl<F> CommentOracle for F
where
    F: Fn(&Token) -> bool,
{
    fn is_inside_comment(&self, token: &Token) -> bool {
        self(token)
    }
}

/// Oracle for hosts without embedded languages
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverInComment;

impl CommentOracle for NeverInComment {
    fn is_inside_comment(&self, _token: &Token) -> bool {
        false
    }
}

/// Both finished indices of one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedDocument {
    pub occurrences: OccurrenceIndex,
    pub todos: TodoIndex,
}

/// Shared, immutable indexing settings
#[derive(Debug, Clone)]
pub struct Indexer {
    tables: &'static ClassificationTables,
    words: WordScanner,
    todo: TodoScanner,
}

impl Indexer {
    /// An indexer over the template tables
    pub fn new(words: WordScanner, todo: TodoScanner) -> Self {
        Self::with_tables(&TEMPLATE_TABLES, words, todo)
    }

    pub fn with_tables(
        tables: &'static ClassificationTables,
        words: WordScanner,
        todo: TodoScanner,
    ) -> Self {
        Self {
            tables,
            words,
            todo,
        }
    }

    pub fn word_scanner(&self) -> &WordScanner {
        &self.words
    }

    pub fn todo_scanner(&self) -> &TodoScanner {
        &self.todo
    }

    /// Start a fresh session for one document
    pub fn session<'a>(&'a self, oracle: &'a dyn CommentOracle) -> IndexingSession<'a> {
        IndexingSession {
            indexer: self,
            oracle,
            state: SessionState::Ready,
            output: None,
        }
    }

    /// Index one document in a single call
    pub fn index<I>(&self, tokens: I, oracle: &dyn CommentOracle) -> Result<IndexedDocument, IndexError>
    where
        I: IntoIterator,
        I::Item: Borrow<Token>,
    {
        let mut session = self.session(oracle);
        session.run(tokens)?;
        session.finish()
    }
}

impl Default for Indexer {
    fn default() -> Self {
        Self::new(WordScanner::default(), TodoScanner::default())
    }
}

/// Observable lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Ready,
    Scanning,
    Finished,
    Aborted,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Ready => "ready",
            SessionState::Scanning => "scanning",
            SessionState::Finished => "finished",
            SessionState::Aborted => "aborted",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One indexing pass over one document
pub struct IndexingSession<'a> {
    indexer: &'a Indexer,
    oracle: &'a dyn CommentOracle,
    state: SessionState,
    output: Option<IndexedDocument>,
}

impl<'a> IndexingSession<'a> {
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Index a complete token stream
    pub fn run<I>(&mut self, tokens: I) -> Result<(), IndexError>
    where
        I: IntoIterator,
        I::Item: Borrow<Token>,
    {
        self.try_run(tokens.into_iter().map(Ok::<_, IndexError>))
    }

    /// Index a token stream whose producer can fail
    ///
    /// A producer error aborts the session exactly like a malformed token and is returned
    /// unchanged.
    pub fn try_run<I, T, E>(&mut self, tokens: I) -> Result<(), E>
    where
        I: IntoIterator<Item = Result<T, E>>,
        T: Borrow<Token>,
        E: From<IndexError>,
    {
        if self.state != SessionState::Ready {
            return Err(self.invalid_state("run").into());
        }
        self.state = SessionState::Scanning;
        tracing::debug!("indexing session started");

        let mut pass = Pass::new(self.indexer, self.oracle);
        for item in tokens {
            let visited = match item {
                Ok(token) => pass.visit(token.borrow()).map_err(E::from),
                Err(err) => Err(err),
            };
            if let Err(err) = visited {
                self.state = SessionState::Aborted;
                tracing::warn!(tokens = pass.visited, "indexing session aborted");
                return Err(err);
            }
        }

        let document = pass.finish();
        tracing::debug!(
            words = document.occurrences.len(),
            todo_patterns = document.todos.len(),
            "indexing session finished"
        );
        self.output = Some(document);
        self.state = SessionState::Finished;
        Ok(())
    }

    pub fn occurrence_index(&self) -> Result<&OccurrenceIndex, IndexError> {
        self.document("read the occurrence index of")
            .map(|document| &document.occurrences)
    }

    pub fn todo_index(&self) -> Result<&TodoIndex, IndexError> {
        self.document("read the todo index of")
            .map(|document| &document.todos)
    }

    /// Hand over both indices
    pub fn finish(self) -> Result<IndexedDocument, IndexError> {
        match self.output {
            Some(document) if self.state == SessionState::Finished => Ok(document),
            _ => Err(IndexError::InvalidState {
                operation: "finish",
                state: self.state.as_str(),
            }),
        }
    }

    fn document(&self, operation: &'static str) -> Result<&IndexedDocument, IndexError> {
        match &self.output {
            Some(document) if self.state == SessionState::Finished => Ok(document),
            _ => Err(self.invalid_state(operation)),
        }
    }

    fn invalid_state(&self, operation: &'static str) -> IndexError {
        IndexError::InvalidState {
            operation,
            state: self.state.as_str(),
        }
    }
}

impl fmt::Debug for IndexingSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexingSession")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Accumulation state of a running session
struct Pass<'a> {
    classifier: TokenClassifier<'static>,
    words: &'a WordScanner,
    todo: &'a TodoScanner,
    oracle: &'a dyn CommentOracle,
    occurrences: OccurrenceIndexBuilder,
    todos: TodoIndexBuilder,
    visited: usize,
}

impl<'a> Pass<'a> {
    fn new(indexer: &'a Indexer, oracle: &'a dyn CommentOracle) -> Self {
        Self {
            classifier: TokenClassifier::new(indexer.tables),
            words: &indexer.words,
            todo: &indexer.todo,
            oracle,
            occurrences: OccurrenceIndexBuilder::new(),
            todos: TodoIndexBuilder::new(),
            visited: 0,
        }
    }

    fn visit(&mut self, token: &Token) -> Result<(), IndexError> {
        token.validate()?;
        self.visited += 1;

        let action = self.classifier.classify(token);
        tracing::trace!(kind = ?token.kind, range = ?token.range, ?action, "classified token");

        match action {
            ClassificationAction::Skip => {}
            ClassificationAction::Identifier => {
                self.occurrences.add(&token.text, ContextCategory::CODE);
            }
            ClassificationAction::TextBlock { quoted } => {
                self.add_words(&token.text, quoted, ContextCategory::TEXT_BLOCK);
            }
            ClassificationAction::Comment => self.add_comment(&token.text),
            ClassificationAction::Literal => {
                self.add_words(&token.text, true, ContextCategory::STRINGS);
            }
            ClassificationAction::AttributeName(info) => {
                if info.is_regular() {
                    self.add_words(&token.text, false, ContextCategory::PLAIN_TEXT);
                } else {
                    self.add_words(&token.text[info.name_range()], false, ContextCategory::CODE);
                }
            }
            ClassificationAction::ForeignFallback => {
                if self.oracle.is_inside_comment(token) {
                    self.add_comment(&token.text);
                } else {
                    self.add_words(&token.text, false, ContextCategory::TEXT_BLOCK);
                }
            }
            ClassificationAction::Default => {
                self.add_words(&token.text, false, ContextCategory::PLAIN_TEXT);
            }
        }
        Ok(())
    }

    fn add_words(&mut self, text: &str, quoted: bool, context: ContextCategory) {
        for (word, _) in self.words.scan(text, quoted) {
            self.occurrences.add(word, context);
        }
    }

    fn add_comment(&mut self, text: &str) {
        self.add_words(text, false, ContextCategory::COMMENTS);
        for (pattern_id, count) in self.todo.scan(text) {
            self.todos.add(pattern_id, count);
        }
    }

    fn finish(self) -> IndexedDocument {
        IndexedDocument {
            occurrences: self.occurrences.build(),
            todos: self.todos.build(),
        }
    }
}
