//! Fluent assertion API for indexed documents
//!
//!     assert_index(&doc)
//!         .word("user", ContextCategory::CODE)
//!         .word_includes("title", ContextCategory::PLAIN_TEXT)
//!         .no_word("div")
//!         .todo("TODO", 1);
//!
//!     Failure messages list what the index actually holds, so a failing test shows the
//!     whole picture without a debugger.

use super::context::ContextCategory;
use super::session::IndexedDocument;

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for an indexed document
pub fn assert_index(doc: &IndexedDocument) -> IndexAssertion<'_> {
    IndexAssertion { doc }
}

// ============================================================================
// Index Assertions
// ============================================================================

pub struct IndexAssertion<'a> {
    doc: &'a IndexedDocument,
}

impl<'a> IndexAssertion<'a> {
    /// Assert `word` was indexed with exactly `expected`
    pub fn word(self, word: &str, expected: ContextCategory) -> Self {
        match self.doc.occurrences.get(word) {
            Some(actual) => assert_eq!(
                actual,
                expected,
                "Expected '{}' in {}, found {}",
                word,
                expected.to_flag_string(),
                actual.to_flag_string()
            ),
            None => panic!(
                "Expected '{}' in {}, but it was not indexed: [{}]",
                word,
                expected.to_flag_string(),
                summarize_words(self.doc)
            ),
        }
        self
    }

    /// Assert `word` was indexed with at least the contexts in `expected`
    pub fn word_includes(self, word: &str, expected: ContextCategory) -> Self {
        let actual = self
            .doc
            .occurrences
            .get(word)
            .unwrap_or(ContextCategory::empty());
        assert!(
            actual.contains(expected),
            "Expected '{}' to include {}, found {}: [{}]",
            word,
            expected.to_flag_string(),
            actual.to_flag_string(),
            summarize_words(self.doc)
        );
        self
    }

    pub fn no_word(self, word: &str) -> Self {
        if let Some(actual) = self.doc.occurrences.get(word) {
            panic!(
                "Expected '{}' not to be indexed, found {}",
                word,
                actual.to_flag_string()
            );
        }
        self
    }

    /// Assert the number of distinct words
    pub fn word_count(self, expected: usize) -> Self {
        let actual = self.doc.occurrences.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} words, found {}: [{}]",
            expected,
            actual,
            summarize_words(self.doc)
        );
        self
    }

    /// Assert the count of one TODO pattern; zero means absent
    pub fn todo(self, pattern_id: &str, expected: u32) -> Self {
        let actual = self.doc.todos.count(pattern_id);
        assert_eq!(
            actual,
            expected,
            "Expected {} x {}, found {}: [{}]",
            expected,
            pattern_id,
            actual,
            summarize_todos(self.doc)
        );
        self
    }

    pub fn no_todos(self) -> Self {
        assert!(
            self.doc.todos.is_empty(),
            "Expected no TODO matches, found [{}]",
            summarize_todos(self.doc)
        );
        self
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn summarize_words(doc: &IndexedDocument) -> String {
    doc.occurrences
        .iter()
        .map(|(word, context)| format!("{}={}", word, context.to_flag_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn summarize_todos(doc: &IndexedDocument) -> String {
    doc.todos
        .iter()
        .map(|(id, count)| format!("{}={}", id, count))
        .collect::<Vec<_>>()
        .join(", ")
}
