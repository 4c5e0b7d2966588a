//! Token classification
//!
//!     Every token maps to exactly one [ClassificationAction]. The decision is a pure
//!     function of the token and the static [tables](super::tables), evaluated in a fixed
//!     order so a kind that sits in several sets is never classified twice:
//!
//!         Skip -> Identifier -> TextBlock -> Comment -> Literal -> AttributeName
//!              -> ForeignFallback -> Default
//!
//!     The last branch matches everything, so classification never fails.

use super::attribute::{self, AttributeInfo};
use super::tables::ClassificationTables;
use super::token::Token;

/// What to do with one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationAction {
    /// Contributes nothing
    Skip,
    /// The whole token text is one code occurrence
    Identifier,
    /// Scan words as plain text of a possibly foreign language
    TextBlock { quoted: bool },
    /// Scan words as comments and look for TODO markers
    Comment,
    /// Scan words as string literal content
    Literal,
    /// An attribute name, already parsed
    AttributeName(AttributeInfo),
    /// A token of a language the tables do not cover; the host decides whether it is
    /// inside a comment
    ForeignFallback,
    /// Scan words as plain text only
    Default,
}

/// Decides a [ClassificationAction] per token from static tables
#[derive(Debug, Clone, Copy)]
pub struct TokenClassifier<'t> {
    tables: &'t ClassificationTables,
}

impl<'t> TokenClassifier<'t> {
    pub fn new(tables: &'t ClassificationTables) -> Self {
        Self { tables }
    }

    pub fn classify(&self, token: &Token) -> ClassificationAction {
        let tables = self.tables;
        let kind = token.kind;

        if tables.skip.contains(kind) {
            ClassificationAction::Skip
        } else if tables.identifiers.contains(kind) {
            ClassificationAction::Identifier
        } else if tables.text_blocks.contains(kind) {
            ClassificationAction::TextBlock {
                quoted: tables.quoted_text_blocks.contains(kind),
            }
        } else if tables.comments.contains(kind) {
            ClassificationAction::Comment
        } else if tables.literals.contains(kind) {
            ClassificationAction::Literal
        } else if tables.attribute_names.contains(kind) {
            ClassificationAction::AttributeName(attribute::parse(&token.text))
        } else if !tables.supports(kind.language()) {
            ClassificationAction::ForeignFallback
        } else {
            ClassificationAction::Default
        }
    }
}
