//! Static classification tables
//!
//!     The tables decide which [ClassificationAction](super::classifier::ClassificationAction)
//!     a token kind maps to. They are plain immutable statics: built at compile time,
//!     never reconfigured, and shared by every session on every thread.
//!
//!     Changing any of these sets changes what gets indexed, so it must come with a bump of
//!     [OCCURRENCE_INDEX_VERSION](super::builders::OCCURRENCE_INDEX_VERSION).

use super::token::{Language, TokenKind, TokenSet};

/// Token kind sets consulted by the classifier, in decision order
#[derive(Debug, Clone, Copy)]
pub struct ClassificationTables {
    /// Kinds that contribute nothing
    pub skip: TokenSet,
    /// Kinds whose whole text is one code occurrence
    pub identifiers: TokenSet,
    /// Text-like kinds scanned as plain text of a possibly foreign language
    pub text_blocks: TokenSet,
    /// Subset of `text_blocks` whose text may contain escape sequences
    pub quoted_text_blocks: TokenSet,
    pub comments: TokenSet,
    pub literals: TokenSet,
    pub attribute_names: TokenSet,
    /// Languages the classifier understands; anything else takes the foreign fallback
    pub supported_languages: &'static [Language],
}

impl ClassificationTables {
    pub fn supports(&self, language: Language) -> bool {
        self.supported_languages.contains(&language)
    }
}

/// Tables for Angular-style templates: HTML host with an embedded expression language
pub static TEMPLATE_TABLES: ClassificationTables = ClassificationTables {
    skip: TokenSet::new(&[
        TokenKind::TagStart,
        TokenKind::EndTagStart,
        TokenKind::TagEnd,
        TokenKind::EmptyTagEnd,
        TokenKind::Doctype,
        TokenKind::AttributeEquals,
        TokenKind::AttributeValueStart,
        TokenKind::AttributeValueEnd,
        TokenKind::EntityRef,
        TokenKind::Whitespace,
        TokenKind::CommentStart,
        TokenKind::CommentEnd,
        TokenKind::InterpolationStart,
        TokenKind::InterpolationEnd,
        TokenKind::ExprOperator,
        TokenKind::ExprPunctuation,
        TokenKind::ExprWhitespace,
    ]),
    identifiers: TokenSet::new(&[TokenKind::ExprIdentifier, TokenKind::ExprKeyword]),
    text_blocks: TokenSet::new(&[
        TokenKind::Text,
        TokenKind::TagName,
        TokenKind::AttributeValue,
    ]),
    quoted_text_blocks: TokenSet::new(&[TokenKind::AttributeValue]),
    comments: TokenSet::new(&[TokenKind::CommentBody]),
    literals: TokenSet::new(&[TokenKind::ExprString]),
    attribute_names: TokenSet::new(&[TokenKind::AttributeName]),
    supported_languages: &[Language::Html, Language::Expression],
};
