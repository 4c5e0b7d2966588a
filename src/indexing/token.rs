//! Token types consumed by the indexing core
//!
//!     Tokens are produced by a lexer outside of this crate's core (see
//!     [lexer](crate::lexer) for the reference one). The core never looks inside a
//!     [TokenKind] beyond two questions: is it a member of one of the static
//!     [TokenSet]s, and which [Language] does it belong to.
//!
//! Token Layers
//!
//!     Host Tokens:
//!         Markup structure and text: tags, attributes, text runs, comments and the
//!         interpolation delimiters that switch into the expression language.
//!
//!     Expression Tokens:
//!         Produced inside interpolations and binding attribute values. Only token
//!         boundaries matter here, the expression grammar is never parsed.
//!
//!     Embedded Tokens:
//!         Chunks of other languages (script and style bodies) that the classifier does
//!         not understand. Whether they sit inside a comment is answered by the host
//!         through a [CommentOracle](super::session::CommentOracle).

use super::error::IndexError;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Languages a token can originate from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    Html,
    Expression,
    JavaScript,
    Css,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Html => "html",
            Language::Expression => "expression",
            Language::JavaScript => "javascript",
            Language::Css => "css",
        };
        f.write_str(name)
    }
}

/// All token kinds the indexing core can be fed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Markup structure
    TagStart,
    EndTagStart,
    TagEnd,
    EmptyTagEnd,
    TagName,
    Doctype,

    // Attributes
    AttributeName,
    AttributeEquals,
    AttributeValueStart,
    AttributeValue,
    AttributeValueEnd,

    // Content
    Text,
    EntityRef,
    Whitespace,
    CommentStart,
    CommentBody,
    CommentEnd,
    InterpolationStart,
    InterpolationEnd,

    // Expression language
    ExprIdentifier,
    ExprKeyword,
    ExprString,
    ExprNumber,
    ExprOperator,
    ExprPunctuation,
    ExprWhitespace,

    /// A chunk of a language the classifier does not understand
    Embedded(Language),
}

impl TokenKind {
    /// The language this kind of token originates from
    pub fn language(&self) -> Language {
        match self {
            TokenKind::ExprIdentifier
            | TokenKind::ExprKeyword
            | TokenKind::ExprString
            | TokenKind::ExprNumber
            | TokenKind::ExprOperator
            | TokenKind::ExprPunctuation
            | TokenKind::ExprWhitespace => Language::Expression,
            TokenKind::Embedded(language) => *language,
            _ => Language::Html,
        }
    }
}

/// A static set of token kinds
///
/// Sets are built at compile time from a slice, so the classification tables can live
/// in immutable statics and be shared between threads without synchronization.
#[derive(Debug, Clone, Copy)]
pub struct TokenSet {
    kinds: &'static [TokenKind],
}

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet { kinds: &[] };

    pub const fn new(kinds: &'static [TokenKind]) -> Self {
        Self { kinds }
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn kinds(&self) -> &'static [TokenKind] {
        self.kinds
    }
}

/// One lexical token: kind, text and byte range in the source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub range: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, range: Range<usize>) -> Self {
        Self {
            kind,
            text: text.into(),
            range,
        }
    }

    /// Build a token whose range starts at `start` and spans the whole text
    pub fn at(kind: TokenKind, text: impl Into<String>, start: usize) -> Self {
        let text = text.into();
        let end = start + text.len();
        Self::new(kind, text, start..end)
    }

    /// Check that the declared range agrees with the token text
    pub fn validate(&self) -> Result<(), IndexError> {
        let declared_len = self.range.end.checked_sub(self.range.start);
        if declared_len != Some(self.text.len()) {
            return Err(IndexError::MalformedToken {
                kind: self.kind,
                range: self.range.clone(),
                declared_len: declared_len.unwrap_or(0),
                actual_len: self.text.len(),
            });
        }
        Ok(())
    }
}
