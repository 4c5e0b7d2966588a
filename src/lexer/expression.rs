//! Expression sub-language tokens
//!
//! Raw tokenization of binding expressions (`{{ user.name | titlecase }}`,
//! `(click)="save($event)"`) with the logos lexer. The lexer is total: characters no
//! rule knows about become single-character punctuation.

use crate::indexing::{Token, TokenKind};
use logos::Logos;

/// Raw expression tokens
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    // Keywords
    #[token("true")]
    #[token("false")]
    #[token("null")]
    #[token("undefined")]
    #[token("this")]
    #[token("typeof")]
    #[token("void")]
    #[token("in")]
    #[token("let")]
    #[token("as")]
    #[token("of")]
    #[token("if")]
    #[token("else")]
    Keyword,

    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*")]
    Identifier,

    // Strings may be cut off by the end of the expression
    #[regex(r#"'([^'\\]|\\.)*'"#)]
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r#"'([^'\\]|\\.)*"#)]
    #[regex(r#""([^"\\]|\\.)*"#)]
    String,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    #[token("===")]
    #[token("!==")]
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("&&")]
    #[token("||")]
    #[token("??")]
    #[token("?.")]
    #[token("!")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("<")]
    #[token(">")]
    #[token("=")]
    #[token("|")]
    #[token("&")]
    #[token("?")]
    Operator,

    #[token(".")]
    #[token(",")]
    #[token(";")]
    #[token(":")]
    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    #[token("{")]
    #[token("}")]
    Punctuation,

    #[regex(r".", priority = 0)]
    Unknown,
}

impl ExprToken {
    pub fn kind(self) -> TokenKind {
        match self {
            ExprToken::Whitespace => TokenKind::ExprWhitespace,
            ExprToken::Keyword => TokenKind::ExprKeyword,
            ExprToken::Identifier => TokenKind::ExprIdentifier,
            ExprToken::String => TokenKind::ExprString,
            ExprToken::Number => TokenKind::ExprNumber,
            ExprToken::Operator => TokenKind::ExprOperator,
            ExprToken::Punctuation | ExprToken::Unknown => TokenKind::ExprPunctuation,
        }
    }
}

/// Tokenize `source`, an expression found at byte offset `base` of the document
pub fn tokenize(source: &str, base: usize) -> Vec<Token> {
    let mut lexer = ExprToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(token) => token.kind(),
            Err(()) => TokenKind::ExprPunctuation,
        };
        if let Some(text) = source.get(span.clone()) {
            tokens.push(Token::new(kind, text, base + span.start..base + span.end));
        }
    }

    tokens
}
