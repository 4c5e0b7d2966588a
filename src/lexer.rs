//! Reference template lexer
//!
//!     Produces the token stream the indexer consumes, for Angular-style templates:
//!     HTML markup with `{{ }}` interpolations, binding attributes and embedded
//!     `<script>` / `<style>` bodies.
//!
//!     The indexing core does not depend on this module. Any host lexer that emits
//!     [Token]s and answers [CommentOracle] questions works the same way.
//!
//! Layout
//!
//!     - [template]: hand-written mode machine for the host markup
//!     - [expression]: logos lexer for the expression sub-language
//!
//! Embedded languages
//!
//!     Script and style bodies are not tokenised beyond splitting out their comments.
//!     The chunks come out as [TokenKind::Embedded](crate::indexing::TokenKind::Embedded)
//!     tokens and the comment chunks are recorded in
//!     [LexedTemplate::comment_ranges], which is what the indexer's comment oracle
//!     consults.

pub mod expression;
mod template;

use crate::indexing::{CommentOracle, Token};
use std::ops::Range;

/// Tokens of one template plus the byte ranges of embedded-language comments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexedTemplate {
    pub tokens: Vec<Token>,
    pub comment_ranges: Vec<Range<usize>>,
}

impl CommentOracle for LexedTemplate {
    fn is_inside_comment(&self, token: &Token) -> bool {
        self.comment_ranges
            .iter()
            .any(|range| range.start <= token.range.start && token.range.end <= range.end)
    }
}

/// Tokenize a template; never fails
pub fn lex_template(source: &str) -> LexedTemplate {
    let lexed = template::TemplateLexer::new(source).run();
    tracing::debug!(
        bytes = source.len(),
        tokens = lexed.tokens.len(),
        embedded_comments = lexed.comment_ranges.len(),
        "lexed template"
    );
    lexed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexing::{Language, TokenKind};

    fn kinds(source: &str) -> Vec<(TokenKind, &str)> {
        lex_template(source)
            .tokens
            .iter()
            .map(|t| (t.kind, &source[t.range.clone()]))
            .collect()
    }

    #[test]
    fn test_text_and_interpolation() {
        assert_eq!(
            kinds("Hi {{name}}!"),
            vec![
                (TokenKind::Text, "Hi "),
                (TokenKind::InterpolationStart, "{{"),
                (TokenKind::ExprIdentifier, "name"),
                (TokenKind::InterpolationEnd, "}}"),
                (TokenKind::Text, "!"),
            ]
        );
    }

    #[test]
    fn test_element_with_attributes() {
        assert_eq!(
            kinds(r#"<input disabled [value]="x" class=big/>"#),
            vec![
                (TokenKind::TagStart, "<"),
                (TokenKind::TagName, "input"),
                (TokenKind::Whitespace, " "),
                (TokenKind::AttributeName, "disabled"),
                (TokenKind::Whitespace, " "),
                (TokenKind::AttributeName, "[value]"),
                (TokenKind::AttributeEquals, "="),
                (TokenKind::AttributeValueStart, "\""),
                (TokenKind::ExprIdentifier, "x"),
                (TokenKind::AttributeValueEnd, "\""),
                (TokenKind::Whitespace, " "),
                (TokenKind::AttributeName, "class"),
                (TokenKind::AttributeEquals, "="),
                (TokenKind::AttributeValue, "big/"),
                (TokenKind::TagEnd, ">"),
            ]
        );
    }

    #[test]
    fn test_end_tag_and_entities() {
        assert_eq!(
            kinds("<b>a &amp; b</b>"),
            vec![
                (TokenKind::TagStart, "<"),
                (TokenKind::TagName, "b"),
                (TokenKind::TagEnd, ">"),
                (TokenKind::Text, "a "),
                (TokenKind::EntityRef, "&amp;"),
                (TokenKind::Text, " b"),
                (TokenKind::EndTagStart, "</"),
                (TokenKind::TagName, "b"),
                (TokenKind::TagEnd, ">"),
            ]
        );
    }

    #[test]
    fn test_comments_and_doctype() {
        assert_eq!(
            kinds("<!DOCTYPE html><!-- TODO x -->"),
            vec![
                (TokenKind::Doctype, "<!DOCTYPE html>"),
                (TokenKind::CommentStart, "<!--"),
                (TokenKind::CommentBody, " TODO x "),
                (TokenKind::CommentEnd, "-->"),
            ]
        );
    }

    #[test]
    fn test_interpolation_inside_regular_attribute_value() {
        assert_eq!(
            kinds(r#"<a title="Hi {{user}}">"#),
            vec![
                (TokenKind::TagStart, "<"),
                (TokenKind::TagName, "a"),
                (TokenKind::Whitespace, " "),
                (TokenKind::AttributeName, "title"),
                (TokenKind::AttributeEquals, "="),
                (TokenKind::AttributeValueStart, "\""),
                (TokenKind::AttributeValue, "Hi "),
                (TokenKind::InterpolationStart, "{{"),
                (TokenKind::ExprIdentifier, "user"),
                (TokenKind::InterpolationEnd, "}}"),
                (TokenKind::AttributeValueEnd, "\""),
                (TokenKind::TagEnd, ">"),
            ]
        );
    }

    #[test]
    fn test_script_body_is_split_at_comments() {
        let source = "<script>let a = '//x'; // TODO go\n/* b */ c()</script>";
        let lexed = lex_template(source);
        let embedded: Vec<_> = lexed
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Embedded(Language::JavaScript))
            .map(|t| (t.text.as_str(), lexed.is_inside_comment(t)))
            .collect();

        assert_eq!(
            embedded,
            vec![
                ("let a = '//x'; ", false),
                ("// TODO go", true),
                ("/* b */", true),
                (" c()", false),
            ]
        );
    }

    #[test]
    fn test_style_has_no_line_comments() {
        let source = "<STYLE>a { b: url(//x) } /* c */</STYLE>";
        let lexed = lex_template(source);
        let embedded: Vec<_> = lexed
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Embedded(Language::Css))
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(embedded, vec!["a { b: url(//x) } ", "/* c */"]);
        assert_eq!(lexed.comment_ranges.len(), 1);
    }

    #[test]
    fn test_unterminated_constructs_run_to_end() {
        assert_eq!(
            kinds("<!-- open"),
            vec![
                (TokenKind::CommentStart, "<!--"),
                (TokenKind::CommentBody, " open"),
            ]
        );
        assert_eq!(
            kinds("{{ a"),
            vec![
                (TokenKind::InterpolationStart, "{{"),
                (TokenKind::ExprWhitespace, " "),
                (TokenKind::ExprIdentifier, "a"),
            ]
        );
    }

    #[test]
    fn test_stray_delimiters_are_text() {
        assert_eq!(
            kinds("a < b & c"),
            vec![
                (TokenKind::Text, "a "),
                (TokenKind::Text, "< b "),
                (TokenKind::Text, "& c"),
            ]
        );
    }

    #[test]
    fn test_tokens_are_well_formed_and_ordered() {
        let source = "<p *ngIf=\"ok\">größe {{ n }}</p><style>/* ü */</style>";
        let lexed = lex_template(source);
        let mut last_end = 0;
        for token in &lexed.tokens {
            assert!(token.validate().is_ok(), "{:?}", token);
            assert!(token.range.start >= last_end, "{:?}", token);
            last_end = token.range.end;
        }
    }
}
