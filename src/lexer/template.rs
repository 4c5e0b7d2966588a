//! Host markup scanning
//!
//! A small mode machine over the template source. It recognises just enough HTML to
//! drive the indexer: text, entity references, comments, declarations, tags with
//! attributes and `{{ }}` interpolations. Binding expressions (interpolations and
//! values of non-regular attributes) are handed to the [expression](super::expression)
//! lexer; `<script>` and `<style>` bodies become embedded chunks.
//!
//! Scanning never fails. Unterminated constructs run to the end of the input, and any
//! character that starts no construct is text. All delimiters are ASCII, so byte
//! positions where scanning stops are always char boundaries.

use super::expression;
use super::LexedTemplate;
use crate::indexing::{attribute, AttributeInfo, Language, Token, TokenKind};
use std::ops::Range;

/// How a tag's attribute list ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagClose {
    Open,
    SelfClosing,
    Unterminated,
}

pub(super) struct TemplateLexer<'s> {
    source: &'s str,
    bytes: &'s [u8],
    pos: usize,
    tokens: Vec<Token>,
    comment_ranges: Vec<Range<usize>>,
}

impl<'s> TemplateLexer<'s> {
    pub(super) fn new(source: &'s str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
            comment_ranges: Vec::new(),
        }
    }

    pub(super) fn run(mut self) -> LexedTemplate {
        while self.pos < self.bytes.len() {
            let rest = &self.source[self.pos..];
            if rest.starts_with("<!--") {
                self.comment();
            } else if rest.starts_with("<!") {
                self.declaration();
            } else if rest.starts_with("</") && self.is_name_start(self.pos + 2) {
                self.end_tag();
            } else if rest.starts_with('<') && self.is_name_start(self.pos + 1) {
                self.start_tag();
            } else if rest.starts_with("{{") {
                self.interpolation(self.bytes.len());
            } else if let Some(len) = entity_len(rest) {
                self.emit(TokenKind::EntityRef, self.pos, self.pos + len);
                self.pos += len;
            } else {
                self.text();
            }
        }

        LexedTemplate {
            tokens: self.tokens,
            comment_ranges: self.comment_ranges,
        }
    }

    fn emit(&mut self, kind: TokenKind, start: usize, end: usize) {
        if start < end {
            self.tokens
                .push(Token::new(kind, &self.source[start..end], start..end));
        }
    }

    fn byte(&self, at: usize) -> Option<u8> {
        self.bytes.get(at).copied()
    }

    fn starts_with_at(&self, at: usize, needle: &[u8]) -> bool {
        self.bytes.get(at..).is_some_and(|rest| rest.starts_with(needle))
    }

    fn is_name_start(&self, at: usize) -> bool {
        self.byte(at).is_some_and(|b| b.is_ascii_alphabetic())
    }

    fn find(&self, from: usize, limit: usize, needle: &str) -> Option<usize> {
        self.source[from..limit].find(needle).map(|i| from + i)
    }

    fn whitespace(&mut self) {
        let start = self.pos;
        while self.byte(self.pos).is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.emit(TokenKind::Whitespace, start, self.pos);
    }

    fn text(&mut self) {
        let start = self.pos;
        // The current character may be a `<` or `&` that starts nothing
        self.pos += self.source[start..].chars().next().map_or(1, char::len_utf8);
        while let Some(b) = self.byte(self.pos) {
            if b == b'<' || b == b'&' || self.starts_with_at(self.pos, b"{{") {
                break;
            }
            self.pos += 1;
        }

        let text = &self.source[start..self.pos];
        let kind = if text.trim().is_empty() {
            TokenKind::Whitespace
        } else {
            TokenKind::Text
        };
        self.emit(kind, start, self.pos);
    }

    fn comment(&mut self) {
        let start = self.pos;
        let body_start = start + "<!--".len();
        self.emit(TokenKind::CommentStart, start, body_start);

        let len = self.bytes.len();
        match self.find(body_start, len, "-->") {
            Some(end) => {
                self.emit(TokenKind::CommentBody, body_start, end);
                self.emit(TokenKind::CommentEnd, end, end + 3);
                self.pos = end + 3;
            }
            None => {
                self.emit(TokenKind::CommentBody, body_start, len);
                self.pos = len;
            }
        }
    }

    fn declaration(&mut self) {
        let start = self.pos;
        let len = self.bytes.len();
        self.pos = self.find(start, len, ">").map_or(len, |end| end + 1);
        self.emit(TokenKind::Doctype, start, self.pos);
    }

    /// `{{ expression }}`, ending at the first `}}` before `limit`
    fn interpolation(&mut self, limit: usize) {
        let start = self.pos;
        let body_start = start + 2;
        self.emit(TokenKind::InterpolationStart, start, body_start);

        match self.find(body_start, limit, "}}") {
            Some(end) => {
                self.expression(body_start, end);
                self.emit(TokenKind::InterpolationEnd, end, end + 2);
                self.pos = end + 2;
            }
            None => {
                self.expression(body_start, limit);
                self.pos = limit;
            }
        }
    }

    fn expression(&mut self, start: usize, end: usize) {
        self.tokens
            .extend(expression::tokenize(&self.source[start..end], start));
    }

    fn start_tag(&mut self) {
        self.emit(TokenKind::TagStart, self.pos, self.pos + 1);
        self.pos += 1;
        let name = self.tag_name();

        if self.tag_body() == TagClose::Open {
            if name.eq_ignore_ascii_case("script") {
                self.raw_text("script", Language::JavaScript);
            } else if name.eq_ignore_ascii_case("style") {
                self.raw_text("style", Language::Css);
            }
        }
    }

    fn end_tag(&mut self) {
        self.emit(TokenKind::EndTagStart, self.pos, self.pos + 2);
        self.pos += 2;
        self.tag_name();
        self.tag_body();
    }

    fn tag_name(&mut self) -> &'s str {
        let start = self.pos;
        while let Some(b) = self.byte(self.pos) {
            if b.is_ascii_whitespace() || b == b'/' || b == b'>' {
                break;
            }
            self.pos += 1;
        }
        self.emit(TokenKind::TagName, start, self.pos);
        let source = self.source;
        &source[start..self.pos]
    }

    fn tag_body(&mut self) -> TagClose {
        loop {
            self.whitespace();
            let rest = &self.source[self.pos..];
            if rest.is_empty() {
                return TagClose::Unterminated;
            } else if rest.starts_with("/>") {
                self.emit(TokenKind::EmptyTagEnd, self.pos, self.pos + 2);
                self.pos += 2;
                return TagClose::SelfClosing;
            } else if rest.starts_with('>') {
                self.emit(TokenKind::TagEnd, self.pos, self.pos + 1);
                self.pos += 1;
                return TagClose::Open;
            } else if rest.starts_with('/') {
                self.pos += 1;
            } else {
                self.attribute();
            }
        }
    }

    fn attribute(&mut self) {
        let start = self.pos;
        while let Some(b) = self.byte(self.pos) {
            let at_end = b.is_ascii_whitespace()
                || b == b'='
                || b == b'>'
                || self.starts_with_at(self.pos, b"/>");
            // A stray `=` still makes progress as a one-character name
            if at_end && self.pos > start {
                break;
            }
            self.pos += 1;
        }
        self.emit(TokenKind::AttributeName, start, self.pos);
        let info = attribute::parse(&self.source[start..self.pos]);

        let mut equals = self.pos;
        while self.byte(equals).is_some_and(|b| b.is_ascii_whitespace()) {
            equals += 1;
        }
        if self.byte(equals) != Some(b'=') {
            return;
        }
        self.emit(TokenKind::Whitespace, self.pos, equals);
        self.emit(TokenKind::AttributeEquals, equals, equals + 1);
        self.pos = equals + 1;
        self.whitespace();
        self.attribute_value(&info);
    }

    fn attribute_value(&mut self, info: &AttributeInfo) {
        match self.byte(self.pos) {
            Some(quote @ (b'"' | b'\'')) => {
                let open = self.pos;
                self.emit(TokenKind::AttributeValueStart, open, open + 1);
                let len = self.bytes.len();
                let close = self.bytes[open + 1..]
                    .iter()
                    .position(|&b| b == quote)
                    .map(|i| open + 1 + i);
                let end = close.unwrap_or(len);
                self.value_content(open + 1, end, info);
                if let Some(close) = close {
                    self.emit(TokenKind::AttributeValueEnd, close, close + 1);
                    self.pos = close + 1;
                } else {
                    self.pos = len;
                }
            }
            Some(b'>') | None => {}
            Some(_) => {
                let start = self.pos;
                while let Some(b) = self.byte(self.pos) {
                    if b.is_ascii_whitespace() || b == b'>' {
                        break;
                    }
                    self.pos += 1;
                }
                self.value_content(start, self.pos, info);
            }
        }
    }

    /// Bindings hold one expression; regular values are text with optional interpolations
    fn value_content(&mut self, start: usize, end: usize, info: &AttributeInfo) {
        if !info.is_regular() {
            self.expression(start, end);
            return;
        }

        let resume = self.pos;
        let mut at = start;
        while let Some(open) = self.find(at, end, "{{") {
            self.emit(TokenKind::AttributeValue, at, open);
            self.pos = open;
            self.interpolation(end);
            at = self.pos;
        }
        self.emit(TokenKind::AttributeValue, at, end);
        self.pos = resume;
    }

    /// Body of `<script>` or `<style>`, up to the matching end tag
    fn raw_text(&mut self, tag: &str, language: Language) {
        let start = self.pos;
        let closing = format!("</{}", tag);
        let end = self.source[start..]
            .to_ascii_lowercase()
            .find(&closing)
            .map_or(self.bytes.len(), |i| start + i);
        self.embedded(language, start, end);
        self.pos = end;
    }

    /// Split embedded code into chunks, recording its comments
    fn embedded(&mut self, language: Language, start: usize, end: usize) {
        let kind = TokenKind::Embedded(language);
        let line_comments = language == Language::JavaScript;
        let mut chunk = start;
        let mut at = start;

        while at < end {
            let b = self.bytes[at];
            let next = self.bytes.get(at + 1).copied();
            if b == b'/' && next == Some(b'*') {
                let close = self.find(at + 2, end, "*/").map_or(end, |i| i + 2);
                at = self.embedded_comment(kind, chunk, at, close);
                chunk = at;
            } else if b == b'/' && next == Some(b'/') && line_comments {
                let close = self.find(at, end, "\n").unwrap_or(end);
                at = self.embedded_comment(kind, chunk, at, close);
                chunk = at;
            } else if b == b'"' || b == b'\'' || (b == b'`' && line_comments) {
                at = skip_string(self.bytes, at, end);
            } else {
                at += 1;
            }
        }
        self.embedded_code(kind, chunk, end);
    }

    fn embedded_comment(
        &mut self,
        kind: TokenKind,
        chunk: usize,
        start: usize,
        end: usize,
    ) -> usize {
        self.embedded_code(kind, chunk, start);
        self.emit(kind, start, end);
        self.comment_ranges.push(start..end);
        end
    }

    fn embedded_code(&mut self, kind: TokenKind, start: usize, end: usize) {
        if !self.source[start..end].trim().is_empty() {
            self.emit(kind, start, end);
        }
    }
}

/// Length of an entity reference (`&amp;`, `&#38;`) at the start of `rest`
fn entity_len(rest: &str) -> Option<usize> {
    let body = rest.strip_prefix('&')?;
    let digits = body.strip_prefix('#').unwrap_or(body);
    let prefix = body.len() - digits.len();
    let name_len = digits
        .bytes()
        .take(32)
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    if name_len == 0 || digits.as_bytes().get(name_len) != Some(&b';') {
        return None;
    }
    Some(1 + prefix + name_len + 1)
}

/// Position just past the string literal opening at `start`
fn skip_string(bytes: &[u8], start: usize, end: usize) -> usize {
    let quote = bytes[start];
    let mut at = start + 1;
    while at < end {
        match bytes[at] {
            b'\\' => at += 2,
            b if b == quote => return at + 1,
            _ => at += 1,
        }
    }
    end
}
