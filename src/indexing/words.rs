//! Word scanning
//!
//!     Splits token text into maximal runs of identifier characters: letters, digits and
//!     the configured connector characters (`_` and `$` by default). Everything else is a
//!     separator. Boundaries come from character classes alone; no grammar is involved,
//!     which matches the full-text-over-identifiers nature of the occurrence index.
//!
//!     Quoted text (attribute values) may hold escape sequences. With `quoted` set, the
//!     escape introducer and the one character after it form a separator pair, so `a\"b`
//!     yields `a` and `b` and `\n` never glues an `n` onto the following word.

/// Splits text into words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordScanner {
    connectors: Vec<char>,
    escape: char,
}

impl WordScanner {
    pub const DEFAULT_CONNECTORS: [char; 2] = ['_', '$'];
    pub const DEFAULT_ESCAPE: char = '\\';

    pub fn new(connectors: Vec<char>, escape: char) -> Self {
        Self { connectors, escape }
    }

    /// Whether `c` can be part of a word
    pub fn is_word_char(&self, c: char) -> bool {
        c.is_alphanumeric() || self.connectors.contains(&c)
    }

    /// Lazily scan `text`, yielding each word with its byte offset into `text`
    pub fn scan<'a>(&'a self, text: &'a str, quoted: bool) -> Words<'a> {
        Words {
            text,
            pos: 0,
            quoted,
            scanner: self,
        }
    }
}

impl Default for WordScanner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CONNECTORS.to_vec(), Self::DEFAULT_ESCAPE)
    }
}

/// Iterator over the words of one text, see [WordScanner::scan]
///
/// Cloning the iterator restarts from the clone point.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    text: &'a str,
    pos: usize,
    quoted: bool,
    scanner: &'a WordScanner,
}

impl<'a> Iterator for Words<'a> {
    type Item = (&'a str, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;
        let base = self.pos;
        let mut chars = text[base..].char_indices().map(|(i, c)| (base + i, c));
        let mut word_start: Option<usize> = None;

        while let Some((at, c)) = chars.next() {
            if self.quoted && c == self.scanner.escape {
                if let Some(start) = word_start {
                    // Resume at the escape so the pair gets skipped on the next call
                    self.pos = at;
                    return Some((&text[start..at], start));
                }
                chars.next();
                continue;
            }

            if self.scanner.is_word_char(c) {
                word_start.get_or_insert(at);
            } else if let Some(start) = word_start {
                self.pos = at + c.len_utf8();
                return Some((&text[start..at], start));
            }
        }

        self.pos = text.len();
        word_start.map(|start| (&text[start..], start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str, quoted: bool) -> Vec<(&str, usize)> {
        let scanner = WordScanner::default();
        scanner
            .scan(text, quoted)
            .map(|(w, o)| (&text[o..o + w.len()], o))
            .collect()
    }

    #[test]
    fn test_splits_on_non_word_characters() {
        assert_eq!(
            words("hello, world!", false),
            vec![("hello", 0), ("world", 7)]
        );
    }

    #[test]
    fn test_connectors_join_words() {
        assert_eq!(
            words("snake_case $implicit", false),
            vec![("snake_case", 0), ("$implicit", 11)]
        );
    }

    #[test]
    fn test_digits_are_word_characters() {
        assert_eq!(words("\"x+1\"", false), vec![("x", 1), ("1", 3)]);
        assert_eq!(words("item42", false), vec![("item42", 0)]);
    }

    #[test]
    fn test_hyphen_and_dot_separate() {
        assert_eq!(
            words("attr.aria-label", false),
            vec![("attr", 0), ("aria", 5), ("label", 10)]
        );
    }

    #[test]
    fn test_empty_and_separator_only_text() {
        assert!(words("", false).is_empty());
        assert!(words("  -- !! ", true).is_empty());
    }

    #[test]
    fn test_unicode_letters() {
        assert_eq!(words("größe ok", false), vec![("größe", 0), ("ok", 8)]);
    }

    #[test]
    fn test_escape_pairs_separate_words_when_quoted() {
        assert_eq!(words(r"a\nb", true), vec![("a", 0), ("b", 3)]);
        assert_eq!(words(r#"say \"hi\""#, true), vec![("say", 0), ("hi", 6)]);
    }

    #[test]
    fn test_escape_is_plain_separator_when_unquoted() {
        assert_eq!(words(r"a\nb", false), vec![("a", 0), ("nb", 2)]);
    }

    #[test]
    fn test_trailing_escape() {
        assert_eq!(words(r"abc\", true), vec![("abc", 0)]);
        assert!(words(r"\", true).is_empty());
    }

    #[test]
    fn test_escaped_multibyte_character() {
        assert_eq!(words("a\\éb", true), vec![("a", 0), ("b", 4)]);
    }

    #[test]
    fn test_iterator_is_restartable() {
        let scanner = WordScanner::default();
        let words = scanner.scan("one two three", false);
        let first: Vec<_> = words.clone().collect();
        let second: Vec<_> = words.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_custom_connectors() {
        let scanner = WordScanner::new(vec!['-'], '\\');
        let found: Vec<_> = scanner.scan("aria-label $x", false).collect();
        assert_eq!(found, vec![("aria-label", 0), ("x", 12)]);
    }
}
