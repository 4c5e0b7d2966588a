//! Search context categories attached to indexed words

use bitflags::bitflags;

bitflags! {
    /// Where a word occurrence was found
    ///
    /// Flags are OR-combined across all occurrences of a word within one document.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
    pub struct ContextCategory: u8 {
        const CODE = 0b0000_0001;
        const COMMENTS = 0b0000_0010;
        const STRINGS = 0b0000_0100;
        const FOREIGN_LANGUAGE = 0b0000_1000;
        const PLAIN_TEXT = 0b0001_0000;
    }
}

impl ContextCategory {
    /// Context of text blocks: plain text that may also belong to another language
    pub const TEXT_BLOCK: ContextCategory =
        ContextCategory::PLAIN_TEXT.union(ContextCategory::FOREIGN_LANGUAGE);

    /// Compact `CODE|PLAIN_TEXT` style rendering used by the simple output format
    pub fn to_flag_string(self) -> String {
        if self.is_empty() {
            return "NONE".to_string();
        }
        self.iter_names()
            .map(|(name, _)| name)
            .collect::<Vec<_>>()
            .join("|")
    }
}
