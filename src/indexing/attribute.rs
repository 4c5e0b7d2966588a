//! Attribute name micro-grammar
//!
//!     Template attribute names encode binding and directive semantics through sigils
//!     around the name (`[value]`, `(click)`, `[(ngModel)]`, `*ngFor`, `#ref`) or through
//!     the long-form prefixes (`bind-`, `on-`, `bindon-`, `ref-`, `let-`). Parsing
//!     recovers the kind of attribute and the span of the name inside the decoration so
//!     callers can index the identifier without its sigils.
//!
//! Precedence
//!
//!     First match wins:
//!
//!         [(name)]          TwoWayBinding
//!         [name]            PropertyBinding
//!         (name)            EventBinding
//!         *name             StructuralDirective
//!         #name, ref-name   Reference
//!         let-name          Variable
//!         bindon-name       TwoWayBinding
//!         bind-name         PropertyBinding
//!         on-name           EventBinding
//!         template          TemplateBinding (empty name, bindings live in the value)
//!         anything else     Regular
//!
//!     Bracket sigils must sit at both ends of the string. A leading `data-` is stripped
//!     before matching. An inner name holding whitespace or bracket characters
//!     disqualifies the match and the attribute is regular.
//!
//!     Parsing is total: every string yields an [AttributeInfo]. An empty semantic name
//!     (`[]`, `*`, `#`) is valid and means there is nothing to index.

use serde::Serialize;
use std::ops::Range;

const DATA_PREFIX: &str = "data-";

/// Closed set of attribute kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeType {
    Regular,
    PropertyBinding,
    EventBinding,
    TwoWayBinding,
    StructuralDirective,
    TemplateBinding,
    Reference,
    Variable,
}

impl AttributeType {
    pub const ALL: [AttributeType; 8] = [
        AttributeType::Regular,
        AttributeType::PropertyBinding,
        AttributeType::EventBinding,
        AttributeType::TwoWayBinding,
        AttributeType::StructuralDirective,
        AttributeType::TemplateBinding,
        AttributeType::Reference,
        AttributeType::Variable,
    ];

    /// Spell `name` with this type's canonical sigils
    pub fn wrap(self, name: &str) -> String {
        match self {
            AttributeType::Regular => name.to_string(),
            AttributeType::PropertyBinding => format!("[{name}]"),
            AttributeType::EventBinding => format!("({name})"),
            AttributeType::TwoWayBinding => format!("[({name})]"),
            AttributeType::StructuralDirective => format!("*{name}"),
            AttributeType::TemplateBinding => "template".to_string(),
            AttributeType::Reference => format!("#{name}"),
            AttributeType::Variable => format!("let-{name}"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttributeType::Regular => "REGULAR",
            AttributeType::PropertyBinding => "PROPERTY_BINDING",
            AttributeType::EventBinding => "EVENT_BINDING",
            AttributeType::TwoWayBinding => "TWO_WAY_BINDING",
            AttributeType::StructuralDirective => "STRUCTURAL_DIRECTIVE",
            AttributeType::TemplateBinding => "TEMPLATE_BINDING",
            AttributeType::Reference => "REFERENCE",
            AttributeType::Variable => "VARIABLE",
        }
    }
}

/// Result of parsing one raw attribute name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeInfo {
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    pub semantic_name: String,
    /// Byte offset of `semantic_name` within the raw attribute name
    pub name_offset: usize,
    /// Byte length of `semantic_name`
    pub name_length: usize,
}

impl AttributeInfo {
    fn regular(raw_name: &str) -> Self {
        Self {
            attribute_type: AttributeType::Regular,
            semantic_name: raw_name.to_string(),
            name_offset: 0,
            name_length: raw_name.len(),
        }
    }

    pub fn is_regular(&self) -> bool {
        self.attribute_type == AttributeType::Regular
    }

    /// Span of the semantic name within the raw attribute name
    pub fn name_range(&self) -> Range<usize> {
        self.name_offset..self.name_offset + self.name_length
    }
}

/// Classify a raw attribute name
pub fn parse(raw_name: &str) -> AttributeInfo {
    let (prefix_len, name) = match raw_name.get(..DATA_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(DATA_PREFIX) => {
            (DATA_PREFIX.len(), &raw_name[DATA_PREFIX.len()..])
        }
        _ => (0, raw_name),
    };

    match match_decoration(name) {
        Some((attribute_type, span)) => {
            let semantic_name = name[span.clone()].to_string();
            AttributeInfo {
                attribute_type,
                name_offset: prefix_len + span.start,
                name_length: semantic_name.len(),
                semantic_name,
            }
        }
        None => AttributeInfo::regular(raw_name),
    }
}

/// Find the decoration shape of `name` and the span of the inner name
fn match_decoration(name: &str) -> Option<(AttributeType, Range<usize>)> {
    let len = name.len();

    let candidate = if len >= 4 && name.starts_with("[(") && name.ends_with(")]") {
        (AttributeType::TwoWayBinding, 2..len - 2)
    } else if len >= 2 && name.starts_with('[') && name.ends_with(']') {
        (AttributeType::PropertyBinding, 1..len - 1)
    } else if len >= 2 && name.starts_with('(') && name.ends_with(')') {
        (AttributeType::EventBinding, 1..len - 1)
    } else if name.starts_with('*') {
        (AttributeType::StructuralDirective, 1..len)
    } else if name.starts_with('#') {
        (AttributeType::Reference, 1..len)
    } else if let Some(span) = long_form(name, "ref-") {
        (AttributeType::Reference, span)
    } else if let Some(span) = long_form(name, "let-") {
        (AttributeType::Variable, span)
    } else if let Some(span) = long_form(name, "bindon-") {
        (AttributeType::TwoWayBinding, span)
    } else if let Some(span) = long_form(name, "bind-") {
        (AttributeType::PropertyBinding, span)
    } else if let Some(span) = long_form(name, "on-") {
        (AttributeType::EventBinding, span)
    } else if name == "template" {
        (AttributeType::TemplateBinding, len..len)
    } else {
        return None;
    };

    if is_valid_inner_name(&name[candidate.1.clone()]) {
        Some(candidate)
    } else {
        None
    }
}

fn long_form(name: &str, prefix: &str) -> Option<Range<usize>> {
    name.strip_prefix(prefix)
        .map(|_| prefix.len()..name.len())
}

fn is_valid_inner_name(inner: &str) -> bool {
    !inner
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '[' | ']' | '(' | ')'))
}
