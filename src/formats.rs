//! Output formats for indexed documents
//!
//! - `simple`: line oriented, meant for people and snapshot tests
//! - `json`, `yaml`: the serde representation of [IndexedDocument]
//!
//! The simple format starts with a header naming both algorithm versions, then lists
//! one `word<TAB>FLAGS` line per word in lexicographic order, then one
//! `todo<TAB>id<TAB>count` line per matched pattern:
//!
//!     # occurrences v3 todos v2
//!     name	CODE
//!     title	FOREIGN_LANGUAGE|PLAIN_TEXT
//!     todo	TODO	1

use crate::indexing::IndexedDocument;
use std::fmt::{self, Write};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unknown format '{name}', expected one of: simple, json, yaml")]
    UnknownFormat { name: String },

    #[error("failed to write simple output: {0}")]
    Simple(#[from] fmt::Error),

    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// The formats an [IndexedDocument] can be rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Simple,
        OutputFormat::Json,
        OutputFormat::Yaml,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OutputFormat::Simple => "One word per line with its contexts, then TODO counts",
            OutputFormat::Json => "Pretty-printed JSON",
            OutputFormat::Yaml => "YAML",
        }
    }

    pub fn render(self, doc: &IndexedDocument) -> Result<String, FormatError> {
        match self {
            OutputFormat::Simple => {
                let mut out = String::new();
                write_simple(&mut out, doc)?;
                Ok(out)
            }
            OutputFormat::Json => Ok(serde_json::to_string_pretty(doc)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(doc)?),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == name)
            .ok_or_else(|| FormatError::UnknownFormat {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn write_simple(out: &mut impl Write, doc: &IndexedDocument) -> fmt::Result {
    writeln!(
        out,
        "# occurrences {} todos {}",
        doc.occurrences.version(),
        doc.todos.version()
    )?;
    for (word, context) in doc.occurrences.iter() {
        writeln!(out, "{}\t{}", word, context.to_flag_string())?;
    }
    for (id, count) in doc.todos.iter() {
        writeln!(out, "todo\t{}\t{}", id, count)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexing::{Indexer, NeverInComment, Token, TokenKind};
    use rstest::rstest;

    fn document() -> IndexedDocument {
        let tokens = vec![
            Token::at(TokenKind::ExprIdentifier, "name", 0),
            Token::at(TokenKind::CommentBody, " todo later ", 4),
        ];
        Indexer::default().index(&tokens, &NeverInComment).unwrap()
    }

    #[test]
    fn test_simple_format() {
        let out = OutputFormat::Simple.render(&document()).unwrap();
        assert_eq!(
            out,
            "# occurrences v3 todos v2\n\
             later\tCOMMENTS\n\
             name\tCODE\n\
             todo\tCOMMENTS\n\
             todo\tTODO\t1\n"
        );
    }

    #[test]
    fn test_simple_format_of_empty_document() {
        let doc = Indexer::default()
            .index(Vec::<Token>::new(), &NeverInComment)
            .unwrap();
        assert_eq!(
            OutputFormat::Simple.render(&doc).unwrap(),
            "# occurrences v3 todos v2\n"
        );
    }

    #[test]
    fn test_json_format() {
        let out = OutputFormat::Json.render(&document()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["occurrences"]["version"], 3);
        assert_eq!(value["todos"]["counts"]["TODO"], 1);
        assert!(value["occurrences"]["entries"]["name"].is_string());
    }

    #[test]
    fn test_yaml_format() {
        let out = OutputFormat::Yaml.render(&document()).unwrap();
        assert!(out.contains("version: 2"));
        assert!(out.contains("TODO: 1"));
    }

    #[rstest]
    #[case("simple", OutputFormat::Simple)]
    #[case("json", OutputFormat::Json)]
    #[case("yaml", OutputFormat::Yaml)]
    fn test_format_names_parse(#[case] name: &str, #[case] format: OutputFormat) {
        assert_eq!(name.parse::<OutputFormat>().unwrap(), format);
        assert_eq!(format.to_string(), name);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, FormatError::UnknownFormat { ref name } if name == "xml"));
        assert_eq!(
            err.to_string(),
            "unknown format 'xml', expected one of: simple, json, yaml"
        );
    }
}
