//! Command-line interface for template-index
//! Lexes templates with the reference lexer and prints their occurrence and TODO indices.
//!
//! Usage:
//!   tmpl-index index `<path>` [--format `<format>`] [--config `<file>`]  - Index a template
//!   tmpl-index attribute `<name>`...                                  - Parse attribute names
//!   tmpl-index tokens `<path>`                                        - Dump lexer tokens
//!   tmpl-index formats                                              - List output formats

use clap::{Arg, ArgAction, Command};
use std::path::Path;
use std::str::FromStr;
use template_index::config::IndexerConfig;
use template_index::formats::OutputFormat;
use template_index::indexing::{attribute, Indexer};
use template_index::lexer::lex_template;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("tmpl-index")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Word occurrence and TODO indexing for Angular-style templates")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log indexing progress to stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("index")
                .about("Index a template and print the result")
                .arg(
                    Arg::new("path")
                        .help("Path to the template file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: simple, json or yaml")
                        .value_parser(OutputFormat::from_str)
                        .default_value("simple"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the built-in defaults"),
                ),
        )
        .subcommand(
            Command::new("attribute")
                .about("Show how attribute names are classified")
                .arg(
                    Arg::new("names")
                        .help("Raw attribute names, e.g. '[(ngModel)]'")
                        .required(true)
                        .num_args(1..)
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Dump the tokens produced by the template lexer")
                .arg(
                    Arg::new("path")
                        .help("Path to the template file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("index", index_matches)) => {
            let path = index_matches.get_one::<String>("path").unwrap();
            let format = *index_matches.get_one::<OutputFormat>("format").unwrap();
            let config = index_matches.get_one::<String>("config");
            handle_index_command(path, format, config.map(Path::new));
        }
        Some(("attribute", attribute_matches)) => {
            let names = attribute_matches.get_many::<String>("names").unwrap();
            handle_attribute_command(names.map(String::as_str));
        }
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<String>("path").unwrap();
            handle_tokens_command(path);
        }
        Some(("formats", _)) => {
            handle_formats_command();
        }
        _ => unreachable!(),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

/// Handle the index command
fn handle_index_command(path: &str, format: OutputFormat, config: Option<&Path>) {
    let indexer = IndexerConfig::load(config)
        .and_then(|config| Indexer::from_config(&config))
        .unwrap_or_else(|e| {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        });

    let source = read_source(path);
    let lexed = lex_template(&source);
    let document = indexer.index(&lexed.tokens, &lexed).unwrap_or_else(|e| {
        eprintln!("Indexing error: {}", e);
        std::process::exit(1);
    });

    let output = format.render(&document).unwrap_or_else(|e| {
        eprintln!("Output error: {}", e);
        std::process::exit(1);
    });
    print!("{}", output);
}

/// Handle the attribute command
fn handle_attribute_command<'a>(names: impl Iterator<Item = &'a str>) {
    for name in names {
        let info = attribute::parse(name);
        let range = info.name_range();
        println!(
            "{}\t{}\t{}\t{}..{}",
            name,
            info.attribute_type.as_str(),
            info.semantic_name,
            range.start,
            range.end
        );
    }
}

/// Handle the tokens command
fn handle_tokens_command(path: &str) {
    let source = read_source(path);
    let lexed = lex_template(&source);
    for token in &lexed.tokens {
        let comment = if lexed.comment_ranges.iter().any(|r| *r == token.range) {
            "\tcomment"
        } else {
            ""
        };
        println!(
            "{}..{}\t{:?}\t{:?}{}",
            token.range.start, token.range.end, token.kind, token.text, comment
        );
    }
}

/// Handle the formats command
fn handle_formats_command() {
    println!("Available output formats:\n");
    for format in OutputFormat::ALL {
        println!("  {}", format);
        println!("    {}", format.description());
    }
}
