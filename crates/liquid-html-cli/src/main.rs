use clap::{Parser, Subcommand};
use liquid_html_parser::{Document, ParseError};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "liquid-html")]
#[command(about = "Liquid HTML template parser")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a .liquid file for structural errors
    Check {
        /// Input .liquid file
        path: String,
    },

    /// Print the syntax tree of a .liquid file as JSON
    Ast {
        /// Input .liquid file
        path: String,

        /// Indent the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check { path } => cmd_check(&path),
        Command::Ast { path, pretty } => cmd_ast(&path, pretty),
    }
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn parse_or_exit(path: &str, source: &str) -> Document {
    debug!(path, "parsing");
    match liquid_html_parser::parse(source) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("{}", render_error(path, &e));
            std::process::exit(1);
        }
    }
}

/// `path:line:column: message (Kind)`, the shape editors pick up.
fn render_error(path: &str, error: &ParseError) -> String {
    format!(
        "{path}:{}:{}: {} ({})",
        error.line, error.column, error.message, error.kind
    )
}

fn render_ast(document: &Document, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    }
}

fn cmd_check(path: &str) {
    let source = read_source(path);
    let document = parse_or_exit(path, &source);
    eprintln!("OK: {path} ({} nodes)", document.len());
}

fn cmd_ast(path: &str, pretty: bool) {
    let source = read_source(path);
    let document = parse_or_exit(path, &source);

    match render_ast(&document, pretty) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing {path}: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ast_flags() {
        let cli = Cli::try_parse_from(["liquid-html", "ast", "--pretty", "page.liquid"]).unwrap();
        match cli.command {
            Command::Ast { path, pretty } => {
                assert_eq!(path, "page.liquid");
                assert!(pretty);
            }
            Command::Check { .. } => panic!("Expected the ast command"),
        }
    }

    #[test]
    fn test_render_error() {
        let error = liquid_html_parser::parse("<div>\n  </span>").unwrap_err();
        assert_eq!(
            render_error("page.liquid", &error),
            "page.liquid:2:3: expected </div> but found `</span>` (MismatchedClosingTag)"
        );
    }

    #[test]
    fn test_render_ast() {
        let document = liquid_html_parser::parse("{{ x }}").unwrap();
        let compact = render_ast(&document, false).unwrap();
        assert!(compact.starts_with(r#"{"type":"Document","children":[{"type":"LiquidDrop""#));
        assert!(render_ast(&document, true).unwrap().contains('\n'));
    }

    #[test]
    fn test_render_ast_rejects_deep_nesting() {
        let depth = liquid_html_parser::MAX_SERIALIZE_DEPTH + 1;
        let source = "<b>".repeat(depth) + &"</b>".repeat(depth);
        let document = liquid_html_parser::parse(&source).unwrap();
        assert!(render_ast(&document, false).is_err());
    }
}
