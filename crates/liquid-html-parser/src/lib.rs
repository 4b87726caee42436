//! Liquid HTML Parser
//!
//! Parses Liquid HTML templates into a concrete syntax tree that keeps exact
//! source positions and whitespace-control markers. HTML elements and Liquid
//! blocks are matched against each other on one stack, so the two grammars
//! must nest properly inside each other.
//!
//! ```
//! use liquid_html_parser::{parse, NodeKind};
//!
//! let document = parse("{{ name }}").unwrap();
//! let drop = &document[document.children()[0]];
//! assert!(matches!(&drop.kind, NodeKind::LiquidDrop(d) if d.markup == " name "));
//! ```

pub mod ast;
mod builder;
pub mod parser;
mod serialize;
pub mod walk;

use std::fmt;

pub use ast::{Document, ElementName, Node, NodeId, NodeKind, Position, Whitespace};
pub use parser::Parser;
pub use serialize::MAX_SERIALIZE_DEPTH;
pub use walk::walk;

/// Parse Liquid HTML source into a document tree.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    Parser::parse(source)
}

/// What went wrong while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ParseErrorKind {
    /// An element or block is still open at the end of input.
    UnexpectedEndOfInput,
    /// A closing tag does not match the innermost open element or block.
    MismatchedClosingTag,
    /// A closing tag with nothing open.
    UnexpectedClosingTag,
    /// `elsif`, `else` or `when` outside of a block that accepts it.
    InvalidBranchPlacement,
    /// `{{`, `{%` or `<!--` without its terminator.
    MalformedDelimiter,
    /// An HTML tag head that cannot be read.
    MalformedHtmlTag,
}

impl ParseErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ParseErrorKind::MismatchedClosingTag => "MismatchedClosingTag",
            ParseErrorKind::UnexpectedClosingTag => "UnexpectedClosingTag",
            ParseErrorKind::InvalidBranchPlacement => "InvalidBranchPlacement",
            ParseErrorKind::MalformedDelimiter => "MalformedDelimiter",
            ParseErrorKind::MalformedHtmlTag => "MalformedHtmlTag",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize)]
#[error("Parse error at line {line}, column {column}: {message} ({kind})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// Byte offset of the offending construct.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(source: &str, kind: ParseErrorKind, offset: usize, message: String) -> Self {
        let (line, column) = liquid_html_lexer::line_column(source, offset);
        Self {
            kind,
            message,
            offset,
            line,
            column,
        }
    }
}
