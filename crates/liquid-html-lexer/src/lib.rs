//! Liquid HTML Lexer
//!
//! Splits Liquid HTML source into lexical units: text runs, Liquid drops
//! (`{{ … }}`) and tags (`{% … %}`), HTML tag heads with their attributes,
//! comments, and raw elements whose bodies are kept verbatim.
//!
//! # Example
//!
//! ```
//! use liquid_html_lexer::{Scanner, TokenKind};
//!
//! let tokens = Scanner::tokenize("<p>{{ name }}</p>");
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1].kind, TokenKind::Drop);
//! ```

pub mod scanner;
pub mod token;
pub mod whitespace;

pub use scanner::Scanner;
pub use token::{Span, Token, TokenKind};
pub use whitespace::Whitespace;

/// 1-based line and column (in characters) of a byte offset.
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_column() {
        let source = "ab\ncdé\nf";
        assert_eq!(line_column(source, 0), (1, 1));
        assert_eq!(line_column(source, 2), (1, 3));
        assert_eq!(line_column(source, 3), (2, 1));
        assert_eq!(line_column(source, 8), (3, 1));
        assert_eq!(line_column(source, 100), (3, 2));
    }
}
