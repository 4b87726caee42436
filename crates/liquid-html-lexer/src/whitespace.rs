//! Whitespace-control extraction for `{{ … }}` and `{% … %}` delimiters.
//!
//! A `-` directly after the opening delimiter or directly before the closing
//! one asks the renderer to trim surrounding whitespace. The markers are not
//! part of the markup, so they are stripped here and reported as flags.

use crate::token::Span;

/// A whitespace trim marker next to a delimiter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Whitespace {
    #[default]
    Keep,
    /// `-`
    Trim,
}

impl Whitespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Whitespace::Keep => "",
            Whitespace::Trim => "-",
        }
    }

    pub fn is_trim(self) -> bool {
        self == Whitespace::Trim
    }
}

/// The inner text of a delimited construct with its trim markers removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markup<'s> {
    pub whitespace_start: Whitespace,
    pub text: &'s str,
    /// Where `text` lives in the source.
    pub span: Span,
    pub whitespace_end: Whitespace,
}

/// Extract the markup of a `{{ … }}` or `{% … %}` construct.
///
/// `delimited` must cover both two-character delimiters.
pub fn extract(source: &str, delimited: Span) -> Markup<'_> {
    debug_assert!(delimited.len() >= 4, "delimited span too short: {delimited:?}");
    let mut start = delimited.start + 2;
    let mut end = delimited.end - 2;

    let whitespace_start = if source[start..end].starts_with('-') {
        start += 1;
        Whitespace::Trim
    } else {
        Whitespace::Keep
    };
    let whitespace_end = if source[start..end].ends_with('-') {
        end -= 1;
        Whitespace::Trim
    } else {
        Whitespace::Keep
    };

    Markup {
        whitespace_start,
        text: &source[start..end],
        span: Span::new(start, end),
        whitespace_end,
    }
}

/// Split tag markup into its name and the remaining markup.
///
/// ` elsif B ` becomes `("elsif", "B ")`. The name is either `#` (inline
/// comment) or a run of word characters.
pub fn split_tag(markup: &str) -> (&str, &str) {
    let markup = markup.trim_start();
    let name_len = if markup.starts_with('#') {
        1
    } else {
        markup
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(markup.len())
    };
    let (name, rest) = markup.split_at(name_len);
    (name, rest.trim_start())
}
