//! Document parser for Liquid HTML.
//!
//! Consumes scanner units one at a time and matches opening and closing
//! constructs of both grammars on a single explicit stack. Because HTML
//! elements and Liquid blocks share the stack, a closing construct can only
//! ever match the innermost open one: `<a>{% if x %}</a>` and
//! `{% for a in b %}<div>{% endfor %}` are rejected the same way.
//!
//! The stack lives on the heap, so nesting depth is bounded by input size
//! rather than by the native call stack.

use std::fmt;

use liquid_html_lexer::token::{
    end_tag_block, is_block_tag, is_branch_of, is_branch_tag, is_void_element, Invalid, TagHead,
    TagName,
};
use liquid_html_lexer::{whitespace, Scanner, Span, Token, TokenKind};
use tracing::{debug, trace};

use crate::ast::{Document, ElementName, NodeId, Position};
use crate::builder::{OpenBlock, OpenBranch, TagParts, TreeBuilder};
use crate::{ParseError, ParseErrorKind};

/// How an HTML tag name is compared against its closing tag.
#[derive(Debug, Clone, Copy)]
enum NameKey<'s> {
    /// Compared as written.
    Static(&'s str),
    /// Trimmed drop markup, trim markers already stripped.
    Dynamic(&'s str),
}

impl<'s> NameKey<'s> {
    fn new(source: &'s str, name: TagName) -> Self {
        match name {
            TagName::Static(span) => NameKey::Static(span.slice(source)),
            TagName::Dynamic(span) => NameKey::Dynamic(whitespace::extract(source, span).text.trim()),
        }
    }

    fn matches(self, other: NameKey<'_>) -> bool {
        match (self, other) {
            (NameKey::Static(a), NameKey::Static(b)) => a == b,
            (NameKey::Dynamic(a), NameKey::Dynamic(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for NameKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKey::Static(name) => write!(f, "{name}"),
            NameKey::Dynamic(markup) => write!(f, "{{{{ {markup} }}}}"),
        }
    }
}

/// An HTML element waiting for its closing tag.
#[derive(Debug)]
struct OpenElement<'s> {
    name: ElementName,
    key: NameKey<'s>,
    attributes: Vec<NodeId>,
    start: usize,
    children: Vec<NodeId>,
}

/// An entry on the matching stack.
#[derive(Debug)]
enum Frame<'s> {
    Html(OpenElement<'s>),
    Liquid(OpenBlock),
}

impl Frame<'_> {
    fn start(&self) -> usize {
        match self {
            Frame::Html(element) => element.start,
            Frame::Liquid(block) => block.start,
        }
    }

    /// The closing construct this frame is waiting for.
    fn expected_close(&self) -> String {
        match self {
            Frame::Html(element) => format!("</{}>", element.key),
            Frame::Liquid(block) => format!("{{% end{} %}}", block.name),
        }
    }
}

/// Liquid HTML document parser.
///
/// Drives the [`Scanner`] and hands every completed construct to the tree
/// builder. The first structural error aborts the parse.
pub struct Parser<'s> {
    source: &'s str,
    scanner: Scanner<'s>,
    builder: TreeBuilder<'s>,
    stack: Vec<Frame<'s>>,
    children: Vec<NodeId>,
}

impl<'s> Parser<'s> {
    /// Create a new parser for the given source.
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            scanner: Scanner::new(source),
            builder: TreeBuilder::new(source),
            stack: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Parse source code into a document tree.
    pub fn parse(source: &str) -> Result<Document, ParseError> {
        debug!(bytes = source.len(), "parsing document");
        let result = Parser::new(source).parse_document();
        match &result {
            Ok(document) => debug!(nodes = document.len(), "parsed document"),
            Err(error) => debug!(kind = ?error.kind, offset = error.offset, "rejected document"),
        }
        result
    }

    /// Parse a full document.
    pub fn parse_document(mut self) -> Result<Document, ParseError> {
        while let Some(token) = self.scanner.next() {
            self.consume(token)?;
        }

        if let Some(frame) = self.stack.first() {
            return Err(self.error(
                ParseErrorKind::UnexpectedEndOfInput,
                frame.start(),
                format!("expected {} before the end of input", frame.expected_close()),
            ));
        }

        Ok(self.builder.finish(self.children))
    }

    fn consume(&mut self, token: Token) -> Result<(), ParseError> {
        let span = token.span;
        match token.kind {
            TokenKind::Text => {
                if let Some(id) = self.builder.text(span) {
                    self.append(id);
                }
            }
            TokenKind::Drop => {
                let id = self.builder.drop(span);
                self.append(id);
            }
            TokenKind::Tag => self.liquid_tag(span)?,
            TokenKind::StartTag(head) => self.start_tag(&head),
            TokenKind::EndTag(name) => self.end_tag(name, span)?,
            TokenKind::Comment { body } => {
                let id = self.builder.comment(span, body);
                self.append(id);
            }
            TokenKind::Doctype { value } => {
                let id = self.builder.doctype(span, value);
                self.append(id);
            }
            TokenKind::RawElement { head, body, .. } => {
                let id = self.builder.raw_element(&head, body, span);
                self.append(id);
            }
            TokenKind::RawTag { open, body, close } => {
                let id = self.builder.raw_tag(open, body, close);
                self.append(id);
            }
            TokenKind::Invalid(invalid) => return Err(self.invalid(invalid, span)),
        }
        Ok(())
    }

    /// Append a finished node to the innermost open container.
    fn append(&mut self, id: NodeId) {
        match self.stack.last_mut() {
            Some(Frame::Html(element)) => element.children.push(id),
            Some(Frame::Liquid(block)) => block.branch.children.push(id),
            None => self.children.push(id),
        }
    }

    // =========================================================================
    // HTML
    // =========================================================================

    fn start_tag(&mut self, head: &TagHead) {
        let void = match head.name {
            TagName::Static(name) => is_void_element(name.slice(self.source)),
            TagName::Dynamic(_) => false,
        };
        if void || head.self_closing {
            let id = self.builder.void_element(head, !void);
            self.append(id);
            return;
        }

        let key = NameKey::new(self.source, head.name);
        trace!(name = %key, offset = head.span.start, "open element");
        let element = OpenElement {
            name: self.builder.element_name(head.name),
            key,
            attributes: self.builder.attributes(&head.attributes),
            start: head.span.start,
            children: Vec::new(),
        };
        self.stack.push(Frame::Html(element));
    }

    fn end_tag(&mut self, name: TagName, span: Span) -> Result<(), ParseError> {
        let key = NameKey::new(self.source, name);
        match self.stack.pop() {
            None => Err(self.error(
                ParseErrorKind::UnexpectedClosingTag,
                span.start,
                format!("`</{key}>` has no matching opening tag"),
            )),
            Some(Frame::Html(element)) if element.key.matches(key) => {
                trace!(name = %key, offset = span.start, "close element");
                let id = self.builder.element(
                    element.name,
                    element.attributes,
                    element.children,
                    Position::new(element.start, span.end),
                );
                self.append(id);
                Ok(())
            }
            Some(frame) => Err(self.error(
                ParseErrorKind::MismatchedClosingTag,
                span.start,
                format!("expected {} but found `</{key}>`", frame.expected_close()),
            )),
        }
    }

    // =========================================================================
    // Liquid
    // =========================================================================

    fn liquid_tag(&mut self, span: Span) -> Result<(), ParseError> {
        let tag = TagParts::new(self.source, span);

        if is_block_tag(tag.name) {
            trace!(name = tag.name, offset = span.start, "open block");
            self.stack.push(Frame::Liquid(OpenBlock::new(&tag, span)));
            Ok(())
        } else if is_branch_tag(tag.name) {
            self.branch(&tag, span)
        } else if let Some(block) = end_tag_block(tag.name) {
            self.end_block(block, &tag, span)
        } else {
            let id = self.builder.inline_tag(&tag, span);
            self.append(id);
            Ok(())
        }
    }

    /// Close the current branch of the innermost block and start a new one.
    fn branch(&mut self, tag: &TagParts<'_>, span: Span) -> Result<(), ParseError> {
        if let Some(Frame::Liquid(block)) = self.stack.last_mut() {
            if is_branch_of(&block.name, tag.name) {
                trace!(name = tag.name, block = %block.name, offset = span.start, "branch");
                let previous = std::mem::replace(&mut block.branch, OpenBranch::named(tag, span));
                let id = self.builder.branch(previous, span.start);
                block.branches.push(id);
                return Ok(());
            }
        }

        let message = match self.stack.last() {
            Some(Frame::Liquid(block)) => {
                format!("`{}` cannot be used inside `{}`", tag.name, block.name)
            }
            Some(Frame::Html(element)) => {
                format!("`{}` cannot be used directly inside `<{}>`", tag.name, element.key)
            }
            None => format!("`{}` has no enclosing block", tag.name),
        };
        Err(self.error(ParseErrorKind::InvalidBranchPlacement, span.start, message))
    }

    fn end_block(&mut self, name: &str, tag: &TagParts<'_>, span: Span) -> Result<(), ParseError> {
        match self.stack.pop() {
            None => Err(self.error(
                ParseErrorKind::UnexpectedClosingTag,
                span.start,
                format!("`{{% {} %}}` has no matching opening tag", tag.name),
            )),
            Some(Frame::Liquid(block)) if block.name == name => {
                trace!(name, offset = span.start, "close block");
                let id = self.builder.block_tag(block, tag, span);
                self.append(id);
                Ok(())
            }
            Some(frame) => Err(self.error(
                ParseErrorKind::MismatchedClosingTag,
                span.start,
                format!(
                    "expected {} but found `{{% {} %}}`",
                    frame.expected_close(),
                    tag.name
                ),
            )),
        }
    }

    // =========================================================================
    // Errors
    // =========================================================================

    fn invalid(&self, invalid: Invalid, span: Span) -> ParseError {
        match invalid {
            Invalid::Unterminated(delimiter) => self.error(
                ParseErrorKind::MalformedDelimiter,
                span.start,
                format!(
                    "`{}` is not closed by a matching `{}`",
                    delimiter.open(),
                    delimiter.close()
                ),
            ),
            Invalid::UnclosedRaw(name) => self.error(
                ParseErrorKind::UnexpectedEndOfInput,
                span.start,
                format!("`{name}` is never closed"),
            ),
            Invalid::TagHead(reason) => {
                self.error(ParseErrorKind::MalformedHtmlTag, span.start, reason.to_string())
            }
        }
    }

    fn error(&self, kind: ParseErrorKind, offset: usize, message: String) -> ParseError {
        ParseError::new(self.source, kind, offset, message)
    }
}
