//! Tree builder and parent-link pass.
//!
//! The grammar matcher hands finished constructs to [`TreeBuilder`], which
//! allocates them in the arena. A node is pushed only once everything it
//! contains already exists, and pushing it links those contents back to it,
//! so no node is ever seen with a half-built subtree or a missing parent.

use liquid_html_lexer::token::{RawAttribute, TagHead, TagName, ValuePiece};
use liquid_html_lexer::whitespace::{self, Whitespace};
use liquid_html_lexer::Span;

use crate::ast::{
    AttributeNode, AttributeQuote, Document, DocumentNode, ElementName, HtmlComment,
    HtmlDoctype, HtmlElement, HtmlRawNode, HtmlVoidElement, LiquidBranch, LiquidDrop,
    LiquidRawTag, LiquidTag, Node, NodeId, NodeKind, Position, TextNode,
};

/// A `{% … %}` split into name, markup and trim markers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TagParts<'s> {
    pub(crate) name: &'s str,
    pub(crate) markup: &'s str,
    pub(crate) whitespace_start: Whitespace,
    pub(crate) whitespace_end: Whitespace,
}

impl<'s> TagParts<'s> {
    pub(crate) fn new(source: &'s str, span: Span) -> Self {
        let markup = whitespace::extract(source, span);
        let (name, rest) = whitespace::split_tag(markup.text);
        Self {
            name,
            markup: rest,
            whitespace_start: markup.whitespace_start,
            whitespace_end: markup.whitespace_end,
        }
    }
}

/// A branch whose children are still being collected.
#[derive(Debug)]
pub(crate) struct OpenBranch {
    name: Option<String>,
    markup: String,
    whitespace_start: Whitespace,
    whitespace_end: Whitespace,
    start: usize,
    pub(crate) children: Vec<NodeId>,
}

impl OpenBranch {
    /// The branch every block starts with, right after its opening tag.
    fn implicit(start: usize) -> Self {
        Self {
            name: None,
            markup: String::new(),
            whitespace_start: Whitespace::Keep,
            whitespace_end: Whitespace::Keep,
            start,
            children: Vec::new(),
        }
    }

    /// A branch introduced by `{% elsif %}`, `{% else %}` or `{% when %}`.
    pub(crate) fn named(tag: &TagParts<'_>, span: Span) -> Self {
        Self {
            name: Some(tag.name.to_string()),
            markup: tag.markup.to_string(),
            whitespace_start: tag.whitespace_start,
            whitespace_end: tag.whitespace_end,
            start: span.start,
            children: Vec::new(),
        }
    }
}

/// A block tag waiting for its end tag.
#[derive(Debug)]
pub(crate) struct OpenBlock {
    pub(crate) name: String,
    markup: String,
    whitespace_start: Whitespace,
    whitespace_end: Whitespace,
    pub(crate) start: usize,
    pub(crate) branches: Vec<NodeId>,
    pub(crate) branch: OpenBranch,
}

impl OpenBlock {
    pub(crate) fn new(tag: &TagParts<'_>, span: Span) -> Self {
        Self {
            name: tag.name.to_string(),
            markup: tag.markup.to_string(),
            whitespace_start: tag.whitespace_start,
            whitespace_end: tag.whitespace_end,
            start: span.start,
            branches: Vec::new(),
            branch: OpenBranch::implicit(span.end),
        }
    }
}

/// Allocates nodes into the document arena.
pub(crate) struct TreeBuilder<'s> {
    source: &'s str,
    nodes: Vec<Node>,
}

impl<'s> TreeBuilder<'s> {
    pub(crate) fn new(source: &'s str) -> Self {
        let root = Node {
            id: NodeId::ROOT,
            kind: NodeKind::Document(DocumentNode::default()),
            position: Position::new(0, source.len()),
            parent: None,
        };
        Self {
            source,
            nodes: vec![root],
        }
    }

    /// Finish the tree with the given top-level nodes.
    pub(crate) fn finish(mut self, children: Vec<NodeId>) -> Document {
        self.nodes[NodeId::ROOT.index()].kind = NodeKind::Document(DocumentNode { children });
        self.link(NodeId::ROOT);
        Document::new(self.source.to_string(), self.nodes)
    }

    /// Allocate a finished node and link its contents back to it.
    fn push(&mut self, kind: NodeKind, position: Position) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            id,
            kind,
            position,
            parent: None,
        });
        self.link(id);
        id
    }

    /// Parent-link pass for one finalized container.
    fn link(&mut self, parent: NodeId) {
        let contents: Vec<NodeId> = self.nodes[parent.index()].contents().collect();
        for child in contents {
            let node = &mut self.nodes[child.index()];
            debug_assert!(
                node.parent.is_none(),
                "{} at {:?} linked twice",
                node.type_name(),
                node.position
            );
            node.parent = Some(parent);
        }
    }

    // --- Leaves ---

    /// A text run, trimmed of surrounding whitespace. Blank runs yield nothing.
    pub(crate) fn text(&mut self, span: Span) -> Option<NodeId> {
        let raw = span.slice(self.source);
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }
        let start = span.start + (raw.len() - raw.trim_start().len());
        let position = Position::new(start, start + value.len());
        Some(self.push(
            NodeKind::TextNode(TextNode {
                value: value.to_string(),
            }),
            position,
        ))
    }

    pub(crate) fn drop(&mut self, span: Span) -> NodeId {
        let markup = whitespace::extract(self.source, span);
        self.push(
            NodeKind::LiquidDrop(LiquidDrop {
                markup: markup.text.to_string(),
                whitespace_start: markup.whitespace_start,
                whitespace_end: markup.whitespace_end,
            }),
            span.into(),
        )
    }

    pub(crate) fn comment(&mut self, span: Span, body: Span) -> NodeId {
        self.push(
            NodeKind::HtmlComment(HtmlComment {
                body: body.slice(self.source).to_string(),
            }),
            span.into(),
        )
    }

    pub(crate) fn doctype(&mut self, span: Span, value: Span) -> NodeId {
        self.push(
            NodeKind::HtmlDoctype(HtmlDoctype {
                legacy_doctype_string: value.slice(self.source).to_string(),
            }),
            span.into(),
        )
    }

    pub(crate) fn inline_tag(&mut self, tag: &TagParts<'_>, span: Span) -> NodeId {
        self.push(
            NodeKind::LiquidTag(LiquidTag {
                name: tag.name.to_string(),
                markup: tag.markup.to_string(),
                children: None,
                whitespace_start: tag.whitespace_start,
                whitespace_end: tag.whitespace_end,
                delimiter_whitespace_start: Whitespace::Keep,
                delimiter_whitespace_end: Whitespace::Keep,
            }),
            span.into(),
        )
    }

    pub(crate) fn raw_tag(&mut self, open: Span, body: Span, close: Span) -> NodeId {
        let open_tag = TagParts::new(self.source, open);
        let close_tag = TagParts::new(self.source, close);
        self.push(
            NodeKind::LiquidRawTag(LiquidRawTag {
                name: open_tag.name.to_string(),
                markup: open_tag.markup.to_string(),
                body: body.slice(self.source).to_string(),
                whitespace_start: open_tag.whitespace_start,
                whitespace_end: open_tag.whitespace_end,
                delimiter_whitespace_start: close_tag.whitespace_start,
                delimiter_whitespace_end: close_tag.whitespace_end,
            }),
            Position::new(open.start, close.end),
        )
    }

    // --- HTML ---

    pub(crate) fn element_name(&mut self, name: TagName) -> ElementName {
        match name {
            TagName::Static(span) => ElementName::Static(span.slice(self.source).to_string()),
            TagName::Dynamic(span) => ElementName::Dynamic(self.drop(span)),
        }
    }

    /// Build attribute nodes, each owning its value sequence.
    pub(crate) fn attributes(&mut self, attributes: &[RawAttribute]) -> Vec<NodeId> {
        attributes
            .iter()
            .map(|attribute| self.attribute(attribute))
            .collect()
    }

    fn attribute(&mut self, attribute: &RawAttribute) -> NodeId {
        let source = self.source;
        let (value, quote) = match &attribute.value {
            Some(value) => {
                let pieces = value
                    .pieces
                    .iter()
                    .map(|piece| match *piece {
                        ValuePiece::Text(span) => self.push(
                            NodeKind::TextNode(TextNode {
                                value: span.slice(source).to_string(),
                            }),
                            span.into(),
                        ),
                        ValuePiece::Drop(span) => self.drop(span),
                    })
                    .collect();
                let quote = match value.quote {
                    Some('\'') => AttributeQuote::Single,
                    Some(_) => AttributeQuote::Double,
                    None => AttributeQuote::None,
                };
                (pieces, quote)
            }
            None => (Vec::new(), AttributeQuote::None),
        };

        self.push(
            NodeKind::AttributeNode(AttributeNode {
                name: attribute.name.slice(self.source).to_string(),
                value,
                quote,
                has_equals: attribute.value.is_some(),
            }),
            attribute.span.into(),
        )
    }

    /// A void or self-closing element, complete in its head.
    pub(crate) fn void_element(&mut self, head: &TagHead, self_closing: bool) -> NodeId {
        let element = HtmlVoidElement {
            name: self.element_name(head.name),
            attributes: self.attributes(&head.attributes),
        };
        let kind = if self_closing {
            NodeKind::HtmlSelfClosingElement(element)
        } else {
            NodeKind::HtmlVoidElement(element)
        };
        self.push(kind, head.span.into())
    }

    pub(crate) fn raw_element(&mut self, head: &TagHead, body: Span, span: Span) -> NodeId {
        let name = head.name.span().slice(self.source).to_string();
        let attributes = self.attributes(&head.attributes);
        self.push(
            NodeKind::HtmlRawNode(HtmlRawNode {
                name,
                body: body.slice(self.source).to_string(),
                attributes,
            }),
            span.into(),
        )
    }

    pub(crate) fn element(
        &mut self,
        name: ElementName,
        attributes: Vec<NodeId>,
        children: Vec<NodeId>,
        position: Position,
    ) -> NodeId {
        self.push(
            NodeKind::HtmlElement(HtmlElement {
                name,
                attributes,
                children,
            }),
            position,
        )
    }

    // --- Liquid blocks ---

    /// Close a branch at `end`, the start of whatever tag follows it.
    pub(crate) fn branch(&mut self, branch: OpenBranch, end: usize) -> NodeId {
        self.push(
            NodeKind::LiquidBranch(LiquidBranch {
                name: branch.name,
                markup: branch.markup,
                children: branch.children,
                whitespace_start: branch.whitespace_start,
                whitespace_end: branch.whitespace_end,
            }),
            Position::new(branch.start, end),
        )
    }

    /// Close a block with its `{% end… %}` tag.
    pub(crate) fn block_tag(
        &mut self,
        block: OpenBlock,
        end: &TagParts<'_>,
        span: Span,
    ) -> NodeId {
        let OpenBlock {
            name,
            markup,
            whitespace_start,
            whitespace_end,
            start,
            mut branches,
            branch,
        } = block;
        branches.push(self.branch(branch, span.start));

        self.push(
            NodeKind::LiquidTag(LiquidTag {
                name,
                markup,
                children: Some(branches),
                whitespace_start,
                whitespace_end,
                delimiter_whitespace_start: end.whitespace_start,
                delimiter_whitespace_end: end.whitespace_end,
            }),
            Position::new(start, span.end),
        )
    }
}
