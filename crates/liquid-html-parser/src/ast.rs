//! Concrete syntax tree for Liquid HTML.
//!
//! Nodes live in a flat arena owned by the [`Document`] and refer to each
//! other by [`NodeId`]. Ownership flows from a container to its children;
//! the `parent` field of every node is a non-owning id pointing back at the
//! container that holds it. Only the root has no parent.

use std::ops::Index;

pub use liquid_html_lexer::Whitespace;

/// Index of a node in its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The document node.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("more than u32::MAX nodes"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Half-open byte range a node covers in the source, delimiters included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Position {
    pub start: usize,
    pub end: usize,
}

impl Position {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<liquid_html_lexer::Span> for Position {
    fn from(span: liquid_html_lexer::Span) -> Self {
        Self::new(span.start, span.end)
    }
}

/// A node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Position,
    pub parent: Option<NodeId>,
}

impl Node {
    /// The ordered children of a container node; empty for leaves.
    ///
    /// For a block [`LiquidTag`] these are its branches.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Document(document) => &document.children,
            NodeKind::HtmlElement(element) => &element.children,
            NodeKind::LiquidTag(tag) => tag.children.as_deref().unwrap_or_default(),
            NodeKind::LiquidBranch(branch) => &branch.children,
            _ => &[],
        }
    }

    /// Attributes of an HTML element node; empty for every other kind.
    pub fn attributes(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::HtmlElement(HtmlElement { attributes, .. })
            | NodeKind::HtmlVoidElement(HtmlVoidElement { attributes, .. })
            | NodeKind::HtmlSelfClosingElement(HtmlVoidElement { attributes, .. })
            | NodeKind::HtmlRawNode(HtmlRawNode { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    /// Every node this one directly contains, in source order: a dynamic
    /// tag name, attributes, attribute values, then children.
    pub fn contents(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        let name = match &self.kind {
            NodeKind::HtmlElement(HtmlElement {
                name: ElementName::Dynamic(id),
                ..
            })
            | NodeKind::HtmlVoidElement(HtmlVoidElement {
                name: ElementName::Dynamic(id),
                ..
            })
            | NodeKind::HtmlSelfClosingElement(HtmlVoidElement {
                name: ElementName::Dynamic(id),
                ..
            }) => Some(*id),
            _ => None,
        };
        let value: &[NodeId] = match &self.kind {
            NodeKind::AttributeNode(attribute) => &attribute.value,
            _ => &[],
        };
        name.into_iter()
            .chain(self.attributes().iter().copied())
            .chain(value.iter().copied())
            .chain(self.children().iter().copied())
    }

    /// The node kind's name, e.g. `"LiquidDrop"`.
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }
}

/// The closed set of node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Document(DocumentNode),
    TextNode(TextNode),
    HtmlComment(HtmlComment),
    HtmlDoctype(HtmlDoctype),
    HtmlRawNode(HtmlRawNode),
    HtmlVoidElement(HtmlVoidElement),
    /// A non-void element written `<name … />`.
    HtmlSelfClosingElement(HtmlVoidElement),
    HtmlElement(HtmlElement),
    AttributeNode(AttributeNode),
    LiquidDrop(LiquidDrop),
    LiquidTag(LiquidTag),
    LiquidRawTag(LiquidRawTag),
    LiquidBranch(LiquidBranch),
}

impl NodeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Document(_) => "Document",
            NodeKind::TextNode(_) => "TextNode",
            NodeKind::HtmlComment(_) => "HtmlComment",
            NodeKind::HtmlDoctype(_) => "HtmlDoctype",
            NodeKind::HtmlRawNode(_) => "HtmlRawNode",
            NodeKind::HtmlVoidElement(_) => "HtmlVoidElement",
            NodeKind::HtmlSelfClosingElement(_) => "HtmlSelfClosingElement",
            NodeKind::HtmlElement(_) => "HtmlElement",
            NodeKind::AttributeNode(_) => "AttributeNode",
            NodeKind::LiquidDrop(_) => "LiquidDrop",
            NodeKind::LiquidTag(_) => "LiquidTag",
            NodeKind::LiquidRawTag(_) => "LiquidRawTag",
            NodeKind::LiquidBranch(_) => "LiquidBranch",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentNode {
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub value: String,
}

/// `<!-- … -->`
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlComment {
    pub body: String,
}

/// `<!doctype html>`
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlDoctype {
    pub legacy_doctype_string: String,
}

/// A `script` or `style` element; its body is never parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlRawNode {
    pub name: String,
    pub body: String,
    pub attributes: Vec<NodeId>,
}

/// An element that cannot have children.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlVoidElement {
    pub name: ElementName,
    pub attributes: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HtmlElement {
    pub name: ElementName,
    pub attributes: Vec<NodeId>,
    pub children: Vec<NodeId>,
}

/// A tag name: literal, or a [`LiquidDrop`] node for `<{{ type }}>`.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementName {
    Static(String),
    Dynamic(NodeId),
}

/// The quoting style of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeQuote {
    None,
    Single,
    Double,
}

/// `name`, `name=value`, `name='…'` or `name="…"`.
///
/// `value` holds [`TextNode`] and [`LiquidDrop`] ids in source order. It is
/// empty both for `disabled` and for `checked=""`; `has_equals` tells them
/// apart.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeNode {
    pub name: String,
    pub value: Vec<NodeId>,
    pub quote: AttributeQuote,
    pub has_equals: bool,
}

/// `{{ markup }}`
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidDrop {
    pub markup: String,
    pub whitespace_start: Whitespace,
    pub whitespace_end: Whitespace,
}

impl LiquidDrop {
    /// Markup used when comparing dynamic tag names.
    pub fn normalized_markup(&self) -> &str {
        self.markup.trim()
    }
}

/// `{% name markup %}`, inline or block.
///
/// A block tag has `children: Some(branches)` with at least one
/// [`LiquidBranch`]; an inline tag has `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidTag {
    pub name: String,
    pub markup: String,
    pub children: Option<Vec<NodeId>>,
    pub whitespace_start: Whitespace,
    pub whitespace_end: Whitespace,
    pub delimiter_whitespace_start: Whitespace,
    pub delimiter_whitespace_end: Whitespace,
}

impl LiquidTag {
    pub fn is_block(&self) -> bool {
        self.children.is_some()
    }
}

/// `{% raw %}…{% endraw %}` and friends; the body is kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidRawTag {
    pub name: String,
    pub markup: String,
    pub body: String,
    pub whitespace_start: Whitespace,
    pub whitespace_end: Whitespace,
    pub delimiter_whitespace_start: Whitespace,
    pub delimiter_whitespace_end: Whitespace,
}

/// A segment of a block tag's body.
///
/// The first branch of every block is implicit (`name: None`); each
/// `elsif`, `else` or `when` starts a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidBranch {
    pub name: Option<String>,
    pub markup: String,
    pub children: Vec<NodeId>,
    pub whitespace_start: Whitespace,
    pub whitespace_end: Whitespace,
}

/// A parsed Liquid HTML document.
///
/// Immutable once built. The root node is [`NodeId::ROOT`].
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    source: String,
    nodes: Vec<Node>,
}

impl Document {
    pub(crate) fn new(source: String, nodes: Vec<Node>) -> Self {
        Self { source, nodes }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Top-level nodes in document order.
    pub fn children(&self) -> &[NodeId] {
        self.root().children()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.get(id)?.parent.map(|parent| &self[parent])
    }

    /// The source text a node covers.
    pub fn slice(&self, id: NodeId) -> &str {
        let position = self[id].position;
        &self.source[position.start..position.end]
    }

    /// All nodes, in allocation order (children before their containers).
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes, root included.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Index<NodeId> for Document {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}
