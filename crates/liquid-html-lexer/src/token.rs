/// A half-open byte range in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} after end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The source text covered by this span.
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }
}

/// The name of an HTML tag: either literal text or a `{{ … }}` drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagName {
    Static(Span),
    /// Span of the whole drop, delimiters included.
    Dynamic(Span),
}

impl TagName {
    pub fn span(&self) -> Span {
        match self {
            TagName::Static(span) | TagName::Dynamic(span) => *span,
        }
    }
}

/// One piece of an attribute value, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePiece {
    Text(Span),
    Drop(Span),
}

/// An attribute value region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
    /// The value including its quotes.
    pub span: Span,
    pub quote: Option<char>,
    pub pieces: Vec<ValuePiece>,
}

/// An attribute as it appears inside a tag head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    pub span: Span,
    pub name: Span,
    /// `None` when the attribute had no `=`.
    pub value: Option<AttributeValue>,
}

/// A fully scanned `<name attr=… >` head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagHead {
    /// From `<` to `>` inclusive.
    pub span: Span,
    pub name: TagName,
    pub attributes: Vec<RawAttribute>,
    pub self_closing: bool,
}

/// The opening delimiter of a construct that never found its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Drop,
    Tag,
    Comment,
}

impl Delimiter {
    pub fn open(self) -> &'static str {
        match self {
            Delimiter::Drop => "{{",
            Delimiter::Tag => "{%",
            Delimiter::Comment => "<!--",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            Delimiter::Drop => "}}",
            Delimiter::Tag => "%}",
            Delimiter::Comment => "-->",
        }
    }
}

/// Input the scanner could not turn into a unit. Reported as the last token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalid {
    Unterminated(Delimiter),
    /// A raw element or raw Liquid block whose end tag never appears.
    UnclosedRaw(String),
    /// An HTML tag head that cannot be read.
    TagHead(&'static str),
}

/// Lexical unit classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Text,
    /// `{{ … }}`
    Drop,
    /// `{% … %}`
    Tag,
    StartTag(TagHead),
    /// `</name>`
    EndTag(TagName),
    /// `<!-- … -->`
    Comment { body: Span },
    /// `<!doctype …>`
    Doctype { value: Span },
    /// `<script>`/`<style>` with its verbatim body and closing tag.
    RawElement { head: TagHead, body: Span, close: Span },
    /// `{% raw %}`-style Liquid block with its verbatim body.
    RawTag { open: Span, body: Span, close: Span },
    Invalid(Invalid),
}

/// A lexical unit produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// HTML5 void elements (self-closing, no children).
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose body is kept verbatim.
pub const RAW_ELEMENTS: &[&str] = &["script", "style"];

/// Liquid tags whose body is kept verbatim until `{% end<name> %}`.
pub const RAW_TAGS: &[&str] = &["raw", "comment", "javascript", "stylesheet", "schema"];

/// Liquid tags that open a block closed by `{% end<name> %}`.
pub const BLOCK_TAGS: &[&str] = &[
    "if", "unless", "case", "for", "tablerow", "capture", "form", "paginate",
];

/// Check if a tag name is an HTML5 void element.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}

pub fn is_raw_element(tag: &str) -> bool {
    RAW_ELEMENTS.iter().any(|raw| raw.eq_ignore_ascii_case(tag))
}

pub fn is_raw_tag(name: &str) -> bool {
    RAW_TAGS.contains(&name)
}

pub fn is_block_tag(name: &str) -> bool {
    BLOCK_TAGS.contains(&name)
}

/// Whether `branch` may split the body of the block tag `block`.
pub fn is_branch_of(block: &str, branch: &str) -> bool {
    matches!(
        (block, branch),
        ("if" | "unless", "elsif" | "else") | ("case", "when" | "else") | ("for" | "tablerow", "else")
    )
}

pub fn is_branch_tag(name: &str) -> bool {
    matches!(name, "elsif" | "else" | "when")
}

/// The block a closing tag like `endif` or `endraw` belongs to.
///
/// A raw block consumes its own end tag while scanning, so `endraw` and
/// friends only reach the parser when nothing opened them.
pub fn end_tag_block(name: &str) -> Option<&str> {
    name.strip_prefix("end")
        .filter(|block| is_block_tag(block) || is_raw_tag(block))
}
