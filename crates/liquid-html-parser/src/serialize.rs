//! JSON-shaped view of the tree.
//!
//! Nodes serialize as nested maps with a `type` discriminant and camelCase
//! fields. Parent references are left out; they are implied by nesting.
//!
//! Nested maps are written recursively, so trees nested deeper than
//! [`MAX_SERIALIZE_DEPTH`] fail with a serializer error instead of
//! exhausting the stack.

use serde::ser::{Error as _, SerializeMap, Serializer};
use serde::Serialize;

use crate::ast::{AttributeQuote, Document, ElementName, NodeId, NodeKind, Whitespace};

/// Deepest node nesting, counted from the document, that can be serialized.
pub const MAX_SERIALIZE_DEPTH: usize = 256;

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeView {
            document: self,
            id: NodeId::ROOT,
            depth: 0,
        }
        .serialize(serializer)
    }
}

struct NodeView<'d> {
    document: &'d Document,
    id: NodeId,
    depth: usize,
}

struct NodeList<'d> {
    document: &'d Document,
    ids: &'d [NodeId],
    depth: usize,
}

struct NameView<'d> {
    document: &'d Document,
    name: &'d ElementName,
    depth: usize,
}

struct Trim(Whitespace);

impl Serialize for Trim {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_str())
    }
}

impl Serialize for NodeList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.ids.iter().map(|&id| NodeView {
            document: self.document,
            id,
            depth: self.depth,
        }))
    }
}

impl Serialize for NameView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.name {
            ElementName::Static(name) => serializer.serialize_str(name),
            ElementName::Dynamic(id) => NodeView {
                document: self.document,
                id: *id,
                depth: self.depth,
            }
            .serialize(serializer),
        }
    }
}

impl<'d> NodeView<'d> {
    fn list(&self, ids: &'d [NodeId]) -> NodeList<'d> {
        NodeList {
            document: self.document,
            ids,
            depth: self.depth + 1,
        }
    }

    fn name(&self, name: &'d ElementName) -> NameView<'d> {
        NameView {
            document: self.document,
            name,
            depth: self.depth + 1,
        }
    }
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.depth > MAX_SERIALIZE_DEPTH {
            return Err(S::Error::custom(format!(
                "node nesting exceeds the serializable depth of {MAX_SERIALIZE_DEPTH}"
            )));
        }
        let document = self.document;
        let node = &document[self.id];

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", node.type_name())?;
        match &node.kind {
            NodeKind::Document(root) => {
                map.serialize_entry("children", &self.list(&root.children))?;
            }
            NodeKind::TextNode(text) => {
                map.serialize_entry("value", &text.value)?;
            }
            NodeKind::HtmlComment(comment) => {
                map.serialize_entry("body", &comment.body)?;
            }
            NodeKind::HtmlDoctype(doctype) => {
                map.serialize_entry("legacyDoctypeString", &doctype.legacy_doctype_string)?;
            }
            NodeKind::HtmlRawNode(raw) => {
                map.serialize_entry("name", &raw.name)?;
                map.serialize_entry("body", &raw.body)?;
                map.serialize_entry("attributes", &self.list(&raw.attributes))?;
            }
            NodeKind::HtmlVoidElement(element) | NodeKind::HtmlSelfClosingElement(element) => {
                map.serialize_entry("name", &self.name(&element.name))?;
                map.serialize_entry("attributes", &self.list(&element.attributes))?;
            }
            NodeKind::HtmlElement(element) => {
                map.serialize_entry("name", &self.name(&element.name))?;
                map.serialize_entry("attributes", &self.list(&element.attributes))?;
                map.serialize_entry("children", &self.list(&element.children))?;
            }
            NodeKind::AttributeNode(attribute) => {
                let quote = match attribute.quote {
                    AttributeQuote::None => None,
                    AttributeQuote::Single => Some('\''),
                    AttributeQuote::Double => Some('"'),
                };
                map.serialize_entry("name", &attribute.name)?;
                map.serialize_entry("value", &self.list(&attribute.value))?;
                map.serialize_entry("quote", &quote)?;
                map.serialize_entry("hasEquals", &attribute.has_equals)?;
            }
            NodeKind::LiquidDrop(drop) => {
                map.serialize_entry("markup", &drop.markup)?;
                map.serialize_entry("whitespaceStart", &Trim(drop.whitespace_start))?;
                map.serialize_entry("whitespaceEnd", &Trim(drop.whitespace_end))?;
            }
            NodeKind::LiquidTag(tag) => {
                map.serialize_entry("name", &tag.name)?;
                map.serialize_entry("markup", &tag.markup)?;
                if let Some(branches) = &tag.children {
                    map.serialize_entry("children", &self.list(branches))?;
                }
                map.serialize_entry("whitespaceStart", &Trim(tag.whitespace_start))?;
                map.serialize_entry("whitespaceEnd", &Trim(tag.whitespace_end))?;
                map.serialize_entry(
                    "delimiterWhitespaceStart",
                    &Trim(tag.delimiter_whitespace_start),
                )?;
                map.serialize_entry("delimiterWhitespaceEnd", &Trim(tag.delimiter_whitespace_end))?;
            }
            NodeKind::LiquidRawTag(tag) => {
                map.serialize_entry("name", &tag.name)?;
                map.serialize_entry("markup", &tag.markup)?;
                map.serialize_entry("body", &tag.body)?;
                map.serialize_entry("whitespaceStart", &Trim(tag.whitespace_start))?;
                map.serialize_entry("whitespaceEnd", &Trim(tag.whitespace_end))?;
                map.serialize_entry(
                    "delimiterWhitespaceStart",
                    &Trim(tag.delimiter_whitespace_start),
                )?;
                map.serialize_entry("delimiterWhitespaceEnd", &Trim(tag.delimiter_whitespace_end))?;
            }
            NodeKind::LiquidBranch(branch) => {
                map.serialize_entry("name", &branch.name)?;
                map.serialize_entry("markup", &branch.markup)?;
                map.serialize_entry("children", &self.list(&branch.children))?;
                map.serialize_entry("whitespaceStart", &Trim(branch.whitespace_start))?;
                map.serialize_entry("whitespaceEnd", &Trim(branch.whitespace_end))?;
            }
        }
        map.serialize_entry("position", &node.position)?;
        map.end()
    }
}
