/*!
 * Markup parse/serialize boundary and DOM helpers.
 *
 * Parsing and serialization are delegated to html5ever/markup5ever_rcdom;
 * byte content is decoded and re-encoded with encoding_rs using the
 * declared encoding label. This module also owns the allow-list of
 * translatable tag names.
 */

use std::collections::HashSet;

use encoding_rs::Encoding;
use html5ever::parse_document;
use html5ever::serialize::{SerializeOpts, serialize};
use html5ever::tendril::{StrTendril, TendrilSink};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

use crate::errors::{TranslationError, TranslationResult};

/// Encoding assumed for byte content when none is declared
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Tag names whose direct text content is translated by default
pub const DEFAULT_TRANSLATABLE_TAGS: [&str; 47] = [
    "h1", "u", "s", "abbr", "del", "pre", "h5", "sub", "kbd", "li", "dd", "textarea", "dt",
    "input", "em", "sup", "label", "button", "h6", "title", "dfn", "th", "acronym", "cite",
    "samp", "td", "p", "ins", "big", "caption", "bdo", "var", "h3", "tt", "address", "h4",
    "legend", "i", "small", "b", "q", "option", "code", "h2", "a", "strong", "span",
];

/// Allow-list of tag names eligible for translation.
///
/// The list is append-only: tags can be registered but never removed, so
/// concurrent readers only ever see a superset of what they saw before.
#[derive(Debug, Clone)]
pub struct TranslatableTags {
    tags: HashSet<String>,
}

impl Default for TranslatableTags {
    fn default() -> Self {
        Self::from_tags(DEFAULT_TRANSLATABLE_TAGS)
    }
}

impl TranslatableTags {
    /// Create an empty allow-list
    pub fn empty() -> Self {
        Self {
            tags: HashSet::new(),
        }
    }

    /// Create an allow-list from the given tag names
    pub fn from_tags<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|tag| tag.as_ref().trim().to_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }

    /// Register an additional translatable tag name
    pub fn insert(&mut self, tag: &str) {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() {
            self.tags.insert(tag);
        }
    }

    /// Whether the given tag name is in the allow-list
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(&tag.to_lowercase())
    }

    /// Number of registered tag names
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the allow-list is empty
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate over the registered tag names
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

/// Parse a markup string into a DOM
pub fn parse_markup(markup: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut markup.as_bytes())
        .unwrap()
}

/// Decode bytes with the given encoding label and parse them into a DOM
pub fn parse_markup_bytes(data: &[u8], encoding_label: &str) -> TranslationResult<RcDom> {
    let decoded = decode_bytes(data, encoding_label)?;
    Ok(parse_markup(&decoded))
}

/// Serialize a DOM back into a markup string
pub fn serialize_tree(dom: &RcDom) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let serializable: SerializableHandle = dom.document.clone().into();
    serialize(&mut buf, &serializable, SerializeOpts::default())
        .expect("Unable to serialize DOM into buffer");
    String::from_utf8_lossy(&buf).into_owned()
}

/// Serialize a DOM and encode the result with the given encoding label
pub fn serialize_tree_bytes(dom: &RcDom, encoding_label: &str) -> TranslationResult<Vec<u8>> {
    encode_string(&serialize_tree(dom), encoding_label)
}

/// Decode bytes using an encoding label, rejecting unknown labels
pub fn decode_bytes(data: &[u8], encoding_label: &str) -> TranslationResult<String> {
    let encoding = encoding_for(encoding_label)?;
    let (decoded, _, _) = encoding.decode(data);
    Ok(decoded.into_owned())
}

/// Encode a string using an encoding label, rejecting unknown labels
pub fn encode_string(text: &str, encoding_label: &str) -> TranslationResult<Vec<u8>> {
    let encoding = encoding_for(encoding_label)?;
    let (encoded, _, _) = encoding.encode(text);
    Ok(encoded.into_owned())
}

fn encoding_for(label: &str) -> TranslationResult<&'static Encoding> {
    Encoding::for_label(label.as_bytes()).ok_or_else(|| {
        TranslationError::InvalidArgument(format!("Unknown encoding label: '{}'", label))
    })
}

/// Collect, in document order, the allow-listed nodes whose direct text is
/// non-empty after trimming, paired with that text.
pub fn find_translatable_nodes(root: &Handle, tags: &TranslatableTags) -> Vec<(Handle, String)> {
    let mut found = Vec::new();
    collect_translatable(root, tags, &mut found);
    found
}

fn collect_translatable(node: &Handle, tags: &TranslatableTags, found: &mut Vec<(Handle, String)>) {
    if let NodeData::Element { ref name, .. } = node.data {
        if tags.contains(name.local.as_ref()) {
            if let Some(text) = direct_text(node) {
                if !text.trim().is_empty() {
                    found.push((node.clone(), text));
                }
            }
        }
    }

    for child in node.children.borrow().iter() {
        collect_translatable(child, tags, found);
    }
}

/// The node's direct text content: the concatenation of its text children,
/// provided it has no element children. Nodes with nested elements own no
/// direct text of their own (the nested elements are visited separately).
pub fn direct_text(node: &Handle) -> Option<String> {
    let children = node.children.borrow();
    let mut text = String::new();
    let mut has_text = false;

    for child in children.iter() {
        match child.data {
            NodeData::Text { ref contents } => {
                text.push_str(&contents.borrow());
                has_text = true;
            }
            NodeData::Element { .. } => return None,
            _ => {}
        }
    }

    has_text.then_some(text)
}

/// Replace the node's direct text content in place.
///
/// The first text child receives the new text; any further text children
/// are emptied so the node reads as a single run. Returns false when the
/// node has no text child to write into.
pub fn set_direct_text(node: &Handle, new_text: &str) -> bool {
    let children = node.children.borrow();
    let mut replaced = false;

    for child in children.iter() {
        if let NodeData::Text { ref contents } = child.data {
            let mut contents = contents.borrow_mut();
            if replaced {
                *contents = StrTendril::new();
            } else {
                *contents = new_text.into();
                replaced = true;
            }
        }
    }

    replaced
}

/// Tag name of an element node
pub fn tag_name(node: &Handle) -> Option<String> {
    match node.data {
        NodeData::Element { ref name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}
