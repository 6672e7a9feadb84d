/*!
 * Tests for markup parsing, serialization, and DOM helpers
 */

use traduct::errors::TranslationError;
use traduct::markup::{
    DEFAULT_TRANSLATABLE_TAGS, TranslatableTags, decode_bytes, direct_text, encode_string,
    find_translatable_nodes, parse_markup, parse_markup_bytes, serialize_tree, set_direct_text,
    tag_name,
};

#[test]
fn test_parseMarkup_withSimpleDocument_shouldRoundTripText() {
    let dom = parse_markup("<html><body><p>Hello</p></body></html>");
    let output = serialize_tree(&dom);
    assert!(output.contains("<p>Hello</p>"));
}

#[test]
fn test_translatableTags_default_shouldContainCommonTags() {
    let tags = TranslatableTags::default();
    assert!(tags.contains("p"));
    assert!(tags.contains("a"));
    assert!(tags.contains("title"));
    assert!(tags.contains("td"));
    assert_eq!(tags.len(), DEFAULT_TRANSLATABLE_TAGS.len());
}

#[test]
fn test_translatableTags_default_shouldExcludeStructuralTags() {
    let tags = TranslatableTags::default();
    assert!(!tags.contains("div"));
    assert!(!tags.contains("script"));
    assert!(!tags.contains("style"));
    assert!(!tags.contains("body"));
}

#[test]
fn test_translatableTags_insert_shouldRegisterLowercased() {
    let mut tags = TranslatableTags::empty();
    tags.insert("  FigCaption ");

    assert!(tags.contains("figcaption"));
    assert!(tags.contains("FIGCAPTION"));
    assert_eq!(tags.len(), 1);
}

#[test]
fn test_translatableTags_insert_withBlankTag_shouldIgnoreIt() {
    let mut tags = TranslatableTags::empty();
    tags.insert("   ");
    assert!(tags.is_empty());
}

#[test]
fn test_translatableTags_fromTags_shouldDeduplicate() {
    let tags = TranslatableTags::from_tags(["p", "P", " p "]);
    assert_eq!(tags.len(), 1);
}

#[test]
fn test_directText_withPlainTextNode_shouldReturnText() {
    let dom = parse_markup("<html><body><p>Just text</p></body></html>");
    let nodes = find_translatable_nodes(&dom.document, &TranslatableTags::default());

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].1, "Just text");
}

#[test]
fn test_directText_withNestedElement_shouldReturnNone() {
    let dom = parse_markup("<html><body><p>Text with <b>bold</b></p></body></html>");
    let tags = TranslatableTags::from_tags(["p"]);
    let nodes = find_translatable_nodes(&dom.document, &tags);

    // The paragraph owns no direct text because it contains an element
    assert!(nodes.is_empty());
}

#[test]
fn test_findTranslatableNodes_shouldFollowDocumentOrder() {
    let dom = parse_markup(
        "<html><head><title>First</title></head>\
         <body><p>Second</p><span>Third</span></body></html>",
    );
    let nodes = find_translatable_nodes(&dom.document, &TranslatableTags::default());

    let texts: Vec<&str> = nodes.iter().map(|(_, text)| text.as_str()).collect();
    assert_eq!(texts, vec!["First", "Second", "Third"]);
}

#[test]
fn test_findTranslatableNodes_withBlankText_shouldSkipNode() {
    let dom = parse_markup("<html><body><p>  \n </p><p>Kept</p></body></html>");
    let nodes = find_translatable_nodes(&dom.document, &TranslatableTags::default());

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].1, "Kept");
}

#[test]
fn test_setDirectText_shouldReplaceNodeText() {
    let dom = parse_markup("<html><body><p>Before</p></body></html>");
    let nodes = find_translatable_nodes(&dom.document, &TranslatableTags::default());
    assert_eq!(nodes.len(), 1);

    assert!(set_direct_text(&nodes[0].0, "After"));

    let output = serialize_tree(&dom);
    assert!(output.contains("<p>After</p>"));
    assert!(!output.contains("Before"));
}

#[test]
fn test_tagName_withElement_shouldReturnLocalName() {
    let dom = parse_markup("<html><body><p>Text</p></body></html>");
    let nodes = find_translatable_nodes(&dom.document, &TranslatableTags::default());
    assert_eq!(tag_name(&nodes[0].0), Some("p".to_string()));
}

#[test]
fn test_tagName_withNonElement_shouldReturnNone() {
    let dom = parse_markup("<html><body></body></html>");
    assert_eq!(tag_name(&dom.document), None);
}

#[test]
fn test_decodeBytes_withWindows1252_shouldDecodeAccents() {
    // "café" with an 0xE9 latin-1 byte
    let decoded = decode_bytes(b"caf\xe9", "windows-1252").unwrap();
    assert_eq!(decoded, "café");
}

#[test]
fn test_encodeString_withWindows1252_shouldRoundTrip() {
    let encoded = encode_string("café", "windows-1252").unwrap();
    assert_eq!(encoded, b"caf\xe9");

    let decoded = decode_bytes(&encoded, "windows-1252").unwrap();
    assert_eq!(decoded, "café");
}

#[test]
fn test_decodeBytes_withUnknownLabel_shouldReturnInvalidArgument() {
    assert!(matches!(
        decode_bytes(b"data", "no-such-encoding"),
        Err(TranslationError::InvalidArgument(_))
    ));
}

#[test]
fn test_parseMarkupBytes_withDeclaredEncoding_shouldDecodeBeforeParsing() {
    let dom = parse_markup_bytes(b"<html><body><p>caf\xe9</p></body></html>", "windows-1252")
        .unwrap();
    let output = serialize_tree(&dom);
    assert!(output.contains("café"));
}

#[test]
fn test_directText_withEmptyElement_shouldReturnNone() {
    let dom = parse_markup("<html><body><p></p></body></html>");
    let tags = TranslatableTags::from_tags(["p"]);
    let nodes = find_translatable_nodes(&dom.document, &tags);
    assert!(nodes.is_empty());

    // And set_direct_text has nothing to write into
    let html = dom.document.children.borrow()[0].clone();
    let body = html.children.borrow()[1].clone();
    let body_p = body.children.borrow()[0].clone();
    assert_eq!(direct_text(&body_p), None);
    assert!(!set_direct_text(&body_p, "ignored"));
}
