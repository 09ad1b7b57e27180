// Copyright 2026 The Spanmark Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use media_embeds::MediaRef;

use super::raw_dom::{RawDom, RawDomNode, RawNodeContainer};
use super::raw_dom_creator::RawDomCreator;
use crate::dom::nodes::{ContainerNode, DomNode, MediaNode, TextNode};
use crate::dom::Dom;
use crate::error::HtmlParseError;
use crate::style::{ColorValue, HeadingLevel, SpanStyles, StyleKind};

/// Parse a markup fragment into a [`Dom`].
///
/// The input is interpreted, not merely loaded: only the node kinds the
/// model understands survive. Unknown element wrappers are unwrapped to
/// their children, style spans keep only their recognized color
/// properties, nested blocks are flattened onto line breaks, and media
/// elements whose reference fails validation are dropped.
pub fn parse(html: &str) -> Result<Dom, HtmlParseError> {
    let raw = RawDomCreator::parse(html).map_err(HtmlParseError::from)?;
    Ok(raw_to_dom(&raw))
}

fn raw_to_dom(raw: &RawDom) -> Dom {
    let mut top_level = Vec::new();
    if let RawDomNode::Document(document) = raw.get_document() {
        // The fragment parser wraps everything in a synthetic <html>
        // element; its children are the real content.
        for handle in &document.children {
            if let RawDomNode::Container(html) = raw.get_node(handle) {
                convert_children(raw, &html.children, false, &mut top_level);
            }
        }
    }
    let mut dom = Dom::new(top_level);
    dom.remove_empty_containers();
    dom.merge_adjacent_text();
    dom
}

fn convert_children(
    raw: &RawDom,
    children: &[super::raw_dom::RawDomHandle],
    inside_block: bool,
    out: &mut Vec<DomNode>,
) {
    for handle in children {
        match raw.get_node(handle) {
            RawDomNode::Document(_) => {
                panic!("found a document inside a document!")
            }
            RawDomNode::Text(text) => push_text(out, &text.content),
            RawDomNode::Container(container) => {
                convert_container(raw, container, inside_block, out);
            }
        }
    }
}

fn convert_container(
    raw: &RawDom,
    container: &RawNodeContainer,
    inside_block: bool,
    out: &mut Vec<DomNode>,
) {
    let tag = container.name.local.as_ref();
    match tag {
        "span" => {
            let styles = span_styles(container);
            let mut kids = Vec::new();
            convert_children(raw, &container.children, inside_block, &mut kids);
            if kids.is_empty() {
                return;
            }
            if styles.is_empty() {
                out.extend(kids);
            } else {
                out.push(DomNode::Container(ContainerNode::new_style_span(
                    styles, kids,
                )));
            }
        }
        "h2" | "h3" | "h4" => {
            let level = HeadingLevel::from_tag(tag)
                .expect("tag is matched as a heading");
            convert_block(raw, container, inside_block, out, |kids| {
                ContainerNode::new_heading(level, kids)
            });
        }
        // Unsupported block elements become plain paragraphs; h1 keeps
        // its prominence at the highest supported level.
        "h1" => {
            convert_block(raw, container, inside_block, out, |kids| {
                ContainerNode::new_heading(HeadingLevel::H2, kids)
            });
        }
        "p" | "div" | "h5" | "h6" | "blockquote" | "li" => {
            convert_block(raw, container, inside_block, out, |kids| {
                ContainerNode::new_paragraph(kids)
            });
        }
        "br" => out.push(DomNode::LineBreak),
        "img" | "video" => {
            let Some(src) = container.get_attr("src") else {
                log::warn!("dropping media element without src");
                return;
            };
            match MediaRef::parse(src) {
                Ok(reference) => {
                    out.push(DomNode::Media(MediaNode::new(reference)));
                }
                Err(error) => {
                    log::warn!("dropping invalid media reference: {error}");
                }
            }
        }
        // Anything else is an unsupported wrapper: keep its content,
        // lose the element.
        _ => convert_children(raw, &container.children, inside_block, out),
    }
}

fn convert_block(
    raw: &RawDom,
    container: &RawNodeContainer,
    inside_block: bool,
    out: &mut Vec<DomNode>,
    build: impl FnOnce(Vec<DomNode>) -> ContainerNode,
) {
    if inside_block {
        // Blocks only live at the root. A block nested in another block
        // continues the enclosing one after a line break.
        if !out.is_empty() {
            out.push(DomNode::LineBreak);
        }
        convert_children(raw, &container.children, true, out);
    } else {
        drop_trailing_whitespace(out);
        let mut kids = Vec::new();
        convert_children(raw, &container.children, true, &mut kids);
        if !kids.is_empty() {
            out.push(DomNode::Container(build(kids)));
        }
    }
}

fn span_styles(container: &RawNodeContainer) -> SpanStyles {
    let mut styles = SpanStyles::default();
    for kind in [StyleKind::TextColor, StyleKind::Highlight] {
        if let Some(value) = container.style_property(kind.css_property()) {
            match ColorValue::parse(&value) {
                Ok(color) => styles.set(kind, Some(color)),
                Err(_) => {
                    log::warn!(
                        "dropping unsupported {} value in span",
                        kind.css_property()
                    );
                }
            }
        }
    }
    styles
}

fn push_text(out: &mut Vec<DomNode>, content: &str) {
    if content.is_empty() {
        return;
    }
    // Whitespace-only runs directly after a block are formatting noise
    // from the source markup, not content.
    if content.trim().is_empty()
        && out.last().is_some_and(|node| node.is_block())
    {
        return;
    }
    match out.last_mut() {
        Some(DomNode::Text(prev)) => {
            prev.push_node(&TextNode::from_str(content))
        }
        _ => out.push(DomNode::Text(TextNode::from_str(content))),
    }
}

fn drop_trailing_whitespace(out: &mut Vec<DomNode>) {
    if let Some(DomNode::Text(text)) = out.last() {
        if text.data().to_string().trim().is_empty() {
            out.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(html: &str) -> String {
        parse(html).unwrap().to_html()
    }

    #[test]
    fn plain_text_parses_to_one_text_node() {
        let dom = parse("hello").unwrap();
        assert_eq!(dom.document().children().len(), 1);
        assert_eq!(dom.to_plain_text().to_string(), "hello");
    }

    #[test]
    fn highlight_span_round_trips_byte_identically() {
        let html =
            "Hello <span style=\"background-color: #fef08a;\">world</span>";
        assert_eq!(roundtrip(html), html);
    }

    #[test]
    fn color_and_highlight_both_survive() {
        let html = "<span style=\"color: #111111; background-color: #fef08a;\">x</span>";
        assert_eq!(roundtrip(html), html);
    }

    #[test]
    fn hex_colors_are_canonicalized_to_lowercase() {
        assert_eq!(
            roundtrip("<span style=\"color: #ABCDEF;\">x</span>"),
            "<span style=\"color: #abcdef;\">x</span>"
        );
    }

    #[test]
    fn unknown_inline_elements_are_unwrapped() {
        assert_eq!(roundtrip("a<b>bold</b><i>it</i>c"), "abolditc");
    }

    #[test]
    fn style_span_with_no_recognized_property_is_unwrapped() {
        assert_eq!(
            roundtrip("<span style=\"font-weight: bold;\">x</span>"),
            "x"
        );
    }

    #[test]
    fn invalid_color_values_are_dropped() {
        assert_eq!(
            roundtrip("<span style=\"color: pickle;\">x</span>"),
            "x"
        );
    }

    #[test]
    fn headings_parse_to_heading_blocks() {
        assert_eq!(
            roundtrip("<h2>Title</h2><p>Body</p>"),
            "<h2>Title</h2><p>Body</p>"
        );
    }

    #[test]
    fn h1_maps_to_h2_and_h5_to_paragraph() {
        assert_eq!(roundtrip("<h1>a</h1><h5>b</h5>"), "<h2>a</h2><p>b</p>");
    }

    #[test]
    fn nested_blocks_flatten_onto_line_breaks() {
        assert_eq!(
            roundtrip("<div><p>a</p><p>b</p></div>"),
            "<p>a<br />b</p>"
        );
    }

    #[test]
    fn whitespace_between_blocks_is_not_content() {
        assert_eq!(
            roundtrip("<p>a</p>\n  <p>b</p>"),
            "<p>a</p><p>b</p>"
        );
    }

    #[test]
    fn image_with_valid_reference_parses() {
        assert_eq!(
            roundtrip("<img src=\"https://example.com/cat.png\">"),
            "<img src=\"https://example.com/cat.png\" />"
        );
    }

    #[test]
    fn media_with_invalid_reference_is_dropped() {
        assert_eq!(
            roundtrip("a<img src=\"javascript:alert(1)\">b"),
            "ab"
        );
    }

    #[test]
    fn line_breaks_round_trip() {
        assert_eq!(roundtrip("a<br>b"), "a<br />b");
    }

    #[test]
    fn empty_input_parses_to_empty_dom() {
        let dom = parse("").unwrap();
        assert!(dom.is_empty());
    }
}
