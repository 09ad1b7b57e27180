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

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::dom::nodes::{ContainerNode, ContainerNodeKind, DomNode};
use crate::dom::Dom;

impl Dom {
    /// Serialize the document to markup.
    ///
    /// The output is canonical: style properties appear in a fixed order
    /// and hex colors are lowercase, so serializing an unchanged tree
    /// always yields byte-identical markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        push_children_html(self.document(), &mut out);
        out
    }
}

fn push_children_html(container: &ContainerNode, out: &mut String) {
    for child in container.children() {
        push_node_html(child, out);
    }
}

fn push_node_html(node: &DomNode, out: &mut String) {
    match node {
        DomNode::Text(text) => {
            out.push_str(&encode_text(&text.data().to_string()));
        }
        DomNode::LineBreak => out.push_str("<br />"),
        DomNode::Media(media) => {
            let src =
                encode_double_quoted_attribute(media.reference().url().as_str())
                    .into_owned();
            if media.reference().is_image() {
                out.push_str("<img src=\"");
                out.push_str(&src);
                out.push_str("\" />");
            } else {
                out.push_str("<video src=\"");
                out.push_str(&src);
                out.push_str("\" controls=\"controls\"></video>");
            }
        }
        DomNode::Container(c) => match c.kind() {
            ContainerNodeKind::Generic => push_children_html(c, out),
            ContainerNodeKind::Paragraph => {
                out.push_str("<p>");
                push_children_html(c, out);
                out.push_str("</p>");
            }
            ContainerNodeKind::Heading(level) => {
                let tag = level.to_string();
                out.push('<');
                out.push_str(&tag);
                out.push('>');
                push_children_html(c, out);
                out.push_str("</");
                out.push_str(&tag);
                out.push('>');
            }
            ContainerNodeKind::StyleSpan(styles) => {
                out.push_str("<span style=\"");
                out.push_str(&styles.css());
                out.push_str("\">");
                push_children_html(c, out);
                out.push_str("</span>");
            }
        },
    }
}
