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

use html5ever::tree_builder::ElementFlags;
use html5ever::{namespace_url, ns, Attribute, LocalName, QualName};
use regex::Regex;

use crate::error::HtmlParseError;

pub(crate) fn qual_name(name: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(name))
}

/// Index of a node in the [`RawDom`] arena.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct RawDomHandle(pub(crate) usize);

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RawNodeDocument {
    pub(crate) name: QualName,
    pub(crate) children: Vec<RawDomHandle>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RawNodeContainer {
    pub(crate) name: QualName,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<RawDomHandle>,
}

impl RawNodeContainer {
    pub(crate) fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _v)| n == name)
            .map(|(_n, v)| v.as_str())
    }

    /// Extract one property value from the `style` attribute, if present.
    ///
    /// Matching is anchored to a property boundary so that, for example,
    /// asking for `color` never matches inside `background-color`.
    pub(crate) fn style_property(&self, property: &str) -> Option<String> {
        let style = self.get_attr("style")?;
        let re = Regex::new(&format!(
            r"(?i)(?:^|;)\s*{}\s*:\s*([^;]+)",
            regex::escape(property)
        ))
        .ok()?;
        re.captures(style).map(|c| c[1].trim().to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RawNodeText {
    pub(crate) content: String,
}

/// A node as html5ever reports it, before any interpretation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum RawDomNode {
    Document(RawNodeDocument),
    Container(RawNodeContainer),
    Text(RawNodeText),
}

impl RawDomNode {
    pub(crate) fn name(&self) -> &QualName {
        match self {
            RawDomNode::Document(d) => &d.name,
            RawDomNode::Container(c) => &c.name,
            RawDomNode::Text(_) => {
                panic!("text nodes have no element name")
            }
        }
    }
}

/// An arena of parsed nodes in which parents refer to children by handle.
///
/// This shape exists purely to satisfy html5ever's tree builder, which
/// needs cheap cloneable handles; nodes abandoned mid-parse simply stay
/// unreferenced in the arena and are skipped during conversion.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RawDom {
    pub(crate) nodes: Vec<RawDomNode>,
    pub(crate) document_handle: RawDomHandle,
}

impl RawDom {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![RawDomNode::Document(RawNodeDocument {
                name: qual_name(""),
                children: Vec::new(),
            })],
            document_handle: RawDomHandle(0),
        }
    }

    pub(crate) fn document_handle(&self) -> &RawDomHandle {
        &self.document_handle
    }

    pub(crate) fn get_document(&self) -> &RawDomNode {
        &self.nodes[self.document_handle.0]
    }

    pub(crate) fn get_node(&self, handle: &RawDomHandle) -> &RawDomNode {
        &self.nodes[handle.0]
    }

    pub(crate) fn get_mut_node(
        &mut self,
        handle: &RawDomHandle,
    ) -> &mut RawDomNode {
        &mut self.nodes[handle.0]
    }

    pub(crate) fn add_node(&mut self, node: RawDomNode) -> RawDomHandle {
        self.nodes.push(node);
        RawDomHandle(self.nodes.len() - 1)
    }

    pub(crate) fn create_element(
        &mut self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> RawDomHandle {
        self.add_node(RawDomNode::Container(RawNodeContainer {
            name,
            attrs: attrs
                .iter()
                .map(|attr| {
                    (
                        attr.name.local.as_ref().to_owned(),
                        attr.value.as_ref().to_owned(),
                    )
                })
                .collect(),
            children: Vec::new(),
        }))
    }
}

/// The state accumulated while html5ever feeds us a document: the arena
/// built so far plus any parse errors reported along the way.
#[derive(Clone, Debug)]
pub(crate) struct RawDomCreationError {
    pub(crate) dom: RawDom,
    pub(crate) parse_errors: Vec<String>,
}

impl RawDomCreationError {
    pub(crate) fn new() -> Self {
        Self {
            dom: RawDom::new(),
            parse_errors: Vec::new(),
        }
    }
}

impl From<RawDomCreationError> for HtmlParseError {
    fn from(error: RawDomCreationError) -> Self {
        HtmlParseError {
            parse_errors: error.parse_errors,
        }
    }
}
