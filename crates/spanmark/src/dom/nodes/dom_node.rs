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

use super::{ContainerNode, ContainerNodeKind, TextNode};

/// A validated media reference embedded in the document.
///
/// The node occupies one UTF-16 unit of document space, like the object
/// replacement character it serializes to in plain text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaNode {
    reference: MediaRef,
}

impl MediaNode {
    pub fn new(reference: MediaRef) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &MediaRef {
        &self.reference
    }
}

/// Coarse node classification, used by range locations and panel queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomNodeKind {
    Generic,
    Paragraph,
    Heading,
    StyleSpan,
    Text,
    LineBreak,
    Media,
}

/// One node of the markup tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomNode {
    Container(ContainerNode),
    Text(TextNode),
    LineBreak,
    Media(MediaNode),
}

impl DomNode {
    pub fn kind(&self) -> DomNodeKind {
        match self {
            DomNode::Container(c) => match c.kind() {
                ContainerNodeKind::Generic => DomNodeKind::Generic,
                ContainerNodeKind::Paragraph => DomNodeKind::Paragraph,
                ContainerNodeKind::Heading(_) => DomNodeKind::Heading,
                ContainerNodeKind::StyleSpan(_) => DomNodeKind::StyleSpan,
            },
            DomNode::Text(_) => DomNodeKind::Text,
            DomNode::LineBreak => DomNodeKind::LineBreak,
            DomNode::Media(_) => DomNodeKind::Media,
        }
    }

    /// Length in UTF-16 code units. Line breaks and media embeds occupy
    /// one unit each.
    pub fn text_len(&self) -> usize {
        match self {
            DomNode::Container(c) => c.text_len(),
            DomNode::Text(t) => t.text_len(),
            DomNode::LineBreak => 1,
            DomNode::Media(_) => 1,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, DomNode::Container(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, DomNode::Text(_))
    }

    pub fn is_block(&self) -> bool {
        match self {
            DomNode::Container(c) => c.is_block(),
            _ => false,
        }
    }

    pub fn is_style_span(&self) -> bool {
        match self {
            DomNode::Container(c) => c.is_style_span(),
            _ => false,
        }
    }

    pub fn as_container(&self) -> Option<&ContainerNode> {
        match self {
            DomNode::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut ContainerNode> {
        match self {
            DomNode::Container(c) => Some(c),
            _ => None,
        }
    }
}
