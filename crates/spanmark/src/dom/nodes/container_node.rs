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

use crate::style::{HeadingLevel, SpanStyles};

use super::dom_node::DomNode;

/// What role a container plays in the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerNodeKind {
    /// The document root.
    Generic,
    /// A plain block of inline content (`<p>`).
    Paragraph,
    /// A heading block (`<h2>`..`<h4>`).
    Heading(HeadingLevel),
    /// An inline style wrapper (`<span style="…">`), the only carrier of
    /// color state in the document.
    StyleSpan(SpanStyles),
}

/// A node owning child nodes: the document root, a block, or a style span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerNode {
    kind: ContainerNodeKind,
    children: Vec<DomNode>,
}

impl ContainerNode {
    pub fn new(kind: ContainerNodeKind, children: Vec<DomNode>) -> Self {
        Self { kind, children }
    }

    pub fn new_generic(children: Vec<DomNode>) -> Self {
        Self::new(ContainerNodeKind::Generic, children)
    }

    pub fn new_paragraph(children: Vec<DomNode>) -> Self {
        Self::new(ContainerNodeKind::Paragraph, children)
    }

    pub fn new_heading(
        level: HeadingLevel,
        children: Vec<DomNode>,
    ) -> Self {
        debug_assert!(
            level != HeadingLevel::Normal,
            "Normal is a request, not a stored heading state"
        );
        Self::new(ContainerNodeKind::Heading(level), children)
    }

    pub fn new_style_span(
        styles: SpanStyles,
        children: Vec<DomNode>,
    ) -> Self {
        Self::new(ContainerNodeKind::StyleSpan(styles), children)
    }

    pub fn kind(&self) -> &ContainerNodeKind {
        &self.kind
    }

    pub fn set_kind(&mut self, kind: ContainerNodeKind) {
        self.kind = kind;
    }

    pub fn children(&self) -> &[DomNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<DomNode> {
        &mut self.children
    }

    pub fn take_children(&mut self) -> Vec<DomNode> {
        std::mem::take(&mut self.children)
    }

    pub fn set_children(&mut self, children: Vec<DomNode>) {
        self.children = children;
    }

    pub fn append_child(&mut self, child: DomNode) {
        self.children.push(child);
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Blocks may only appear as direct children of the document root.
    pub fn is_block(&self) -> bool {
        matches!(
            self.kind,
            ContainerNodeKind::Paragraph | ContainerNodeKind::Heading(_)
        )
    }

    pub fn is_style_span(&self) -> bool {
        matches!(self.kind, ContainerNodeKind::StyleSpan(_))
    }

    pub fn heading_level(&self) -> Option<HeadingLevel> {
        match &self.kind {
            ContainerNodeKind::Heading(level) => Some(*level),
            _ => None,
        }
    }

    pub fn styles(&self) -> Option<&SpanStyles> {
        match &self.kind {
            ContainerNodeKind::StyleSpan(styles) => Some(styles),
            _ => None,
        }
    }

    pub fn styles_mut(&mut self) -> Option<&mut SpanStyles> {
        match &mut self.kind {
            ContainerNodeKind::StyleSpan(styles) => Some(styles),
            _ => None,
        }
    }

    /// Length of contained content in UTF-16 code units, counting one unit
    /// per boundary between sibling blocks (the implicit newline).
    pub fn text_len(&self) -> usize {
        let mut len = 0;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 && block_gap(&self.children[i - 1], child) {
                len += 1;
            }
            len += child.text_len();
        }
        len
    }

    /// Split this container at child `index`, keeping children before it
    /// and returning a new container of the same kind holding the rest.
    pub(crate) fn split_off(&mut self, index: usize) -> ContainerNode {
        let rest = self.children.split_off(index);
        ContainerNode {
            kind: self.kind.clone(),
            children: rest,
        }
    }
}

/// Whether one unit of separation sits between these two siblings.
pub(crate) fn block_gap(prev: &DomNode, next: &DomNode) -> bool {
    prev.is_block() || next.is_block()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::nodes::TextNode;

    fn text(s: &str) -> DomNode {
        DomNode::Text(TextNode::from_str(s))
    }

    #[test]
    fn inline_children_sum_lengths() {
        let c = ContainerNode::new_generic(vec![text("ab"), text("cde")]);
        assert_eq!(c.text_len(), 5);
    }

    #[test]
    fn sibling_blocks_cost_one_gap_unit() {
        let c = ContainerNode::new_generic(vec![
            DomNode::Container(ContainerNode::new_paragraph(vec![text(
                "ab",
            )])),
            DomNode::Container(ContainerNode::new_paragraph(vec![text(
                "cd",
            )])),
        ]);
        assert_eq!(c.text_len(), 5);
    }

    #[test]
    fn inline_then_block_also_costs_a_gap() {
        let c = ContainerNode::new_generic(vec![
            text("ab"),
            DomNode::Container(ContainerNode::new_paragraph(vec![text(
                "cd",
            )])),
        ]);
        assert_eq!(c.text_len(), 5);
    }

    #[test]
    fn split_off_preserves_kind() {
        let mut span = ContainerNode::new_style_span(
            Default::default(),
            vec![text("ab"), text("cd")],
        );
        let right = span.split_off(1);
        assert_eq!(span.children().len(), 1);
        assert_eq!(right.children().len(), 1);
        assert!(right.is_style_span());
    }
}
