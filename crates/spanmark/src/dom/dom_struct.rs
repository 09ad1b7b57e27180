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

use widestring::{Utf16Str, Utf16String};

use crate::dom::nodes::{
    block_gap, ContainerNode, ContainerNodeKind, DomNode, TextNode,
};
use crate::dom::{DomHandle, DomLocation, Range};

/// A contiguous run of children of one container, identified by index.
///
/// Segments are what style and delete operations act on: after
/// [`Dom::split_boundary`] has been applied to both ends of a selection,
/// the covered content decomposes into whole-child runs, one per block
/// (or per inline run at the root).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Segment {
    pub parent: DomHandle,
    pub start_index: usize,
    /// Exclusive.
    pub end_index: usize,
}

/// The document tree. The root is always a [`ContainerNodeKind::Generic`]
/// container; block containers only ever appear as its direct children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dom {
    document: ContainerNode,
}

impl Dom {
    pub fn new(top_level_children: Vec<DomNode>) -> Self {
        Self {
            document: ContainerNode::new_generic(top_level_children),
        }
    }

    pub fn document(&self) -> &ContainerNode {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut ContainerNode {
        &mut self.document
    }

    /// Total document length in UTF-16 code units, counting one unit per
    /// block boundary.
    pub fn text_len(&self) -> usize {
        self.document.text_len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Find the node addressed by `handle`.
    ///
    /// Panics if the handle is the root or does not address a node.
    pub fn lookup_node(&self, handle: &DomHandle) -> &DomNode {
        assert!(!handle.is_root(), "root is a container, not a node");
        let mut container = &self.document;
        let path = handle.path();
        for &index in &path[..path.len() - 1] {
            container = container.children()[index]
                .as_container()
                .expect("handle path crosses a non-container node");
        }
        &container.children()[*path.last().unwrap()]
    }

    pub fn lookup_node_mut(&mut self, handle: &DomHandle) -> &mut DomNode {
        assert!(!handle.is_root(), "root is a container, not a node");
        let mut container = &mut self.document;
        let path = handle.path();
        for &index in &path[..path.len() - 1] {
            container = container.children_mut()[index]
                .as_container_mut()
                .expect("handle path crosses a non-container node");
        }
        &mut container.children_mut()[*path.last().unwrap()]
    }

    /// Find the container addressed by `handle`. The root handle is valid.
    ///
    /// Panics if the handle addresses a non-container node.
    pub fn lookup_container(&self, handle: &DomHandle) -> &ContainerNode {
        let mut container = &self.document;
        for &index in handle.path() {
            container = container.children()[index]
                .as_container()
                .expect("handle does not address a container");
        }
        container
    }

    pub fn lookup_container_mut(
        &mut self,
        handle: &DomHandle,
    ) -> &mut ContainerNode {
        let mut container = &mut self.document;
        for &index in handle.path() {
            container = container.children_mut()[index]
                .as_container_mut()
                .expect("handle does not address a container");
        }
        container
    }

    pub fn insert_at(
        &mut self,
        parent: &DomHandle,
        index: usize,
        node: DomNode,
    ) {
        self.lookup_container_mut(parent)
            .children_mut()
            .insert(index, node);
    }

    pub fn remove(&mut self, handle: &DomHandle) -> DomNode {
        let parent = handle.parent_handle();
        let index = handle.index_in_parent();
        self.lookup_container_mut(&parent).children_mut().remove(index)
    }

    /// The document offset at which the content of the node at `handle`
    /// starts.
    pub fn position_of(&self, handle: &DomHandle) -> usize {
        let mut pos = 0;
        let mut container = &self.document;
        for &index in handle.path() {
            let children = container.children();
            for i in 0..=index {
                if i > 0 && block_gap(&children[i - 1], &children[i]) {
                    pos += 1;
                }
                if i < index {
                    pos += children[i].text_len();
                }
            }
            container = match &children[index] {
                DomNode::Container(c) => c,
                // Last path element may address a leaf.
                _ => return pos,
            };
        }
        pos
    }

    /// Everything the document knows about the offsets `start..end`.
    pub fn find_range(&self, start: usize, end: usize) -> Range {
        let mut locations = Vec::new();
        collect_locations(
            &self.document,
            &DomHandle::root(),
            0,
            start,
            end,
            &mut locations,
        );
        Range::new(start, end, locations)
    }

    /// The document rendered as plain text: one `'\n'` per block boundary
    /// or line break, one U+FFFC per media embed.
    pub fn to_plain_text(&self) -> Utf16String {
        let mut out = Utf16String::new();
        push_plain_text(&self.document, &mut out);
        out
    }

    /// The plain text between two document offsets.
    pub fn text_between(&self, start: usize, end: usize) -> Utf16String {
        let text = self.to_plain_text();
        text[start..end].to_owned()
    }

    /// True when `offset` falls between the two halves of a surrogate
    /// pair. Such an offset addresses no character boundary and cannot
    /// be sliced at.
    pub(crate) fn is_mid_surrogate(&self, offset: usize) -> bool {
        let text = self.to_plain_text();
        let units = text.as_slice();
        offset > 0
            && offset < units.len()
            && matches!(units[offset], 0xDC00..=0xDFFF)
    }

    /// The root child index of the block whose content contains `offset`,
    /// if any.
    pub(crate) fn block_index_at(&self, offset: usize) -> Option<usize> {
        let mut pos = 0;
        let children = self.document.children();
        for (i, child) in children.iter().enumerate() {
            if i > 0 && block_gap(&children[i - 1], child) {
                pos += 1;
            }
            let len = child.text_len();
            if child.is_block() && pos <= offset && offset <= pos + len {
                return Some(i);
            }
            pos += len;
        }
        None
    }

    /// Split text nodes and style spans so that `offset` falls on a child
    /// boundary of its enclosing block (or of the root). Splitting never
    /// changes document offsets.
    ///
    /// Returns the enclosing container and the boundary child index.
    pub(crate) fn split_boundary(
        &mut self,
        offset: usize,
    ) -> (DomHandle, usize) {
        let root = DomHandle::root();
        // Descend into a block child if the offset sits inside one.
        if let Some(i) = self.block_index_at(offset) {
            let block_handle = root.child_handle(i);
            let local = offset - self.position_of(&block_handle);
            let index = self.split_children_at(&block_handle, local);
            return (block_handle, index);
        }
        let index = self.split_children_at(&root, offset);
        (root, index)
    }

    /// Split the children of `container` so `local_offset` falls between
    /// two of them, returning that boundary index.
    fn split_children_at(
        &mut self,
        container: &DomHandle,
        local_offset: usize,
    ) -> usize {
        let children = self.lookup_container(container).children();
        let mut pos = 0;
        let mut target = None;
        for (i, child) in children.iter().enumerate() {
            if i > 0 && block_gap(&children[i - 1], child) {
                pos += 1;
            }
            let len = child.text_len();
            if local_offset <= pos {
                return i;
            }
            if local_offset < pos + len {
                target = Some((i, local_offset - pos));
                break;
            }
            pos += len;
        }
        let Some((index, inner)) = target else {
            return children.len();
        };
        let child_handle = container.child_handle(index);
        match self.lookup_node_mut(&child_handle) {
            DomNode::Text(text) => {
                let right = text.split_off(inner);
                self.insert_at(container, index + 1, DomNode::Text(right));
            }
            DomNode::Container(_) => {
                let split = self.split_children_at(&child_handle, inner);
                let span = self
                    .lookup_node_mut(&child_handle)
                    .as_container_mut()
                    .unwrap();
                let right = span.split_off(split);
                self.insert_at(
                    container,
                    index + 1,
                    DomNode::Container(right),
                );
            }
            // Atomic one-unit nodes cannot contain an interior offset.
            DomNode::LineBreak | DomNode::Media(_) => {
                unreachable!("offset inside a one-unit node")
            }
        }
        index + 1
    }

    /// Decompose the covered content of `start..end` into whole-child
    /// segments, one per block (plus inline runs at the root). Both ends
    /// must already lie on child boundaries (see [`Self::split_boundary`]).
    pub(crate) fn covered_segments(
        &self,
        start: usize,
        end: usize,
    ) -> Vec<Segment> {
        let root = DomHandle::root();
        let mut segments = Vec::new();
        let mut run: Option<(usize, usize)> = None;
        let mut pos = 0;
        let children = self.document.children();
        for (i, child) in children.iter().enumerate() {
            if i > 0 && block_gap(&children[i - 1], child) {
                pos += 1;
            }
            let len = child.text_len();
            if child.is_block() {
                if let Some((s, e)) = run.take() {
                    segments.push(Segment {
                        parent: root.clone(),
                        start_index: s,
                        end_index: e,
                    });
                }
                if pos < end && pos + len > start {
                    if let Some(seg) = self.block_segment(
                        &root.child_handle(i),
                        pos,
                        start,
                        end,
                    ) {
                        segments.push(seg);
                    }
                }
            } else if pos >= start && pos + len <= end {
                match &mut run {
                    Some((_, e)) => *e = i + 1,
                    None => run = Some((i, i + 1)),
                }
            } else if let Some((s, e)) = run.take() {
                segments.push(Segment {
                    parent: root.clone(),
                    start_index: s,
                    end_index: e,
                });
            }
            pos += len;
        }
        if let Some((s, e)) = run {
            segments.push(Segment {
                parent: root.clone(),
                start_index: s,
                end_index: e,
            });
        }
        segments
    }

    fn block_segment(
        &self,
        block: &DomHandle,
        block_pos: usize,
        start: usize,
        end: usize,
    ) -> Option<Segment> {
        let children = self.lookup_container(block).children();
        let mut pos = block_pos;
        let mut run: Option<(usize, usize)> = None;
        for (i, child) in children.iter().enumerate() {
            let len = child.text_len();
            if pos >= start && pos + len <= end {
                match &mut run {
                    Some((_, e)) => *e = i + 1,
                    None => run = Some((i, i + 1)),
                }
            }
            pos += len;
        }
        run.map(|(s, e)| Segment {
            parent: block.clone(),
            start_index: s,
            end_index: e,
        })
    }

    /// Insert text at a document offset, splicing into an existing text
    /// node where one is adjacent, creating one otherwise.
    pub(crate) fn insert_text_at(
        &mut self,
        offset: usize,
        text: &Utf16Str,
    ) {
        self.insert_text_in(&DomHandle::root(), offset, text);
    }

    fn insert_text_in(
        &mut self,
        container: &DomHandle,
        local_offset: usize,
        text: &Utf16Str,
    ) {
        let children = self.lookup_container(container).children();
        let mut pos = 0;
        let mut action = None;
        for (i, child) in children.iter().enumerate() {
            if i > 0 && block_gap(&children[i - 1], child) {
                pos += 1;
            }
            let len = child.text_len();
            // Offsets in a gap snap to the start of the following child.
            let local = local_offset.max(pos);
            if local <= pos + len {
                action = Some(match child {
                    DomNode::Text(_) => Insertion::IntoText(i, local - pos),
                    DomNode::Container(_) => {
                        Insertion::Descend(i, local - pos)
                    }
                    DomNode::LineBreak | DomNode::Media(_) => {
                        if local == pos {
                            Insertion::NewTextAt(i)
                        } else {
                            Insertion::NewTextAt(i + 1)
                        }
                    }
                });
                break;
            }
            pos += len;
        }
        match action {
            Some(Insertion::IntoText(i, at)) => {
                let handle = container.child_handle(i);
                let DomNode::Text(node) = self.lookup_node_mut(&handle)
                else {
                    unreachable!()
                };
                node.insert(at, text);
            }
            Some(Insertion::Descend(i, at)) => {
                self.insert_text_in(&container.child_handle(i), at, text);
            }
            Some(Insertion::NewTextAt(i)) => {
                self.insert_at(
                    container,
                    i,
                    DomNode::Text(TextNode::new(text.to_owned())),
                );
            }
            None => {
                let node = DomNode::Text(TextNode::new(text.to_owned()));
                self.lookup_container_mut(container).append_child(node);
            }
        }
    }

    /// Delete the content between two document offsets, merging the
    /// surrounding blocks when the range crossed a block boundary.
    pub(crate) fn delete_range(&mut self, start: usize, end: usize) {
        if start == end {
            return;
        }
        self.split_boundary(end);
        self.split_boundary(start);
        let crossed_blocks = {
            let a = self.block_index_at(start);
            let b = self.block_index_at(end);
            a.is_some() && b.is_some() && a != b
        };
        for segment in self.covered_segments(start, end).iter().rev() {
            self.lookup_container_mut(&segment.parent)
                .children_mut()
                .drain(segment.start_index..segment.end_index);
        }
        self.remove_empty_containers();
        if crossed_blocks {
            self.merge_blocks_at(start);
        }
        self.merge_adjacent_text();
    }

    /// Join the block ending at `offset` with the block starting just
    /// after it, if both exist.
    fn merge_blocks_at(&mut self, offset: usize) {
        let mut pos = 0;
        let mut merge_index = None;
        let children = self.document.children();
        for (i, child) in children.iter().enumerate() {
            if i > 0 && block_gap(&children[i - 1], child) {
                pos += 1;
            }
            let len = child.text_len();
            if child.is_block()
                && pos + len == offset
                && children.get(i + 1).is_some_and(|n| n.is_block())
            {
                merge_index = Some(i);
                break;
            }
            pos += len;
        }
        if let Some(i) = merge_index {
            let DomNode::Container(mut removed) =
                self.document.children_mut().remove(i + 1)
            else {
                unreachable!()
            };
            let mut moved = removed.take_children();
            let DomNode::Container(target) =
                &mut self.document.children_mut()[i]
            else {
                unreachable!()
            };
            target.children_mut().append(&mut moved);
        }
        self.merge_adjacent_text();
    }

    /// Drop empty text nodes, empty style spans and empty blocks, bottom
    /// up. The root is allowed to be empty.
    pub(crate) fn remove_empty_containers(&mut self) {
        remove_empty_in(&mut self.document);
    }

    /// Join sibling text nodes throughout the tree.
    pub(crate) fn merge_adjacent_text(&mut self) {
        merge_text_in(&mut self.document);
    }

    /// A printable sketch of the tree, for tests and debugging.
    pub fn to_tree(&self) -> String {
        let mut out = String::new();
        push_tree_line(
            &DomNode::Container(self.document.clone()),
            &mut out,
            &mut Vec::new(),
            false,
        );
        out
    }

    /// Check the structural invariants the rest of the code relies on.
    #[cfg(any(test, feature = "assert-invariants"))]
    pub(crate) fn assert_invariants(&self) {
        assert!(
            matches!(self.document.kind(), ContainerNodeKind::Generic),
            "root must be a generic container"
        );
        for child in self.document.children() {
            assert_node_invariants(child, true);
        }
    }
}

enum Insertion {
    IntoText(usize, usize),
    Descend(usize, usize),
    NewTextAt(usize),
}

fn collect_locations(
    container: &ContainerNode,
    handle: &DomHandle,
    container_pos: usize,
    start: usize,
    end: usize,
    out: &mut Vec<DomLocation>,
) {
    let children = container.children();
    let mut pos = container_pos;
    for (i, child) in children.iter().enumerate() {
        if i > 0 && block_gap(&children[i - 1], child) {
            pos += 1;
        }
        let len = child.text_len();
        if start <= pos + len && end >= pos {
            let child_handle = handle.child_handle(i);
            out.push(DomLocation {
                node_handle: child_handle.clone(),
                position: pos,
                start_offset: start.saturating_sub(pos).min(len),
                end_offset: (end.saturating_sub(pos)).min(len),
                length: len,
                kind: child.kind(),
                is_leaf: !child.is_container(),
            });
            if let DomNode::Container(c) = child {
                collect_locations(c, &child_handle, pos, start, end, out);
            }
        }
        pos += len;
    }
}

fn push_plain_text(container: &ContainerNode, out: &mut Utf16String) {
    let children = container.children();
    for (i, child) in children.iter().enumerate() {
        if i > 0 && block_gap(&children[i - 1], child) {
            out.push('\n');
        }
        match child {
            DomNode::Container(c) => push_plain_text(c, out),
            DomNode::Text(t) => out.push_utfstr(t.data()),
            DomNode::LineBreak => out.push('\n'),
            DomNode::Media(_) => out.push('\u{FFFC}'),
        }
    }
}

fn remove_empty_in(container: &mut ContainerNode) {
    for child in container.children_mut() {
        if let DomNode::Container(c) = child {
            remove_empty_in(c);
        }
    }
    container.children_mut().retain(|child| match child {
        DomNode::Text(t) => !t.is_empty(),
        DomNode::Container(c) => !c.is_empty(),
        _ => true,
    });
}

fn merge_text_in(container: &mut ContainerNode) {
    let old = container.take_children();
    let mut merged: Vec<DomNode> = Vec::with_capacity(old.len());
    for mut child in old {
        if let DomNode::Container(c) = &mut child {
            merge_text_in(c);
        }
        match (merged.last_mut(), &child) {
            (Some(DomNode::Text(prev)), DomNode::Text(next)) => {
                prev.push_node(next);
            }
            _ => merged.push(child),
        }
    }
    container.set_children(merged);
}

#[cfg(any(test, feature = "assert-invariants"))]
fn assert_node_invariants(node: &DomNode, at_root: bool) {
    match node {
        DomNode::Container(c) => {
            assert!(
                !c.is_block() || at_root,
                "block containers must be direct children of the root"
            );
            assert!(!c.is_empty(), "containers must not be empty");
            if let Some(styles) = c.styles() {
                assert!(
                    !styles.is_empty(),
                    "style spans must carry at least one style"
                );
            }
            for child in c.children() {
                assert_node_invariants(child, false);
            }
        }
        DomNode::Text(t) => {
            assert!(!t.is_empty(), "text nodes must not be empty")
        }
        _ => {}
    }
}

fn push_tree_line(
    node: &DomNode,
    out: &mut String,
    ancestors_done: &mut Vec<bool>,
    is_last: bool,
) {
    if !ancestors_done.is_empty() {
        for &done in &ancestors_done[..ancestors_done.len() - 1] {
            out.push_str(if done { "  " } else { "│ " });
        }
        out.push_str(if is_last { "└>" } else { "├>" });
    }
    match node {
        DomNode::Container(c) => {
            let label = match c.kind() {
                ContainerNodeKind::Generic => String::new(),
                ContainerNodeKind::Paragraph => "p".into(),
                ContainerNodeKind::Heading(level) => level.to_string(),
                ContainerNodeKind::StyleSpan(styles) => {
                    format!("span style=\"{}\"", styles.css())
                }
            };
            out.push_str(&label);
            out.push('\n');
            let count = c.children().len();
            for (i, child) in c.children().iter().enumerate() {
                let last = i == count - 1;
                ancestors_done.push(last);
                push_tree_line(child, out, ancestors_done, last);
                ancestors_done.pop();
            }
        }
        DomNode::Text(t) => {
            out.push('"');
            out.push_str(&t.data().to_string());
            out.push_str("\"\n");
        }
        DomNode::LineBreak => out.push_str("br\n"),
        DomNode::Media(m) => {
            out.push_str(&format!("media \"{}\"\n", m.reference()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::nodes::TextNode;
    use crate::style::{SpanStyles, StyleKind};

    fn text(s: &str) -> DomNode {
        DomNode::Text(TextNode::from_str(s))
    }

    fn para(children: Vec<DomNode>) -> DomNode {
        DomNode::Container(ContainerNode::new_paragraph(children))
    }

    fn span(css_color: &str, children: Vec<DomNode>) -> DomNode {
        let styles =
            SpanStyles::with(StyleKind::TextColor, css_color.parse().unwrap());
        DomNode::Container(ContainerNode::new_style_span(styles, children))
    }

    #[test]
    fn text_len_counts_block_gaps() {
        let dom = Dom::new(vec![
            para(vec![text("ab")]),
            para(vec![text("cd")]),
        ]);
        assert_eq!(dom.text_len(), 5);
    }

    #[test]
    fn plain_text_uses_newlines_for_gaps() {
        let dom = Dom::new(vec![
            para(vec![text("ab")]),
            para(vec![text("cd"), DomNode::LineBreak, text("e")]),
        ]);
        assert_eq!(dom.to_plain_text().to_string(), "ab\ncd\ne");
    }

    #[test]
    fn find_range_locates_text_in_second_block() {
        let dom = Dom::new(vec![
            para(vec![text("ab")]),
            para(vec![text("cd")]),
        ]);
        let range = dom.find_range(4, 5);
        let leaf = range.leaves().last().unwrap();
        assert_eq!(leaf.node_handle.path(), &[1, 0]);
        assert_eq!(leaf.position, 3);
        assert_eq!(leaf.start_offset, 1);
        assert_eq!(leaf.end_offset, 2);
    }

    #[test]
    fn split_boundary_splits_a_text_node() {
        let mut dom = Dom::new(vec![text("hello")]);
        let (parent, index) = dom.split_boundary(2);
        assert!(parent.is_root());
        assert_eq!(index, 1);
        assert_eq!(dom.document().children().len(), 2);
        assert_eq!(dom.to_plain_text().to_string(), "hello");
    }

    #[test]
    fn split_boundary_splits_through_a_span() {
        let mut dom = Dom::new(vec![span("#ff0000", vec![text("abcd")])]);
        let (parent, index) = dom.split_boundary(2);
        assert!(parent.is_root());
        assert_eq!(index, 1);
        assert_eq!(dom.document().children().len(), 2);
        assert!(dom.document().children()[0].is_style_span());
        assert!(dom.document().children()[1].is_style_span());
        assert_eq!(dom.to_plain_text().to_string(), "abcd");
        dom.assert_invariants();
    }

    #[test]
    fn split_boundary_at_existing_boundary_is_a_noop() {
        let mut dom = Dom::new(vec![text("ab"), text("cd")]);
        let before = dom.clone();
        let (_, index) = dom.split_boundary(2);
        assert_eq!(index, 1);
        assert_eq!(dom, before);
    }

    #[test]
    fn covered_segments_split_per_block() {
        let mut dom = Dom::new(vec![
            para(vec![text("ab")]),
            para(vec![text("cd")]),
        ]);
        // Cover "b\nc".
        dom.split_boundary(4);
        dom.split_boundary(1);
        let segments = dom.covered_segments(1, 4);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].parent.path(), &[0]);
        assert_eq!(segments[0].start_index..segments[0].end_index, 1..2);
        assert_eq!(segments[1].parent.path(), &[1]);
        assert_eq!(segments[1].start_index..segments[1].end_index, 0..1);
    }

    #[test]
    fn insert_text_splices_into_existing_node() {
        let mut dom = Dom::new(vec![para(vec![text("ad")])]);
        dom.insert_text_at(1, Utf16String::from_str("bc").as_utfstr());
        assert_eq!(dom.to_plain_text().to_string(), "abcd");
        assert_eq!(
            dom.lookup_container(&DomHandle::from_path(vec![0]))
                .children()
                .len(),
            1
        );
    }

    #[test]
    fn delete_range_merges_crossed_blocks() {
        let mut dom = Dom::new(vec![
            para(vec![text("abc")]),
            para(vec![text("def")]),
        ]);
        // Delete "c\nd".
        dom.delete_range(2, 5);
        assert_eq!(dom.to_plain_text().to_string(), "abef");
        assert_eq!(dom.document().children().len(), 1);
        dom.assert_invariants();
    }

    #[test]
    fn delete_range_drops_emptied_blocks() {
        let mut dom = Dom::new(vec![
            para(vec![text("ab")]),
            para(vec![text("cd")]),
            para(vec![text("ef")]),
        ]);
        dom.delete_range(0, 5);
        assert_eq!(dom.to_plain_text().to_string(), "ef");
        dom.assert_invariants();
    }

    #[test]
    fn position_of_accounts_for_gaps() {
        let dom = Dom::new(vec![
            para(vec![text("ab")]),
            para(vec![text("cd")]),
        ]);
        assert_eq!(dom.position_of(&DomHandle::from_path(vec![1, 0])), 3);
    }
}
