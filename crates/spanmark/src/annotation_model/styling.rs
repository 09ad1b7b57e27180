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

//! The style reconciler.
//!
//! Applying a color works the same way whether the selection is clean
//! text, already carries that color, or overlaps existing spans: split
//! the tree at the selection edges, strip the target property from
//! everything covered, then wrap each covered run in one fresh span.
//! Clearing is the same walk without the wrap. Stripping before wrapping
//! is what makes the operation idempotent, and stripping only the target
//! property is what keeps the other style kind untouched.

use super::AnnotationModel;
use crate::dom::nodes::{ContainerNode, DomNode};
use crate::style::{SpanStyles, StyleKind};
use crate::{AnnotationError, AnnotationUpdate, ColorValue};

impl AnnotationModel {
    /// Set the text color of the selected characters.
    pub fn apply_text_color(
        &mut self,
        color: ColorValue,
    ) -> Result<AnnotationUpdate, AnnotationError> {
        self.set_style(StyleKind::TextColor, Some(color))
    }

    /// Set the highlight (background) color of the selected characters.
    pub fn apply_highlight(
        &mut self,
        color: ColorValue,
    ) -> Result<AnnotationUpdate, AnnotationError> {
        self.set_style(StyleKind::Highlight, Some(color))
    }

    /// Remove any text color from the selected characters.
    pub fn clear_text_color(
        &mut self,
    ) -> Result<AnnotationUpdate, AnnotationError> {
        self.set_style(StyleKind::TextColor, None)
    }

    /// Remove any highlight from the selected characters.
    pub fn clear_highlight(
        &mut self,
    ) -> Result<AnnotationUpdate, AnnotationError> {
        self.set_style(StyleKind::Highlight, None)
    }

    fn set_style(
        &mut self,
        kind: StyleKind,
        value: Option<ColorValue>,
    ) -> Result<AnnotationUpdate, AnnotationError> {
        if self.is_composing() {
            return Ok(self.create_update_keep());
        }
        let (s, e) = self.safe_selection();
        if s == e {
            return Err(AnnotationError::NoSelection);
        }
        let selected = self.state.dom.text_between(s, e).to_string();
        if selected.trim().is_empty() {
            return Err(AnnotationError::NoSelection);
        }

        self.push_state_to_history();
        self.state.dom.split_boundary(e);
        self.state.dom.split_boundary(s);
        let segments = self.state.dom.covered_segments(s, e);
        // Segments are whole-child index runs; editing back to front
        // keeps the earlier ones valid.
        for segment in segments.iter().rev() {
            let drained: Vec<DomNode> = self
                .state
                .dom
                .lookup_container_mut(&segment.parent)
                .children_mut()
                .drain(segment.start_index..segment.end_index)
                .collect();
            let stripped = strip_style(drained, kind);
            let replacement = match &value {
                Some(color) if !stripped.is_empty() => {
                    vec![DomNode::Container(ContainerNode::new_style_span(
                        SpanStyles::with(kind, color.clone()),
                        stripped,
                    ))]
                }
                _ => stripped,
            };
            let children = self
                .state
                .dom
                .lookup_container_mut(&segment.parent)
                .children_mut();
            for (i, node) in replacement.into_iter().enumerate() {
                children.insert(segment.start_index + i, node);
            }
        }
        self.state.dom.remove_empty_containers();
        self.state.dom.merge_adjacent_text();

        // Re-nesting never moves a character, so the old offsets still
        // address the same content.
        self.restore_selection_after_edit(s, e);
        #[cfg(any(test, feature = "assert-invariants"))]
        self.state.dom.assert_invariants();
        Ok(self.create_update_replace_all())
    }
}

/// Remove one style property from a run of nodes, unwrapping any span
/// left with no properties at all. Spans carrying the other property
/// survive with their remaining styles.
fn strip_style(nodes: Vec<DomNode>, kind: StyleKind) -> Vec<DomNode> {
    let mut out: Vec<DomNode> = Vec::new();
    for node in nodes {
        match node {
            DomNode::Container(mut c) if c.is_style_span() => {
                let children = strip_style(c.take_children(), kind);
                let styles =
                    c.styles_mut().expect("style span carries styles");
                styles.set(kind, None);
                if styles.is_empty() {
                    for child in children {
                        push_merging(&mut out, child);
                    }
                } else {
                    c.set_children(children);
                    out.push(DomNode::Container(c));
                }
            }
            other => push_merging(&mut out, other),
        }
    }
    out
}

fn push_merging(out: &mut Vec<DomNode>, node: DomNode) {
    match (out.last_mut(), &node) {
        (Some(DomNode::Text(prev)), DomNode::Text(next)) => {
            prev.push_node(next);
        }
        _ => out.push(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Location;

    fn model_with_selection(
        html: &str,
        start: usize,
        end: usize,
    ) -> AnnotationModel {
        let mut model = AnnotationModel::from_html(html).unwrap();
        model.select(Location::from(start), Location::from(end));
        model
    }

    fn color(value: &str) -> ColorValue {
        ColorValue::parse(value).unwrap()
    }

    #[test]
    fn highlighting_a_word_wraps_it_in_a_span() {
        let mut model = model_with_selection("Hello world", 6, 11);
        model.apply_highlight(color("#fef08a")).unwrap();
        assert_eq!(
            model.state.dom.to_html(),
            "Hello <span style=\"background-color: #fef08a;\">world</span>"
        );
        assert_eq!(model.state.start, 6usize);
        assert_eq!(model.state.end, 11usize);
    }

    #[test]
    fn applying_the_same_color_twice_is_byte_identical() {
        let mut model = model_with_selection("Hello world", 6, 11);
        model.apply_highlight(color("#fef08a")).unwrap();
        let first = model.state.dom.to_html();
        model.select(Location::from(6), Location::from(11));
        model.apply_highlight(color("#fef08a")).unwrap();
        assert_eq!(model.state.dom.to_html(), first);
    }

    #[test]
    fn reapplying_replaces_rather_than_nests() {
        let mut model = model_with_selection("abcd", 0, 4);
        model.apply_text_color(color("#ff0000")).unwrap();
        model.select(Location::from(0), Location::from(4));
        model.apply_text_color(color("#00ff00")).unwrap();
        assert_eq!(
            model.state.dom.to_html(),
            "<span style=\"color: #00ff00;\">abcd</span>"
        );
    }

    #[test]
    fn color_and_highlight_do_not_interfere() {
        let mut model = model_with_selection("abcd", 0, 4);
        model.apply_highlight(color("#fef08a")).unwrap();
        model.select(Location::from(0), Location::from(4));
        model.apply_text_color(color("#ff0000")).unwrap();
        let html = model.state.dom.to_html();
        assert!(html.contains("background-color: #fef08a;"), "{html}");
        assert!(html.contains("color: #ff0000;"), "{html}");
        // Clearing the color leaves the highlight alone.
        model.select(Location::from(0), Location::from(4));
        model.clear_text_color().unwrap();
        assert_eq!(
            model.state.dom.to_html(),
            "<span style=\"background-color: #fef08a;\">abcd</span>"
        );
    }

    #[test]
    fn clearing_the_middle_splits_the_span() {
        let mut model = model_with_selection("abcdef", 0, 6);
        model.apply_text_color(color("#ff0000")).unwrap();
        model.select(Location::from(2), Location::from(4));
        model.clear_text_color().unwrap();
        assert_eq!(
            model.state.dom.to_html(),
            "<span style=\"color: #ff0000;\">ab</span>cd\
             <span style=\"color: #ff0000;\">ef</span>"
        );
    }

    #[test]
    fn clearing_everything_leaves_no_empty_spans() {
        let mut model = model_with_selection("abcd", 0, 4);
        model.apply_text_color(color("#ff0000")).unwrap();
        model.select(Location::from(0), Location::from(4));
        model.clear_text_color().unwrap();
        assert_eq!(model.state.dom.to_html(), "abcd");
    }

    #[test]
    fn styling_across_blocks_wraps_each_block_run() {
        // Offsets 1..5 cover "bc", the block gap, and "d".
        let mut model = model_with_selection("<p>abc</p><p>def</p>", 1, 5);
        model.apply_highlight(color("#fef08a")).unwrap();
        assert_eq!(
            model.state.dom.to_html(),
            "<p>a<span style=\"background-color: #fef08a;\">bc</span></p>\
             <p><span style=\"background-color: #fef08a;\">d</span>ef</p>"
        );
    }

    #[test]
    fn collapsed_selection_is_rejected_without_mutation() {
        let mut model = model_with_selection("abcd", 2, 2);
        let before = model.state.dom.clone();
        let result = model.apply_text_color(color("#ff0000"));
        assert!(matches!(result, Err(AnnotationError::NoSelection)));
        assert_eq!(model.state.dom, before);
        assert!(model.undo_stack.is_empty());
    }

    #[test]
    fn whitespace_only_selection_is_rejected() {
        let mut model = model_with_selection("ab   cd", 2, 5);
        assert!(matches!(
            model.apply_highlight(color("#fef08a")),
            Err(AnnotationError::NoSelection)
        ));
    }

    #[test]
    fn mid_surrogate_selection_styles_the_whole_character() {
        // Offset 2 splits the 💩 surrogate pair; the selection widens to
        // cover it rather than slicing mid-character.
        let mut model = model_with_selection("a\u{1F4A9}b", 2, 3);
        model.apply_text_color(color("#ff0000")).unwrap();
        assert_eq!(
            model.state.dom.to_html(),
            "a<span style=\"color: #ff0000;\">\u{1F4A9}</span>b"
        );
    }

    #[test]
    fn partial_overlap_re_anchors_the_existing_span() {
        let mut model = model_with_selection("abcdef", 0, 4);
        model.apply_text_color(color("#ff0000")).unwrap();
        // Extend color over the tail with a different value.
        model.select(Location::from(2), Location::from(6));
        model.apply_text_color(color("#0000ff")).unwrap();
        assert_eq!(
            model.state.dom.to_html(),
            "<span style=\"color: #ff0000;\">ab</span>\
             <span style=\"color: #0000ff;\">cdef</span>"
        );
    }
}
