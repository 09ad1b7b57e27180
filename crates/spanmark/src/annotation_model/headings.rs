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

use super::AnnotationModel;
use crate::dom::nodes::{
    block_gap, ContainerNode, ContainerNodeKind, DomNode,
};
use crate::dom::DomHandle;
use crate::{AnnotationUpdate, HeadingLevel};

impl AnnotationModel {
    /// Set the heading level of the block containing the cursor.
    ///
    /// Works on a caret as well as a range: the whole enclosing block
    /// changes level. `Normal` turns a heading back into a paragraph.
    /// With the cursor in inline content outside any block, a new heading
    /// block is created around the enclosing inline run.
    pub fn set_heading_level(
        &mut self,
        level: HeadingLevel,
    ) -> AnnotationUpdate {
        if self.is_composing() {
            return self.create_update_keep();
        }
        let (s, e) = self.safe_selection();
        match self.state.dom.block_index_at(s) {
            Some(index) => {
                let handle = DomHandle::root().child_handle(index);
                let current = self
                    .state
                    .dom
                    .lookup_container(&handle)
                    .heading_level()
                    .unwrap_or(HeadingLevel::Normal);
                if current == level {
                    return self.create_update_keep();
                }
                self.push_state_to_history();
                let kind = match level {
                    HeadingLevel::Normal => ContainerNodeKind::Paragraph,
                    other => ContainerNodeKind::Heading(other),
                };
                self.state.dom.lookup_container_mut(&handle).set_kind(kind);
            }
            None => {
                // Inline content at the root, or an empty document.
                if level == HeadingLevel::Normal
                    || self.state.dom.is_empty()
                {
                    return self.create_update_keep();
                }
                self.push_state_to_history();
                self.wrap_inline_run_in_heading(s, level);
            }
        }
        self.restore_selection_after_edit(s, e);
        self.create_update_replace_all()
    }

    /// Wrap the maximal run of inline root children around `offset` in a
    /// new heading block. The run's neighbors are blocks (or document
    /// edges), so every text offset keeps its meaning.
    fn wrap_inline_run_in_heading(
        &mut self,
        offset: usize,
        level: HeadingLevel,
    ) {
        let children = self.state.dom.document().children();
        let mut pos = 0;
        let mut run_start = 0;
        let mut run = None;
        for (i, child) in children.iter().enumerate() {
            if i > 0 && block_gap(&children[i - 1], child) {
                pos += 1;
            }
            if child.is_block() {
                run_start = i + 1;
                pos += child.text_len();
                continue;
            }
            let len = child.text_len();
            if pos <= offset && offset <= pos + len {
                let mut run_end = i + 1;
                while run_end < children.len()
                    && !children[run_end].is_block()
                {
                    run_end += 1;
                }
                run = Some((run_start, run_end));
                break;
            }
            pos += len;
        }
        let Some((start, end)) = run else {
            return;
        };
        let drained: Vec<DomNode> = self
            .state
            .dom
            .document_mut()
            .children_mut()
            .drain(start..end)
            .collect();
        self.state.dom.document_mut().children_mut().insert(
            start,
            DomNode::Container(ContainerNode::new_heading(level, drained)),
        );
    }
}
