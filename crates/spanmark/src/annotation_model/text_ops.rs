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

use unicode_segmentation::UnicodeSegmentation;
use widestring::Utf16String;

use super::AnnotationModel;
use crate::dom::nodes::DomNode;
use crate::AnnotationUpdate;

impl AnnotationModel {
    /// Replace the selection with typed text. With a caret, this is
    /// plain insertion.
    pub fn replace_text(&mut self, new_text: &str) -> AnnotationUpdate {
        if self.is_composing() {
            return self.create_update_keep();
        }
        let (s, e) = self.safe_selection();
        if s == e && new_text.is_empty() {
            return self.create_update_keep();
        }
        self.push_state_to_history();
        if s != e {
            self.state.dom.delete_range(s, e);
        }
        let text = Utf16String::from_str(new_text);
        let caret = s + text.len();
        if !text.is_empty() {
            self.state.dom.insert_text_at(s, &text);
            self.state.dom.merge_adjacent_text();
        }
        self.restore_selection_after_edit(caret, caret);
        self.create_update_replace_all()
    }

    /// Insert a line break at the cursor, replacing any selection.
    pub fn enter(&mut self) -> AnnotationUpdate {
        if self.is_composing() {
            return self.create_update_keep();
        }
        self.push_state_to_history();
        let (s, e) = self.safe_selection();
        if s != e {
            self.state.dom.delete_range(s, e);
        }
        let (parent, index) = self.state.dom.split_boundary(s);
        self.state.dom.insert_at(&parent, index, DomNode::LineBreak);
        self.restore_selection_after_edit(s + 1, s + 1);
        self.create_update_replace_all()
    }

    /// Delete the selection, or the grapheme before the caret.
    pub fn backspace(&mut self) -> AnnotationUpdate {
        if self.is_composing() {
            return self.create_update_keep();
        }
        let (s, e) = self.safe_selection();
        if s == e {
            if s == 0 {
                return self.create_update_keep();
            }
            let text = self.state.dom.to_plain_text().to_string();
            let from = prev_grapheme_boundary(&text, s);
            self.push_state_to_history();
            self.state.dom.delete_range(from, s);
            self.restore_selection_after_edit(from, from);
        } else {
            self.push_state_to_history();
            self.state.dom.delete_range(s, e);
            self.restore_selection_after_edit(s, s);
        }
        self.create_update_replace_all()
    }

    /// Delete the selection, or the grapheme after the caret.
    pub fn delete(&mut self) -> AnnotationUpdate {
        if self.is_composing() {
            return self.create_update_keep();
        }
        let (s, e) = self.safe_selection();
        if s == e {
            if s == self.state.dom.text_len() {
                return self.create_update_keep();
            }
            let text = self.state.dom.to_plain_text().to_string();
            let to = next_grapheme_boundary(&text, s);
            self.push_state_to_history();
            self.state.dom.delete_range(s, to);
        } else {
            self.push_state_to_history();
            self.state.dom.delete_range(s, e);
        }
        self.restore_selection_after_edit(s, s);
        self.create_update_replace_all()
    }
}

/// The UTF-16 offset of the grapheme boundary before `offset`.
///
/// Plain-text offsets line up with document offsets because block gaps
/// and line breaks render as one `'\n'` and media as one U+FFFC, each a
/// single UTF-16 unit.
fn prev_grapheme_boundary(text: &str, offset: usize) -> usize {
    let mut pos = 0;
    for grapheme in text.graphemes(true) {
        let width = grapheme.encode_utf16().count();
        if pos + width >= offset {
            return pos;
        }
        pos += width;
    }
    pos
}

/// The UTF-16 offset of the grapheme boundary after `offset`.
fn next_grapheme_boundary(text: &str, offset: usize) -> usize {
    let mut pos = 0;
    for grapheme in text.graphemes(true) {
        let width = grapheme.encode_utf16().count();
        if pos + width > offset {
            return pos + width;
        }
        pos += width;
    }
    pos
}
