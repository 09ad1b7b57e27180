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

use super::{AnnotationModel, SyncReason};
use crate::dom::{parser, Dom};
use crate::{AnnotationError, AnnotationUpdate};

impl AnnotationModel {
    /// Replace the document with the host's content value.
    ///
    /// Arriving mid-composition, the reset is deferred to composition
    /// end instead of clobbering the IME buffer.
    pub fn set_content_from_html(
        &mut self,
        html: &str,
    ) -> Result<AnnotationUpdate, AnnotationError> {
        if self.is_composing() {
            self.flush_queue
                .push_back(SyncReason::ExternalReset(html.to_string()));
            return Ok(self.create_update_keep());
        }
        // Parse before snapshotting: a rejected reset must leave the
        // history untouched.
        let dom = parser::parse(html)?;
        self.push_state_to_history();
        self.install_content(dom);
        Ok(self.create_update_replace_all())
    }

    /// Parse and install new content, caret at the document end.
    pub(crate) fn apply_content(
        &mut self,
        html: &str,
    ) -> Result<(), AnnotationError> {
        let dom = parser::parse(html)?;
        self.install_content(dom);
        Ok(())
    }

    fn install_content(&mut self, dom: Dom) {
        let len = dom.text_len();
        self.state.dom = dom;
        self.restore_selection_after_edit(len, len);
    }

    /// Empty the document.
    pub fn clear(&mut self) -> AnnotationUpdate {
        self.push_state_to_history();
        self.state.dom = Dom::new(Vec::new());
        self.restore_selection_after_edit(0, 0);
        self.create_update_replace_all()
    }

    /// The canonical serialized markup of the document.
    pub fn get_content_as_html(&self) -> String {
        self.state.dom.to_html()
    }

    /// The document as plain text: `'\n'` per block boundary or line
    /// break, U+FFFC per media embed.
    pub fn get_content_as_plain_text(&self) -> String {
        self.state.dom.to_plain_text().to_string()
    }

    /// A printable sketch of the tree, for debugging.
    pub fn to_tree(&self) -> String {
        self.state.dom.to_tree()
    }
}
