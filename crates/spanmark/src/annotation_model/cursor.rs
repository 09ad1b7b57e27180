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
use crate::Location;

impl AnnotationModel {
    /// Re-anchor the selection after a structural edit.
    ///
    /// Edits that only re-nest content keep every text offset valid, so
    /// restoring the pre-edit offsets lands on the same characters in the
    /// new tree. If an offset no longer fits the document the selection
    /// snaps to the document end rather than being dropped.
    pub(crate) fn restore_selection_after_edit(
        &mut self,
        start: usize,
        end: usize,
    ) {
        let len = self.state.dom.text_len();
        if start > len || end > len {
            log::warn!(
                "restored selection {start}..{end} outside document of \
                 length {len}; snapping to end"
            );
        }
        let start = start.min(len);
        let end = end.min(len).max(start);
        self.state.start = Location::from(start);
        self.state.end = Location::from(end);
    }
}
