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
use crate::AnnotationUpdate;

impl AnnotationModel {
    /// Snapshot the current state onto the undo stack. Called by every
    /// operation just before its first mutation, so a failed operation
    /// leaves no history entry.
    pub(crate) fn push_state_to_history(&mut self) {
        self.redo_stack.clear();
        self.undo_stack.push(self.state.clone());
    }

    /// Restore the state before the last operation.
    pub fn undo(&mut self) -> AnnotationUpdate {
        if self.is_composing() {
            return self.create_update_keep();
        }
        match self.undo_stack.pop() {
            Some(previous) => {
                self.redo_stack.push(self.state.clone());
                self.state = previous;
                self.create_update_replace_all()
            }
            None => self.create_update_keep(),
        }
    }

    /// Reapply the last undone operation.
    pub fn redo(&mut self) -> AnnotationUpdate {
        if self.is_composing() {
            return self.create_update_keep();
        }
        match self.redo_stack.pop() {
            Some(next) => {
                self.undo_stack.push(self.state.clone());
                self.state = next;
                self.create_update_replace_all()
            }
            None => self.create_update_keep(),
        }
    }
}
