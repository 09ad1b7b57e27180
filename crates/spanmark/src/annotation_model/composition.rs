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

//! IME composition handling.
//!
//! Between `composition_start` and `composition_end` the IME owns the
//! text around the cursor: the model tracks the provisional text but
//! answers every update with `Keep`, deferring the content sync. The
//! single `ReplaceAll` produced by `composition_end` flushes everything
//! that was deferred, so the host's content value is rewritten exactly
//! once per composition session.

use widestring::Utf16String;

use super::{AnnotationModel, CompositionState, SyncReason};
use crate::AnnotationUpdate;

impl AnnotationModel {
    /// An IME composition session begins. Replaces any selection, then
    /// hands the cursor over to the IME.
    pub fn composition_start(&mut self) -> AnnotationUpdate {
        if self.is_composing() {
            return self.create_update_keep();
        }
        self.push_state_to_history();
        let (s, e) = self.safe_selection();
        if s != e {
            self.state.dom.delete_range(s, e);
            self.restore_selection_after_edit(s, s);
        }
        self.composition = CompositionState::Composing;
        self.composition_base = s;
        self.composition_len = 0;
        self.create_update_keep()
    }

    /// The IME replaced its provisional text. The document tracks it,
    /// but no content sync is emitted until the session ends.
    pub fn composition_update(&mut self, text: &str) -> AnnotationUpdate {
        if !self.is_composing() {
            // A stray update outside a session behaves like typing.
            return self.replace_text(text);
        }
        self.replace_composition_text(text);
        self.flush_queue.push_back(SyncReason::CompositionCommit);
        self.create_update_keep()
    }

    /// The IME committed. Applies the final text, flushes every deferred
    /// sync, and answers with the session's single `ReplaceAll`.
    pub fn composition_end(&mut self, text: &str) -> AnnotationUpdate {
        if !self.is_composing() {
            return self.replace_text(text);
        }
        self.replace_composition_text(text);
        self.composition = CompositionState::Idle;
        self.composition_len = 0;

        let deferred: Vec<SyncReason> = self.flush_queue.drain(..).collect();
        if !deferred.is_empty() {
            log::debug!(
                "flushing {} deferred content syncs at composition end",
                deferred.len()
            );
        }
        for reason in deferred {
            if let SyncReason::ExternalReset(html) = reason {
                // A host reset that arrived mid-composition wins over the
                // composed text, as it would have had it arrived idle.
                if let Err(error) = self.apply_content(&html) {
                    log::warn!(
                        "dropping deferred content reset that no longer \
                         parses: {error}"
                    );
                }
            }
        }
        self.create_update_replace_all()
    }

    fn replace_composition_text(&mut self, text: &str) {
        let base = self.composition_base;
        if self.composition_len > 0 {
            self.state.dom.delete_range(base, base + self.composition_len);
        }
        let text = Utf16String::from_str(text);
        let len = text.len();
        if len > 0 {
            self.state.dom.insert_text_at(base, &text);
            self.state.dom.merge_adjacent_text();
        }
        self.composition_len = len;
        self.restore_selection_after_edit(base + len, base + len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnnotationError, ColorValue, Location, TextUpdate};

    fn model_with_cursor(html: &str, at: usize) -> AnnotationModel {
        let mut model = AnnotationModel::from_html(html).unwrap();
        model.select(Location::from(at), Location::from(at));
        model
    }

    #[test]
    fn composition_updates_keep_and_end_replaces_once() {
        let mut model = model_with_cursor("ab", 1);
        let start = model.composition_start();
        assert!(matches!(start.text_update, TextUpdate::Keep));

        let u1 = model.composition_update("n");
        let u2 = model.composition_update("ni");
        assert!(matches!(u1.text_update, TextUpdate::Keep));
        assert!(matches!(u2.text_update, TextUpdate::Keep));
        assert_eq!(model.get_content_as_plain_text(), "anib");

        let end = model.composition_end("に");
        assert!(end.is_content_changed());
        assert_eq!(model.state.dom.to_html(), "aにb");
        assert!(!model.is_composing());
    }

    #[test]
    fn mutating_operations_are_noops_while_composing() {
        let mut model = model_with_cursor("abcd", 2);
        model.composition_start();
        model.composition_update("x");

        let update = model.replace_text("ignored");
        assert!(matches!(update.text_update, TextUpdate::Keep));
        let styled = model
            .apply_text_color(ColorValue::parse("#ff0000").unwrap())
            .unwrap();
        assert!(matches!(styled.text_update, TextUpdate::Keep));
        assert_eq!(model.get_content_as_plain_text(), "abxcd");
    }

    #[test]
    fn composition_replaces_the_selection_first() {
        let mut model = AnnotationModel::from_html("hello").unwrap();
        model.select(Location::from(1), Location::from(4));
        model.composition_start();
        model.composition_end("i");
        assert_eq!(model.state.dom.to_html(), "hio");
    }

    #[test]
    fn external_reset_during_composition_is_deferred_then_applied() {
        let mut model = model_with_cursor("ab", 1);
        model.composition_start();
        model.composition_update("x");

        let update = model.set_content_from_html("<p>reset</p>").unwrap();
        assert!(matches!(update.text_update, TextUpdate::Keep));
        // The reset has not clobbered the composition buffer.
        assert_eq!(model.get_content_as_plain_text(), "axb");

        let end = model.composition_end("x");
        assert!(end.is_content_changed());
        assert_eq!(model.state.dom.to_html(), "<p>reset</p>");
    }

    #[test]
    fn stray_update_outside_a_session_behaves_like_typing() {
        let mut model = model_with_cursor("ab", 1);
        let update = model.composition_end("x");
        assert!(update.is_content_changed());
        assert_eq!(model.state.dom.to_html(), "axb");
    }

    #[test]
    fn style_errors_still_surface_while_composing() {
        // Collapsed selection inside a session: the composition guard
        // answers before the selection check.
        let mut model = model_with_cursor("ab", 1);
        model.composition_start();
        let result =
            model.apply_text_color(ColorValue::parse("#ff0000").unwrap());
        assert!(!matches!(result, Err(AnnotationError::NoSelection)));
    }
}
