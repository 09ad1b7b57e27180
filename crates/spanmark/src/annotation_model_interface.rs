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

//! Defines the [`AnnotationModelInterface`] trait — the API contract a
//! platform layer programs against.
//!
//! [`AnnotationModel`] is the one implementation today; the trait exists
//! so hosts and test doubles consume the model through a stable surface.

use std::collections::HashMap;

use crate::{
    ActionState, AnnotationAction, AnnotationError, AnnotationModel,
    AnnotationUpdate, ColorValue, HeadingLevel, Location, PanelState,
};

/// The operation surface of the annotation engine.
///
/// All positions and ranges are UTF-16 code-unit offsets, matching
/// platform text APIs. Every mutating method answers with an
/// [`AnnotationUpdate`] telling the platform what changed; methods whose
/// preconditions can fail answer with a `Result` and leave the document
/// untouched on error.
pub trait AnnotationModelInterface {
    // -----------------------------------------------------------------------
    // Content lifecycle
    // -----------------------------------------------------------------------

    /// Replace all content with the host's markup value.
    fn set_content_from_html(
        &mut self,
        html: &str,
    ) -> Result<AnnotationUpdate, AnnotationError>;

    /// Clear all content and return to an empty document.
    fn clear(&mut self) -> AnnotationUpdate;

    /// Canonical serialized markup of the document.
    fn get_content_as_html(&self) -> String;

    /// Plain text, all annotations stripped.
    fn get_content_as_plain_text(&self) -> String;

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Report the live selection (UTF-16 code-unit offsets).
    fn select(&mut self, start: Location, end: Location) -> AnnotationUpdate;

    /// The current selection as ordered offsets.
    fn get_selection(&self) -> (Location, Location);

    // -----------------------------------------------------------------------
    // Text manipulation
    // -----------------------------------------------------------------------

    /// Replace the current selection with typed text.
    fn replace_text(&mut self, new_text: &str) -> AnnotationUpdate;

    /// Delete backward from the cursor (backspace key).
    fn backspace(&mut self) -> AnnotationUpdate;

    /// Delete forward from the cursor (delete key).
    fn delete(&mut self) -> AnnotationUpdate;

    /// Insert a line break (enter key).
    fn enter(&mut self) -> AnnotationUpdate;

    // -----------------------------------------------------------------------
    // Annotations
    // -----------------------------------------------------------------------

    /// Set the text color of the selected characters.
    fn apply_text_color(
        &mut self,
        color: ColorValue,
    ) -> Result<AnnotationUpdate, AnnotationError>;

    /// Set the highlight color of the selected characters.
    fn apply_highlight(
        &mut self,
        color: ColorValue,
    ) -> Result<AnnotationUpdate, AnnotationError>;

    /// Remove any text color from the selected characters.
    fn clear_text_color(
        &mut self,
    ) -> Result<AnnotationUpdate, AnnotationError>;

    /// Remove any highlight from the selected characters.
    fn clear_highlight(
        &mut self,
    ) -> Result<AnnotationUpdate, AnnotationError>;

    /// Set the heading level of the block containing the cursor.
    fn set_heading_level(&mut self, level: HeadingLevel) -> AnnotationUpdate;

    /// Embed a media reference at the cursor.
    fn insert_media(
        &mut self,
        src: &str,
    ) -> Result<AnnotationUpdate, AnnotationError>;

    // -----------------------------------------------------------------------
    // IME composition
    // -----------------------------------------------------------------------

    /// A composition session begins.
    fn composition_start(&mut self) -> AnnotationUpdate;

    /// The IME replaced its provisional text.
    fn composition_update(&mut self, text: &str) -> AnnotationUpdate;

    /// The IME committed its final text.
    fn composition_end(&mut self, text: &str) -> AnnotationUpdate;

    // -----------------------------------------------------------------------
    // Undo / Redo
    // -----------------------------------------------------------------------

    /// Undo the last editing operation.
    fn undo(&mut self) -> AnnotationUpdate;

    /// Redo a previously undone operation.
    fn redo(&mut self) -> AnnotationUpdate;

    // -----------------------------------------------------------------------
    // State queries
    // -----------------------------------------------------------------------

    /// Current state of every toolbar action.
    fn action_states(&self) -> HashMap<AnnotationAction, ActionState>;

    /// Full toolbar snapshot, including active colors and heading level.
    fn panel_state(&self) -> PanelState;

    /// A debug tree representation of the document.
    fn to_tree(&self) -> String;
}

impl AnnotationModelInterface for AnnotationModel {
    fn set_content_from_html(
        &mut self,
        html: &str,
    ) -> Result<AnnotationUpdate, AnnotationError> {
        AnnotationModel::set_content_from_html(self, html)
    }

    fn clear(&mut self) -> AnnotationUpdate {
        AnnotationModel::clear(self)
    }

    fn get_content_as_html(&self) -> String {
        AnnotationModel::get_content_as_html(self)
    }

    fn get_content_as_plain_text(&self) -> String {
        AnnotationModel::get_content_as_plain_text(self)
    }

    fn select(&mut self, start: Location, end: Location) -> AnnotationUpdate {
        AnnotationModel::select(self, start, end)
    }

    fn get_selection(&self) -> (Location, Location) {
        (self.state.start, self.state.end)
    }

    fn replace_text(&mut self, new_text: &str) -> AnnotationUpdate {
        AnnotationModel::replace_text(self, new_text)
    }

    fn backspace(&mut self) -> AnnotationUpdate {
        AnnotationModel::backspace(self)
    }

    fn delete(&mut self) -> AnnotationUpdate {
        AnnotationModel::delete(self)
    }

    fn enter(&mut self) -> AnnotationUpdate {
        AnnotationModel::enter(self)
    }

    fn apply_text_color(
        &mut self,
        color: ColorValue,
    ) -> Result<AnnotationUpdate, AnnotationError> {
        AnnotationModel::apply_text_color(self, color)
    }

    fn apply_highlight(
        &mut self,
        color: ColorValue,
    ) -> Result<AnnotationUpdate, AnnotationError> {
        AnnotationModel::apply_highlight(self, color)
    }

    fn clear_text_color(
        &mut self,
    ) -> Result<AnnotationUpdate, AnnotationError> {
        AnnotationModel::clear_text_color(self)
    }

    fn clear_highlight(
        &mut self,
    ) -> Result<AnnotationUpdate, AnnotationError> {
        AnnotationModel::clear_highlight(self)
    }

    fn set_heading_level(&mut self, level: HeadingLevel) -> AnnotationUpdate {
        AnnotationModel::set_heading_level(self, level)
    }

    fn insert_media(
        &mut self,
        src: &str,
    ) -> Result<AnnotationUpdate, AnnotationError> {
        AnnotationModel::insert_media(self, src)
    }

    fn composition_start(&mut self) -> AnnotationUpdate {
        AnnotationModel::composition_start(self)
    }

    fn composition_update(&mut self, text: &str) -> AnnotationUpdate {
        AnnotationModel::composition_update(self, text)
    }

    fn composition_end(&mut self, text: &str) -> AnnotationUpdate {
        AnnotationModel::composition_end(self, text)
    }

    fn undo(&mut self) -> AnnotationUpdate {
        AnnotationModel::undo(self)
    }

    fn redo(&mut self) -> AnnotationUpdate {
        AnnotationModel::redo(self)
    }

    fn action_states(&self) -> HashMap<AnnotationAction, ActionState> {
        self.panel_state().action_states
    }

    fn panel_state(&self) -> PanelState {
        AnnotationModel::panel_state(self)
    }

    fn to_tree(&self) -> String {
        AnnotationModel::to_tree(self)
    }
}
