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

use std::collections::HashMap;
use std::collections::VecDeque;

use strum::IntoEnumIterator;

use super::{AnnotationModel, CompositionState, EditorState};
use crate::dom::nodes::DomNodeKind;
use crate::dom::{parser, Dom, DomHandle};
use crate::style::StyleKind;
use crate::{
    ActionState, AnnotationAction, AnnotationError, AnnotationUpdate,
    ColorValue, HeadingLevel, Location, PanelState,
};

impl AnnotationModel {
    /// An empty editor with a caret at the start.
    pub fn new() -> Self {
        Self::from_state(EditorState {
            dom: Dom::new(Vec::new()),
            start: Location::from(0),
            end: Location::from(0),
        })
    }

    /// An editor initialized from the host's content value, with the
    /// caret at the end of the document.
    pub fn from_html(html: &str) -> Result<Self, AnnotationError> {
        let dom = parser::parse(html)?;
        let len = dom.text_len();
        Ok(Self::from_state(EditorState {
            dom,
            start: Location::from(len),
            end: Location::from(len),
        }))
    }

    fn from_state(state: EditorState) -> Self {
        Self {
            state,
            composition: CompositionState::Idle,
            composition_base: 0,
            composition_len: 0,
            flush_queue: VecDeque::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            media_enabled: false,
        }
    }

    pub fn is_composing(&self) -> bool {
        self.composition == CompositionState::Composing
    }

    pub(crate) fn create_update_replace_all(&self) -> AnnotationUpdate {
        AnnotationUpdate::replace_all(
            self.state.dom.to_html(),
            self.state.start,
            self.state.end,
            self.panel_state(),
        )
    }

    pub(crate) fn create_update_keep(&self) -> AnnotationUpdate {
        AnnotationUpdate::keep(self.panel_state())
    }

    pub(crate) fn create_update_selection(&self) -> AnnotationUpdate {
        AnnotationUpdate::update_selection(
            self.state.start,
            self.state.end,
            self.panel_state(),
        )
    }

    /// The toolbar state for the current selection.
    pub fn panel_state(&self) -> PanelState {
        let (start, _) = self.safe_selection();
        let active_color = self.active_style_at(start, StyleKind::TextColor);
        let active_highlight =
            self.active_style_at(start, StyleKind::Highlight);
        let heading = self.heading_at(start);

        let mut action_states = HashMap::new();
        for action in AnnotationAction::iter() {
            action_states.insert(action, self.action_state(action, heading));
        }
        PanelState {
            action_states,
            active_color,
            active_highlight,
            heading,
        }
    }

    fn action_state(
        &self,
        action: AnnotationAction,
        heading: HeadingLevel,
    ) -> ActionState {
        if self.is_composing() {
            return ActionState::Disabled;
        }
        match action {
            AnnotationAction::Undo if self.undo_stack.is_empty() => {
                ActionState::Disabled
            }
            AnnotationAction::Redo if self.redo_stack.is_empty() => {
                ActionState::Disabled
            }
            AnnotationAction::InsertMedia if !self.media_enabled => {
                ActionState::Disabled
            }
            AnnotationAction::TextColor
                if self.panel_active(StyleKind::TextColor) =>
            {
                ActionState::Reversed
            }
            AnnotationAction::Highlight
                if self.panel_active(StyleKind::Highlight) =>
            {
                ActionState::Reversed
            }
            AnnotationAction::Heading2 if heading == HeadingLevel::H2 => {
                ActionState::Reversed
            }
            AnnotationAction::Heading3 if heading == HeadingLevel::H3 => {
                ActionState::Reversed
            }
            AnnotationAction::Heading4 if heading == HeadingLevel::H4 => {
                ActionState::Reversed
            }
            _ => ActionState::Enabled,
        }
    }

    fn panel_active(&self, kind: StyleKind) -> bool {
        let (start, _) = self.safe_selection();
        self.active_style_at(start, kind).is_some()
    }

    /// The effective color of `kind` at a document offset: the value set
    /// by the innermost enclosing style span that carries one.
    pub(crate) fn active_style_at(
        &self,
        offset: usize,
        kind: StyleKind,
    ) -> Option<ColorValue> {
        let range = self.state.dom.find_range(offset, offset);
        let mut active = None;
        // Locations run ancestors first, so the innermost value wins.
        for location in range.locations_of_kind(DomNodeKind::StyleSpan) {
            // A caret carries the style of the character before it: a
            // span starting exactly at the caret does not enclose it.
            let enclosing = if offset == 0 {
                location.position == 0 && location.length > 0
            } else {
                location.position < offset
                    && offset <= location.position + location.length
            };
            if !enclosing {
                continue;
            }
            let container =
                self.state.dom.lookup_container(&location.node_handle);
            if let Some(styles) = container.styles() {
                if let Some(value) = styles.get(kind) {
                    active = Some(value.clone());
                }
            }
        }
        active
    }

    /// The heading level of the block containing a document offset,
    /// `Normal` outside any heading.
    pub(crate) fn heading_at(&self, offset: usize) -> HeadingLevel {
        match self.state.dom.block_index_at(offset) {
            Some(i) => self
                .state
                .dom
                .lookup_container(&DomHandle::root().child_handle(i))
                .heading_level()
                .unwrap_or(HeadingLevel::Normal),
            None => HeadingLevel::Normal,
        }
    }
}

impl Default for AnnotationModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_model_is_empty_with_caret_at_start() {
        let model = AnnotationModel::new();
        assert!(model.state.dom.is_empty());
        assert_eq!(model.state.start, 0usize);
        assert_eq!(model.state.end, 0usize);
    }

    #[test]
    fn from_html_puts_caret_at_document_end() {
        let model = AnnotationModel::from_html("<p>ab</p><p>cd</p>").unwrap();
        assert_eq!(model.state.start, 5usize);
    }

    #[test]
    fn panel_reports_heading_at_cursor() {
        let mut model =
            AnnotationModel::from_html("<h3>Title</h3><p>Body</p>").unwrap();
        model.select(Location::from(2), Location::from(2));
        let panel = model.panel_state();
        assert_eq!(panel.heading, HeadingLevel::H3);
        assert_eq!(
            panel.action_states[&AnnotationAction::Heading3],
            ActionState::Reversed
        );
        assert_eq!(
            panel.action_states[&AnnotationAction::Heading2],
            ActionState::Enabled
        );
    }

    #[test]
    fn panel_reports_active_highlight_inside_span() {
        let mut model = AnnotationModel::from_html(
            "ab<span style=\"background-color: #fef08a;\">cd</span>ef",
        )
        .unwrap();
        model.select(Location::from(3), Location::from(3));
        let panel = model.panel_state();
        assert_eq!(
            panel.active_highlight.as_ref().map(|c| c.as_str()),
            Some("#fef08a")
        );
        assert_eq!(panel.active_color, None);
        assert_eq!(
            panel.action_states[&AnnotationAction::Highlight],
            ActionState::Reversed
        );
    }

    #[test]
    fn media_action_is_disabled_until_enabled() {
        let mut model = AnnotationModel::new();
        assert_eq!(
            model.panel_state().action_states[&AnnotationAction::InsertMedia],
            ActionState::Disabled
        );
        model.enable_media();
        assert_eq!(
            model.panel_state().action_states[&AnnotationAction::InsertMedia],
            ActionState::Enabled
        );
    }
}
