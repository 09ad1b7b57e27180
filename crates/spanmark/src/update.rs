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

//! Updates returned to the platform layer after each operation.

use crate::{Location, PanelState};

/// What the platform layer must do to its view after an operation.
///
/// A `ReplaceAll` is the model-side equivalent of invoking the host's
/// `onChange` callback: it carries the full serialized markup the host
/// should store as its content value.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationUpdate {
    pub text_update: TextUpdate,
    pub panel_state: PanelState,
}

impl AnnotationUpdate {
    /// Nothing changed; keep the current content and selection.
    pub fn keep(panel_state: PanelState) -> Self {
        Self {
            text_update: TextUpdate::Keep,
            panel_state,
        }
    }

    /// Replace the whole content value and move the selection.
    pub fn replace_all(
        replacement_html: String,
        start: Location,
        end: Location,
        panel_state: PanelState,
    ) -> Self {
        Self {
            text_update: TextUpdate::ReplaceAll(ReplaceAll {
                replacement_html,
                start,
                end,
            }),
            panel_state,
        }
    }

    /// Content unchanged, selection moved.
    pub fn update_selection(
        start: Location,
        end: Location,
        panel_state: PanelState,
    ) -> Self {
        Self {
            text_update: TextUpdate::Select(Selection { start, end }),
            panel_state,
        }
    }

    /// Whether this update carries new content for the host.
    pub fn is_content_changed(&self) -> bool {
        matches!(self.text_update, TextUpdate::ReplaceAll(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TextUpdate {
    Keep,
    ReplaceAll(ReplaceAll),
    Select(Selection),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReplaceAll {
    pub replacement_html: String,
    pub start: Location,
    pub end: Location,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub start: Location,
    pub end: Location,
}
