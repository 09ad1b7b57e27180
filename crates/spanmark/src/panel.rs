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

//! Toolbar panel state reported alongside every update.

use std::collections::HashMap;

use crate::{ColorValue, HeadingLevel};

/// The actions a toolbar can offer.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
pub enum AnnotationAction {
    TextColor,
    Highlight,
    Heading2,
    Heading3,
    Heading4,
    InsertMedia,
    Undo,
    Redo,
}

/// How a toolbar button should render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionState {
    /// Available and inactive.
    Enabled,
    /// Available and currently active at the cursor.
    Reversed,
    /// Not available in the current context.
    Disabled,
}

/// A snapshot of everything the toolbar needs to render itself.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelState {
    pub action_states: HashMap<AnnotationAction, ActionState>,
    /// Text color active at the cursor, if any.
    pub active_color: Option<ColorValue>,
    /// Highlight color active at the cursor, if any.
    pub active_highlight: Option<ColorValue>,
    /// Heading level of the block containing the cursor.
    pub heading: HeadingLevel,
}
