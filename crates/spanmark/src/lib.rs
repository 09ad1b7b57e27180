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

//! Model code to power a selection-scoped rich text annotation editor.
//!
//! The model owns a markup tree ([`Dom`]) plus a selection expressed in
//! UTF-16 code units, and exposes the operations a platform layer drives:
//! applying and clearing character-level colors and highlights, heading
//! conversion, plain typing, media embedding and IME composition. Every
//! committed mutation returns an [`AnnotationUpdate`] carrying the new
//! serialized markup, which is what the host feeds back into its own
//! content model.
//!
//! The model is deliberately host-agnostic: there is no rendering
//! environment, no network and no timers in here. Platform layers read the
//! live selection however they like and report it through
//! [`AnnotationModel::select`] (or a [`SelectionSource`]).

pub mod annotation_model;
pub mod annotation_model_interface;
pub mod dom;
mod error;
mod location;
mod panel;
mod style;
mod update;

pub use annotation_model::{
    AnnotationModel, CompositionState, EditorState, FakeSelection,
    SelectionSource, SyncReason,
};
pub use annotation_model_interface::AnnotationModelInterface;
pub use dom::nodes::{ContainerNode, ContainerNodeKind, DomNode, TextNode};
pub use dom::{Dom, DomHandle, DomLocation, Range};
pub use error::{AnnotationError, HtmlParseError};
pub use location::Location;
pub use panel::{ActionState, AnnotationAction, PanelState};
pub use style::{ColorValue, HeadingLevel, SpanStyles, StyleKind};
pub use update::{AnnotationUpdate, ReplaceAll, Selection, TextUpdate};
