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

//! The model itself: one struct, with its operations split per concern
//! into the submodules of this directory.

mod base;
mod composition;
mod content;
mod cursor;
mod headings;
mod media;
mod selection;
mod styling;
mod text_ops;
mod undo_redo;

use std::collections::VecDeque;

pub use selection::{FakeSelection, SelectionSource};

use crate::dom::Dom;
use crate::Location;

/// Whether an IME composition session is in progress.
///
/// While `Composing`, every mutating operation other than the
/// `composition_*` family is a no-op: the IME owns the text around the
/// cursor and a content replacement underneath it would clobber its
/// buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositionState {
    #[default]
    Idle,
    Composing,
}

/// Why a content sync was deferred while a composition was in progress.
///
/// Deferred syncs are flushed, in order, by the single update that
/// `composition_end` produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncReason {
    /// A composition update owed the host a content sync.
    CompositionCommit,
    /// The host asked to reset the content mid-composition; the markup it
    /// supplied is applied at composition end.
    ExternalReset(String),
}

/// Everything that undo and redo snapshot: the tree plus the selection.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorState {
    pub dom: Dom,
    pub start: Location,
    pub end: Location,
}

/// The annotation engine.
///
/// One instance owns the canonical document and selection for one editor
/// surface. The platform layer reports selection movement through
/// [`AnnotationModel::select`] and invokes operations; each operation
/// answers with an [`crate::AnnotationUpdate`] telling the host what, if
/// anything, to replace.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationModel {
    pub state: EditorState,
    pub(crate) composition: CompositionState,
    /// Document offset at which the live composition text starts.
    pub(crate) composition_base: usize,
    /// Length of the live composition text, UTF-16 code units.
    pub(crate) composition_len: usize,
    pub(crate) flush_queue: VecDeque<SyncReason>,
    pub(crate) undo_stack: Vec<EditorState>,
    pub(crate) redo_stack: Vec<EditorState>,
    pub(crate) media_enabled: bool,
}
