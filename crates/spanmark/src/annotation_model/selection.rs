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
use crate::{AnnotationUpdate, Location};

/// Where the live selection comes from.
///
/// The model never reaches into a rendering environment itself; the
/// platform layer reads its own selection APIs and reports the result
/// through an implementation of this trait (or calls
/// [`AnnotationModel::select`] directly).
pub trait SelectionSource {
    /// The current selection in UTF-16 code units, anchor before focus,
    /// or `None` when the selection is outside the editor.
    fn current_selection(&self) -> Option<(Location, Location)>;
}

/// A [`SelectionSource`] holding a fixed selection. Used by tests and by
/// hosts that track the selection themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FakeSelection {
    pub start: Location,
    pub end: Location,
}

impl SelectionSource for FakeSelection {
    fn current_selection(&self) -> Option<(Location, Location)> {
        Some((self.start, self.end))
    }
}

impl AnnotationModel {
    /// Report a selection change from the platform layer.
    ///
    /// The ends may arrive in either order; out-of-bounds offsets are
    /// clamped to the document, and offsets inside a surrogate pair are
    /// snapped to a character boundary. The host already renders the
    /// selection it reported, so the returned update asks it to move
    /// only when the model had to adjust the offsets.
    pub fn select(
        &mut self,
        start: Location,
        end: Location,
    ) -> AnnotationUpdate {
        let (mut s, mut e) = (usize::from(start), usize::from(end));
        if s > e {
            std::mem::swap(&mut s, &mut e);
        }
        let len = self.state.dom.text_len();
        if e > len {
            log::warn!(
                "selection {s}..{e} beyond document length {len}; clamping"
            );
        }
        let (snapped_s, snapped_e) =
            self.snap_selection(s.min(len), e.min(len));
        self.state.start = Location::from(snapped_s);
        self.state.end = Location::from(snapped_e);
        if (snapped_s, snapped_e) == (s, e) {
            self.create_update_keep()
        } else {
            self.create_update_selection()
        }
    }

    /// Pull the current selection from a [`SelectionSource`].
    pub fn sync_selection(
        &mut self,
        source: &impl SelectionSource,
    ) -> AnnotationUpdate {
        match source.current_selection() {
            Some((start, end)) => self.select(start, end),
            None => self.create_update_keep(),
        }
    }

    /// True when the selection covers at least one code unit.
    pub fn has_selection(&self) -> bool {
        self.state.start != self.state.end
    }

    /// The selection as ordered offsets clamped to the document and
    /// snapped to character boundaries.
    pub(crate) fn safe_selection(&self) -> (usize, usize) {
        let len = self.state.dom.text_len();
        let s = usize::from(self.state.start).min(len);
        let e = usize::from(self.state.end).min(len);
        self.snap_selection(s.min(e), s.max(e))
    }

    /// Move offsets off the middle of a surrogate pair: a caret snaps
    /// backward, a range widens to cover the whole scalar value. DOM
    /// hosts may legitimately report mid-pair code-unit offsets.
    fn snap_selection(&self, mut s: usize, mut e: usize) -> (usize, usize) {
        if s == e {
            if self.state.dom.is_mid_surrogate(s) {
                s -= 1;
                e = s;
            }
        } else {
            if self.state.dom.is_mid_surrogate(s) {
                s -= 1;
            }
            if self.state.dom.is_mid_surrogate(e) {
                e += 1;
            }
        }
        (s, e)
    }
}
