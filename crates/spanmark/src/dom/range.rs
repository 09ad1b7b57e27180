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

use crate::dom::nodes::DomNodeKind;
use crate::dom::DomHandle;

/// One node touched by a [`Range`], with the part of it the range covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomLocation {
    /// Handle of the touched node.
    pub node_handle: DomHandle,
    /// Document offset at which this node's content starts.
    pub position: usize,
    /// Offset into the node where the range starts (clamped to the node).
    pub start_offset: usize,
    /// Offset into the node where the range ends (clamped to the node).
    pub end_offset: usize,
    /// Total length of the node's content in code units.
    pub length: usize,
    pub kind: DomNodeKind,
    /// True for nodes with no children of their own.
    pub is_leaf: bool,
}

/// Everything the document knows about a span of code-unit offsets:
/// the nodes it touches and how far it reaches into each of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub end: usize,
    /// Touched nodes in document order, ancestors before descendants.
    pub locations: Vec<DomLocation>,
}

impl Range {
    pub fn new(
        start: usize,
        end: usize,
        locations: Vec<DomLocation>,
    ) -> Self {
        Self {
            start,
            end,
            locations,
        }
    }

    pub fn is_cursor(&self) -> bool {
        self.start == self.end
    }

    /// The leaf locations of the range, in document order.
    pub fn leaves(&self) -> impl Iterator<Item = &DomLocation> {
        self.locations.iter().filter(|l| l.is_leaf)
    }

    /// Locations of a given node kind, in document order.
    pub fn locations_of_kind(
        &self,
        kind: DomNodeKind,
    ) -> impl Iterator<Item = &DomLocation> {
        self.locations.iter().filter(move |l| l.kind == kind)
    }
}
