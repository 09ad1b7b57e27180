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

/// A path of child indices addressing one node in the tree.
///
/// The empty path is the document root. Handles are positional: any
/// mutation of the tree left of or above a handle invalidates it, so code
/// that edits several positions processes them in reverse document order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DomHandle {
    path: Vec<usize>,
}

impl DomHandle {
    /// The handle of the document root.
    pub fn root() -> Self {
        Self { path: Vec::new() }
    }

    pub fn from_path(path: Vec<usize>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// The handle of this node's parent.
    ///
    /// Panics if called on the root handle.
    pub fn parent_handle(&self) -> DomHandle {
        assert!(!self.is_root(), "root handle has no parent");
        DomHandle {
            path: self.path[..self.path.len() - 1].to_vec(),
        }
    }

    /// The handle of this node's `index`th child.
    pub fn child_handle(&self, index: usize) -> DomHandle {
        let mut path = self.path.clone();
        path.push(index);
        DomHandle { path }
    }

    /// This node's index within its parent.
    ///
    /// Panics if called on the root handle.
    pub fn index_in_parent(&self) -> usize {
        *self.path.last().expect("root handle has no parent")
    }
}
