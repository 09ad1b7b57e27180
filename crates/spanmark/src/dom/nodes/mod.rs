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

mod container_node;
mod dom_node;
mod text_node;

pub use container_node::{ContainerNode, ContainerNodeKind};
pub(crate) use container_node::block_gap;
pub use dom_node::{DomNode, DomNodeKind, MediaNode};
pub use text_node::TextNode;
