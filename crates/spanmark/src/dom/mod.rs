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

//! The markup tree owned by the model.
//!
//! [`Dom`] owns the whole document; nodes own their children, and positions
//! are addressed either by [`DomHandle`] paths or by UTF-16 code-unit
//! offsets. The tree keeps one structural invariant throughout: block
//! containers (paragraphs, headings) only ever appear as direct children of
//! the document root, everything below them is inline.

mod dom_handle;
mod dom_struct;
pub mod nodes;
pub mod parser;
mod range;
mod to_html;

pub use dom_handle::DomHandle;
pub use dom_struct::Dom;
pub use range::{DomLocation, Range};
