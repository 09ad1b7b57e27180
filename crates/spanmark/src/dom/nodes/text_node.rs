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

use widestring::{Utf16Str, Utf16String};

/// A run of text, stored as UTF-16 so offsets line up with platform text
/// APIs without conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextNode {
    content: Utf16String,
}

impl TextNode {
    pub fn new(content: Utf16String) -> Self {
        Self { content }
    }

    pub fn from_str(content: &str) -> Self {
        Self {
            content: Utf16String::from_str(content),
        }
    }

    pub fn data(&self) -> &Utf16Str {
        &self.content
    }

    /// Length in UTF-16 code units.
    pub fn text_len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Split this node at `offset` (code units), keeping the left part and
    /// returning the right part as a new node.
    pub(crate) fn split_off(&mut self, offset: usize) -> TextNode {
        let right = self.content[offset..].to_owned();
        let left = self.content[..offset].to_owned();
        self.content = left;
        TextNode { content: right }
    }

    /// Insert `text` at `offset` (code units).
    pub(crate) fn insert(&mut self, offset: usize, text: &Utf16Str) {
        let mut merged = self.content[..offset].to_owned();
        merged.push_utfstr(text);
        merged.push_utfstr(&self.content[offset..]);
        self.content = merged;
    }

    /// Append another text node's content to this one.
    pub(crate) fn push_node(&mut self, other: &TextNode) {
        self.content.push_utfstr(&other.content);
    }
}
