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

//! Markup parsing, via html5ever.
//!
//! Parsing happens in two stages: html5ever drives [`RawDomCreator`] to
//! build an arena of raw nodes, then [`parse`] interprets that arena into
//! the node kinds the model understands.

mod parse;
mod raw_dom;
mod raw_dom_creator;

pub use parse::parse;
