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

//! Error types surfaced by the annotation model.

use media_embeds::MediaRefError;

/// Errors a platform layer may need to present to the user.
///
/// Everything here aborts the requested operation with zero mutations of
/// the document; recoverable internal failures (rejected wraps, cursor
/// restoration misses) are handled inside the model and never surface.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnnotationError {
    /// A style-apply action was invoked with a collapsed or
    /// whitespace-only selection. The caller should prompt the user to
    /// select some text first.
    #[error("no usable selection: select some text first")]
    NoSelection,

    /// A color value that is neither a hex color nor an rgb()/rgba()
    /// function.
    #[error("invalid color value: {0:?}")]
    InvalidColor(String),

    /// Media embedding is disabled for this editor instance.
    #[error("media embedding is not enabled for this editor")]
    MediaNotAllowed,

    /// The host handed us a media reference we refuse to embed.
    #[error(transparent)]
    InvalidMediaReference(#[from] MediaRefError),

    /// The host's content value could not be parsed as markup.
    #[error(transparent)]
    Parse(#[from] HtmlParseError),
}

/// Accumulated parse errors from reading a content value.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("failed to parse content: {parse_errors:?}")]
pub struct HtmlParseError {
    pub parse_errors: Vec<String>,
}
