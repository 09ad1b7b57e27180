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

//! Validation and markup helpers for embedded media references.
//!
//! The editor never uploads anything itself: the host application uploads a
//! file through its own endpoint and hands the resulting reference URL to
//! the editor. This crate checks that such a reference is actually
//! embeddable (scheme, file format) before the editor builds a node for it.

use std::fmt;
use std::str::FromStr;

use url::Url;

/// Image formats the editor will embed inline.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Video formats the editor will embed inline.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogv", "mov"];

/// Why a media reference was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MediaRefError {
    #[error("media reference is not a valid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("media references must use http or https, got {0:?}")]
    UnsupportedScheme(String),
    #[error("unsupported media format: {0:?}")]
    UnsupportedFormat(String),
}

/// The embeddable media kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// A validated reference to an uploaded media file.
///
/// Construction goes through [`MediaRef::parse`], so holding a `MediaRef`
/// means the URL has an acceptable scheme and a recognized file extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaRef {
    url: Url,
    kind: MediaKind,
}

impl MediaRef {
    /// Validate a reference URL returned by the host's upload endpoint.
    pub fn parse(reference: &str) -> Result<MediaRef, MediaRefError> {
        let url = Url::parse(reference)?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(MediaRefError::UnsupportedScheme(
                    other.to_string(),
                ));
            }
        }
        let kind = kind_for_path(url.path()).ok_or_else(|| {
            MediaRefError::UnsupportedFormat(
                extension_of(url.path()).unwrap_or_default().to_string(),
            )
        })?;
        Ok(MediaRef { url, kind })
    }

    /// The validated reference URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether this reference points at an image or a video.
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn is_image(&self) -> bool {
        self.kind == MediaKind::Image
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl FromStr for MediaRef {
    type Err = MediaRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaRef::parse(s)
    }
}

/// Map a URL path to a media kind by its file extension.
fn kind_for_path(path: &str) -> Option<MediaKind> {
    let ext = extension_of(path)?.to_ascii_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

fn extension_of(path: &str) -> Option<&str> {
    let file_name = path.rsplit('/').next()?;
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}
