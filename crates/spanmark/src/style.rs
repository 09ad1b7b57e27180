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

//! Style values carried by span wrappers and heading blocks.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::AnnotationError;

/// The two character-level style kinds a span wrapper can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum StyleKind {
    #[strum(serialize = "color")]
    TextColor,
    #[strum(serialize = "background-color")]
    Highlight,
}

impl StyleKind {
    /// The CSS property name this kind serializes to.
    pub fn css_property(&self) -> &'static str {
        match self {
            StyleKind::TextColor => "color",
            StyleKind::Highlight => "background-color",
        }
    }
}

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .unwrap()
});

static RGB_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba?\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*(?:,\s*(?:0|1|0?\.\d+)\s*)?\)$")
        .unwrap()
});

/// A validated CSS color value (hex or rgb()/rgba() function).
///
/// Validation happens at construction, so values stored in the tree can be
/// serialized into a style attribute without further escaping concerns.
/// Hex digits are lowercased on the way in; that canonical form is what
/// makes repeated applications byte-identical.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorValue(String);

impl ColorValue {
    pub fn parse(value: &str) -> Result<ColorValue, AnnotationError> {
        let trimmed = value.trim();
        if HEX_COLOR.is_match(trimmed) {
            Ok(ColorValue(trimmed.to_ascii_lowercase()))
        } else if RGB_COLOR.is_match(trimmed) {
            Ok(ColorValue(trimmed.to_string()))
        } else {
            Err(AnnotationError::InvalidColor(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ColorValue {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorValue::parse(s)
    }
}

/// The inline styles carried by one span wrapper.
///
/// Span wrappers are the only carriers of color state in the document. A
/// `SpanStyles` with both fields `None` is semantically empty, and the
/// reconciler unwraps any span left in that state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpanStyles {
    pub color: Option<ColorValue>,
    pub background: Option<ColorValue>,
}

impl SpanStyles {
    pub fn with(kind: StyleKind, value: ColorValue) -> Self {
        let mut styles = SpanStyles::default();
        styles.set(kind, Some(value));
        styles
    }

    pub fn get(&self, kind: StyleKind) -> Option<&ColorValue> {
        match kind {
            StyleKind::TextColor => self.color.as_ref(),
            StyleKind::Highlight => self.background.as_ref(),
        }
    }

    pub fn set(&mut self, kind: StyleKind, value: Option<ColorValue>) {
        match kind {
            StyleKind::TextColor => self.color = value,
            StyleKind::Highlight => self.background = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.background.is_none()
    }

    /// The serialized `style` attribute value, property order fixed.
    pub fn css(&self) -> String {
        let mut out = String::new();
        if let Some(color) = &self.color {
            out.push_str("color: ");
            out.push_str(color.as_str());
            out.push(';');
        }
        if let Some(background) = &self.background {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str("background-color: ");
            out.push_str(background.as_str());
            out.push(';');
        }
        out
    }
}

/// Heading state of a block.
///
/// `Normal` is never stored in the tree; it is the request to convert a
/// heading back into plain content.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum_macros::Display,
)]
pub enum HeadingLevel {
    #[default]
    #[strum(serialize = "normal")]
    Normal,
    #[strum(serialize = "h2")]
    H2,
    #[strum(serialize = "h3")]
    H3,
    #[strum(serialize = "h4")]
    H4,
}

impl HeadingLevel {
    /// The markup tag for this level, `None` for `Normal`.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            HeadingLevel::Normal => None,
            HeadingLevel::H2 => Some("h2"),
            HeadingLevel::H3 => Some("h3"),
            HeadingLevel::H4 => Some("h4"),
        }
    }

    pub fn from_tag(tag: &str) -> Option<HeadingLevel> {
        match tag {
            "h2" => Some(HeadingLevel::H2),
            "h3" => Some(HeadingLevel::H3),
            "h4" => Some(HeadingLevel::H4),
            _ => None,
        }
    }
}
