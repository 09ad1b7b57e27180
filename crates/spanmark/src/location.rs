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

use std::fmt;

/// A position in the document, measured in UTF-16 code units.
///
/// Platform text APIs report selection offsets in UTF-16 code units, so the
/// whole model speaks that unit rather than bytes or scalar values.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Location(usize);

impl Location {
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for Location {
    fn from(value: usize) -> Self {
        Location(value)
    }
}

impl From<Location> for usize {
    fn from(value: Location) -> Self {
        value.0
    }
}

impl PartialEq<usize> for Location {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
