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

use media_embeds::MediaRef;

use super::AnnotationModel;
use crate::dom::nodes::{DomNode, MediaNode};
use crate::{AnnotationError, AnnotationUpdate};

impl AnnotationModel {
    /// Allow media embedding for this editor instance. Off by default.
    pub fn enable_media(&mut self) {
        self.media_enabled = true;
    }

    pub fn media_enabled(&self) -> bool {
        self.media_enabled
    }

    /// Embed a validated media reference at the cursor, replacing any
    /// selection. The embed occupies one unit of document space.
    pub fn insert_media(
        &mut self,
        src: &str,
    ) -> Result<AnnotationUpdate, AnnotationError> {
        if !self.media_enabled {
            return Err(AnnotationError::MediaNotAllowed);
        }
        if self.is_composing() {
            return Ok(self.create_update_keep());
        }
        let reference = MediaRef::parse(src)?;
        self.push_state_to_history();
        let (s, e) = self.safe_selection();
        if s != e {
            self.state.dom.delete_range(s, e);
        }
        let (parent, index) = self.state.dom.split_boundary(s);
        self.state.dom.insert_at(
            &parent,
            index,
            DomNode::Media(MediaNode::new(reference)),
        );
        self.restore_selection_after_edit(s + 1, s + 1);
        Ok(self.create_update_replace_all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Location;

    #[test]
    fn media_insertion_requires_opt_in() {
        let mut model = AnnotationModel::from_html("ab").unwrap();
        assert!(matches!(
            model.insert_media("https://example.com/cat.png"),
            Err(AnnotationError::MediaNotAllowed)
        ));
    }

    #[test]
    fn image_is_inserted_at_the_caret() {
        let mut model = AnnotationModel::from_html("ab").unwrap();
        model.enable_media();
        model.select(Location::from(1), Location::from(1));
        model.insert_media("https://example.com/cat.png").unwrap();
        assert_eq!(
            model.state.dom.to_html(),
            "a<img src=\"https://example.com/cat.png\" />b"
        );
        assert_eq!(model.state.start, 2usize);
    }

    #[test]
    fn invalid_references_are_rejected_without_mutation() {
        let mut model = AnnotationModel::from_html("ab").unwrap();
        model.enable_media();
        let before = model.state.clone();
        assert!(matches!(
            model.insert_media("ftp://example.com/cat.png"),
            Err(AnnotationError::InvalidMediaReference(_))
        ));
        assert_eq!(model.state, before);
    }

    #[test]
    fn media_replaces_the_selection() {
        let mut model = AnnotationModel::from_html("hello").unwrap();
        model.enable_media();
        model.select(Location::from(1), Location::from(4));
        model.insert_media("https://example.com/clip.mp4").unwrap();
        assert_eq!(
            model.state.dom.to_html(),
            "h<video src=\"https://example.com/clip.mp4\" \
             controls=\"controls\"></video>o"
        );
    }
}
