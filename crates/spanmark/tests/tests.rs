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

use indoc::indoc;
use speculoos::prelude::*;
use spanmark::{
    ActionState, AnnotationAction, AnnotationError, AnnotationModel,
    ColorValue, HeadingLevel, Location, TextUpdate,
};

fn model_from_html(html: &str) -> AnnotationModel {
    AnnotationModel::from_html(html).unwrap()
}

fn select(model: &mut AnnotationModel, start: usize, end: usize) {
    model.select(Location::from(start), Location::from(end));
}

fn color(value: &str) -> ColorValue {
    ColorValue::parse(value).unwrap()
}

#[test]
fn can_instantiate_a_model_and_call_methods() {
    let mut model = AnnotationModel::new();
    model.replace_text("Hello world");
    select(&mut model, 6, 11);

    let update = model.apply_highlight(color("#fef08a")).unwrap();

    if let TextUpdate::ReplaceAll(r) = update.text_update {
        assert_eq!(
            r.replacement_html,
            "Hello <span style=\"background-color: #fef08a;\">world</span>"
        );
        assert_eq!(r.start, 6usize);
        assert_eq!(r.end, 11usize);
    } else {
        panic!("Expected to receive a ReplaceAll response");
    }
}

// --------------------------------------------------------------------------
// Idempotence: repeating an application changes nothing.
// --------------------------------------------------------------------------

#[test]
fn applying_the_same_highlight_twice_yields_identical_markup() {
    let mut model = model_from_html("Hello world");
    select(&mut model, 6, 11);
    model.apply_highlight(color("#fef08a")).unwrap();
    let first = model.get_content_as_html();

    select(&mut model, 6, 11);
    model.apply_highlight(color("#fef08a")).unwrap();

    assert_that!(model.get_content_as_html()).is_equal_to(first);
}

#[test]
fn repeated_application_does_not_nest_spans() {
    let mut model = model_from_html("abcd");
    for _ in 0..3 {
        select(&mut model, 0, 4);
        model.apply_text_color(color("#ff0000")).unwrap();
    }
    assert_eq!(
        model.get_content_as_html(),
        "<span style=\"color: #ff0000;\">abcd</span>"
    );
}

// --------------------------------------------------------------------------
// Non-interference: color and highlight never clobber each other.
// --------------------------------------------------------------------------

#[test]
fn color_does_not_remove_an_existing_highlight() {
    let mut model = model_from_html("abcd");
    select(&mut model, 0, 4);
    model.apply_highlight(color("#fef08a")).unwrap();
    select(&mut model, 0, 4);
    model.apply_text_color(color("#ff0000")).unwrap();

    let html = model.get_content_as_html();
    assert_that!(html.contains("background-color: #fef08a;")).is_true();
    assert_that!(html.contains("color: #ff0000;")).is_true();
}

#[test]
fn clearing_color_keeps_highlight_on_the_same_range() {
    let mut model = model_from_html(
        "<span style=\"color: #111111; background-color: #fef08a;\">abcd</span>",
    );
    select(&mut model, 0, 4);
    model.clear_text_color().unwrap();
    assert_eq!(
        model.get_content_as_html(),
        "<span style=\"background-color: #fef08a;\">abcd</span>"
    );
}

// --------------------------------------------------------------------------
// Unwrap correctness: clearing leaves no empty or dangling spans.
// --------------------------------------------------------------------------

#[test]
fn clearing_the_whole_span_removes_it_entirely() {
    let mut model =
        model_from_html("a<span style=\"color: #ff0000;\">bc</span>d");
    select(&mut model, 1, 3);
    model.clear_text_color().unwrap();
    assert_eq!(model.get_content_as_html(), "abcd");
}

#[test]
fn clearing_a_middle_slice_splits_the_span_cleanly() {
    let mut model = model_from_html("abcdef");
    select(&mut model, 0, 6);
    model.apply_highlight(color("#fef08a")).unwrap();
    select(&mut model, 2, 4);
    model.clear_highlight().unwrap();
    assert_eq!(
        model.get_content_as_html(),
        "<span style=\"background-color: #fef08a;\">ab</span>cd\
         <span style=\"background-color: #fef08a;\">ef</span>"
    );
}

#[test]
fn overlapping_a_different_color_re_anchors_the_boundary() {
    let mut model = model_from_html("abcdef");
    select(&mut model, 0, 4);
    model.apply_text_color(color("#ff0000")).unwrap();
    select(&mut model, 2, 6);
    model.apply_text_color(color("#0000ff")).unwrap();
    assert_eq!(
        model.get_content_as_html(),
        "<span style=\"color: #ff0000;\">ab</span>\
         <span style=\"color: #0000ff;\">cdef</span>"
    );
}

// --------------------------------------------------------------------------
// Selection precondition: no usable selection, no mutation.
// --------------------------------------------------------------------------

#[test]
fn collapsed_selection_returns_no_selection_error() {
    let mut model = model_from_html("abcd");
    select(&mut model, 2, 2);
    let before = model.get_content_as_html();
    let result = model.apply_highlight(color("#fef08a"));
    assert!(matches!(result, Err(AnnotationError::NoSelection)));
    assert_eq!(model.get_content_as_html(), before);
}

#[test]
fn whitespace_only_selection_returns_no_selection_error() {
    let mut model = model_from_html("ab   cd");
    select(&mut model, 2, 5);
    assert!(matches!(
        model.apply_text_color(color("#ff0000")),
        Err(AnnotationError::NoSelection)
    ));
}

#[test]
fn failed_application_leaves_no_undo_entry() {
    let mut model = model_from_html("abcd");
    select(&mut model, 1, 1);
    let _ = model.apply_text_color(color("#ff0000"));
    let update = model.undo();
    assert!(matches!(update.text_update, TextUpdate::Keep));
}

// --------------------------------------------------------------------------
// Composition safety: one ReplaceAll per composition session.
// --------------------------------------------------------------------------

#[test]
fn composition_session_emits_exactly_one_replace_all() {
    let mut model = model_from_html("ab");
    select(&mut model, 1, 1);

    let mut replace_alls = 0;
    for update in [
        model.composition_start(),
        model.composition_update("k"),
        model.composition_update("ka"),
        model.composition_update("かn"),
        model.composition_end("かん"),
    ] {
        if let TextUpdate::ReplaceAll(_) = update.text_update {
            replace_alls += 1;
        }
    }
    assert_eq!(replace_alls, 1);
    assert_eq!(model.get_content_as_html(), "aかんb");
}

#[test]
fn styling_during_composition_does_not_mutate() {
    let mut model = model_from_html("abcd");
    select(&mut model, 1, 1);
    model.composition_start();
    model.composition_update("x");

    select(&mut model, 0, 4);
    let update = model.apply_highlight(color("#fef08a")).unwrap();
    assert!(matches!(update.text_update, TextUpdate::Keep));
    assert!(!model.get_content_as_html().contains("span"));

    model.composition_end("x");
    assert_eq!(model.get_content_as_html(), "axbcd");
}

// --------------------------------------------------------------------------
// Round trip: serialize, parse, serialize is stable.
// --------------------------------------------------------------------------

#[test]
fn annotated_content_round_trips_byte_identically() {
    let mut model = model_from_html("<h2>Title</h2><p>Hello world</p>");
    select(&mut model, 12, 17);
    model.apply_highlight(color("#fef08a")).unwrap();
    select(&mut model, 6, 11);
    model.apply_text_color(color("#ff0000")).unwrap();

    let serialized = model.get_content_as_html();
    let reparsed = model_from_html(&serialized);
    assert_that!(reparsed.get_content_as_html()).is_equal_to(serialized);
}

#[test]
fn plain_text_round_trips_through_the_annotation_pipeline() {
    let mut model = model_from_html("just plain text");
    select(&mut model, 5, 10);
    model.apply_text_color(color("#ff0000")).unwrap();
    select(&mut model, 5, 10);
    model.clear_text_color().unwrap();
    assert_eq!(model.get_content_as_html(), "just plain text");
}

// --------------------------------------------------------------------------
// Headings
// --------------------------------------------------------------------------

#[test]
fn heading_conversion_and_back() {
    let mut model = model_from_html("<p>Title</p><p>Body</p>");
    select(&mut model, 2, 2);
    model.set_heading_level(HeadingLevel::H2);
    assert_eq!(
        model.get_content_as_html(),
        "<h2>Title</h2><p>Body</p>"
    );
    select(&mut model, 2, 2);
    model.set_heading_level(HeadingLevel::Normal);
    assert_eq!(model.get_content_as_html(), "<p>Title</p><p>Body</p>");
}

#[test]
fn heading_conversion_keeps_annotations_and_selection() {
    let mut model = model_from_html("<p>Hello world</p>");
    select(&mut model, 6, 11);
    model.apply_highlight(color("#fef08a")).unwrap();
    select(&mut model, 6, 11);
    model.set_heading_level(HeadingLevel::H3);
    assert_eq!(
        model.get_content_as_html(),
        "<h3>Hello <span style=\"background-color: #fef08a;\">world\
         </span></h3>"
    );
    assert_eq!(model.state.start, 6usize);
    assert_eq!(model.state.end, 11usize);
}

// --------------------------------------------------------------------------
// Panel state
// --------------------------------------------------------------------------

#[test]
fn panel_state_tracks_cursor_context() {
    let mut model = model_from_html(
        "<h2>T</h2><p>a<span style=\"color: #ff0000;\">b</span>c</p>",
    );
    // Inside the colored span.
    select(&mut model, 4, 4);
    let panel = model.panel_state();
    assert_eq!(
        panel.active_color.as_ref().map(|c| c.as_str()),
        Some("#ff0000")
    );
    assert_eq!(panel.heading, HeadingLevel::Normal);

    // Inside the heading.
    select(&mut model, 1, 1);
    let panel = model.panel_state();
    assert_eq!(panel.heading, HeadingLevel::H2);
    assert_eq!(
        panel.action_states[&AnnotationAction::Heading2],
        ActionState::Reversed
    );
    assert_eq!(panel.active_color, None);
}

#[test]
fn undo_state_is_reported_to_the_panel() {
    let mut model = model_from_html("ab");
    assert_eq!(
        model.panel_state().action_states[&AnnotationAction::Undo],
        ActionState::Disabled
    );
    select(&mut model, 2, 2);
    model.replace_text("c");
    assert_eq!(
        model.panel_state().action_states[&AnnotationAction::Undo],
        ActionState::Enabled
    );
}

// --------------------------------------------------------------------------
// Tree introspection
// --------------------------------------------------------------------------

#[test]
fn to_tree_sketches_the_document() {
    let mut model = model_from_html("<p>Hello world</p>");
    select(&mut model, 6, 11);
    model.apply_highlight(color("#fef08a")).unwrap();
    assert_eq!(
        model.to_tree(),
        indoc! {r#"

            └>p
              ├>"Hello "
              └>span style="background-color: #fef08a;"
                └>"world"
        "#}
    );
}
