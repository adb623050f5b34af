// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::kurbo::{Point, Size};
use crate::layout::BreakReason;
use crate::testing::FixedAdvanceProvider;
use crate::{Caret, Offset, RichText};

use super::utils::{ADVANCE, TestEnv, assert_close, glyph_xs};

#[test]
fn empty_document() {
    let mut env = TestEnv::new();
    assert_eq!(env.engine.measure(), Size::ZERO);
    assert_eq!(
        env.engine.offset_to_caret(Point::new(5.0, 5.0)),
        Caret::new(0, 0)
    );
    assert_eq!(env.engine.caret_to_offset(Caret::new(0, 0)), Point::ZERO);
    assert!(env.engine.layout().is_empty());
}

#[test]
fn zero_size_buffer_lays_out_nothing() {
    let mut engine = RichText::new(FixedAdvanceProvider::new(ADVANCE));
    engine.set_text("AB");
    engine.push();
    assert!(engine.layout().is_empty());
    assert_eq!(engine.measure(), Size::ZERO);
    assert_eq!(
        engine.offset_to_caret(Point::new(15.0, 5.0)),
        Caret::default()
    );
    assert_eq!(engine.caret_to_offset(Caret::new(0, 1)), Point::ZERO);
}

#[test]
fn single_line() {
    let mut env = TestEnv::new();
    env.text("AB");
    assert_eq!(env.engine.measure(), Size::new(20.0, 10.0));
    let layout = env.engine.layout();
    assert_eq!(layout.lines().len(), 1);
    let line = &layout.lines()[0];
    assert_eq!(line.break_reason(), BreakReason::None);
    assert_eq!(line.top(), 0.0);
    assert_eq!(line.baseline(), 8.0);
    assert_eq!(glyph_xs(layout, 0), [0.0, 10.0]);
    assert!(layout.glyphs().iter().all(|glyph| glyph.y == 8.0));
}

#[test]
fn layout_is_deterministic() {
    let mut env = TestEnv::new();
    env.wrap_at(55.0);
    env.text("The quick brown\tfox\njumps");
    env.engine.bold(true);
    env.text(" over the lazy dog");
    let first = env.engine.layout().clone();

    // Changing the revision without changing the runs forces a new pass.
    env.engine.push();
    env.engine.drop_runs(1);
    let second = env.engine.layout().clone();
    assert_eq!(first, second);

    let mut other = TestEnv::new();
    other.wrap_at(55.0);
    other.text("The quick brown\tfox\njumps");
    other.engine.bold(true);
    other.text(" over the lazy dog");
    assert_eq!(&first, other.engine.layout());
}

#[test]
fn newline_starts_a_line() {
    let mut env = TestEnv::new();
    env.text("A\nBC");
    assert_eq!(env.line_texts(), ["A", "BC"]);
    let layout = env.engine.layout();
    assert_eq!(layout.lines()[0].break_reason(), BreakReason::Explicit);
    assert_eq!(layout.lines()[1].top(), 10.0);
    assert_eq!(glyph_xs(layout, 1), [0.0, 10.0]);
    assert_eq!(env.engine.measure(), Size::new(20.0, 20.0));
}

#[test]
fn trailing_newline_adds_an_empty_line() {
    let mut env = TestEnv::new();
    env.text("A\n");
    assert_eq!(env.line_texts(), ["A", ""]);
    assert_eq!(env.engine.measure(), Size::new(10.0, 20.0));
    let line = &env.engine.layout().lines()[1];
    assert_eq!(line.start(), Caret::new(0, 2));
    assert_eq!(line.height(), 10.0);
}

#[test]
fn empty_lines_keep_their_height() {
    let mut env = TestEnv::new();
    env.text("A\n\nB");
    assert_eq!(env.line_texts(), ["A", "", "B"]);
    assert_eq!(env.engine.layout().lines()[2].top(), 20.0);
}

#[test]
fn tabs_advance_to_the_next_stop() {
    let mut env = TestEnv::new();
    env.text("A\tB\n\tC\nABCD\tE");
    let layout = env.engine.layout();
    assert_eq!(glyph_xs(layout, 0), [0.0, 10.0, 40.0, 50.0]);
    assert_eq!(glyph_xs(layout, 1), [0.0, 40.0, 50.0]);
    // A tab exactly at a stop still moves to the next one.
    assert_eq!(glyph_xs(layout, 2), [0.0, 10.0, 20.0, 30.0, 40.0, 80.0]);
}

#[test]
fn tab_stops_start_at_the_margin() {
    let mut env = TestEnv::new();
    let paragraph = env.engine.paragraph_mut();
    paragraph.margin = Offset::new(5.0, 0.0);
    paragraph.indent = Offset::new(15.0, 0.0);
    env.engine.push();
    env.text("\tA");
    let layout = env.engine.layout();
    // The first line starts 15 pixels into the first tab cell.
    assert_eq!(glyph_xs(layout, 0), [20.0, 45.0]);
}

#[test]
fn disabled_tab_stops_behave_like_spaces() {
    let mut env = TestEnv::new();
    env.engine.paragraph_mut().tab_width = 0.0;
    env.engine.push();
    env.text("A\tB");
    assert_eq!(glyph_xs(env.engine.layout(), 0), [0.0, 10.0, 20.0]);
}

#[test]
fn missing_glyphs_take_no_space() {
    let mut env = TestEnv::with_provider(FixedAdvanceProvider::new(ADVANCE).with_missing('☃'));
    env.text("A☃B");
    assert_eq!(glyph_xs(env.engine.layout(), 0), [0.0, 10.0, 10.0]);
    assert_eq!(env.engine.metrics_cache().missing_glyphs(), 1);
    assert_eq!(env.engine.measure(), Size::new(20.0, 10.0));
}

#[test]
fn letter_and_line_spacing() {
    let mut env = TestEnv::new();
    env.engine.font_mut().space = Offset::new(2.0, 4.0);
    env.text("AB\nC");
    let layout = env.engine.layout();
    assert_eq!(glyph_xs(layout, 0), [0.0, 12.0, 24.0]);
    assert_eq!(layout.lines()[0].width(), 24.0);
    assert_eq!(layout.lines()[0].height(), 14.0);
    assert_eq!(layout.lines()[1].top(), 14.0);
}

#[test]
fn font_offset_moves_glyphs_not_the_pen() {
    let mut env = TestEnv::new();
    env.text("A");
    env.engine.font_mut().offset = Offset::new(3.0, 4.0);
    env.text("B");
    env.engine.font_mut().offset = Offset::ZERO;
    env.text("C");
    let layout = env.engine.layout();
    assert_eq!(glyph_xs(layout, 0), [0.0, 13.0, 20.0]);
    assert_eq!(layout.glyphs()[1].y, 12.0);
    assert_eq!(env.engine.caret_to_offset(Caret::new(1, 0)).x, 13.0);
}

#[test]
fn mixed_sizes_share_a_baseline() {
    let mut env = TestEnv::new();
    env.text("a");
    env.engine.font_size(24.0);
    env.text("B");
    let layout = env.engine.layout();
    let line = &layout.lines()[0];
    assert_close(f64::from(line.ascent()), 16.0, "ascent");
    assert_close(f64::from(line.height()), 20.0, "height");
    assert!(
        layout
            .glyphs()
            .iter()
            .all(|glyph| glyph.y == line.baseline())
    );
    assert_eq!(glyph_xs(layout, 0), [0.0, 10.0]);
    assert_eq!(layout.glyphs()[1].advance, 20.0);
}

#[test]
fn origin_margin_and_indent() {
    let mut env = TestEnv::new();
    let paragraph = env.engine.paragraph_mut();
    paragraph.origin = Offset::new(5.0, 0.0);
    paragraph.margin = Offset::new(10.0, 3.0);
    paragraph.indent = Offset::new(7.0, 6.0);
    paragraph.wrap = true;
    env.engine.push();
    env.engine.set_size(72.0, 100.0);
    env.text("AAA BBB\nCC");
    assert_eq!(env.line_texts(), ["AAA ", "BBB", "CC"]);
    let layout = env.engine.layout();
    let lines = layout.lines();
    // First line of a paragraph: origin + margin + indent.
    assert_eq!(lines[0].x(), 22.0);
    assert_eq!(lines[0].top(), 3.0);
    // Wrapped line: origin + margin.
    assert_eq!(lines[1].x(), 15.0);
    assert_eq!(lines[1].top(), 13.0);
    // A new paragraph is indented and spaced.
    assert_eq!(lines[2].x(), 22.0);
    assert_eq!(lines[2].top(), 29.0);
}

#[test]
fn paragraph_run_ends_the_line() {
    let mut env = TestEnv::new();
    env.text("A");
    env.engine.right();
    env.text("B");
    assert_eq!(env.line_texts(), ["A", "B"]);
    let layout = env.engine.layout();
    assert_eq!(layout.lines()[0].break_reason(), BreakReason::Paragraph);
    assert_eq!(layout.lines()[0].x(), 0.0);
    assert_eq!(layout.lines()[1].x(), 190.0);
}

#[test]
fn paragraph_run_at_line_start_only_switches_style() {
    let mut env = TestEnv::new();
    env.engine.right();
    env.text("AB\n");
    env.engine.center();
    env.text("CD");
    assert_eq!(env.line_texts(), ["AB", "CD"]);
    let layout = env.engine.layout();
    assert_eq!(layout.lines()[0].x(), 180.0);
    assert_eq!(layout.lines()[1].x(), 90.0);
}
