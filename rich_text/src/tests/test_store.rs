// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Color, HorizontalAlign, Run, StyleFlag};

use super::utils::{TestEnv, run_font, run_texts};

#[test]
fn run_count_tracks_pushes_and_drops() {
    let mut env = TestEnv::new();
    let mut expected = 0_usize;
    let script: &[(bool, usize)] = &[
        (true, 0),
        (true, 0),
        (false, 1),
        (true, 0),
        (false, 5),
        (false, 1),
        (true, 0),
        (true, 0),
        (false, 0),
        (true, 0),
        (false, 2),
    ];
    for (step, &(push, count)) in script.iter().enumerate() {
        if push {
            env.text("x");
            expected += 1;
        } else {
            env.engine.drop_runs(count);
            expected -= count.min(expected);
        }
        assert_eq!(env.engine.runs().len(), expected, "after step {step}");
    }
}

#[test]
fn drop_beyond_length_empties_store() {
    let mut env = TestEnv::new();
    env.text("a");
    env.text("b");
    env.engine.drop_runs(10);
    assert!(env.engine.runs().is_empty());
    env.engine.drop_runs(1);
    assert!(env.engine.runs().is_empty());
}

#[test]
fn drop_two_of_three_keeps_first() {
    let mut env = TestEnv::new();
    env.text("one");
    env.text("two");
    env.text("three");
    env.engine.drop_runs(2);
    assert_eq!(env.engine.runs().len(), 1);
    assert_eq!(run_texts(env.engine.runs().runs()), ["one"]);
}

#[test]
fn push_at_uses_one_based_positions() {
    let mut env = TestEnv::new();
    env.text("a");
    env.text("c");
    env.engine.text("b", 2);
    env.engine.text("start", 1);
    env.engine.text("end", 0);
    assert_eq!(
        run_texts(env.engine.runs().runs()),
        ["start", "a", "b", "c", "end"]
    );
}

#[test]
fn push_at_beyond_tail_appends() {
    let mut env = TestEnv::new();
    env.text("a");
    env.engine.text("b", 42);
    assert_eq!(run_texts(env.engine.runs().runs()), ["a", "b"]);
}

#[test]
fn newline_is_inserted_at_dialect_position() {
    let mut env = TestEnv::new();
    env.text("a");
    env.text("b");
    env.engine.newline(2);
    assert_eq!(run_texts(env.engine.runs().runs()), ["a", "\n", "b"]);
}

#[test]
fn push_without_text_records_style() {
    let mut env = TestEnv::new();
    env.engine.bold(true);
    let runs = env.engine.runs().runs();
    assert_eq!(runs.len(), 1);
    let run = runs[0].as_text().expect("style changes push text runs");
    assert!(run.is_empty());
    assert!(run.font.bold);
}

#[test]
fn paragraph_change_pushes_paragraph_run() {
    let mut env = TestEnv::new();
    env.engine.center();
    let runs = env.engine.runs().runs();
    assert_eq!(runs.len(), 1);
    let Run::Paragraph(run) = &runs[0] else {
        panic!("expected a paragraph run, got {:?}", runs[0]);
    };
    assert_eq!(run.paragraph.align, HorizontalAlign::Center);
    assert!(!env.engine.current_attributes().paragraph_changed());
}

#[test]
fn paragraph_change_is_committed_before_text() {
    let mut env = TestEnv::new();
    env.engine.paragraph_mut().wrap = true;
    env.engine.set_text("words");
    env.engine.push();
    assert_eq!(run_texts(env.engine.runs().runs()), ["<para>", "words"]);
}

#[test]
fn pushed_runs_keep_their_style() {
    let mut env = TestEnv::new();
    env.engine.font_mut().size = 20.0;
    env.text("big");
    env.engine.font_mut().size = 8.0;
    env.engine.color(Color::from_rgba8(255, 0, 0, 255));
    env.text("small");
    let runs = env.engine.runs().runs();
    assert_eq!(run_font(runs, 0).size, 20.0);
    assert_eq!(run_font(runs, 2).size, 8.0);
    assert_eq!(run_font(runs, 0).color, Color::from_rgba8(0, 0, 0, 255));
    assert_eq!(run_font(runs, 2).color, Color::from_rgba8(255, 0, 0, 255));
}

#[test]
fn set_text_replaces_pending_text() {
    let mut env = TestEnv::new();
    env.engine.set_text("first");
    env.engine.set_text("second");
    assert_eq!(
        env.engine.current_attributes().text().map(|text| text.len()),
        Some(6)
    );
    env.engine.push();
    assert_eq!(run_texts(env.engine.runs().runs()), ["second"]);
    assert!(env.engine.current_attributes().text().is_none());
}

#[test]
fn reset_is_idempotent() {
    let mut env = TestEnv::new();
    env.engine.bold(true);
    env.text("a");
    env.engine.set_text("pending");
    env.engine.reset();
    assert!(env.engine.runs().is_empty());
    assert!(env.engine.current_attributes().text().is_none());
    assert!(!env.engine.current_attributes().font().bold);
    env.engine.reset();
    assert!(env.engine.runs().is_empty());
    assert_eq!(env.engine.size(), (200.0, 100.0));
}

#[test]
fn font_style_keywords() {
    let mut env = TestEnv::new();
    env.engine.set_font_styles(StyleFlag::Bold);
    env.engine.set_font_styles(StyleFlag::Underline);
    let font = env.engine.current_attributes().font();
    assert!(font.bold && font.underline && !font.italic);
    assert!(env.engine.runs().is_empty(), "keywords do not push");
    env.engine.set_font_styles(StyleFlag::Plain);
    let font = env.engine.current_attributes().font();
    assert!(!font.bold && !font.underline && !font.italic);
}
