// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::string::String;
use std::vec::Vec;

use crate::testing::FixedAdvanceProvider;
use crate::{FontStyle, Layout, RichText, Run};

/// Width of every glyph unless overridden.
pub(crate) const ADVANCE: f32 = 10.0;

/// An engine over [`FixedAdvanceProvider`] with a 200 by 100 pixel buffer.
pub(crate) struct TestEnv {
    pub(crate) engine: RichText<FixedAdvanceProvider>,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self::with_provider(FixedAdvanceProvider::new(ADVANCE))
    }

    pub(crate) fn with_provider(provider: FixedAdvanceProvider) -> Self {
        let mut engine = RichText::new(provider);
        engine.set_size(200.0, 100.0);
        Self { engine }
    }

    /// Commits `text` at the tail.
    pub(crate) fn text(&mut self, text: &str) {
        self.engine.set_text(text);
        self.engine.push();
    }

    /// Enables wrapping in a buffer of the given width.
    pub(crate) fn wrap_at(&mut self, width: f32) {
        let (_, height) = self.engine.size();
        self.engine.set_size(width, height);
        self.engine.paragraph_mut().wrap = true;
        self.engine.push();
    }

    /// Returns the text of every line, without newlines.
    pub(crate) fn line_texts(&mut self) -> Vec<String> {
        let layout = self.engine.layout();
        (0..layout.lines().len())
            .map(|index| {
                layout
                    .line_glyphs(index)
                    .iter()
                    .map(|glyph| glyph.ch)
                    .filter(|ch| *ch != '\n')
                    .collect()
            })
            .collect()
    }
}

/// Returns the text of every text run in the store.
pub(crate) fn run_texts(runs: &[Run]) -> Vec<String> {
    runs.iter()
        .map(|run| match run {
            Run::Text(text) => text.text.iter().collect(),
            Run::Paragraph(_) => String::from("<para>"),
        })
        .collect()
}

/// Returns the font of the text run at `index`.
pub(crate) fn run_font(runs: &[Run], index: usize) -> &FontStyle {
    &runs[index]
        .as_text()
        .unwrap_or_else(|| panic!("run {index} is not a text run"))
        .font
}

/// Returns the x positions of the glyphs on the line at `index`.
pub(crate) fn glyph_xs(layout: &Layout, index: usize) -> Vec<f32> {
    layout
        .line_glyphs(index)
        .iter()
        .map(|glyph| glyph.x)
        .collect()
}

#[track_caller]
pub(crate) fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "{what}: expected {expected}, got {actual}"
    );
}
