// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::vec::Vec;

use peniko::kurbo::{Affine, BezPath, Rect, Shape};
use peniko::Color;
use rich_text::testing::FixedAdvanceProvider;
use rich_text::RichText;

use crate::RasterSink;

/// Width of every test glyph.
pub(crate) const ADVANCE: f32 = 10.0;

pub(crate) const RED: Color = Color::from_rgba8(255, 0, 0, 255);

/// A sink call, with paths reduced to their transformed bounding boxes.
#[derive(Clone, PartialEq, Debug)]
pub(crate) enum Command {
    Clip(Option<Rect>),
    Path(Rect, Color),
    Rect(Rect, Color),
}

/// Records every call instead of painting.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) commands: Vec<Command>,
}

impl RecordingSink {
    pub(crate) fn paths(&self) -> Vec<(Rect, Color)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::Path(bounds, color) => Some((*bounds, *color)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn rects(&self) -> Vec<(Rect, Color)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::Rect(rect, color) => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }
}

impl RasterSink for RecordingSink {
    fn set_clip(&mut self, clip: Option<Rect>) {
        self.commands.push(Command::Clip(clip));
    }

    fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Color, _anti_alias: bool) {
        let bounds = (transform * path.clone()).bounding_box();
        self.commands.push(Command::Path(bounds, color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(Command::Rect(rect, color));
    }
}

/// An engine with a 200 by 100 pixel buffer and fixed advance glyphs.
pub(crate) fn engine() -> RichText<FixedAdvanceProvider> {
    let mut engine = RichText::new(FixedAdvanceProvider::new(ADVANCE));
    engine.set_size(200.0, 100.0);
    engine
}

/// The bounds of the glyph box painted for a glyph whose pen position is
/// `(x, line_top)` on a 12 pixel line.
pub(crate) fn glyph_box(x: f64, line_top: f64) -> Rect {
    Rect::new(x, line_top, x + f64::from(ADVANCE), line_top + 8.0)
}
