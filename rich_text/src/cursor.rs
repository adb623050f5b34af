// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between carets and buffer positions.

use alloc::vec::Vec;

use peniko::kurbo::{Point, Rect};

use crate::layout::Layout;

/// A text editing position: a run index and a character offset inside it.
///
/// Carets order lexicographically, which is document order. A caret at the
/// end of a run and one at the start of the next run denote the same place;
/// mapping a point always yields the latter.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Caret {
    /// Index of the run in the run store.
    pub element: usize,
    /// Character offset within the run.
    pub position: usize,
}

impl Caret {
    /// Creates a new caret.
    pub const fn new(element: usize, position: usize) -> Self {
        Self { element, position }
    }

    /// Returns the caret closest to `point`, given in buffer pixels.
    ///
    /// The line is chosen by the vertical position. Points above the first
    /// line map to its start and points below the last line map to its end.
    /// Within a line, the caret goes before the first glyph whose horizontal
    /// midpoint lies right of the point.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Layout coordinates are f32."
    )]
    pub fn from_point(layout: &Layout, point: Point) -> Self {
        let Some(first) = layout.lines.first() else {
            return Self::default();
        };
        let x = point.x as f32 - layout.scroll.x;
        let y = point.y as f32 - layout.scroll.y;
        if y < first.top() {
            return first.start();
        }
        let Some(line_index) = layout
            .lines
            .iter()
            .position(|line| y < line.top() + line.height())
        else {
            return layout.lines[layout.lines.len() - 1].end();
        };
        let line = &layout.lines[line_index];
        for glyph in layout.line_glyphs(line_index) {
            // Never place the caret after a newline, that position belongs to
            // the next line.
            if glyph.ch == '\n' || x < glyph.x + glyph.advance * 0.5 {
                return Self::new(glyph.run, glyph.index);
            }
        }
        line.end()
    }

    /// Returns the index of the line holding the caret and its horizontal
    /// position, before scrolling.
    fn locate(self, layout: &Layout) -> Option<(usize, f32)> {
        let last_run = layout.runs.len().checked_sub(1)?;
        let (element, position) = if self.element > last_run {
            (last_run, layout.runs[last_run].len)
        } else {
            (self.element, self.position.min(layout.runs[self.element].len))
        };
        let run = &layout.runs[element];
        if run.len == 0 {
            return Some((run.line, run.x));
        }
        if position < run.len {
            let glyph = &layout.glyphs[glyph_index(layout, element, position)];
            return Some((glyph.line, glyph.x));
        }
        let glyph = &layout.glyphs[glyph_index(layout, element, position - 1)];
        if glyph.ch == '\n' {
            // A trailing newline is always followed by a line.
            let line = (glyph.line + 1).min(layout.lines.len() - 1);
            return Some((line, layout.lines[line].x()));
        }
        Some((glyph.line, glyph.x + glyph.advance))
    }

    /// Returns the position of the caret in buffer pixels: the left edge of
    /// the glyph after it and the top of its line.
    ///
    /// An empty layout maps every caret to the origin.
    pub fn to_point(self, layout: &Layout) -> Point {
        match self.locate(layout) {
            Some((line, x)) => Point::new(
                f64::from(x + layout.scroll.x),
                f64::from(layout.lines[line].top() + layout.scroll.y),
            ),
            None => Point::ZERO,
        }
    }

    /// Returns a rectangle of the given `width` covering the caret's line.
    pub fn geometry(self, layout: &Layout, width: f64) -> Rect {
        match self.locate(layout) {
            Some((line, x)) => {
                let line = &layout.lines[line];
                let x = f64::from(x + layout.scroll.x);
                let top = f64::from(line.top() + layout.scroll.y);
                Rect::new(x, top, x + width, top + f64::from(line.height()))
            }
            None => Rect::new(0.0, 0.0, width, 0.0),
        }
    }
}

fn glyph_index(layout: &Layout, element: usize, position: usize) -> usize {
    layout
        .glyphs
        .partition_point(|glyph| (glyph.run, glyph.index) < (element, position))
}

/// A highlighted span between two carets.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Selection {
    anchor: Caret,
    focus: Caret,
}

impl Selection {
    /// Creates a selection from `anchor` to `focus`, in any order.
    pub fn new(anchor: Caret, focus: Caret) -> Self {
        Self { anchor, focus }
    }

    /// Returns the caret where the selection started.
    pub fn anchor(&self) -> Caret {
        self.anchor
    }

    /// Returns the caret where the selection ends.
    pub fn focus(&self) -> Caret {
        self.focus
    }

    /// Returns `true` if nothing is selected.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Returns the carets in document order.
    pub fn ordered(&self) -> (Caret, Caret) {
        if self.anchor <= self.focus {
            (self.anchor, self.focus)
        } else {
            (self.focus, self.anchor)
        }
    }

    /// Returns `true` if the character at `index` of run `element` is selected.
    pub fn contains(&self, element: usize, index: usize) -> bool {
        let (start, end) = self.ordered();
        let caret = Caret::new(element, index);
        start <= caret && caret < end
    }

    /// Returns the rectangles covering the selected glyphs, one per line.
    pub fn geometry(&self, layout: &Layout) -> Vec<Rect> {
        let mut rects = Vec::new();
        self.geometry_with(layout, |rect| rects.push(rect));
        rects
    }

    /// Invokes `f` with the rectangle covering the selected glyphs of each
    /// line.
    pub fn geometry_with(&self, layout: &Layout, mut f: impl FnMut(Rect)) {
        // Selected newlines and empty glyphs stay visible.
        const MIN_RECT_WIDTH: f64 = 8.0;
        if self.is_collapsed() {
            return;
        }
        let scroll_x = f64::from(layout.scroll.x);
        let scroll_y = f64::from(layout.scroll.y);
        for (line_index, line) in layout.lines.iter().enumerate() {
            let mut span: Option<(f32, f32)> = None;
            for glyph in layout.line_glyphs(line_index) {
                if !self.contains(glyph.run, glyph.index) {
                    continue;
                }
                let x1 = glyph.x + glyph.advance;
                span = Some(span.map_or((glyph.x, x1), |(x0, end)| (x0.min(glyph.x), end.max(x1))));
            }
            let Some((x0, x1)) = span else {
                continue;
            };
            let x0 = f64::from(x0) + scroll_x;
            let width = (f64::from(x1) + scroll_x - x0).max(MIN_RECT_WIDTH);
            let top = f64::from(line.top()) + scroll_y;
            f(Rect::new(x0, top, x0 + width, top + f64::from(line.height())));
        }
    }
}
