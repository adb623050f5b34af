// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

#[cfg(feature = "libm")]
#[allow(unused_imports)]
use core_maths::CoreFloat;

use super::{BreakReason, Item, ItemKind};
use crate::ParagraphStyle;

/// A line as produced by the breaker, before alignment.
#[derive(Clone, Debug)]
pub(super) struct LineData {
    /// Range of items on the line.
    pub(super) items: Range<usize>,
    /// Paragraph style in effect for the line.
    pub(super) paragraph: ParagraphStyle,
    /// Whether this is the first line of a paragraph.
    pub(super) first_in_paragraph: bool,
    /// Left edge of the content box, including indentation.
    pub(super) left: f32,
    /// Width of the content box.
    pub(super) available: f32,
    /// Pen advance of the whole line, including trailing whitespace.
    pub(super) advance: f32,
    /// Advance of the trailing whitespace.
    pub(super) trailing: f32,
    pub(super) ascent: f32,
    pub(super) descent: f32,
    pub(super) leading: f32,
    /// The cause of the break after this line.
    pub(super) break_reason: BreakReason,
}

impl LineData {
    pub(super) fn height(&self) -> f32 {
        self.ascent + self.descent + self.leading
    }
}

#[derive(Copy, Clone, Default)]
struct Metrics {
    ascent: f32,
    descent: f32,
    leading: f32,
}

impl Metrics {
    fn of(item: &Item) -> Self {
        Self {
            ascent: item.ascent,
            descent: item.descent,
            leading: item.leading,
        }
    }

    fn max(self, other: Self) -> Self {
        Self {
            ascent: self.ascent.max(other.ascent),
            descent: self.descent.max(other.descent),
            leading: self.leading.max(other.leading),
        }
    }
}

/// Horizontal extent available to the current line.
#[derive(Copy, Clone, Default)]
struct LineGeometry {
    left: f32,
    available: f32,
    max_advance: f32,
    /// Distance of the line start from the left margin, where tab stops are
    /// measured from.
    tab_origin: f32,
}

#[derive(Clone, Default)]
struct LineState {
    x: f32,
    items: Range<usize>,
    trailing: f32,
    has_glyphs: bool,
    after_space: bool,
}

#[derive(Clone)]
struct PrevBoundaryState {
    item_idx: usize,
    state: LineState,
}

#[derive(Clone, Default)]
struct BreakerState {
    /// Iteration state: the next item to place.
    item_idx: usize,
    line: LineState,
    prev_boundary: Option<PrevBoundaryState>,
}

impl BreakerState {
    /// Stores the current iteration state so that we can revert to it if we
    /// later want to take the line breaking opportunity at this point.
    fn mark_line_break_opportunity(&mut self) {
        self.prev_boundary = Some(PrevBoundaryState {
            item_idx: self.item_idx,
            state: self.line.clone(),
        });
    }
}

/// Breaks a sequence of items into lines.
pub(super) struct BreakLines<'a> {
    items: &'a [Item],
    width: f32,
    advances: Vec<f32>,
    lines: Vec<LineData>,
    state: BreakerState,
    paragraph: ParagraphStyle,
    first_in_paragraph: bool,
    geometry: LineGeometry,
    /// Metrics of the last committed content, used for lines without any.
    fallback: Metrics,
}

impl<'a> BreakLines<'a> {
    pub(super) fn new(items: &'a [Item], width: f32) -> Self {
        let mut breaker = Self {
            items,
            width,
            advances: vec![0.0; items.len()],
            lines: Vec::new(),
            state: BreakerState::default(),
            paragraph: ParagraphStyle::default(),
            first_in_paragraph: true,
            geometry: LineGeometry::default(),
            fallback: Metrics::default(),
        };
        breaker.update_geometry();
        breaker
    }

    /// Breaks all lines, returning them together with the advance of every
    /// item.
    pub(super) fn break_all(mut self) -> (Vec<LineData>, Vec<f32>) {
        while self.state.item_idx < self.items.len() {
            let item_idx = self.state.item_idx;
            let item = self.items[item_idx];
            match item.kind {
                ItemKind::Paragraph(paragraph) => {
                    // A paragraph run ends the current line unless nothing
                    // has been placed on it yet.
                    if self.state.line.has_glyphs {
                        self.commit_line(BreakReason::Paragraph);
                        continue;
                    }
                    self.paragraph = paragraph;
                    self.update_geometry();
                    self.append(item_idx, 0.0);
                    self.state.item_idx += 1;
                }
                ItemKind::Marker => {
                    self.append(item_idx, 0.0);
                    self.state.item_idx += 1;
                }
                ItemKind::Newline => {
                    self.append(item_idx, 0.0);
                    self.state.line.has_glyphs = true;
                    self.state.item_idx += 1;
                    self.commit_line(BreakReason::Explicit);
                }
                ItemKind::Space | ItemKind::Tab => {
                    let advance = match item.kind {
                        ItemKind::Tab => self.tab_advance(&item),
                        _ => item.advance,
                    };
                    let next_x = self.state.line.x + advance;
                    self.append(item_idx, advance);
                    self.state.line.has_glyphs = true;
                    self.state.line.after_space = true;
                    self.state.line.trailing += advance;
                    self.state.item_idx += 1;
                    // Hang overflowing whitespace.
                    if next_x > self.geometry.max_advance {
                        self.commit_line(BreakReason::Regular);
                    }
                }
                ItemKind::Glyph => {
                    if self.state.line.after_space && self.state.line.has_glyphs {
                        self.state.mark_line_break_opportunity();
                    }
                    let next_x = self.state.line.x + item.advance;
                    if next_x <= self.geometry.max_advance {
                        self.append_glyph(item_idx, item.advance);
                        self.state.item_idx += 1;
                    } else if let Some(prev) = self.state.prev_boundary.take() {
                        // Take the last line breaking opportunity by
                        // reverting to the state we had there.
                        self.state.line = prev.state;
                        self.state.item_idx = prev.item_idx;
                        self.commit_line(BreakReason::Regular);
                    } else if !self.state.line.has_glyphs {
                        // This glyph will never fit, so place it and accept
                        // the overflow.
                        self.append_glyph(item_idx, item.advance);
                        self.state.item_idx += 1;
                        self.commit_line(BreakReason::Emergency);
                    } else {
                        self.commit_line(BreakReason::Emergency);
                    }
                }
            }
        }

        if !self.state.line.items.is_empty()
            || self
                .lines
                .last()
                .is_some_and(|line| line.break_reason == BreakReason::Explicit)
        {
            self.commit_line(BreakReason::None);
        }
        (self.lines, self.advances)
    }

    fn append(&mut self, item_idx: usize, advance: f32) {
        self.advances[item_idx] = advance;
        self.state.line.items.end = item_idx + 1;
        self.state.line.x += advance;
    }

    fn append_glyph(&mut self, item_idx: usize, advance: f32) {
        self.append(item_idx, advance);
        self.state.line.has_glyphs = true;
        self.state.line.after_space = false;
        self.state.line.trailing = 0.0;
    }

    /// Advance of a tab placed at the current pen position.
    fn tab_advance(&self, item: &Item) -> f32 {
        let tab_width = self.paragraph.tab_width;
        if tab_width.is_nan() || tab_width <= 0.0 {
            return item.advance;
        }
        let position = self.geometry.tab_origin + self.state.line.x;
        let next_stop = ((position / tab_width).floor() + 1.0) * tab_width;
        next_stop - position
    }

    fn update_geometry(&mut self) {
        let paragraph = &self.paragraph;
        let indent = if self.first_in_paragraph {
            paragraph.indent.x
        } else {
            0.0
        };
        let left = paragraph.origin.x + paragraph.margin.x + indent;
        let available = self.width - paragraph.margin.x - left;
        self.geometry = LineGeometry {
            left,
            available,
            max_advance: if paragraph.wrap {
                available
            } else {
                f32::INFINITY
            },
            tab_origin: indent,
        };
    }

    fn line_metrics(&self, items: &[Item]) -> Metrics {
        let mut chars = items.iter().filter(|item| item.kind.is_char()).peekable();
        if chars.peek().is_some() {
            return chars.map(Metrics::of).fold(Metrics::default(), Metrics::max);
        }
        let mut markers = items
            .iter()
            .filter(|item| matches!(item.kind, ItemKind::Marker))
            .peekable();
        if markers.peek().is_some() {
            return markers.map(Metrics::of).fold(Metrics::default(), Metrics::max);
        }
        self.fallback
    }

    fn commit_line(&mut self, break_reason: BreakReason) {
        let line = &self.state.line;
        let items = line.items.clone();
        let metrics = self.line_metrics(&self.items[items.clone()]);
        self.fallback = metrics;
        self.lines.push(LineData {
            items,
            paragraph: self.paragraph,
            first_in_paragraph: self.first_in_paragraph,
            left: self.geometry.left,
            available: self.geometry.available,
            advance: line.x,
            trailing: line.trailing,
            ascent: metrics.ascent,
            descent: metrics.descent,
            leading: metrics.leading,
            break_reason,
        });

        self.first_in_paragraph = matches!(
            break_reason,
            BreakReason::Explicit | BreakReason::Paragraph
        );
        self.state.line = LineState {
            items: self.state.item_idx..self.state.item_idx,
            ..LineState::default()
        };
        self.state.prev_boundary = None;
        self.update_geometry();
    }
}
