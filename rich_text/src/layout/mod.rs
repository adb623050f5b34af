// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line breaking and positioning of committed runs.

mod alignment;
mod line_break;

use alloc::vec::Vec;
use core::ops::Range;

use peniko::kurbo::{Rect, Size};

use crate::font::{FontProvider, MetricsCache, OutlineId};
use crate::{Caret, Offset, ParagraphStyle, Run};

/// The cause of a line break.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum BreakReason {
    /// The last line of the document.
    #[default]
    None,
    /// Wrapped at a whitespace boundary.
    Regular,
    /// Ended by a newline character.
    Explicit,
    /// Wrapped inside a word because no whitespace boundary was available.
    Emergency,
    /// Ended by a paragraph run.
    Paragraph,
}

/// A positioned glyph.
///
/// Positions are in buffer pixels before scrolling and already include
/// alignment and the visual offset of the run's font.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Glyph {
    /// Index of the run the glyph belongs to.
    pub run: usize,
    /// Character offset of the glyph within its run.
    pub index: usize,
    /// The code point.
    pub ch: char,
    /// Left edge of the glyph.
    pub x: f32,
    /// Baseline of the glyph.
    pub y: f32,
    /// Horizontal distance to the next glyph, including tab expansion and
    /// letter spacing.
    pub advance: f32,
    /// Outline to paint, see [`MetricsCache::outline`].
    pub outline: OutlineId,
    /// Index of the line holding the glyph.
    pub line: usize,
}

/// One visual line.
#[derive(Clone, PartialEq, Debug)]
pub struct Line {
    glyphs: Range<usize>,
    x: f32,
    width: f32,
    advance: f32,
    top: f32,
    ascent: f32,
    descent: f32,
    leading: f32,
    break_reason: BreakReason,
    start: Caret,
    end: Caret,
    /// Pen position after the last item, including zero-width ones.
    pen_end: f32,
}

impl Line {
    /// Range of the line's glyphs in [`Layout::glyphs`].
    pub fn glyph_range(&self) -> Range<usize> {
        self.glyphs.clone()
    }

    /// Left edge of the line after alignment.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Width of the line, excluding trailing whitespace.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Width of the line, including trailing whitespace.
    pub fn advance(&self) -> f32 {
        self.advance
    }

    /// Top edge of the line box.
    pub fn top(&self) -> f32 {
        self.top
    }

    /// Position of the baseline.
    pub fn baseline(&self) -> f32 {
        self.top + self.ascent
    }

    /// Largest ascent on the line.
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Largest descent on the line.
    pub fn descent(&self) -> f32 {
        self.descent
    }

    /// Height of the line box, including extra line spacing.
    pub fn height(&self) -> f32 {
        self.ascent + self.descent + self.leading
    }

    /// The cause of the break after this line.
    pub fn break_reason(&self) -> BreakReason {
        self.break_reason
    }

    /// The caret at the start of the line.
    pub fn start(&self) -> Caret {
        self.start
    }

    /// The caret at the end of the line, before any newline or hanging
    /// whitespace.
    pub fn end(&self) -> Caret {
        self.end
    }

    /// The line box, from the left edge to the end of its visible content.
    pub fn rect(&self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.top),
            f64::from(self.x + self.width),
            f64::from(self.top + self.height()),
        )
    }
}

/// Where the first caret of a run lies.
#[derive(Copy, Clone, PartialEq, Debug)]
pub(crate) struct RunPosition {
    pub(crate) line: usize,
    pub(crate) x: f32,
    pub(crate) len: usize,
}

/// Lines and glyph positions computed from a run store.
///
/// A layout is a pure function of the runs, the logical buffer size and the
/// glyph metrics. Measurement, caret mapping and drawing all read the same
/// layout. The scroll translation is the only view state it carries.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Layout {
    pub(crate) lines: Vec<Line>,
    pub(crate) glyphs: Vec<Glyph>,
    pub(crate) runs: Vec<RunPosition>,
    pub(crate) scroll: Offset,
    pub(crate) bounds: Rect,
}

impl Layout {
    /// Returns `true` if the layout has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the lines from top to bottom.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns all glyphs in document order.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Returns the glyphs of the line at `index`.
    pub fn line_glyphs(&self, index: usize) -> &[Glyph] {
        self.lines
            .get(index)
            .map_or(&[], |line| &self.glyphs[line.glyphs.clone()])
    }

    /// Returns the scroll translation to apply when drawing and mapping
    /// carets. Glyph and line positions never include it.
    pub fn scroll(&self) -> Offset {
        self.scroll
    }

    /// Returns the smallest rectangle containing every line, before scrolling.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns the size of [`bounds`](Self::bounds).
    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    /// Extends the layout by a text run without characters appended as run
    /// `run`, with the horizontal visual offset `offset_x`.
    ///
    /// This only succeeds if the run ends up on the last line next to
    /// characters, where it cannot change any metrics. Otherwise the layout
    /// is left untouched and `false` is returned.
    pub(crate) fn append_marker(&mut self, run: usize, offset_x: f32) -> bool {
        if run != self.runs.len() {
            return false;
        }
        let line_index = self.lines.len().wrapping_sub(1);
        let Some(line) = self.lines.get_mut(line_index) else {
            return false;
        };
        if line.break_reason != BreakReason::None || line.glyphs.is_empty() {
            return false;
        }
        line.end = Caret::new(run, 0);
        self.runs.push(RunPosition {
            line: line_index,
            x: line.pen_end + offset_x,
            len: 0,
        });
        true
    }
}

/// A unit of layout input: one code point or one zero-width run marker.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Item {
    run: usize,
    index: usize,
    ch: char,
    kind: ItemKind,
    advance: f32,
    ascent: f32,
    descent: f32,
    leading: f32,
    offset: Offset,
    outline: OutlineId,
}

#[derive(Copy, Clone, Debug)]
enum ItemKind {
    Glyph,
    Space,
    Tab,
    Newline,
    /// A text run without text.
    Marker,
    Paragraph(ParagraphStyle),
}

impl ItemKind {
    /// Whether the item occupies a character position.
    fn is_char(self) -> bool {
        matches!(self, Self::Glyph | Self::Space | Self::Tab | Self::Newline)
    }
}

/// Lays out `runs` inside a logical buffer of `width` by `height` pixels.
///
/// An empty or degenerate buffer yields an empty layout.
pub(crate) fn build(
    cache: &mut MetricsCache,
    provider: &mut impl FontProvider,
    runs: &[Run],
    width: f32,
    height: f32,
) -> Layout {
    if width.is_nan() || height.is_nan() || width <= 0.0 || height <= 0.0 {
        log::debug!("skipping layout of {} runs in a {width}x{height} buffer", runs.len());
        return Layout::default();
    }
    cache.sync(provider);
    let items = collect_items(cache, provider, runs);
    let (lines, advances) = line_break::BreakLines::new(&items, width).break_all();
    let layout = alignment::position(&items, &advances, &lines, runs.len(), height);
    log::debug!(
        "laid out {} runs into {} lines ({} glyphs, {}x{})",
        runs.len(),
        layout.lines.len(),
        layout.glyphs.len(),
        layout.bounds.width(),
        layout.bounds.height()
    );
    layout
}

fn collect_items(
    cache: &mut MetricsCache,
    provider: &mut impl FontProvider,
    runs: &[Run],
) -> Vec<Item> {
    let mut items = Vec::new();
    for (run_index, run) in runs.iter().enumerate() {
        let text = match run {
            Run::Paragraph(paragraph) => {
                items.push(Item {
                    run: run_index,
                    index: 0,
                    ch: '\0',
                    kind: ItemKind::Paragraph(paragraph.paragraph),
                    advance: 0.0,
                    ascent: 0.0,
                    descent: 0.0,
                    leading: 0.0,
                    offset: Offset::ZERO,
                    outline: OutlineId::EMPTY,
                });
                continue;
            }
            Run::Text(text) => text,
        };
        let font = &text.font;
        let slot = cache.resolve(provider, font);
        let line = cache.line_metrics(provider, slot);
        let base = Item {
            run: run_index,
            index: 0,
            ch: '\0',
            kind: ItemKind::Marker,
            advance: 0.0,
            ascent: line.ascent,
            descent: line.descent,
            leading: font.space.y,
            offset: font.offset,
            outline: OutlineId::EMPTY,
        };
        if text.is_empty() {
            items.push(base);
            continue;
        }
        for (index, &ch) in text.text.iter().enumerate() {
            let item = match ch {
                '\n' => Item {
                    index,
                    ch,
                    kind: ItemKind::Newline,
                    ..base
                },
                '\t' => {
                    // Used when tab stops are disabled.
                    let space = cache.glyph(provider, slot, ' ');
                    Item {
                        index,
                        ch,
                        kind: ItemKind::Tab,
                        advance: space.metrics.advance + font.space.x,
                        ..base
                    }
                }
                _ if ch.is_control() => Item {
                    index,
                    ch,
                    kind: ItemKind::Glyph,
                    ..base
                },
                _ => {
                    let glyph = cache.glyph(provider, slot, ch);
                    Item {
                        index,
                        ch,
                        kind: if ch.is_whitespace() {
                            ItemKind::Space
                        } else {
                            ItemKind::Glyph
                        },
                        advance: glyph.metrics.advance + font.space.x,
                        ascent: glyph.metrics.ascent,
                        descent: glyph.metrics.descent,
                        outline: glyph.outline,
                        ..base
                    }
                }
            };
            items.push(item);
        }
    }
    items
}
