// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine driven by the text dialect.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use peniko::kurbo::{Point, Rect, Size};
use peniko::Color;
use smallvec::SmallVec;

use crate::font::{FontProvider, MetricsCache};
use crate::layout::{self, Layout};
use crate::{
    Caret, FontStyle, HorizontalAlign, Offset, ParagraphRun, ParagraphStyle, Run, RunStore,
    Selection, Shadow, StyleFlag, TextBuffer, TextRun,
};

/// Attributes that have not been pushed yet.
#[derive(Clone, Default, Debug)]
pub struct Attributes {
    font: FontStyle,
    paragraph: ParagraphStyle,
    text: Option<TextBuffer>,
    paragraph_changed: bool,
}

impl Attributes {
    /// The font style the next text run will carry.
    pub fn font(&self) -> &FontStyle {
        &self.font
    }

    /// The paragraph style the next paragraph run will carry.
    pub fn paragraph(&self) -> &ParagraphStyle {
        &self.paragraph
    }

    /// The text the next push commits, if any.
    pub fn text(&self) -> Option<&TextBuffer> {
        self.text.as_ref()
    }

    /// Whether the paragraph style changed since the last push.
    pub fn paragraph_changed(&self) -> bool {
        self.paragraph_changed
    }
}

struct CachedLayout {
    revision: u64,
    generation: u64,
    layout: Layout,
}

/// Borrowed view of everything needed to paint the engine's current state.
#[derive(Copy, Clone, Debug)]
pub struct Frame<'a> {
    /// The current layout.
    pub layout: &'a Layout,
    /// The runs the layout was computed from.
    pub runs: &'a RunStore,
    /// Source of glyph outlines.
    pub cache: &'a MetricsCache,
    /// Caret to paint.
    pub caret: Option<Caret>,
    /// Span to highlight.
    pub highlight: Option<Selection>,
    /// Clip rectangle in buffer pixels.
    pub clip: Option<Rect>,
}

/// A rich text engine for one document.
///
/// Dialect commands mutate the pending [`Attributes`] and commit them with
/// [`push`](Self::push). Queries lay out the committed runs on demand and
/// reuse that layout until the runs or the buffer size change.
pub struct RichText<P> {
    provider: P,
    cache: MetricsCache,
    store: RunStore,
    pending: Attributes,
    width: f32,
    height: f32,
    clip: Option<Rect>,
    caret: Option<Caret>,
    highlight: Option<Selection>,
    revision: u64,
    layout: Option<CachedLayout>,
    /// Whether the last push appended a text-less run with the geometry of
    /// the text before it.
    pushed_style_marker: bool,
}

impl<P> Debug for RichText<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RichText")
            .field("cache", &self.cache)
            .field("store", &self.store)
            .field("pending", &self.pending)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("clip", &self.clip)
            .field("caret", &self.caret)
            .field("highlight", &self.highlight)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl<P: FontProvider> RichText<P> {
    /// Creates an engine over `provider` with an empty, zero-sized buffer.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cache: MetricsCache::new(),
            store: RunStore::new(),
            pending: Attributes::default(),
            width: 0.0,
            height: 0.0,
            clip: None,
            caret: None,
            highlight: None,
            revision: 0,
            layout: None,
            pushed_style_marker: false,
        }
    }

    /// Returns the font provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the font provider for modification.
    ///
    /// Changes to the available fonts must be reflected in
    /// [`FontProvider::generation`] to reach the caches.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Returns the glyph metrics cache.
    pub fn metrics_cache(&self) -> &MetricsCache {
        &self.cache
    }

    /// Returns the committed runs.
    pub fn runs(&self) -> &RunStore {
        &self.store
    }

    /// Returns a counter that changes with every mutation affecting layout.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.pushed_style_marker = false;
    }

    /// Empties the run store and resets the pending attributes, the caret and
    /// the highlight. The buffer size and clip are kept.
    pub fn reset(&mut self) {
        log::trace!("reset ({} runs)", self.store.len());
        self.store.clear();
        self.pending = Attributes::default();
        self.caret = None;
        self.highlight = None;
        self.touch();
    }

    /// Returns the pending attributes.
    pub fn current_attributes(&self) -> &Attributes {
        &self.pending
    }

    /// Replaces the pending font style.
    pub fn set_font(&mut self, font: FontStyle) {
        self.pending.font = font;
    }

    /// Returns the pending font style for read-modify-push commands.
    pub fn font_mut(&mut self) -> &mut FontStyle {
        &mut self.pending.font
    }

    /// Replaces the pending paragraph style.
    pub fn set_paragraph(&mut self, paragraph: ParagraphStyle) {
        self.pending.paragraph = paragraph;
        self.pending.paragraph_changed = true;
    }

    /// Returns the pending paragraph style for read-modify-push commands.
    ///
    /// The next push commits a paragraph run.
    pub fn paragraph_mut(&mut self) -> &mut ParagraphStyle {
        self.pending.paragraph_changed = true;
        &mut self.pending.paragraph
    }

    /// Sets the text committed by the next push, dropping any text that was
    /// pending.
    pub fn set_text(&mut self, text: impl Into<TextBuffer>) {
        self.pending.text = Some(text.into());
    }

    /// Commits the pending attributes at the tail of the store.
    ///
    /// Pending text becomes a [`TextRun`]. Without text, a changed paragraph
    /// style becomes a [`ParagraphRun`], and otherwise an empty text run
    /// records the font style. When both text and a paragraph change are
    /// pending, the paragraph run is committed first.
    pub fn push(&mut self) {
        self.commit(None);
    }

    /// Commits the pending attributes at a dialect position.
    ///
    /// `0` appends. Any other `index` is the 1-based position the run should
    /// take, so it is inserted before the run currently at `index - 1`.
    /// Positions past the tail append.
    pub fn push_at(&mut self, index: usize) {
        self.commit(index.checked_sub(1));
    }

    fn commit(&mut self, at: Option<usize>) {
        let mut runs: SmallVec<[Run; 2]> = SmallVec::new();
        let text = self.pending.text.take();
        if self.pending.paragraph_changed {
            runs.push(Run::Paragraph(ParagraphRun {
                paragraph: self.pending.paragraph,
            }));
            self.pending.paragraph_changed = false;
        }
        if text.is_some() || runs.is_empty() {
            runs.push(Run::Text(TextRun {
                text: text.unwrap_or_default(),
                font: self.pending.font.clone(),
            }));
        }

        let style_marker = at.is_none()
            && matches!(runs.as_slice(), [Run::Text(run)] if run.is_empty())
            && self
                .store
                .runs()
                .iter()
                .rev()
                .find_map(Run::as_text)
                .is_some_and(|prev| prev.font.same_geometry(&self.pending.font));

        let count = runs.len();
        match at {
            None => {
                for run in runs {
                    self.store.push(run);
                }
                log::trace!("pushed {count} run(s), store has {}", self.store.len());
            }
            Some(mut index) => {
                log::trace!("inserting {count} run(s) at {index}");
                for run in runs {
                    index = self.store.insert(index, run) + 1;
                }
            }
        }
        self.touch();
        self.pushed_style_marker = style_marker;
    }

    /// Removes the last `count` runs. Counts beyond the store length empty it.
    pub fn drop_runs(&mut self, count: usize) {
        let removed = self.store.drop_last(count);
        log::trace!("dropped {removed} of {count} run(s)");
        if removed > 0 {
            self.touch();
        }
    }

    /// Sets the bold flag and pushes.
    pub fn bold(&mut self, bold: bool) {
        self.pending.font.bold = bold;
        self.push();
    }

    /// Sets the italic flag and pushes.
    pub fn italic(&mut self, italic: bool) {
        self.pending.font.italic = italic;
        self.push();
    }

    /// Sets the underline flag and pushes.
    pub fn underline(&mut self, underline: bool) {
        self.pending.font.underline = underline;
        self.push();
    }

    /// Sets the font size and pushes.
    pub fn font_size(&mut self, size: f32) {
        self.pending.font.size = size;
        self.push();
    }

    /// Sets the fill color and pushes.
    ///
    /// Only colors change, so the current layout stays valid.
    pub fn color(&mut self, color: Color) {
        self.pending.font.color = color;
        self.push();
        self.color_change();
    }

    /// Sets the drop shadow and pushes.
    pub fn shadow(&mut self, offset: Offset, color: Color, blur: f32) {
        self.pending.font.shadow = Shadow {
            offset,
            color,
            blur,
        };
        self.push();
    }

    /// Applies a style keyword to the pending font. Does not push.
    pub fn set_font_styles(&mut self, flag: StyleFlag) {
        self.pending.font.apply(flag);
    }

    fn align(&mut self, align: HorizontalAlign) {
        self.paragraph_mut().align = align;
        self.push();
    }

    /// Left-aligns the following lines and pushes.
    pub fn left(&mut self) {
        self.align(HorizontalAlign::Left);
    }

    /// Centers the following lines and pushes.
    pub fn center(&mut self) {
        self.align(HorizontalAlign::Center);
    }

    /// Right-aligns the following lines and pushes.
    pub fn right(&mut self) {
        self.align(HorizontalAlign::Right);
    }

    /// Sets the scroll translation of the view.
    ///
    /// The offset is recorded in the pending paragraph style without marking
    /// it changed, so nothing is pushed and the layout is kept. It moves
    /// carets and drawing from the next query on.
    pub fn scroll(&mut self, offset: Offset) {
        self.pending.paragraph.scroll = offset;
    }

    /// Commits a newline at a dialect position, see [`push_at`](Self::push_at).
    pub fn newline(&mut self, index: usize) {
        self.set_text('\n');
        self.push_at(index);
    }

    /// Commits `text` at a dialect position, see [`push_at`](Self::push_at).
    pub fn text(&mut self, text: impl Into<TextBuffer>, index: usize) {
        self.set_text(text);
        self.push_at(index);
    }

    /// Tells the engine that the last push only changed colors.
    ///
    /// If that push appended a run without text whose geometry matches the
    /// preceding text, and the run lands after the characters of the last
    /// line, the cached layout is extended instead of recomputed. Calling this is never
    /// required for correct output.
    pub fn color_change(&mut self) {
        if !self.pushed_style_marker {
            return;
        }
        let Some(run) = self.store.len().checked_sub(1) else {
            return;
        };
        let offset_x = self.pending.font.offset.x;
        if let Some(cached) = &mut self.layout {
            if cached.revision + 1 == self.revision
                && cached.layout.append_marker(run, offset_x)
            {
                log::trace!("keeping layout across a color change");
                cached.revision = self.revision;
            }
        }
    }

    /// Sets the logical buffer size used for wrapping and alignment.
    pub fn set_size(&mut self, width: f32, height: f32) {
        if width.to_bits() != self.width.to_bits() || height.to_bits() != self.height.to_bits() {
            self.width = width;
            self.height = height;
            self.touch();
        }
    }

    /// Returns the logical buffer size.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Restricts drawing to `clip`, in buffer pixels.
    pub fn set_clip(&mut self, clip: Rect) {
        self.clip = Some(clip);
    }

    /// Allows drawing to the whole buffer.
    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    /// Returns the clip rectangle.
    pub fn clip(&self) -> Option<Rect> {
        self.clip
    }

    /// Sets the caret painted by the next draw.
    pub fn set_caret(&mut self, caret: Option<Caret>) {
        self.caret = caret;
    }

    /// Returns the caret.
    pub fn caret(&self) -> Option<Caret> {
        self.caret
    }

    /// Highlights the span between `start` and `end`, in any order.
    pub fn set_highlight(&mut self, start: Caret, end: Caret) {
        self.highlight = Some(Selection::new(start, end));
    }

    /// Removes the highlight.
    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    /// Returns the highlighted span.
    pub fn highlight(&self) -> Option<Selection> {
        self.highlight
    }

    fn refresh(&mut self) -> (&Layout, &RunStore, &MetricsCache) {
        let revision = self.revision;
        let generation = self.provider.generation();
        let scroll = self.pending.paragraph.scroll;
        if self
            .layout
            .as_ref()
            .is_some_and(|cached| cached.revision != revision || cached.generation != generation)
        {
            self.layout = None;
        }
        let Self {
            provider,
            cache,
            store,
            width,
            height,
            layout: cached,
            ..
        } = self;
        let cached = cached.get_or_insert_with(|| CachedLayout {
            revision,
            generation,
            layout: layout::build(&mut *cache, &mut *provider, store.runs(), *width, *height),
        });
        cached.layout.scroll = scroll;
        (&cached.layout, &*store, &*cache)
    }

    /// Returns the layout of the committed runs, computing it if needed.
    pub fn layout(&mut self) -> &Layout {
        self.refresh().0
    }

    /// Lays out the runs and returns everything needed to paint them.
    pub fn frame(&mut self) -> Frame<'_> {
        let (caret, highlight, clip) = (self.caret, self.highlight, self.clip);
        let (layout, runs, cache) = self.refresh();
        Frame {
            layout,
            runs,
            cache,
            caret,
            highlight,
            clip,
        }
    }

    /// Returns the size of the box containing all lines.
    ///
    /// Uses the same layout as drawing and caret mapping.
    pub fn measure(&mut self) -> Size {
        self.layout().size()
    }

    /// Returns the caret closest to `point`, see [`Caret::from_point`].
    pub fn offset_to_caret(&mut self, point: Point) -> Caret {
        Caret::from_point(self.layout(), point)
    }

    /// Returns the position of `caret`, see [`Caret::to_point`].
    pub fn caret_to_offset(&mut self, caret: Caret) -> Point {
        caret.to_point(self.layout())
    }

    /// Returns the rectangle of a caret bar of the given `width`.
    pub fn caret_geometry(&mut self, caret: Caret, width: f64) -> Rect {
        caret.geometry(self.layout(), width)
    }

    /// Returns the rectangles covering the highlighted span.
    pub fn highlight_geometry(&mut self) -> Vec<Rect> {
        match self.highlight {
            Some(highlight) => highlight.geometry(self.layout()),
            None => Vec::new(),
        }
    }
}
