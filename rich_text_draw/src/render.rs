// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Painting layouts through a [`RasterSink`].

use peniko::Color;
use peniko::kurbo::{Affine, Point, Rect, Size, Vec2};
use rich_text::layout::Glyph;
use rich_text::{FontProvider, FontStyle, Frame, RichText, Run, RunStore, Shadow};
use smallvec::SmallVec;

use crate::RasterSink;

/// What a call to [`Renderer::draw`] does.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum DrawMode {
    /// Lay out and paint.
    #[default]
    DrawText,
    /// Lay out and report the size without touching the sink.
    SizeText,
}

/// Appearance settings that are not part of the text styles.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RenderSettings {
    /// Whether glyph outlines are anti-aliased.
    pub anti_alias: bool,
    /// Background of highlighted glyphs.
    pub highlight_color: Color,
    /// Color of the caret bar.
    pub caret_color: Color,
    /// Width of the caret bar in pixels.
    pub caret_width: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            anti_alias: true,
            highlight_color: Color::from_rgba8(170, 200, 255, 255),
            caret_color: Color::BLACK,
            caret_width: 1.0,
        }
    }
}

/// Paints the current layout of a [`RichText`] engine.
#[derive(Clone, Default, Debug)]
pub struct Renderer {
    /// Settings used by every draw.
    pub settings: RenderSettings,
}

impl Renderer {
    /// Creates a renderer with the given settings.
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Lays out the engine's runs and, for [`DrawMode::DrawText`], paints them
    /// into `sink` with the buffer origin at `offset`.
    ///
    /// Returns the size of the laid out text in both modes.
    pub fn draw<P: FontProvider>(
        &self,
        engine: &mut RichText<P>,
        sink: &mut impl RasterSink,
        mode: DrawMode,
        offset: Point,
    ) -> Size {
        match mode {
            DrawMode::SizeText => engine.measure(),
            DrawMode::DrawText => {
                let frame = engine.frame();
                self.paint(&frame, sink, offset.to_vec2());
                frame.layout.size()
            }
        }
    }

    /// Paints `frame` into `sink`, translated by `offset`.
    pub fn paint(&self, frame: &Frame<'_>, sink: &mut impl RasterSink, offset: Vec2) {
        let layout = frame.layout;
        sink.set_clip(frame.clip.map(|clip| clip + offset));
        if layout.is_empty() {
            return;
        }
        let scroll = layout.scroll();
        let origin = offset + Vec2::new(f64::from(scroll.x), f64::from(scroll.y));
        log::trace!(
            "painting {} glyphs on {} lines at {origin:?}",
            layout.glyphs().len(),
            layout.lines().len()
        );

        // Selection rectangles already include the scroll offset.
        if let Some(highlight) = frame.highlight {
            highlight.geometry_with(layout, |rect| {
                sink.fill_rect(rect + offset, self.settings.highlight_color);
            });
        }

        let outlines = layout.glyphs().iter().filter_map(|glyph| {
            let font = font_of(frame.runs, glyph)?;
            let path = frame.cache.outline(glyph.outline);
            let position = origin + Vec2::new(f64::from(glyph.x), f64::from(glyph.y));
            (!path.elements().is_empty()).then_some((font, path, position))
        });
        // Shadows stay beneath every glyph, including neighbouring ones.
        for (font, path, position) in outlines.clone() {
            if !font.shadow.is_visible() {
                continue;
            }
            for (shift, color) in shadow_copies(&font.shadow) {
                let transform = Affine::translate(position + shift);
                sink.fill_path(path, transform, color, self.settings.anti_alias);
            }
        }
        for (font, path, position) in outlines {
            sink.fill_path(
                path,
                Affine::translate(position),
                font.color,
                self.settings.anti_alias,
            );
        }

        for line in 0..layout.lines().len() {
            paint_underlines(frame.runs, layout.line_glyphs(line), sink, origin);
        }

        if let Some(caret) = frame.caret {
            let rect = caret.geometry(layout, self.settings.caret_width);
            if rect.height() > 0.0 {
                sink.fill_rect(rect + offset, self.settings.caret_color);
            }
        }
    }
}

fn font_of<'a>(runs: &'a RunStore, glyph: &Glyph) -> Option<&'a FontStyle> {
    runs.get(glyph.run)
        .and_then(Run::as_text)
        .map(|run| &run.font)
}

/// Translations and colors of the copies making up a glyph's shadow.
///
/// A blurred shadow is approximated by translucent copies spread around the
/// offset; together they reach the shadow's opacity where they all overlap.
fn shadow_copies(shadow: &Shadow) -> SmallVec<[(Vec2, Color); 9]> {
    let center = Vec2::new(f64::from(shadow.offset.x), f64::from(shadow.offset.y));
    let mut copies = SmallVec::new();
    if shadow.blur.is_nan() || shadow.blur <= 0.0 {
        copies.push((center, shadow.color));
        return copies;
    }
    let radius = f64::from(shadow.blur) * 0.5;
    let color = shadow.color.multiply_alpha(1.0 / 9.0);
    for dy in [-radius, 0.0, radius] {
        for dx in [-radius, 0.0, radius] {
            copies.push((center + Vec2::new(dx, dy), color));
        }
    }
    copies
}

/// A horizontal stretch of underlined glyphs from one run.
struct Underline<'a> {
    run: usize,
    x0: f32,
    x1: f32,
    baseline: f32,
    font: &'a FontStyle,
}

impl Underline<'_> {
    fn fill(&self, sink: &mut impl RasterSink, origin: Vec2) {
        if self.x1 <= self.x0 {
            return;
        }
        let thickness = f64::from(self.font.size / 12.0).max(1.0);
        let top = f64::from(self.baseline) + thickness;
        let rect = Rect::new(f64::from(self.x0), top, f64::from(self.x1), top + thickness);
        sink.fill_rect(rect + origin, self.font.color);
    }
}

/// Paints one underline per stretch of underlined glyphs from the same run.
fn paint_underlines(runs: &RunStore, glyphs: &[Glyph], sink: &mut impl RasterSink, origin: Vec2) {
    let mut current: Option<Underline<'_>> = None;
    for glyph in glyphs {
        let font = font_of(runs, glyph).filter(|font| font.underline);
        if let (Some(underline), Some(_)) = (current.as_mut(), font) {
            if underline.run == glyph.run {
                underline.x1 = glyph.x + glyph.advance;
                continue;
            }
        }
        if let Some(underline) = current.take() {
            underline.fill(sink, origin);
        }
        current = font.map(|font| Underline {
            run: glyph.run,
            x0: glyph.x,
            x1: glyph.x + glyph.advance,
            baseline: glyph.y,
            font,
        });
    }
    if let Some(underline) = current {
        underline.fill(sink, origin);
    }
}
