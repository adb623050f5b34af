// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph data providers and the per-engine metrics cache.

mod cache;
#[cfg(feature = "skrifa")]
mod skrifa;

use peniko::kurbo::BezPath;

pub use cache::{CachedGlyph, FontSlot, MetricsCache, OutlineId};
#[cfg(feature = "skrifa")]
pub use skrifa::SkrifaProvider;

/// Opaque identifier of a font opened by a [`FontProvider`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FontHandle(pub u32);

/// Description of the font face requested for a run.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FontQuery<'a> {
    /// Family name.
    pub family: &'a str,
    /// Bold face requested.
    pub bold: bool,
    /// Italic face requested.
    pub italic: bool,
    /// Size in logical pixels per em.
    pub size: f32,
}

/// Horizontal and vertical extent of a glyph, in logical pixels.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct GlyphMetrics {
    /// Distance the pen moves after the glyph.
    pub advance: f32,
    /// Distance from the baseline to the top of the line box (positive).
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box (positive).
    pub descent: f32,
}

/// Source of glyph metrics and outlines.
///
/// This abstracts over the font engine: the layout, caret mapping and
/// rendering logic only ever talk to this trait.
pub trait FontProvider {
    /// Opens the font matching `query`, returning `None` if nothing matches.
    fn open_font(&mut self, query: &FontQuery<'_>) -> Option<FontHandle>;

    /// Returns the metrics of `ch` in `font`, or `None` if the font cannot
    /// render it.
    fn glyph_metrics(&mut self, font: FontHandle, ch: char) -> Option<GlyphMetrics>;

    /// Returns the outline of `ch` in `font`, relative to the pen position on
    /// the baseline, with y growing downwards.
    fn glyph_outline(&mut self, font: FontHandle, ch: char) -> Option<BezPath>;

    /// Returns a counter that changes whenever the set of available fonts
    /// changes. Caches built on this provider are invalidated when it does.
    fn generation(&self) -> u64 {
        0
    }
}

impl<P: FontProvider + ?Sized> FontProvider for &mut P {
    fn open_font(&mut self, query: &FontQuery<'_>) -> Option<FontHandle> {
        (**self).open_font(query)
    }

    fn glyph_metrics(&mut self, font: FontHandle, ch: char) -> Option<GlyphMetrics> {
        (**self).glyph_metrics(font, ch)
    }

    fn glyph_outline(&mut self, font: FontHandle, ch: char) -> Option<BezPath> {
        (**self).glyph_outline(font, ch)
    }

    fn generation(&self) -> u64 {
        (**self).generation()
    }
}
