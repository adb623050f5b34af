// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic glyph data for tests.

use alloc::vec::Vec;

use peniko::kurbo::{BezPath, Rect, Shape};

use crate::font::{FontHandle, FontProvider, FontQuery, GlyphMetrics};

/// A font provider where every glyph is a filled box of a fixed advance.
///
/// Advances are given for a 12 pixel font and scale with the requested size.
/// Ascent and descent are 80% and 20% of the default advance, so at 12 pixels
/// the height of a line equals the default advance. Families are ignored.
#[derive(Clone, Debug)]
pub struct FixedAdvanceProvider {
    advance: f32,
    overrides: Vec<(char, f32)>,
    missing: Vec<char>,
    generation: u64,
    opened: Vec<(bool, bool, f32)>,
    metrics_requests: usize,
}

impl FixedAdvanceProvider {
    /// Creates a provider with the given advance for every glyph.
    pub fn new(advance: f32) -> Self {
        Self {
            advance,
            overrides: Vec::new(),
            missing: Vec::new(),
            generation: 0,
            opened: Vec::new(),
            metrics_requests: 0,
        }
    }

    /// Gives `ch` its own advance.
    #[must_use]
    pub fn with_advance(mut self, ch: char, advance: f32) -> Self {
        self.overrides.push((ch, advance));
        self
    }

    /// Makes `ch` unrenderable.
    #[must_use]
    pub fn with_missing(mut self, ch: char) -> Self {
        self.missing.push(ch);
        self
    }

    /// Simulates a change of the available fonts.
    pub fn bump_generation(&mut self) {
        self.generation += 1;
    }

    /// Returns how many times glyph metrics were requested.
    pub fn metrics_requests(&self) -> usize {
        self.metrics_requests
    }

    /// Returns how many fonts were opened.
    pub fn fonts_opened(&self) -> usize {
        self.opened.len()
    }

    /// Returns the bold and italic flags of every opened font.
    pub fn opened_faces(&self) -> impl Iterator<Item = (bool, bool)> + '_ {
        self.opened.iter().map(|(bold, italic, _)| (*bold, *italic))
    }

    fn scale(&self, font: FontHandle) -> f32 {
        self.opened
            .get(font.0 as usize)
            .map_or(1.0, |(_, _, size)| size / 12.0)
    }

    fn advance_of(&self, ch: char) -> f32 {
        self.overrides
            .iter()
            .find(|(c, _)| *c == ch)
            .map_or(self.advance, |(_, advance)| *advance)
    }
}

impl FontProvider for FixedAdvanceProvider {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Tests never open anywhere near u32::MAX fonts."
    )]
    fn open_font(&mut self, query: &FontQuery<'_>) -> Option<FontHandle> {
        self.opened.push((query.bold, query.italic, query.size));
        Some(FontHandle(self.opened.len() as u32 - 1))
    }

    fn glyph_metrics(&mut self, font: FontHandle, ch: char) -> Option<GlyphMetrics> {
        self.metrics_requests += 1;
        if self.missing.contains(&ch) {
            return None;
        }
        let scale = self.scale(font);
        Some(GlyphMetrics {
            advance: self.advance_of(ch) * scale,
            ascent: self.advance * 0.8 * scale,
            descent: self.advance * 0.2 * scale,
        })
    }

    fn glyph_outline(&mut self, font: FontHandle, ch: char) -> Option<BezPath> {
        if self.missing.contains(&ch) || ch.is_whitespace() {
            return None;
        }
        let scale = self.scale(font);
        let advance = f64::from(self.advance_of(ch) * scale);
        let ascent = f64::from(self.advance * 0.8 * scale);
        Some(Rect::new(0.0, -ascent, advance, 0.0).to_path(0.1))
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}
