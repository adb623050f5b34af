// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoization of glyph metrics and outlines.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use hashbrown::{Equivalent, HashMap};
use peniko::kurbo::BezPath;

use super::{FontHandle, FontProvider, FontQuery, GlyphMetrics};
use crate::FontStyle;

/// Identifies a font style resolved by a [`MetricsCache`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FontSlot(u32);

/// Identifies a glyph outline stored in a [`MetricsCache`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct OutlineId(u32);

impl OutlineId {
    /// The outline of glyphs that paint nothing.
    pub const EMPTY: Self = Self(0);
}

/// Everything the layout and the renderer need to know about one glyph.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CachedGlyph {
    /// Advance, ascent and descent of the glyph.
    pub metrics: GlyphMetrics,
    /// Handle of the glyph outline.
    pub outline: OutlineId,
    /// Whether the font could not render the glyph and an empty glyph was
    /// substituted.
    pub missing: bool,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct FontKey {
    family: String,
    size: u32,
    bold: bool,
    italic: bool,
    underline: bool,
}

/// Borrowed form of [`FontKey`] so that lookups don't allocate.
///
/// Must hash identically to `FontKey`.
#[derive(Hash)]
struct FontKeyRef<'a> {
    family: &'a str,
    size: u32,
    bold: bool,
    italic: bool,
    underline: bool,
}

impl<'a> FontKeyRef<'a> {
    fn new(style: &'a FontStyle) -> Self {
        Self {
            family: &style.family,
            size: style.size.to_bits(),
            bold: style.bold,
            italic: style.italic,
            underline: style.underline,
        }
    }

    fn to_key(&self) -> FontKey {
        FontKey {
            family: self.family.into(),
            size: self.size,
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
        }
    }
}

impl Equivalent<FontKey> for FontKeyRef<'_> {
    fn equivalent(&self, key: &FontKey) -> bool {
        self.family == key.family
            && self.size == key.size
            && self.bold == key.bold
            && self.italic == key.italic
            && self.underline == key.underline
    }
}

struct SlotData {
    family: String,
    size: f32,
    handle: Option<FontHandle>,
    line_metrics: Option<GlyphMetrics>,
    glyphs: HashMap<char, CachedGlyph>,
}

/// Per-engine cache of glyph metrics and outlines.
///
/// Entries are keyed by family, size, bold, italic and underline flags plus the
/// code point. Nothing is evicted; the cache is bounded by the style and code
/// point combinations actually used. It is cleared when the provider reports a
/// new [generation](FontProvider::generation) or on
/// [`invalidate`](Self::invalidate).
pub struct MetricsCache {
    keys: HashMap<FontKey, FontSlot>,
    slots: Vec<SlotData>,
    outlines: Vec<BezPath>,
    generation: Option<u64>,
    missing: usize,
    hits: u64,
    misses: u64,
}

impl Default for MetricsCache {
    fn default() -> Self {
        Self {
            keys: HashMap::new(),
            slots: Vec::new(),
            outlines: vec![BezPath::new()],
            generation: None,
            missing: 0,
            hits: 0,
            misses: 0,
        }
    }
}

impl Debug for MetricsCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MetricsCache")
            .field("fonts", &self.slots.len())
            .field("glyphs", &self.len())
            .field("outlines", &self.outlines.len())
            .field("generation", &self.generation)
            .field("missing", &self.missing)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish_non_exhaustive()
    }
}

impl MetricsCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every cached font, glyph and outline.
    pub fn invalidate(&mut self) {
        log::debug!(
            "invalidating metrics cache ({} fonts, {} glyphs)",
            self.slots.len(),
            self.len()
        );
        self.keys.clear();
        self.slots.clear();
        self.outlines.truncate(1);
        self.missing = 0;
    }

    /// Invalidates the cache if `provider` changed its set of fonts since the
    /// last call.
    pub fn sync(&mut self, provider: &impl FontProvider) {
        let generation = provider.generation();
        if self.generation != Some(generation) {
            if self.generation.is_some() {
                self.invalidate();
            }
            self.generation = Some(generation);
        }
    }

    /// Returns the number of cached glyphs.
    pub fn len(&self) -> usize {
        self.slots.iter().map(|slot| slot.glyphs.len()).sum()
    }

    /// Returns `true` if no glyph is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of distinct glyphs that had to be substituted.
    pub fn missing_glyphs(&self) -> usize {
        self.missing
    }

    /// Returns the number of glyph lookups answered from the cache.
    pub fn cache_hits(&self) -> u64 {
        self.hits
    }

    /// Returns the number of glyph lookups that reached the provider.
    pub fn cache_misses(&self) -> u64 {
        self.misses
    }

    /// Resolves `style` to a slot, opening the font on first use.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "A cache never holds anywhere near u32::MAX fonts."
    )]
    pub fn resolve(&mut self, provider: &mut impl FontProvider, style: &FontStyle) -> FontSlot {
        let key = FontKeyRef::new(style);
        if let Some(slot) = self.keys.get(&key) {
            return *slot;
        }
        let handle = provider.open_font(&FontQuery {
            family: &style.family,
            bold: style.bold,
            italic: style.italic,
            size: style.size,
        });
        if handle.is_none() {
            log::warn!(
                "no font for family {:?} (size {}, bold {}, italic {})",
                style.family,
                style.size,
                style.bold,
                style.italic
            );
        }
        let slot = FontSlot(self.slots.len() as u32);
        self.slots.push(SlotData {
            family: style.family.as_ref().into(),
            size: style.size,
            handle,
            line_metrics: None,
            glyphs: HashMap::new(),
        });
        self.keys.insert(key.to_key(), slot);
        slot
    }

    /// Returns the font-wide ascent and descent of `slot`.
    ///
    /// These are used for lines without glyphs and for substituted glyphs.
    pub fn line_metrics(&mut self, provider: &mut impl FontProvider, slot: FontSlot) -> GlyphMetrics {
        let data = &mut self.slots[slot.0 as usize];
        if let Some(metrics) = data.line_metrics {
            return metrics;
        }
        let metrics = data
            .handle
            .and_then(|handle| provider.glyph_metrics(handle, ' '))
            .map(|space| GlyphMetrics {
                advance: 0.0,
                ascent: space.ascent,
                descent: space.descent,
            })
            .unwrap_or(GlyphMetrics {
                advance: 0.0,
                ascent: data.size * 0.8,
                descent: data.size * 0.2,
            });
        data.line_metrics = Some(metrics);
        metrics
    }

    /// Returns the cached glyph for `ch` in `slot`, querying the provider on a
    /// miss.
    ///
    /// Never fails: glyphs the font cannot render are replaced by an empty,
    /// zero-advance glyph and counted in [`missing_glyphs`](Self::missing_glyphs).
    #[allow(
        clippy::cast_possible_truncation,
        reason = "A cache never holds anywhere near u32::MAX outlines."
    )]
    pub fn glyph(
        &mut self,
        provider: &mut impl FontProvider,
        slot: FontSlot,
        ch: char,
    ) -> CachedGlyph {
        if let Some(glyph) = self.slots[slot.0 as usize].glyphs.get(&ch) {
            self.hits += 1;
            return *glyph;
        }
        self.misses += 1;
        let handle = self.slots[slot.0 as usize].handle;
        let found = handle.and_then(|handle| {
            provider
                .glyph_metrics(handle, ch)
                .map(|metrics| (handle, metrics))
        });
        let glyph = match found {
            Some((handle, metrics)) => {
                let outline = match provider.glyph_outline(handle, ch) {
                    Some(path) if !path.elements().is_empty() => {
                        let id = OutlineId(self.outlines.len() as u32);
                        self.outlines.push(path);
                        id
                    }
                    _ => OutlineId::EMPTY,
                };
                CachedGlyph {
                    metrics,
                    outline,
                    missing: false,
                }
            }
            None => {
                let line = self.line_metrics(provider, slot);
                let data = &self.slots[slot.0 as usize];
                log::warn!(
                    "missing glyph {:?} (U+{:04X}) in family {:?}, substituting an empty glyph",
                    ch,
                    u32::from(ch),
                    data.family
                );
                self.missing += 1;
                CachedGlyph {
                    metrics: GlyphMetrics {
                        advance: 0.0,
                        ascent: line.ascent,
                        descent: line.descent,
                    },
                    outline: OutlineId::EMPTY,
                    missing: true,
                }
            }
        };
        self.slots[slot.0 as usize].glyphs.insert(ch, glyph);
        glyph
    }

    /// Returns the outline for `id`.
    ///
    /// Unknown identifiers, for example ones kept across an invalidation,
    /// yield the empty outline.
    pub fn outline(&self, id: OutlineId) -> &BezPath {
        self.outlines
            .get(id.0 as usize)
            .unwrap_or(&self.outlines[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedAdvanceProvider;

    #[test]
    fn glyphs_are_memoized() {
        let mut provider = FixedAdvanceProvider::new(10.0);
        let mut cache = MetricsCache::new();
        let slot = cache.resolve(&mut provider, &FontStyle::default());
        let a = cache.glyph(&mut provider, slot, 'a');
        let again = cache.glyph(&mut provider, slot, 'a');
        assert_eq!(a, again);
        assert_eq!(cache.cache_hits(), 1);
        assert_eq!(cache.cache_misses(), 1);
        assert_eq!(provider.metrics_requests(), 1);
    }

    #[test]
    fn styles_get_distinct_slots() {
        let mut provider = FixedAdvanceProvider::new(10.0);
        let mut cache = MetricsCache::new();
        let regular = FontStyle::default();
        let bold = FontStyle {
            bold: true,
            ..FontStyle::default()
        };
        let underline = FontStyle {
            underline: true,
            ..FontStyle::default()
        };
        let a = cache.resolve(&mut provider, &regular);
        let b = cache.resolve(&mut provider, &bold);
        let c = cache.resolve(&mut provider, &underline);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(cache.resolve(&mut provider, &regular), a);
    }

    #[test]
    fn missing_glyph_is_empty_and_reported() {
        let mut provider = FixedAdvanceProvider::new(10.0).with_missing('☃');
        let mut cache = MetricsCache::new();
        let slot = cache.resolve(&mut provider, &FontStyle::default());
        let glyph = cache.glyph(&mut provider, slot, '☃');
        assert!(glyph.missing);
        assert_eq!(glyph.metrics.advance, 0.0);
        assert_eq!(glyph.outline, OutlineId::EMPTY);
        assert!(cache.outline(glyph.outline).elements().is_empty());
        assert_eq!(cache.missing_glyphs(), 1);
    }

    #[test]
    fn new_generation_invalidates() {
        let mut provider = FixedAdvanceProvider::new(10.0);
        let mut cache = MetricsCache::new();
        cache.sync(&provider);
        let slot = cache.resolve(&mut provider, &FontStyle::default());
        cache.glyph(&mut provider, slot, 'a');
        assert_eq!(cache.len(), 1);
        cache.sync(&provider);
        assert_eq!(cache.len(), 1);
        provider.bump_generation();
        cache.sync(&provider);
        assert!(cache.is_empty());
    }
}
