// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font provider backed by Skrifa.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use peniko::kurbo::BezPath;
use skrifa::instance::{LocationRef, Size};
use skrifa::metrics::{GlyphMetrics as SkrifaGlyphMetrics, Metrics};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::{FontRef, MetadataProvider};

use super::{FontHandle, FontProvider, FontQuery, GlyphMetrics};
use crate::Error;

struct Face {
    family: String,
    bold: bool,
    italic: bool,
    data: Arc<[u8]>,
    index: u32,
}

impl Face {
    fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.index).ok()
    }
}

struct OpenFont {
    face: usize,
    size: f32,
    ascent: f32,
    descent: f32,
}

/// A [`FontProvider`] over font files registered from memory.
///
/// Faces are matched by family name (ASCII case-insensitive) and then by the
/// bold and italic flags. A family without the requested variant falls back to
/// its closest face, and an unknown family falls back to the first registered
/// face.
#[derive(Default)]
pub struct SkrifaProvider {
    faces: Vec<Face>,
    open: Vec<OpenFont>,
    generation: u64,
}

impl Debug for SkrifaProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SkrifaProvider")
            .field("faces", &self.faces.len())
            .field("open", &self.open.len())
            .field("generation", &self.generation)
            .finish()
    }
}

impl SkrifaProvider {
    /// Creates a provider without any fonts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers face `index` of the font file `data` under `family`.
    ///
    /// Registering a font changes the provider's generation, which invalidates
    /// caches built on it.
    pub fn register_font(
        &mut self,
        family: impl Into<String>,
        bold: bool,
        italic: bool,
        data: impl Into<Arc<[u8]>>,
        index: u32,
    ) -> Result<(), Error> {
        let family = family.into();
        let data = data.into();
        let font = FontRef::from_index(&data, index)
            .map_err(|_| Error::invalid_font_data(family.clone(), index))?;
        if font.outline_glyphs().format().is_none() || !font.charmap().has_map() {
            return Err(Error::missing_outlines(family, index));
        }
        log::debug!("registered face {index} of {family:?} (bold {bold}, italic {italic})");
        self.faces.push(Face {
            family,
            bold,
            italic,
            data,
            index,
        });
        self.generation += 1;
        Ok(())
    }

    /// Returns the number of registered faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if no face is registered.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    fn find_face(&self, query: &FontQuery<'_>) -> Option<usize> {
        let score = |face: &Face| {
            let mut score = 0;
            if face.family.eq_ignore_ascii_case(query.family) {
                score += 4;
            }
            if face.bold == query.bold {
                score += 2;
            }
            if face.italic == query.italic {
                score += 1;
            }
            score
        };
        // Earlier registrations win ties.
        self.faces
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, face)| score(face))
            .map(|(index, _)| index)
    }

    fn font(&self, handle: FontHandle) -> Option<(&OpenFont, FontRef<'_>)> {
        let open = self.open.get(handle.0 as usize)?;
        let font = self.faces[open.face].font_ref()?;
        Some((open, font))
    }
}

impl FontProvider for SkrifaProvider {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Handles index the open fonts, which never approach u32::MAX."
    )]
    fn open_font(&mut self, query: &FontQuery<'_>) -> Option<FontHandle> {
        let face = self.find_face(query)?;
        if let Some(existing) = self
            .open
            .iter()
            .position(|open| open.face == face && open.size.to_bits() == query.size.to_bits())
        {
            return Some(FontHandle(existing as u32));
        }
        let font = self.faces[face].font_ref()?;
        let metrics = Metrics::new(&font, Size::new(query.size), LocationRef::default());
        self.open.push(OpenFont {
            face,
            size: query.size,
            ascent: metrics.ascent,
            descent: -metrics.descent,
        });
        Some(FontHandle(self.open.len() as u32 - 1))
    }

    fn glyph_metrics(&mut self, handle: FontHandle, ch: char) -> Option<GlyphMetrics> {
        let (open, font) = self.font(handle)?;
        let glyph_id = font.charmap().map(ch)?;
        let advance = SkrifaGlyphMetrics::new(&font, Size::new(open.size), LocationRef::default())
            .advance_width(glyph_id)?;
        Some(GlyphMetrics {
            advance,
            ascent: open.ascent,
            descent: open.descent,
        })
    }

    fn glyph_outline(&mut self, handle: FontHandle, ch: char) -> Option<BezPath> {
        let (open, font) = self.font(handle)?;
        let glyph_id = font.charmap().map(ch)?;
        let outline = font.outline_glyphs().get(glyph_id)?;
        let mut pen = FlippedPen::default();
        let settings = DrawSettings::unhinted(Size::new(open.size), LocationRef::default());
        outline.draw(settings, &mut pen).ok()?;
        Some(pen.path)
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

/// Collects an outline into a path, flipping y to grow downwards.
#[derive(Default)]
struct FlippedPen {
    path: BezPath,
}

impl OutlinePen for FlippedPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((f64::from(x), -f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((f64::from(x), -f64::from(y)));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path.quad_to(
            (f64::from(cx0), -f64::from(cy0)),
            (f64::from(x), -f64::from(y)),
        );
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(
            (f64::from(cx0), -f64::from(cy0)),
            (f64::from(cx1), -f64::from(cy1)),
            (f64::from(x), -f64::from(y)),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
