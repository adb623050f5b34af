// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`RasterSink`] for Tiny-Skia pixmaps.

#![allow(
    clippy::cast_possible_truncation,
    reason = "Tiny-Skia works in f32 and kurbo in f64; text coordinates fit either."
)]

use core::fmt::{Debug, Formatter};

use peniko::kurbo::{Affine, BezPath, PathEl, Rect};
use peniko::Color;
use tiny_skia::{FillRule, Mask, Paint, Path, PathBuilder, PixmapMut, Transform};

use crate::RasterSink;

/// Paints into a borrowed Tiny-Skia pixmap.
pub struct TinySkiaSink<'a> {
    pixmap: PixmapMut<'a>,
    clip: Option<Mask>,
}

impl Debug for TinySkiaSink<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TinySkiaSink")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("clipped", &self.clip.is_some())
            .finish()
    }
}

impl<'a> TinySkiaSink<'a> {
    /// Creates a sink painting into `pixmap`.
    pub fn new(pixmap: PixmapMut<'a>) -> Self {
        Self { pixmap, clip: None }
    }
}

impl RasterSink for TinySkiaSink<'_> {
    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip.and_then(|clip| {
            let mut mask = Mask::new(self.pixmap.width(), self.pixmap.height())?;
            if let Some(rect) = to_rect(clip) {
                mask.fill_path(
                    &PathBuilder::from_rect(rect),
                    FillRule::Winding,
                    false,
                    Transform::identity(),
                );
            }
            Some(mask)
        });
    }

    fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Color, anti_alias: bool) {
        let Some(path) = to_path(path) else {
            return;
        };
        let mut paint = paint(color);
        paint.anti_alias = anti_alias;
        let [sx, ky, kx, sy, tx, ty] = transform.as_coeffs();
        let transform = Transform::from_row(
            sx as f32, ky as f32, kx as f32, sy as f32, tx as f32, ty as f32,
        );
        self.pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            transform,
            self.clip.as_ref(),
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(rect) = to_rect(rect) else {
            return;
        };
        self.pixmap.fill_rect(
            rect,
            &paint(color),
            Transform::identity(),
            self.clip.as_ref(),
        );
    }
}

fn paint(color: Color) -> Paint<'static> {
    let rgba8 = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba8.r, rgba8.g, rgba8.b, rgba8.a);
    paint
}

/// Converts a kurbo rectangle, returning `None` for empty or invalid ones.
fn to_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    let rect = rect.abs();
    tiny_skia::Rect::from_ltrb(
        rect.x0 as f32,
        rect.y0 as f32,
        rect.x1 as f32,
        rect.y1 as f32,
    )
}

fn to_path(path: &BezPath) -> Option<Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32);
            }
            PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}
