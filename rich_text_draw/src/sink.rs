// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::{Affine, BezPath, Rect};
use peniko::Color;

/// A pixel buffer that can be filled with solid colors.
///
/// All coordinates are device pixels of the buffer. Implementations never
/// resize the buffer.
pub trait RasterSink {
    /// Restricts all following fills to `clip`, or lifts the restriction.
    fn set_clip(&mut self, clip: Option<Rect>);

    /// Fills `path`, transformed by `transform`, using the non-zero winding
    /// rule.
    fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Color, anti_alias: bool);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

impl<S: RasterSink + ?Sized> RasterSink for &mut S {
    fn set_clip(&mut self, clip: Option<Rect>) {
        (**self).set_clip(clip);
    }

    fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Color, anti_alias: bool) {
        (**self).fill_path(path, transform, color, anti_alias);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        (**self).fill_rect(rect, color);
    }
}
