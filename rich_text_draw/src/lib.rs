// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich Text Draw paints the layouts of [`rich_text`] into pixel buffers.
//!
//! Painting goes through a [`RasterSink`], which only needs to fill paths and
//! rectangles with solid colors inside an optional clip rectangle. The
//! [`Renderer`] walks the engine's current layout, so every glyph lands exactly
//! where caret mapping expects it.
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm][].
//! - `tiny-skia` (enabled by default): Implements [`RasterSink`] for Tiny-Skia's `PixmapMut`.
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("rich_text_draw requires either the `std` or `libm` feature to be enabled");

mod render;
mod sink;

#[cfg(feature = "tiny-skia")]
mod tiny_skia_sink;

#[cfg(test)]
mod tests;

pub use render::{DrawMode, RenderSettings, Renderer};
pub use sink::RasterSink;

#[cfg(feature = "tiny-skia")]
pub use tiny_skia_sink::TinySkiaSink;
