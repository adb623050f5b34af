// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich Text lays out attributed text runs into wrapped lines and maps between
//! pixel offsets and caret positions.
//!
//! Text is accumulated incrementally: a dialect dispatcher mutates the pending
//! font, paragraph and text state of a [`RichText`] engine and commits it with
//! [`RichText::push`]. Each commit appends [`Run`]s to the run store, and
//! [`RichText::drop_runs`] rewinds the store from the tail. Layout is computed
//! on demand over the whole store and shared by measurement, caret mapping and
//! drawing, so a caret always lands exactly where its glyph was painted.
//!
//! Glyph data comes from a [`FontProvider`]; the engine never parses fonts
//! itself.
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm][].
//! - `skrifa` (enabled by default): Provides [`SkrifaProvider`], a font provider
//!   backed by [Skrifa][skrifa].
//! - `testing`: Exposes the deterministic [`testing::FixedAdvanceProvider`].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm
//! [skrifa]: https://crates.io/crates/skrifa

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
compile_error!("rich_text requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

pub use peniko;
pub use peniko::kurbo;
pub use peniko::Color;

mod cursor;
mod engine;
mod error;
mod store;
mod style;
mod text;

pub mod font;
pub mod layout;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[cfg(test)]
mod tests;

pub use cursor::{Caret, Selection};
pub use engine::{Attributes, Frame, RichText};
pub use error::{Error, ErrorKind};
pub use font::{FontHandle, FontProvider, FontQuery, GlyphMetrics, MetricsCache};
pub use layout::Layout;
pub use store::{ParagraphRun, Run, RunStore, TextRun};
pub use style::{
    FontStyle, HorizontalAlign, Offset, ParagraphStyle, Shadow, StyleFlag, VerticalAlign,
};
pub use text::TextBuffer;

#[cfg(feature = "skrifa")]
pub use font::SkrifaProvider;
