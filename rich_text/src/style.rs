// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font and paragraph attributes.

use alloc::borrow::Cow;

use peniko::Color;

/// A pair of logical pixel distances.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct Offset {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Offset {
    /// The zero offset.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new offset.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Drop shadow painted beneath the glyphs of a run.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Shadow {
    /// Translation of the shadow relative to the glyph.
    pub offset: Offset,
    /// Shadow color.
    pub color: Color,
    /// Width of the blurred edge in logical pixels. Zero paints a hard shadow.
    pub blur: f32,
}

impl Shadow {
    /// Returns `true` if painting this shadow would be visible.
    pub fn is_visible(&self) -> bool {
        (self.offset != Offset::ZERO || self.blur > 0.0) && self.color.components[3] > 0.0
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            offset: Offset::ZERO,
            color: Color::from_rgba8(0, 0, 0, 128),
            blur: 0.0,
        }
    }
}

/// Snapshot of the font attributes of a text run.
///
/// A copy is taken for every pushed [`TextRun`](crate::TextRun), so later
/// mutations of the pending style never affect runs already in the store.
#[derive(Clone, PartialEq, Debug)]
pub struct FontStyle {
    /// Family name handed to the font provider.
    pub family: Cow<'static, str>,
    /// Bold face.
    pub bold: bool,
    /// Italic face.
    pub italic: bool,
    /// Underline decoration.
    pub underline: bool,
    /// Font size in logical pixels per em.
    pub size: f32,
    /// Fill color of the glyphs.
    pub color: Color,
    /// Visual translation of the glyphs. Does not move the pen.
    pub offset: Offset,
    /// Extra space added after every glyph (`x`) and below every line (`y`).
    pub space: Offset,
    /// Drop shadow.
    pub shadow: Shadow,
}

impl FontStyle {
    /// The family used when none is specified.
    pub const DEFAULT_FAMILY: &'static str = "sans-serif";

    /// Returns `true` if the two styles produce identical glyph geometry.
    ///
    /// Colors and shadows are ignored.
    pub fn same_geometry(&self, other: &Self) -> bool {
        self.family == other.family
            && self.bold == other.bold
            && self.italic == other.italic
            && self.underline == other.underline
            && self.size.to_bits() == other.size.to_bits()
            && self.offset == other.offset
            && self.space == other.space
    }
}

/// A style keyword of the text dialect.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StyleFlag {
    /// Sets the bold flag.
    Bold,
    /// Sets the italic flag.
    Italic,
    /// Sets the underline flag.
    Underline,
    /// Clears the bold, italic and underline flags.
    Plain,
}

impl FontStyle {
    /// Applies a style keyword.
    pub fn apply(&mut self, flag: StyleFlag) {
        match flag {
            StyleFlag::Bold => self.bold = true,
            StyleFlag::Italic => self.italic = true,
            StyleFlag::Underline => self.underline = true,
            StyleFlag::Plain => {
                self.bold = false;
                self.italic = false;
                self.underline = false;
            }
        }
    }
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            family: Cow::Borrowed(Self::DEFAULT_FAMILY),
            bold: false,
            italic: false,
            underline: false,
            size: 12.0,
            color: Color::from_rgba8(0, 0, 0, 255),
            offset: Offset::ZERO,
            space: Offset::ZERO,
            shadow: Shadow::default(),
        }
    }
}

/// Horizontal alignment of the lines of a paragraph.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum HorizontalAlign {
    /// Lines start at the left edge of the content box.
    #[default]
    Left,
    /// Lines are centered in the content box.
    Center,
    /// Lines end at the right edge of the content box.
    Right,
}

/// Vertical alignment of the whole block of lines.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum VerticalAlign {
    /// The block starts at the top edge of the content box.
    #[default]
    Top,
    /// The block is centered in the content box.
    Center,
    /// The block ends at the bottom edge of the content box.
    Bottom,
}

impl HorizontalAlign {
    pub(crate) fn factor(self) -> f32 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

impl VerticalAlign {
    pub(crate) fn factor(self) -> f32 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
        }
    }
}

/// Paragraph attributes.
///
/// The content box of a layout spans from `origin + margin` to the logical
/// buffer size minus `margin`. The first line of every paragraph is
/// additionally shifted by `indent`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ParagraphStyle {
    /// Top-left position of the text inside the buffer.
    pub origin: Offset,
    /// Space kept free on both sides of the content box.
    pub margin: Offset,
    /// Extra shift of the first line of a paragraph.
    pub indent: Offset,
    /// Distance between tab stops. Tabs behave like spaces when not positive.
    pub tab_width: f32,
    /// Whether lines wrap at the right edge of the content box.
    pub wrap: bool,
    /// Translation applied after layout, when drawing and mapping carets.
    ///
    /// The pending style's value is in effect. Values recorded in committed
    /// paragraph runs never reach the layout.
    pub scroll: Offset,
    /// Horizontal alignment of each line.
    pub align: HorizontalAlign,
    /// Vertical alignment of the block of lines.
    pub valign: VerticalAlign,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            origin: Offset::ZERO,
            margin: Offset::ZERO,
            indent: Offset::ZERO,
            tab_width: 40.0,
            wrap: false,
            scroll: Offset::ZERO,
            align: HorizontalAlign::Left,
            valign: VerticalAlign::Top,
        }
    }
}
