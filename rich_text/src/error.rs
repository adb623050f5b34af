// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::borrow::Cow;

/// Error produced while setting up a font provider.
///
/// Layout, caret mapping and drawing never fail; anomalies there degrade to
/// safe defaults instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The family the operation was performed for.
    family: Cow<'static, str>,

    /// Index of the face inside a font collection.
    index: u32,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The family the failed operation was performed for.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Index of the face inside a font collection.
    pub fn index(&self) -> u32 {
        self.index
    }

    #[cfg_attr(
        not(feature = "skrifa"),
        expect(dead_code, reason = "only font backends report errors")
    )]
    pub(crate) fn invalid_font_data(family: impl Into<Cow<'static, str>>, index: u32) -> Self {
        Self {
            kind: ErrorKind::InvalidFontData,
            family: family.into(),
            index,
        }
    }

    #[cfg_attr(
        not(feature = "skrifa"),
        expect(dead_code, reason = "only font backends report errors")
    )]
    pub(crate) fn missing_outlines(family: impl Into<Cow<'static, str>>, index: u32) -> Self {
        Self {
            kind: ErrorKind::MissingOutlines,
            family: family.into(),
            index,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidFontData => write!(
                f,
                "font data for family {:?} (face {}) could not be parsed",
                self.family, self.index
            ),
            ErrorKind::MissingOutlines => write!(
                f,
                "font for family {:?} (face {}) has no character map or outlines",
                self.family, self.index
            ),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The bytes handed to the provider are not a font.
    InvalidFontData,

    /// The font parsed but cannot map characters to outlines.
    MissingOutlines,
}
