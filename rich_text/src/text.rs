// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::ops::Deref;

/// An owned sequence of code points handed to the engine.
///
/// The buffer is moved into the engine by [`RichText::set_text`](crate::RichText::set_text)
/// and released when it is committed into a run and that run is dropped, or
/// when it is superseded by another `set_text` call or a reset.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    chars: Box<[char]>,
}

impl TextBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the code points of the buffer.
    pub fn as_chars(&self) -> &[char] {
        &self.chars
    }
}

impl Deref for TextBuffer {
    type Target = [char];

    fn deref(&self) -> &[char] {
        &self.chars
    }
}

impl Debug for TextBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let text: String = self.chars.iter().collect();
        write!(f, "TextBuffer({text:?})")
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }
}

impl From<String> for TextBuffer {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<Vec<char>> for TextBuffer {
    fn from(chars: Vec<char>) -> Self {
        Self {
            chars: chars.into_boxed_slice(),
        }
    }
}

impl From<&[char]> for TextBuffer {
    fn from(chars: &[char]) -> Self {
        Self {
            chars: chars.into(),
        }
    }
}

impl From<char> for TextBuffer {
    fn from(ch: char) -> Self {
        Self {
            chars: Box::new([ch]),
        }
    }
}
