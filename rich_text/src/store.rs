// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered storage for committed runs.

use alloc::vec::Vec;

use crate::{FontStyle, ParagraphStyle, TextBuffer};

/// A run of text sharing one font style.
#[derive(Clone, PartialEq, Debug)]
pub struct TextRun {
    /// The code points of the run. May be empty for runs that only record a
    /// style change.
    pub text: TextBuffer,
    /// Font style captured when the run was pushed.
    pub font: FontStyle,
}

impl TextRun {
    /// Returns the number of code points in the run.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the run holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A change of paragraph attributes.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ParagraphRun {
    /// Paragraph style in effect from this run onwards.
    pub paragraph: ParagraphStyle,
}

/// One styled segment of the document.
#[derive(Clone, PartialEq, Debug)]
pub enum Run {
    /// Styled text.
    Text(TextRun),
    /// Paragraph directive.
    Paragraph(ParagraphRun),
}

impl Run {
    /// Returns the text run, if this is one.
    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Self::Text(run) => Some(run),
            Self::Paragraph(_) => None,
        }
    }

    /// Returns the paragraph run, if this is one.
    pub fn as_paragraph(&self) -> Option<&ParagraphRun> {
        match self {
            Self::Text(_) => None,
            Self::Paragraph(run) => Some(run),
        }
    }

    /// Returns the number of caret positions inside the run, excluding the
    /// position before the first character.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(run) => run.len(),
            Self::Paragraph(_) => 0,
        }
    }

    /// Returns `true` if the run contains no characters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Append-only, truncatable sequence of runs in document order.
///
/// Runs are never reordered. The store grows by [`push`](Self::push) and
/// [`insert`](Self::insert) and shrinks from the tail with
/// [`drop_last`](Self::drop_last).
#[derive(Clone, Default, Debug)]
pub struct RunStore {
    runs: Vec<Run>,
}

impl RunStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Returns `true` if the store holds no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Returns the run at `index`.
    pub fn get(&self, index: usize) -> Option<&Run> {
        self.runs.get(index)
    }

    /// Returns all runs in document order.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Appends a run at the tail.
    pub fn push(&mut self, run: Run) {
        self.runs.push(run);
    }

    /// Inserts a run at `index`, appending if `index` lies beyond the tail.
    ///
    /// Returns the index the run ended up at.
    pub fn insert(&mut self, index: usize, run: Run) -> usize {
        let index = index.min(self.runs.len());
        self.runs.insert(index, run);
        index
    }

    /// Removes the last `count` runs, clamped to the store length.
    ///
    /// Returns the number of runs actually removed.
    pub fn drop_last(&mut self, count: usize) -> usize {
        let count = count.min(self.runs.len());
        self.runs.truncate(self.runs.len() - count);
        count
    }

    /// Removes all runs.
    pub fn clear(&mut self) {
        self.runs.clear();
    }
}
