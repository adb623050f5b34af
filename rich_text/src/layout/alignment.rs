// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;

use peniko::kurbo::Rect;

use super::line_break::LineData;
use super::{BreakReason, Glyph, Item, ItemKind, Layout, Line, RunPosition};
use crate::Caret;

/// Applies horizontal and vertical alignment to broken lines and computes the
/// final glyph positions.
pub(super) fn position(
    items: &[Item],
    advances: &[f32],
    lines: &[LineData],
    run_count: usize,
    height: f32,
) -> Layout {
    let Some(first) = lines.first() else {
        return Layout::default();
    };
    // Vertical alignment comes from the paragraph of the first line.
    let block = first.paragraph;

    let mut block_height = 0.0;
    for (index, line) in lines.iter().enumerate() {
        if index > 0 && line.first_in_paragraph {
            block_height += line.paragraph.indent.y;
        }
        block_height += line.height();
    }
    let top = block.origin.y + block.margin.y;
    let bottom = height - block.margin.y;
    let free_space = bottom - top - block_height;
    let mut y = top + free_space.max(0.0) * block.valign.factor();

    let mut run_lens = vec![0_usize; run_count];
    for item in items.iter().filter(|item| item.kind.is_char()) {
        run_lens[item.run] = item.index + 1;
    }
    let mut runs: Vec<Option<RunPosition>> = vec![None; run_count];

    let mut layout = Layout::default();
    let mut bounds: Option<Rect> = None;
    let mut prev_item: Option<&Item> = None;

    for (line_index, line) in lines.iter().enumerate() {
        if line_index > 0 && line.first_in_paragraph {
            y += line.paragraph.indent.y;
        }
        let line_width = line.advance - line.trailing;
        let free_space = line.available - line_width;
        let x = line.left + free_space.max(0.0) * line.paragraph.align.factor();
        let baseline = y + line.ascent;

        let glyph_start = layout.glyphs.len();
        let mut pen = x;
        for item_index in line.items.clone() {
            let item = &items[item_index];
            let advance = advances[item_index];
            runs[item.run].get_or_insert(RunPosition {
                line: line_index,
                x: pen + item.offset.x,
                len: run_lens[item.run],
            });
            if item.kind.is_char() {
                layout.glyphs.push(Glyph {
                    run: item.run,
                    index: item.index,
                    ch: item.ch,
                    x: pen + item.offset.x,
                    y: baseline + item.offset.y,
                    advance,
                    outline: item.outline,
                    line: line_index,
                });
            }
            pen += advance;
        }

        let line_items = &items[line.items.clone()];
        let start = match (line_items.first(), prev_item) {
            (Some(item), _) => Caret::new(item.run, item.index),
            (None, Some(prev)) => Caret::new(prev.run, prev.index + 1),
            (None, None) => Caret::default(),
        };
        let end = match line_items.last() {
            Some(item) => match item.kind {
                ItemKind::Newline => Caret::new(item.run, item.index),
                ItemKind::Space | ItemKind::Tab if line.break_reason == BreakReason::Regular => {
                    Caret::new(item.run, item.index)
                }
                ItemKind::Marker | ItemKind::Paragraph(_) => Caret::new(item.run, 0),
                _ => Caret::new(item.run, item.index + 1),
            },
            None => start,
        };
        if let Some(last) = line_items.last() {
            prev_item = Some(last);
        }

        let laid_out = Line {
            glyphs: glyph_start..layout.glyphs.len(),
            x,
            width: line_width,
            advance: line.advance,
            top: y,
            ascent: line.ascent,
            descent: line.descent,
            leading: line.leading,
            break_reason: line.break_reason,
            start,
            end,
            pen_end: pen,
        };
        let rect = laid_out.rect();
        bounds = Some(bounds.map_or(rect, |bounds| bounds.union(rect)));
        layout.lines.push(laid_out);
        y += line.height();
    }

    let last_line = layout.lines.len() - 1;
    let last_x = layout.lines[last_line].x;
    layout.runs = runs
        .into_iter()
        .zip(run_lens)
        .map(|(position, len)| {
            position.unwrap_or(RunPosition {
                line: last_line,
                x: last_x,
                len,
            })
        })
        .collect();
    layout.bounds = bounds.unwrap_or_default();
    layout
}
