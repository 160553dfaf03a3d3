//! Label placement on pages
//!
//! Walks the grid in reading order (left to right, top to bottom) and yields
//! one [`LabelPlacement`] per label. Coordinates are millimeters measured
//! from the top-left corner of the page.

use crate::layout::LayoutDescriptor;

/// Position within the grid of one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Zero-based page number
    pub page: u32,
    /// Row index (0 = top row)
    pub row: u32,
    /// Column index (0 = leftmost column)
    pub col: u32,
}

/// One line of text positioned on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedLine<'a> {
    pub text: &'a str,
    /// Left edge of the text after alignment
    pub x_mm: f32,
    /// Text baseline, from the top of the page
    pub y_mm: f32,
    pub width_mm: f32,
}

/// One label positioned on the page
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement<'a> {
    /// Zero-based label number, `0..count`
    pub index: u32,
    pub position: GridPosition,
    /// Top-left corner of the label box
    pub x_mm: f32,
    pub y_mm: f32,
    pub lines: Vec<PlacedLine<'a>>,
}

/// Iterator over the placement of every label in a layout
#[derive(Debug, Clone)]
pub struct Placements<'a> {
    layout: &'a LayoutDescriptor,
    next_index: u32,
    cursor: GridPosition,
}

/// Place every label of `layout`, in print order
pub fn placements(layout: &LayoutDescriptor) -> Placements<'_> {
    Placements {
        layout,
        next_index: 0,
        cursor: GridPosition {
            page: 0,
            row: 0,
            col: 0,
        },
    }
}

impl<'a> Iterator for Placements<'a> {
    type Item = LabelPlacement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let layout = self.layout;
        let spec = layout.spec();
        if self.next_index >= spec.count.get() {
            return None;
        }

        // A row-count check is enough: every row has the same pitch, so a row
        // index below max_rows always fits in the usable height.
        if self.cursor.row >= layout.max_rows() {
            self.cursor = GridPosition {
                page: self.cursor.page + 1,
                row: 0,
                col: 0,
            };
        }

        let position = self.cursor;
        let label_width = spec.label_size.width_mm;
        let x_mm = spec.margins.left_mm + position.col as f32 * label_width;
        let y_mm = spec.margins.top_mm + position.row as f32 * layout.actual_label_height_mm();
        let pitch = spec.line_pitch_mm();

        let lines = layout
            .content_lines()
            .iter()
            .zip(layout.line_widths_mm())
            .enumerate()
            .map(|(line_index, (text, &width_mm))| PlacedLine {
                text: text.as_str(),
                x_mm: x_mm + spec.alignment.offset(label_width, width_mm),
                y_mm: y_mm + line_index as f32 * pitch,
                width_mm,
            })
            .collect();

        let placement = LabelPlacement {
            index: self.next_index,
            position,
            x_mm,
            y_mm,
            lines,
        };

        self.next_index += 1;
        self.cursor.col += 1;
        if self.cursor.col >= layout.max_cols() {
            self.cursor.col = 0;
            self.cursor.row += 1;
        }

        Some(placement)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.layout.spec().count.get() - self.next_index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Placements<'_> {}
