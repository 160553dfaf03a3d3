use crate::layout::LayoutDescriptor;
use std::fmt;

/// Headline numbers of a layout, for display next to the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSummary {
    pub labels_per_page: u32,
    pub total_pages: u32,
    pub columns: u32,
    pub rows: u32,
}

impl From<&LayoutDescriptor> for LayoutSummary {
    fn from(layout: &LayoutDescriptor) -> Self {
        Self {
            labels_per_page: layout.labels_per_page(),
            total_pages: layout.total_pages(),
            columns: layout.max_cols(),
            rows: layout.max_rows(),
        }
    }
}

impl fmt::Display for LayoutSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Labels per page: {}", self.labels_per_page)?;
        writeln!(f, "Total pages: {}", self.total_pages)?;
        writeln!(f, "Labels per row: {}", self.columns)?;
        write!(f, "Labels per column: {}", self.rows)
    }
}

/// A scaled cell of the preview grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewCell {
    pub row: u32,
    pub col: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One page of the layout scaled for on-screen display.
///
/// Cells are packed from the page's top-left corner and use the declared
/// label size, so the preview shows the grid rather than exact print
/// positions.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewGrid<'a> {
    pub scale: f32,
    pub page_width: f32,
    pub page_height: f32,
    pub cells: Vec<PreviewCell>,
    /// Lines shown inside every cell
    pub lines: &'a [String],
    pub font_size: f32,
}

impl<'a> PreviewGrid<'a> {
    /// Build the preview for one page of `layout`, scaling millimeters by `scale`
    pub fn new(layout: &'a LayoutDescriptor, scale: f32) -> Self {
        let spec = layout.spec();
        let width = spec.label_size.width_mm * scale;
        let height = spec.label_size.height_mm * scale;

        let cells = (0..layout.max_rows())
            .flat_map(|row| {
                (0..layout.max_cols()).map(move |col| PreviewCell {
                    row,
                    col,
                    x: col as f32 * width,
                    y: row as f32 * height,
                    width,
                    height,
                })
            })
            .collect();

        Self {
            scale,
            page_width: layout.page_width_mm() * scale,
            page_height: layout.page_height_mm() * scale,
            cells,
            lines: layout.content_lines(),
            font_size: spec.font_size_pt * scale,
        }
    }

    /// Render the grid as text, one character per cell
    pub fn to_ascii(&self) -> String {
        let mut out = String::new();
        let mut current_row = None;
        for cell in &self.cells {
            if current_row.is_some_and(|row| row != cell.row) {
                out.push('\n');
            }
            current_row = Some(cell.row);
            out.push('#');
        }
        out
    }
}
