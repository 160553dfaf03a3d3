//! Grid packing and pagination
//!
//! The layout calculator is the single source of geometry: renderers read a
//! [`LayoutDescriptor`] and never recompute packing themselves.

use crate::constants::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::metrics::{BuiltinMetrics, TextMetrics};
use crate::spec::LabelSpec;
use crate::types::Result;
use crate::validation::{self, Measured, ValidationFailure};

/// Derived grid layout for one [`LabelSpec`]
///
/// Only [`compute_layout`] builds one, and it is never modified afterwards;
/// a changed spec needs a fresh descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDescriptor {
    spec: LabelSpec,
    max_cols: u32,
    max_rows: u32,
    labels_per_page: u32,
    total_pages: u32,
    page_width_mm: f32,
    page_height_mm: f32,
    usable_width_mm: f32,
    usable_height_mm: f32,
    actual_label_height_mm: f32,
    content_lines: Vec<String>,
    line_widths_mm: Vec<f32>,
}

impl LayoutDescriptor {
    /// Labels that fit side by side in one row
    pub fn max_cols(&self) -> u32 {
        self.max_cols
    }

    /// Rows of labels that fit on one page
    pub fn max_rows(&self) -> u32 {
        self.max_rows
    }

    pub fn labels_per_page(&self) -> u32 {
        self.labels_per_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn page_width_mm(&self) -> f32 {
        self.page_width_mm
    }

    pub fn page_height_mm(&self) -> f32 {
        self.page_height_mm
    }

    pub fn usable_width_mm(&self) -> f32 {
        self.usable_width_mm
    }

    pub fn usable_height_mm(&self) -> f32 {
        self.usable_height_mm
    }

    /// Row pitch: the declared label height, or the text block if taller
    pub fn actual_label_height_mm(&self) -> f32 {
        self.actual_label_height_mm
    }

    pub fn content_lines(&self) -> &[String] {
        &self.content_lines
    }

    /// Measured width of each entry of [`content_lines`](Self::content_lines)
    pub fn line_widths_mm(&self) -> &[f32] {
        &self.line_widths_mm
    }

    /// Labels printed on the last page
    pub fn labels_on_last_page(&self) -> u32 {
        let count = self.spec.count.get();
        match count % self.labels_per_page {
            0 => self.labels_per_page,
            remainder => remainder,
        }
    }

    /// The spec this layout was computed from
    pub fn spec(&self) -> &LabelSpec {
        &self.spec
    }

    /// Whether this layout is still current for `spec`
    pub fn is_for(&self, spec: &LabelSpec) -> bool {
        self.spec == *spec
    }
}

/// Compute the layout using the built-in font metrics
pub fn compute_layout(spec: &LabelSpec) -> Result<LayoutDescriptor> {
    compute_layout_with(spec, &BuiltinMetrics)
}

/// Compute the layout, measuring text with `metrics`.
///
/// Fails with a [`ValidationFailure`] listing every violated rule, or with
/// the measurement error if a line cannot be measured.
pub fn compute_layout_with(spec: &LabelSpec, metrics: &dyn TextMetrics) -> Result<LayoutDescriptor> {
    let content_lines = spec.content_lines();
    let line_widths_mm = content_lines
        .iter()
        .map(|line| metrics.measure_width(spec.font, spec.font_size_pt, line))
        .collect::<Result<Vec<f32>>>()?;

    let content_height_mm = spec.content_height_mm(content_lines.len());
    let actual_label_height_mm = spec.label_size.height_mm.max(content_height_mm);

    let usable_width_mm = PAGE_WIDTH_MM - spec.margins.left_mm - spec.margins.right_mm;
    let usable_height_mm = PAGE_HEIGHT_MM - spec.margins.top_mm - spec.margins.bottom_mm;

    let max_cols = fit_count(usable_width_mm, spec.label_size.width_mm);
    let max_rows = fit_count(usable_height_mm, actual_label_height_mm);
    let labels_per_page = max_cols.saturating_mul(max_rows);

    let measured = Measured {
        widest_line_mm: line_widths_mm.iter().copied().fold(0.0, f32::max),
        content_height_mm,
        usable_width_mm,
        usable_height_mm,
        actual_label_height_mm,
        labels_per_page,
    };

    if let Some(failure) = ValidationFailure::from_violations(validation::check(spec, &measured)) {
        log::debug!(
            "Layout rejected with {} violation(s)",
            failure.violations().len()
        );
        return Err(failure.into());
    }

    let total_pages = spec.count.get().div_ceil(labels_per_page);

    log::debug!(
        "Layout: {}x{} grid, {} per page, {} page(s), row pitch {:.1}mm",
        max_cols,
        max_rows,
        labels_per_page,
        total_pages,
        actual_label_height_mm
    );

    Ok(LayoutDescriptor {
        spec: spec.clone(),
        max_cols,
        max_rows,
        labels_per_page,
        total_pages,
        page_width_mm: PAGE_WIDTH_MM,
        page_height_mm: PAGE_HEIGHT_MM,
        usable_width_mm,
        usable_height_mm,
        actual_label_height_mm,
        content_lines,
        line_widths_mm,
    })
}

/// How many whole `item`s fit in `available` (floor division, never negative)
fn fit_count(available: f32, item: f32) -> u32 {
    let fit = (available / item).floor();
    if fit.is_nan() || fit <= 0.0 {
        0
    } else {
        fit as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_count() {
        assert_eq!(fit_count(190.0, 50.0), 3);
        assert_eq!(fit_count(277.0, 30.0), 9);
        assert_eq!(fit_count(100.0, 100.0), 1);
        assert_eq!(fit_count(190.0, 300.0), 0);
        assert_eq!(fit_count(-5.0, 10.0), 0);
        assert_eq!(fit_count(0.0, 0.0), 0);
    }

    #[test]
    fn test_text_block_taller_than_label_is_rejected() {
        let spec = LabelSpec {
            label_size: crate::LabelSize::new(50.0, 10.0),
            content: "A\nB".to_string(),
            max_lines: 2,
            ..Default::default()
        };
        // 2 lines × 12 × 1.0 = 24mm of text in a 10mm box
        let err = compute_layout(&spec).unwrap_err();
        let failure = err.as_validation().unwrap();
        assert!(failure.violates(crate::Rule::ContentHeightOverflow));
        assert!(!failure.violates(crate::Rule::PackingFeasibility));
    }

    #[test]
    fn test_last_page_remainder() {
        let spec = LabelSpec {
            content: "ABC".to_string(),
            count: std::num::NonZeroU32::new(30).unwrap(),
            ..Default::default()
        };
        let layout = compute_layout(&spec).unwrap();
        assert_eq!(layout.total_pages(), 2);
        assert_eq!(layout.labels_on_last_page(), 3);
    }

    #[test]
    fn test_full_last_page() {
        let spec = LabelSpec {
            content: "ABC".to_string(),
            count: std::num::NonZeroU32::new(54).unwrap(),
            ..Default::default()
        };
        let layout = compute_layout(&spec).unwrap();
        assert_eq!(layout.total_pages(), 2);
        assert_eq!(layout.labels_on_last_page(), 27);
    }
}
