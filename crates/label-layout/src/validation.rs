//! Layout constraint checks
//!
//! Every rule is evaluated independently and all violations are reported
//! together, in rule order, so the caller can show the complete list.

use crate::constants::*;
use crate::spec::LabelSpec;
use std::fmt;

/// The constraints a label spec must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    MinimumLabelSize,
    ContentWidthOverflow,
    ContentHeightOverflow,
    FontSizeBounds,
    LineHeightBounds,
    MarginMinimum,
    PackingFeasibility,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::MinimumLabelSize => "Minimum label size",
            Rule::ContentWidthOverflow => "Content width overflow",
            Rule::ContentHeightOverflow => "Content height overflow",
            Rule::FontSizeBounds => "Font size bounds",
            Rule::LineHeightBounds => "Line height bounds",
            Rule::MarginMinimum => "Margin minimum",
            Rule::PackingFeasibility => "Packing feasibility",
        }
    }
}

/// One violated rule
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub rule: Rule,
    pub message: String,
    /// The offending value as measured
    pub measured: f32,
    /// The bound it was checked against
    pub limit: f32,
}

impl Violation {
    fn new(rule: Rule, measured: f32, limit: f32, detail: String) -> Self {
        Self {
            rule,
            message: format!("{}: {}", rule.name(), detail),
            measured,
            limit,
        }
    }
}

/// All rules a spec violated, in rule order. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    violations: Vec<Violation>,
}

impl ValidationFailure {
    /// Wrap a list of violations; `None` when the list is empty
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.message.as_str())
    }

    pub fn rules(&self) -> Vec<Rule> {
        self.violations.iter().map(|v| v.rule).collect()
    }

    pub fn violates(&self, rule: Rule) -> bool {
        self.violations.iter().any(|v| v.rule == rule)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid layout:")?;
        for message in self.messages() {
            write!(f, "\n{}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// Measurements the rules are checked against
#[derive(Debug, Clone, Copy)]
pub(crate) struct Measured {
    pub widest_line_mm: f32,
    pub content_height_mm: f32,
    pub usable_width_mm: f32,
    pub usable_height_mm: f32,
    pub actual_label_height_mm: f32,
    pub labels_per_page: u32,
}

/// Run every rule against `spec`, collecting all violations
pub(crate) fn check(spec: &LabelSpec, measured: &Measured) -> Vec<Violation> {
    let mut violations = Vec::new();
    let size = spec.label_size;

    if !at_least(size.width_mm, MIN_LABEL_SIZE_MM) || !at_least(size.height_mm, MIN_LABEL_SIZE_MM)
    {
        violations.push(Violation::new(
            Rule::MinimumLabelSize,
            size.width_mm.min(size.height_mm),
            MIN_LABEL_SIZE_MM,
            format!(
                "label is {}mm × {}mm, width and height must each be finite and at least {}mm",
                size.width_mm, size.height_mm, MIN_LABEL_SIZE_MM
            ),
        ));
    }

    if measured.widest_line_mm > size.width_mm {
        violations.push(Violation::new(
            Rule::ContentWidthOverflow,
            measured.widest_line_mm,
            size.width_mm,
            format!(
                "longest line needs {:.1}mm but label width is only {}mm",
                measured.widest_line_mm, size.width_mm
            ),
        ));
    }

    if measured.content_height_mm > size.height_mm {
        violations.push(Violation::new(
            Rule::ContentHeightOverflow,
            measured.content_height_mm,
            size.height_mm,
            format!(
                "content needs {:.1}mm but label height is only {}mm",
                measured.content_height_mm, size.height_mm
            ),
        ));
    }

    if !spec.font_size_pt.is_finite() {
        violations.push(Violation::new(
            Rule::FontSizeBounds,
            spec.font_size_pt,
            MIN_FONT_SIZE_PT,
            format!(
                "{} is not a font size, use {}pt to {}pt",
                spec.font_size_pt, MIN_FONT_SIZE_PT, MAX_FONT_SIZE_PT
            ),
        ));
    } else if spec.font_size_pt < MIN_FONT_SIZE_PT {
        violations.push(Violation::new(
            Rule::FontSizeBounds,
            spec.font_size_pt,
            MIN_FONT_SIZE_PT,
            format!(
                "{}pt is too small, use at least {}pt",
                spec.font_size_pt, MIN_FONT_SIZE_PT
            ),
        ));
    } else if spec.font_size_pt > MAX_FONT_SIZE_PT {
        violations.push(Violation::new(
            Rule::FontSizeBounds,
            spec.font_size_pt,
            MAX_FONT_SIZE_PT,
            format!(
                "{}pt is too large, use at most {}pt",
                spec.font_size_pt, MAX_FONT_SIZE_PT
            ),
        ));
    }

    if !spec.line_height.is_finite() {
        violations.push(Violation::new(
            Rule::LineHeightBounds,
            spec.line_height,
            MIN_LINE_HEIGHT,
            format!(
                "{} is not a line height, use {:.1} to {:.1}",
                spec.line_height, MIN_LINE_HEIGHT, MAX_LINE_HEIGHT
            ),
        ));
    } else if spec.line_height < MIN_LINE_HEIGHT {
        violations.push(Violation::new(
            Rule::LineHeightBounds,
            spec.line_height,
            MIN_LINE_HEIGHT,
            format!(
                "{} is too tight, use at least {:.1}",
                spec.line_height, MIN_LINE_HEIGHT
            ),
        ));
    } else if spec.line_height > MAX_LINE_HEIGHT {
        violations.push(Violation::new(
            Rule::LineHeightBounds,
            spec.line_height,
            MAX_LINE_HEIGHT,
            format!(
                "{} is too loose, use at most {:.1}",
                spec.line_height, MAX_LINE_HEIGHT
            ),
        ));
    }

    let smallest_margin = spec.margins.min_mm();
    if let Some(side) = spec.margins.sides().into_iter().find(|side| !side.is_finite()) {
        violations.push(Violation::new(
            Rule::MarginMinimum,
            side,
            MIN_MARGIN_MM,
            format!(
                "{}mm is not a margin, each margin must be at least {}mm",
                side, MIN_MARGIN_MM
            ),
        ));
    } else if smallest_margin < MIN_MARGIN_MM {
        violations.push(Violation::new(
            Rule::MarginMinimum,
            smallest_margin,
            MIN_MARGIN_MM,
            format!(
                "smallest margin is {}mm, each margin must be at least {}mm",
                smallest_margin, MIN_MARGIN_MM
            ),
        ));
    }

    if measured.labels_per_page == 0 {
        violations.push(Violation::new(
            Rule::PackingFeasibility,
            0.0,
            1.0,
            format!(
                "a {}mm × {:.1}mm label does not fit in the {:.1}mm × {:.1}mm usable area",
                size.width_mm,
                measured.actual_label_height_mm,
                measured.usable_width_mm,
                measured.usable_height_mm
            ),
        ));
    }

    violations
}

/// `value` is a real number no smaller than `min`
fn at_least(value: f32, min: f32) -> bool {
    value.is_finite() && value >= min
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured_ok() -> Measured {
        Measured {
            widest_line_mm: 8.7,
            content_height_mm: 12.0,
            usable_width_mm: 190.0,
            usable_height_mm: 277.0,
            actual_label_height_mm: 30.0,
            labels_per_page: 27,
        }
    }

    #[test]
    fn test_default_spec_passes() {
        assert!(check(&LabelSpec::default(), &measured_ok()).is_empty());
    }

    #[test]
    fn test_font_size_too_large() {
        let spec = LabelSpec {
            font_size_pt: 80.0,
            ..Default::default()
        };
        let violations = check(&spec, &measured_ok());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, Rule::FontSizeBounds);
        assert_eq!(violations[0].limit, MAX_FONT_SIZE_PT);
        assert!(violations[0].message.contains("80pt"));
    }

    #[test]
    fn test_line_height_too_tight() {
        let spec = LabelSpec {
            line_height: 0.8,
            ..Default::default()
        };
        let violations = check(&spec, &measured_ok());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, Rule::LineHeightBounds);
        assert_eq!(violations[0].measured, 0.8);
    }

    #[test]
    fn test_single_small_margin_is_reported() {
        let mut spec = LabelSpec::default();
        spec.margins.right_mm = 1.5;
        let violations = check(&spec, &measured_ok());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, Rule::MarginMinimum);
        assert_eq!(violations[0].measured, 1.5);
    }

    #[test]
    fn test_failure_display_lists_every_message() {
        let spec = LabelSpec {
            font_size_pt: 4.0,
            line_height: 3.5,
            ..Default::default()
        };
        let failure = ValidationFailure::from_violations(check(&spec, &measured_ok())).unwrap();
        let text = failure.to_string();
        assert!(text.starts_with("Invalid layout:"));
        assert_eq!(text.lines().count(), 3);
        assert_eq!(
            failure.rules(),
            vec![Rule::FontSizeBounds, Rule::LineHeightBounds]
        );
    }

    #[test]
    fn test_nan_font_size_is_out_of_bounds() {
        let spec = LabelSpec {
            font_size_pt: f32::NAN,
            ..Default::default()
        };
        let violations = check(&spec, &measured_ok());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, Rule::FontSizeBounds);
        assert!(violations[0].message.contains("NaN is not a font size"));
    }

    #[test]
    fn test_nan_margin_is_reported() {
        let mut spec = LabelSpec::default();
        spec.margins.bottom_mm = f32::NAN;
        let violations = check(&spec, &measured_ok());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, Rule::MarginMinimum);
        assert!(violations[0].measured.is_nan());
    }

    #[test]
    fn test_at_least() {
        assert!(at_least(10.0, 10.0));
        assert!(!at_least(9.9, 10.0));
        assert!(!at_least(f32::NAN, 10.0));
        assert!(!at_least(f32::INFINITY, 10.0));
    }

    #[test]
    fn test_empty_violations_is_not_a_failure() {
        assert!(ValidationFailure::from_violations(Vec::new()).is_none());
    }
}
