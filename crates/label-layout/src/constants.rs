//! Shared constants for label layout
//!
//! Page geometry, unit conversion and the validation limits used by the
//! layout calculator.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Twips (twentieths of a point) per millimeter
pub const TWIPS_PER_MM: f32 = 1440.0 / 25.4; // ≈ 56.6929

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

/// Convert millimeters to twips, rounded to the nearest whole twip
#[inline]
pub fn mm_to_twips(mm: f32) -> u32 {
    (mm * TWIPS_PER_MM).round().max(0.0) as u32
}

// =============================================================================
// Page Geometry (A4 portrait)
// =============================================================================

/// Page width in millimeters
pub const PAGE_WIDTH_MM: f32 = 210.0;

/// Page height in millimeters
pub const PAGE_HEIGHT_MM: f32 = 297.0;

// =============================================================================
// Validation Limits
// =============================================================================

/// Smallest printable label edge (mm)
pub const MIN_LABEL_SIZE_MM: f32 = 10.0;

/// Font size bounds (points)
pub const MIN_FONT_SIZE_PT: f32 = 6.0;
pub const MAX_FONT_SIZE_PT: f32 = 72.0;

/// Line height multiplier bounds
pub const MIN_LINE_HEIGHT: f32 = 1.0;
pub const MAX_LINE_HEIGHT: f32 = 3.0;

/// Smallest page margin a printer can be trusted with (mm)
pub const MIN_MARGIN_MM: f32 = 2.0;

// =============================================================================
// Text Metrics
// =============================================================================

/// Font units per em in the built-in width tables
pub const UNITS_PER_EM: f32 = 1000.0;
