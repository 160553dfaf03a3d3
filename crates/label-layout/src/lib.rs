//! Grid layout of repeated labels on A4 pages
//!
//! [`compute_layout`] validates a [`LabelSpec`] and packs it into a
//! [`LayoutDescriptor`]; [`placements`] walks that layout label by label for
//! renderers.

pub mod constants;
mod layout;
mod metrics;
mod placement;
mod preview;
mod spec;
mod types;
mod validation;

pub use layout::{LayoutDescriptor, compute_layout, compute_layout_with};
pub use metrics::{BuiltinMetrics, FontFamily, TextMetrics};
pub use placement::{GridPosition, LabelPlacement, PlacedLine, Placements, placements};
pub use preview::{LayoutSummary, PreviewCell, PreviewGrid};
pub use spec::LabelSpec;
pub use types::*;
pub use validation::{Rule, ValidationFailure, Violation};
