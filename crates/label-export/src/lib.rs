//! PDF and Word rendering of a computed label layout
//!
//! Both renderers take the [`LabelSpec`] together with the
//! [`LayoutDescriptor`] computed from it and refuse to run when the two no
//! longer match.

mod error;
mod job;
mod pdf;
mod word;

pub use error::{ExportError, Result};
pub use job::{ExportFormat, LabelJob};
pub use pdf::{build_pdf, render_pdf};
pub use word::{document_xml, render_word};

use label_layout::{LabelSpec, LayoutDescriptor};

fn ensure_current(spec: &LabelSpec, layout: &LayoutDescriptor) -> Result<()> {
    if layout.is_for(spec) {
        Ok(())
    } else {
        Err(ExportError::Precondition(
            "layout was computed for a different label spec; recompute it first".to_string(),
        ))
    }
}
