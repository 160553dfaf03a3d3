use crate::error::{ExportError, Result};
use crate::{render_pdf, render_word};
use label_layout::{LabelSpec, LayoutDescriptor, compute_layout};

/// Output document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    /// File name used when the caller does not choose one
    pub fn default_file_name(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "labels.pdf",
            ExportFormat::Docx => "labels.docx",
        }
    }
}

/// The spec currently being edited and, once previewed, its layout.
///
/// Replacing the spec drops the layout, so an export can never use geometry
/// computed for an older spec.
#[derive(Debug, Clone, Default)]
pub struct LabelJob {
    spec: LabelSpec,
    layout: Option<LayoutDescriptor>,
}

impl LabelJob {
    pub fn new(spec: LabelSpec) -> Self {
        Self { spec, layout: None }
    }

    pub fn spec(&self) -> &LabelSpec {
        &self.spec
    }

    pub fn set_spec(&mut self, spec: LabelSpec) {
        self.spec = spec;
        self.layout = None;
    }

    /// The layout from the last successful preview
    pub fn layout(&self) -> Option<&LayoutDescriptor> {
        self.layout.as_ref()
    }

    /// Compute and keep the layout for the current spec
    pub fn preview(&mut self) -> Result<&LayoutDescriptor> {
        self.layout = None;
        let layout = compute_layout(&self.spec)?;
        Ok(self.layout.insert(layout))
    }

    fn current_layout(&self) -> Result<&LayoutDescriptor> {
        self.layout.as_ref().ok_or_else(|| {
            ExportError::Precondition("no layout has been computed; run a preview first".to_string())
        })
    }

    pub fn export_pdf(&self) -> Result<Vec<u8>> {
        render_pdf(&self.spec, self.current_layout()?)
    }

    pub async fn export_word(&self) -> Result<Vec<u8>> {
        render_word(&self.spec, self.current_layout()?).await
    }

    pub async fn export(&self, format: ExportFormat) -> Result<Vec<u8>> {
        match format {
            ExportFormat::Pdf => self.export_pdf(),
            ExportFormat::Docx => self.export_word().await,
        }
    }
}
