use crate::metrics::FontFamily;
use crate::types::*;
use std::num::NonZeroU32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything needed to lay out and render a run of identical labels
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LabelSpec {
    // Label box
    pub label_size: LabelSize,

    // Content
    pub content: String,
    pub max_lines: usize,

    // Typography
    pub font: FontFamily,
    pub font_size_pt: f32,
    pub line_height: f32,
    pub alignment: Alignment,

    // Quantity
    pub count: NonZeroU32,

    // Page
    pub margins: Margins,
}

impl Default for LabelSpec {
    fn default() -> Self {
        Self {
            label_size: LabelSize::new(50.0, 30.0),
            content: String::new(),
            max_lines: 1,
            font: FontFamily::Helvetica,
            font_size_pt: 12.0,
            line_height: 1.0,
            alignment: Alignment::Left,
            count: NonZeroU32::MIN,
            margins: Margins::default(),
        }
    }
}

impl LabelSpec {
    /// Load a spec from a JSON file. Missing fields take their defaults.
    ///
    /// An unknown `font` fails as [`LabelError::UnsupportedFont`], anything
    /// else malformed as [`LabelError::Config`].
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(parse_error)?;
        if let Some(font) = value.get("font").and_then(serde_json::Value::as_str) {
            font.parse::<FontFamily>()?;
        }
        let spec = serde_json::from_value(value).map_err(parse_error)?;
        Ok(spec)
    }

    /// Logical lines that will be printed on each label, capped at `max_lines`
    pub fn content_lines(&self) -> Vec<String> {
        self.content
            .split('\n')
            .take(self.max_lines)
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect()
    }

    /// Vertical distance between consecutive lines, in millimeters.
    ///
    /// The point size is taken as a millimeter quantity here.
    pub fn line_pitch_mm(&self) -> f32 {
        self.font_size_pt * self.line_height
    }

    /// Height of the text block for `line_count` lines
    pub fn content_height_mm(&self, line_count: usize) -> f32 {
        line_count as f32 * self.line_pitch_mm()
    }
}

#[cfg(feature = "serde")]
fn parse_error(e: serde_json::Error) -> LabelError {
    LabelError::Config(format!("Failed to parse label spec: {}", e))
}
