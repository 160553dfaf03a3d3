use crate::metrics::FontFamily;
use crate::validation::ValidationFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("{0}")]
    Validation(#[from] ValidationFailure),
    #[error("Unsupported font: {0}")]
    UnsupportedFont(String),
    #[error("Unsupported character {ch:?} in {font} text")]
    UnsupportedCharacter { ch: char, font: FontFamily },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl LabelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LabelError::Validation(_) => ErrorKind::Validation,
            LabelError::UnsupportedFont(_) | LabelError::UnsupportedCharacter { .. } => {
                ErrorKind::Rendering
            }
            LabelError::Io(_) | LabelError::Config(_) => ErrorKind::Input,
        }
    }

    /// The validation failure, if this error is one
    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            LabelError::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LabelError>;

/// Broad failure category, shared with the export crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// One or more layout rules were violated; the user can adjust and retry
    Validation,
    /// A renderer was called without an up-to-date layout
    Precondition,
    /// Text measurement or document packaging failed
    Rendering,
    /// The spec could not be read
    Input,
}

/// Horizontal alignment of each content line within its label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Horizontal offset of a line of `text_width` inside a box of `box_width`
    pub fn offset(self, box_width: f32, text_width: f32) -> f32 {
        match self {
            Alignment::Left => 0.0,
            Alignment::Center => (box_width - text_width) / 2.0,
            Alignment::Right => box_width - text_width,
        }
    }
}

/// Declared size of one label
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl LabelSize {
    pub fn new(width_mm: f32, height_mm: f32) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }
}

/// Page margins around the label grid
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub top_mm: f32,
    pub right_mm: f32,
    pub bottom_mm: f32,
    pub left_mm: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}

impl Margins {
    /// Create uniform margins on all sides
    pub fn uniform(margin_mm: f32) -> Self {
        Self {
            top_mm: margin_mm,
            right_mm: margin_mm,
            bottom_mm: margin_mm,
            left_mm: margin_mm,
        }
    }

    /// Top, right, bottom and left, in that order
    pub fn sides(&self) -> [f32; 4] {
        [self.top_mm, self.right_mm, self.bottom_mm, self.left_mm]
    }

    /// Smallest of the four margins
    pub fn min_mm(&self) -> f32 {
        self.top_mm
            .min(self.right_mm)
            .min(self.bottom_mm)
            .min(self.left_mm)
    }
}
