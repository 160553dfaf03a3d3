//! Text width measurement
//!
//! Widths come from the advance tables of the standard PDF base-14 fonts,
//! the same fonts the PDF renderer draws with, so a line that passes
//! validation is exactly as wide on paper as it was when measured.
//! Tables cover ASCII 0x20..=0x7E in 1/1000 em; index = (char as usize) - 32.
//! Built-in font text is only written faithfully for that range, so any
//! other character is a measurement error rather than a guess.

use crate::constants::{UNITS_PER_EM, pt_to_mm};
use crate::types::{LabelError, Result};
use std::fmt;
use std::str::FromStr;

/// Fonts labels can be set in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum FontFamily {
    /// Helvetica (stands in for Arial)
    #[default]
    Helvetica,
    /// Times-Roman (stands in for Times New Roman)
    TimesRoman,
    /// Courier (stands in for Courier New)
    Courier,
}

impl FontFamily {
    pub const ALL: [FontFamily; 3] = [
        FontFamily::Helvetica,
        FontFamily::TimesRoman,
        FontFamily::Courier,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::TimesRoman => "Times-Roman",
            FontFamily::Courier => "Courier",
        }
    }

    /// Font name written into word-processor documents
    pub fn word_name(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Arial",
            FontFamily::TimesRoman => "Times New Roman",
            FontFamily::Courier => "Courier New",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            FontFamily::Helvetica => &HELVETICA_WIDTHS,
            FontFamily::TimesRoman => &TIMES_ROMAN_WIDTHS,
            FontFamily::Courier => &COURIER_WIDTHS,
        }
    }

    /// Advance width of a single character in 1/1000 em, `None` if the
    /// font cannot draw it
    pub fn advance(self, ch: char) -> Option<u16> {
        let code = ch as usize;
        (0x20..=0x7E)
            .contains(&code)
            .then(|| self.widths()[code - 0x20])
    }

    /// First character of `text` this font cannot draw
    pub fn first_unsupported(self, text: &str) -> Option<char> {
        text.chars().find(|&ch| self.advance(ch).is_none())
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FontFamily {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "helvetica" | "arial" => Ok(FontFamily::Helvetica),
            "times" | "times-roman" | "times roman" | "times new roman" => {
                Ok(FontFamily::TimesRoman)
            }
            "courier" | "courier new" => Ok(FontFamily::Courier),
            _ => Err(LabelError::UnsupportedFont(s.to_string())),
        }
    }
}

impl TryFrom<String> for FontFamily {
    type Error = LabelError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FontFamily> for String {
    fn from(font: FontFamily) -> Self {
        font.name().to_string()
    }
}

/// Measures rendered text width.
///
/// Validation and rendering must share one implementation; the layout
/// descriptor stores the widths measured here so renderers never re-measure.
pub trait TextMetrics {
    /// Width of `text` set in `font` at `font_size_pt`, in millimeters.
    /// Zero for the empty string.
    fn measure_width(&self, font: FontFamily, font_size_pt: f32, text: &str) -> Result<f32>;
}

/// Metrics of the built-in PDF fonts
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMetrics;

impl TextMetrics for BuiltinMetrics {
    fn measure_width(&self, font: FontFamily, font_size_pt: f32, text: &str) -> Result<f32> {
        let mut units = 0u32;
        for ch in text.chars() {
            let advance = font
                .advance(ch)
                .ok_or(LabelError::UnsupportedCharacter { ch, font })?;
            units += u32::from(advance);
        }
        Ok(pt_to_mm(units as f32 / UNITS_PER_EM * font_size_pt))
    }
}

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    // ' '  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
static TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

static COURIER_WIDTHS: [u16; 95] = [600; 95];
