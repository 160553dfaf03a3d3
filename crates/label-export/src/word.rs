//! Word (.docx) rendering
//!
//! Each page becomes one borderless table of `max_rows × max_cols` cells,
//! followed by a next-page section break. Every cell holds the same
//! paragraph; the table is repeated `total_pages` times whatever `count` is.

use crate::ensure_current;
use crate::error::Result;
use label_layout::constants::mm_to_twips;
use label_layout::{Alignment, LabelSpec, LayoutDescriptor};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Table width as a percentage, in fiftieths of a percent
const FULL_WIDTH_PCT: u32 = 5000;

/// `w:line` units per single line of auto line spacing
const AUTO_LINE_UNITS: f32 = 240.0;

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS_PART: &str = "_rels/.rels";
const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_PART: &str = "word/document.xml";

/// Render the labels to .docx bytes.
///
/// The document XML is built up front; zipping it runs on a blocking task.
pub async fn render_word(spec: &LabelSpec, layout: &LayoutDescriptor) -> Result<Vec<u8>> {
    let xml = document_xml(spec, layout)?;

    let bytes = tokio::task::spawn_blocking(move || package_docx(&xml)).await??;

    log::info!(
        "Rendered {} Word section(s) of {}x{} labels, {} bytes",
        layout.total_pages(),
        layout.max_cols(),
        layout.max_rows(),
        bytes.len()
    );
    Ok(bytes)
}

/// The `word/document.xml` part for `layout`
pub fn document_xml(spec: &LabelSpec, layout: &LayoutDescriptor) -> Result<String> {
    ensure_current(spec, layout)?;

    let mut w = Writer::new(Cursor::new(Vec::new()));
    emit(&mut w, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    start(&mut w, "w:document", &[("xmlns:w", WORDML_NS)])?;
    start(&mut w, "w:body", &[])?;

    let pages = layout.total_pages();
    for page in 0..pages {
        write_label_table(&mut w, spec, layout)?;

        // Each section ends with a paragraph; all but the last carry their
        // section properties in it, the last one's sit at the end of the body.
        start(&mut w, "w:p", &[])?;
        start(&mut w, "w:pPr", &[])?;
        empty(
            &mut w,
            "w:spacing",
            &[
                ("w:before", "0"),
                ("w:after", "0"),
                ("w:line", "20"),
                ("w:lineRule", "exact"),
            ],
        )?;
        start(&mut w, "w:rPr", &[])?;
        empty(&mut w, "w:sz", &[("w:val", "2")])?;
        end(&mut w, "w:rPr")?;
        if page + 1 < pages {
            write_section_properties(&mut w, spec)?;
        }
        end(&mut w, "w:pPr")?;
        end(&mut w, "w:p")?;
    }

    write_section_properties(&mut w, spec)?;
    end(&mut w, "w:body")?;
    end(&mut w, "w:document")?;

    let bytes = w.into_inner().into_inner();
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

fn write_label_table(
    w: &mut Writer<Cursor<Vec<u8>>>,
    spec: &LabelSpec,
    layout: &LayoutDescriptor,
) -> Result<()> {
    let cols = layout.max_cols();
    let cell_pct = (FULL_WIDTH_PCT / cols).to_string();
    let grid_col_twips = mm_to_twips(layout.usable_width_mm() / cols as f32).to_string();
    let row_twips = mm_to_twips(layout.actual_label_height_mm()).to_string();
    let table_pct = FULL_WIDTH_PCT.to_string();

    start(w, "w:tbl", &[])?;

    start(w, "w:tblPr", &[])?;
    empty(w, "w:tblW", &[("w:w", &table_pct), ("w:type", "pct")])?;
    write_borders(w, "w:tblBorders", &["top", "left", "bottom", "right", "insideH", "insideV"])?;
    empty(w, "w:tblLayout", &[("w:type", "fixed")])?;
    end(w, "w:tblPr")?;

    start(w, "w:tblGrid", &[])?;
    for _ in 0..cols {
        empty(w, "w:gridCol", &[("w:w", &grid_col_twips)])?;
    }
    end(w, "w:tblGrid")?;

    for _ in 0..layout.max_rows() {
        start(w, "w:tr", &[])?;
        start(w, "w:trPr", &[])?;
        empty(w, "w:cantSplit", &[])?;
        empty(w, "w:trHeight", &[("w:val", &row_twips), ("w:hRule", "exact")])?;
        end(w, "w:trPr")?;

        for _ in 0..cols {
            start(w, "w:tc", &[])?;
            start(w, "w:tcPr", &[])?;
            empty(w, "w:tcW", &[("w:w", &cell_pct), ("w:type", "pct")])?;
            write_borders(w, "w:tcBorders", &["top", "left", "bottom", "right"])?;
            end(w, "w:tcPr")?;
            write_label_paragraph(w, spec, layout)?;
            end(w, "w:tc")?;
        }

        end(w, "w:tr")?;
    }

    end(w, "w:tbl")?;
    Ok(())
}

fn write_label_paragraph(
    w: &mut Writer<Cursor<Vec<u8>>>,
    spec: &LabelSpec,
    layout: &LayoutDescriptor,
) -> Result<()> {
    let line = ((spec.line_height * AUTO_LINE_UNITS).round() as u32).to_string();
    let half_points = ((spec.font_size_pt * 2.0).round() as u32).to_string();
    let font = spec.font.word_name();

    start(w, "w:p", &[])?;
    start(w, "w:pPr", &[])?;
    empty(
        w,
        "w:spacing",
        &[
            ("w:before", "0"),
            ("w:after", "0"),
            ("w:line", &line),
            ("w:lineRule", "auto"),
        ],
    )?;
    empty(w, "w:jc", &[("w:val", justification(spec.alignment))])?;
    end(w, "w:pPr")?;

    for (index, text) in layout.content_lines().iter().enumerate() {
        start(w, "w:r", &[])?;
        start(w, "w:rPr", &[])?;
        empty(
            w,
            "w:rFonts",
            &[
                ("w:ascii", font),
                ("w:hAnsi", font),
                ("w:eastAsia", font),
                ("w:cs", font),
            ],
        )?;
        empty(w, "w:sz", &[("w:val", &half_points)])?;
        empty(w, "w:szCs", &[("w:val", &half_points)])?;
        end(w, "w:rPr")?;
        if index > 0 {
            empty(w, "w:br", &[])?;
        }
        start(w, "w:t", &[("xml:space", "preserve")])?;
        emit(w, Event::Text(BytesText::new(text)))?;
        end(w, "w:t")?;
        end(w, "w:r")?;
    }

    end(w, "w:p")?;
    Ok(())
}

/// A4 page size and the spec's margins, in twips
fn write_section_properties(w: &mut Writer<Cursor<Vec<u8>>>, spec: &LabelSpec) -> Result<()> {
    let margins = spec.margins;
    let page_w = mm_to_twips(label_layout::constants::PAGE_WIDTH_MM).to_string();
    let page_h = mm_to_twips(label_layout::constants::PAGE_HEIGHT_MM).to_string();
    let top = mm_to_twips(margins.top_mm).to_string();
    let right = mm_to_twips(margins.right_mm).to_string();
    let bottom = mm_to_twips(margins.bottom_mm).to_string();
    let left = mm_to_twips(margins.left_mm).to_string();

    start(w, "w:sectPr", &[])?;
    empty(w, "w:pgSz", &[("w:w", &page_w), ("w:h", &page_h)])?;
    empty(
        w,
        "w:pgMar",
        &[
            ("w:top", &top),
            ("w:right", &right),
            ("w:bottom", &bottom),
            ("w:left", &left),
            ("w:header", "0"),
            ("w:footer", "0"),
            ("w:gutter", "0"),
        ],
    )?;
    end(w, "w:sectPr")?;
    Ok(())
}

fn write_borders(w: &mut Writer<Cursor<Vec<u8>>>, name: &str, edges: &[&str]) -> Result<()> {
    start(w, name, &[])?;
    for edge in edges {
        empty(w, &format!("w:{edge}"), &[("w:val", "nil")])?;
    }
    end(w, name)?;
    Ok(())
}

fn justification(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
    }
}

fn start<W: Write>(w: &mut Writer<W>, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    emit(
        w,
        Event::Start(BytesStart::new(name).with_attributes(attrs.iter().copied())),
    )
}

fn empty<W: Write>(w: &mut Writer<W>, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    emit(
        w,
        Event::Empty(BytesStart::new(name).with_attributes(attrs.iter().copied())),
    )
}

fn end<W: Write>(w: &mut Writer<W>, name: &str) -> Result<()> {
    emit(w, Event::End(BytesEnd::new(name)))
}

/// Write one event; a failing writer surfaces as an XML error
fn emit<W: Write>(w: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    w.write_event(event).map_err(quick_xml::Error::from)?;
    Ok(())
}

/// Zip the document part into a .docx package
fn package_docx(document_xml: &str) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, body) in [
        (CONTENT_TYPES_PART, CONTENT_TYPES_XML),
        (PACKAGE_RELS_PART, PACKAGE_RELS_XML),
        (DOCUMENT_PART, document_xml),
    ] {
        zip.start_file(name, part_options())?;
        zip.write_all(body.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}

fn part_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated)
}
