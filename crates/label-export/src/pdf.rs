use crate::error::{ExportError, Result};
use crate::ensure_current;
use label_layout::{FontFamily, LabelSpec, LayoutDescriptor, placements};
use printpdf::*;

fn builtin_font(font: FontFamily) -> BuiltinFont {
    match font {
        FontFamily::Helvetica => BuiltinFont::Helvetica,
        FontFamily::TimesRoman => BuiltinFont::TimesRoman,
        FontFamily::Courier => BuiltinFont::Courier,
    }
}

/// Render the labels to PDF bytes
pub fn render_pdf(spec: &LabelSpec, layout: &LayoutDescriptor) -> Result<Vec<u8>> {
    let doc = build_pdf(spec, layout)?;

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        log::debug!("PDF serialization produced {} warning(s)", warnings.len());
    }

    log::info!(
        "Rendered {} label(s) on {} PDF page(s), {} bytes",
        spec.count,
        layout.total_pages(),
        bytes.len()
    );
    Ok(bytes)
}

/// Build the PDF document: one A4 page per layout page, one text section per
/// non-empty content line of every label.
pub fn build_pdf(spec: &LabelSpec, layout: &LayoutDescriptor) -> Result<PdfDocument> {
    ensure_current(spec, layout)?;

    // Built-in font text is written as single bytes; only ASCII survives
    if let Some(ch) = layout
        .content_lines()
        .iter()
        .find_map(|line| spec.font.first_unsupported(line))
    {
        return Err(ExportError::Pdf(format!(
            "{} cannot encode {:?} (U+{:04X})",
            spec.font, ch, ch as u32
        )));
    }

    let mut doc = PdfDocument::new("Labels");
    let page_height_mm = layout.page_height_mm();

    let mut page_ops: Vec<Vec<Op>> = (0..layout.total_pages()).map(|_| Vec::new()).collect();

    for placement in placements(layout) {
        let page = placement.position.page;
        let ops = page_ops.get_mut(page as usize).ok_or_else(|| {
            ExportError::Pdf(format!(
                "label {} landed on page {} of {}",
                placement.index + 1,
                page + 1,
                layout.total_pages()
            ))
        })?;

        for line in placement.lines.iter().filter(|line| !line.text.is_empty()) {
            // PDF space has its origin at the bottom-left corner
            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point {
                    x: Mm(line.x_mm).into_pt(),
                    y: Mm(page_height_mm - line.y_mm).into_pt(),
                },
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                font: builtin_font(spec.font),
                size: Pt(spec.font_size_pt),
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(line.text.to_string())],
                font: builtin_font(spec.font),
            });
            ops.push(Op::EndTextSection);
        }
    }

    doc.pages = page_ops
        .into_iter()
        .map(|ops| PdfPage::new(Mm(layout.page_width_mm()), Mm(page_height_mm), ops))
        .collect();

    Ok(doc)
}
