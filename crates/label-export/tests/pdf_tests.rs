use label_export::*;
use label_layout::*;
use printpdf::{Mm, Op, TextItem};
use std::num::NonZeroU32;

const A4_WIDTH_PT: f32 = 595.28;
const A4_HEIGHT_PT: f32 = 841.89;

/// Measures every character as half an em, whatever it is
struct AnyText;

impl TextMetrics for AnyText {
    fn measure_width(
        &self,
        _font: FontFamily,
        font_size_pt: f32,
        text: &str,
    ) -> label_layout::Result<f32> {
        Ok(text.chars().count() as f32 * font_size_pt * 0.5 * 25.4 / 72.0)
    }
}

fn spec(count: u32) -> LabelSpec {
    LabelSpec {
        content: "Lot 7\nKeep dry".to_string(),
        max_lines: 2,
        font_size_pt: 10.0,
        alignment: Alignment::Center,
        count: NonZeroU32::new(count).unwrap(),
        ..Default::default()
    }
}

fn cursor_points(ops: &[Op]) -> Vec<(f32, f32)> {
    ops.iter()
        .filter_map(|op| match op {
            Op::SetTextCursor { pos } => Some((pos.x.0, pos.y.0)),
            _ => None,
        })
        .collect()
}

fn written_text(ops: &[Op]) -> Vec<String> {
    ops.iter()
        .filter_map(|op| match op {
            Op::WriteTextBuiltinFont { items, .. } => match items.as_slice() {
                [TextItem::Text(text)] => Some(text.clone()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

fn text_sections(ops: &[Op]) -> usize {
    ops.iter()
        .filter(|op| matches!(op, Op::StartTextSection))
        .count()
}

#[test]
fn test_page_count_matches_layout() {
    let spec = spec(61);
    let layout = compute_layout(&spec).unwrap();
    let doc = build_pdf(&spec, &layout).unwrap();

    assert_eq!(doc.pages.len() as u32, layout.total_pages());
    assert_eq!(doc.pages.len(), 3);
}

#[test]
fn test_every_label_is_drawn() {
    let spec = spec(61);
    let layout = compute_layout(&spec).unwrap();
    let doc = build_pdf(&spec, &layout).unwrap();

    let lines_per_label = layout.content_lines().len();
    let per_page: Vec<usize> = doc.pages.iter().map(|p| text_sections(&p.ops)).collect();

    assert_eq!(per_page, vec![27 * lines_per_label, 27 * lines_per_label, 7 * lines_per_label]);
    assert_eq!(per_page.iter().sum::<usize>(), 61 * lines_per_label);
}

#[test]
fn test_full_last_page() {
    let spec = spec(27);
    let layout = compute_layout(&spec).unwrap();
    let doc = build_pdf(&spec, &layout).unwrap();

    assert_eq!(doc.pages.len(), 1);
    assert_eq!(text_sections(&doc.pages[0].ops), 27 * 2);
}

#[test]
fn test_empty_lines_are_skipped() {
    let spec = LabelSpec {
        content: "Top\n\nBottom".to_string(),
        max_lines: 3,
        font_size_pt: 8.0,
        count: NonZeroU32::new(2).unwrap(),
        ..Default::default()
    };
    let layout = compute_layout(&spec).unwrap();
    let doc = build_pdf(&spec, &layout).unwrap();

    assert_eq!(text_sections(&doc.pages[0].ops), 2 * 2);
}

#[test]
fn test_saved_pdf_reopens_with_expected_pages() {
    let spec = spec(100);
    let layout = compute_layout(&spec).unwrap();
    let bytes = render_pdf(&spec, &layout).unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len() as u32, layout.total_pages());
}

#[test]
fn test_stale_layout_is_rejected() {
    let original = spec(10);
    let layout = compute_layout(&original).unwrap();
    let edited = LabelSpec {
        content: "Changed".to_string(),
        ..original
    };

    let err = render_pdf(&edited, &layout).unwrap_err();
    assert!(matches!(err, ExportError::Precondition(_)));
    assert_eq!(err.kind(), ErrorKind::Precondition);
}

#[test]
fn test_text_cursor_follows_placements() {
    let spec = spec(30);
    let layout = compute_layout(&spec).unwrap();
    let doc = build_pdf(&spec, &layout).unwrap();
    assert_eq!(doc.pages.len(), 2);

    for (page_index, page) in doc.pages.iter().enumerate() {
        let expected: Vec<(f32, f32)> = placements(&layout)
            .filter(|p| p.position.page as usize == page_index)
            .flat_map(|p| p.lines)
            .map(|line| (Mm(line.x_mm).into_pt().0, Mm(297.0 - line.y_mm).into_pt().0))
            .collect();
        let drawn = cursor_points(&page.ops);

        assert_eq!(drawn.len(), expected.len());
        for ((x, y), (ex, ey)) in drawn.iter().zip(&expected) {
            assert_close(*x, *ex, 1e-3);
            assert_close(*y, *ey, 1e-3);
        }
    }
}

#[test]
fn test_centered_lines_on_first_rows() {
    let spec = spec(30);
    let layout = compute_layout(&spec).unwrap();
    let doc = build_pdf(&spec, &layout).unwrap();

    let lot_mm = BuiltinMetrics
        .measure_width(FontFamily::Helvetica, 10.0, "Lot 7")
        .unwrap();
    let keep_mm = BuiltinMetrics
        .measure_width(FontFamily::Helvetica, 10.0, "Keep dry")
        .unwrap();
    let pt = |mm: f32| mm * 72.0 / 25.4;

    let first_page = cursor_points(&doc.pages[0].ops);
    // Label (0,0): left margin 10mm, top margin 10mm, lines 10mm apart
    assert_close(first_page[0].0, pt(10.0 + (50.0 - lot_mm) / 2.0), 1e-2);
    assert_close(first_page[0].1, pt(297.0 - 10.0), 1e-2);
    assert_close(first_page[1].0, pt(10.0 + (50.0 - keep_mm) / 2.0), 1e-2);
    assert_close(first_page[1].1, pt(297.0 - 20.0), 1e-2);
    // Label (0,1) sits one label width to the right
    assert_close(first_page[2].0, pt(60.0 + (50.0 - lot_mm) / 2.0), 1e-2);
    // Label (1,0) starts the second row, one 30mm row pitch down
    assert_close(first_page[6].0, first_page[0].0, 1e-3);
    assert_close(first_page[6].1, pt(297.0 - 40.0), 1e-2);

    // The second page starts again at the top-left slot
    let second_page = cursor_points(&doc.pages[1].ops);
    assert_eq!(second_page.len(), 3 * 2);
    assert_close(second_page[0].0, first_page[0].0, 1e-3);
    assert_close(second_page[0].1, first_page[0].1, 1e-3);

    assert_eq!(
        written_text(&doc.pages[1].ops),
        vec!["Lot 7", "Keep dry", "Lot 7", "Keep dry", "Lot 7", "Keep dry"]
    );
}

#[test]
fn test_reopened_pdf_has_a4_pages_and_positioned_text() {
    let spec = spec(30);
    let layout = compute_layout(&spec).unwrap();
    let bytes = render_pdf(&spec, &layout).unwrap();
    let doc = lopdf::Document::load_mem(&bytes).unwrap();

    let pages = doc.get_pages();
    assert_eq!(pages.len(), 2);

    for page_id in pages.values() {
        let media_box = doc
            .get_dictionary(*page_id)
            .unwrap()
            .get(b"MediaBox")
            .unwrap()
            .as_array()
            .unwrap();
        let dims: Vec<f32> = media_box.iter().map(|v| v.as_float().unwrap()).collect();
        assert_eq!(dims.len(), 4);
        assert_close(dims[2], A4_WIDTH_PT, 0.05);
        assert_close(dims[3], A4_HEIGHT_PT, 0.05);
    }

    let first_page = doc.get_and_decode_page_content(pages[&1]).unwrap();
    let moves: Vec<(f32, f32)> = first_page
        .operations
        .iter()
        .filter(|op| op.operator == "Td")
        .map(|op| (op.operands[0].as_float().unwrap(), op.operands[1].as_float().unwrap()))
        .collect();
    let shown: Vec<Vec<u8>> = first_page
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .map(|op| op.operands[0].as_str().unwrap().to_vec())
        .collect();

    let expected = cursor_points(&build_pdf(&spec, &layout).unwrap().pages[0].ops);
    assert_eq!(moves.len(), expected.len());
    assert_close(moves[0].0, expected[0].0, 0.01);
    assert_close(moves[0].1, expected[0].1, 0.01);
    assert_close(moves[1].1, expected[1].1, 0.01);

    assert_eq!(shown.len(), 27 * 2);
    assert_eq!(shown[0], b"Lot 7");
    assert_eq!(shown[1], b"Keep dry");
}

#[test]
fn test_text_outside_the_font_encoding_is_refused() {
    let spec = LabelSpec {
        content: "Café 4°C".to_string(),
        alignment: Alignment::Center,
        ..Default::default()
    };
    let layout = compute_layout_with(&spec, &AnyText).unwrap();

    let err = build_pdf(&spec, &layout).unwrap_err();
    assert!(matches!(err, ExportError::Pdf(_)));
    assert_eq!(err.kind(), ErrorKind::Rendering);
    assert!(err.to_string().contains("U+00E9"));
}

#[test]
fn test_non_ascii_content_fails_before_rendering() {
    let spec = LabelSpec {
        content: "Café 4°C 标".to_string(),
        ..Default::default()
    };

    let err = compute_layout(&spec).unwrap_err();
    assert!(matches!(err, LabelError::UnsupportedCharacter { ch: 'é', .. }));
    assert_eq!(ExportError::from(err).kind(), ErrorKind::Rendering);
}
