use label_layout::*;
use std::collections::HashSet;
use std::num::NonZeroU32;

fn spec_with(count: u32, alignment: Alignment) -> LabelSpec {
    LabelSpec {
        content: "ABC\nxyz".to_string(),
        max_lines: 2,
        font_size_pt: 10.0,
        alignment,
        count: NonZeroU32::new(count).unwrap(),
        ..Default::default()
    }
}

#[test]
fn test_one_placement_per_label() {
    let spec = spec_with(61, Alignment::Left);
    let layout = compute_layout(&spec).unwrap();

    let all: Vec<_> = placements(&layout).collect();
    assert_eq!(all.len(), 61);
    assert_eq!(placements(&layout).len(), 61);

    let distinct: HashSet<_> = all
        .iter()
        .map(|p| (p.position.page, p.position.row, p.position.col))
        .collect();
    assert_eq!(distinct.len(), 61);
}

#[test]
fn test_pages_match_layout() {
    let spec = spec_with(61, Alignment::Left);
    let layout = compute_layout(&spec).unwrap();
    assert_eq!(layout.labels_per_page(), 27);

    let last = placements(&layout).last().unwrap();
    assert_eq!(last.position.page + 1, layout.total_pages());

    let on_last_page = placements(&layout)
        .filter(|p| p.position.page == last.position.page)
        .count();
    assert_eq!(on_last_page as u32, layout.labels_on_last_page());
    assert_eq!(on_last_page, 7);
}

#[test]
fn test_grid_walk_order() {
    let spec = spec_with(30, Alignment::Left);
    let layout = compute_layout(&spec).unwrap();
    let all: Vec<_> = placements(&layout).collect();

    let pos = |i: usize| {
        let p = all[i].position;
        (p.page, p.row, p.col)
    };
    assert_eq!(pos(0), (0, 0, 0));
    assert_eq!(pos(2), (0, 0, 2));
    assert_eq!(pos(3), (0, 1, 0));
    assert_eq!(pos(26), (0, 8, 2));
    assert_eq!(pos(27), (1, 0, 0));
    assert_eq!(pos(29), (1, 0, 2));
}

#[test]
fn test_label_origins() {
    let spec = spec_with(5, Alignment::Left);
    let layout = compute_layout(&spec).unwrap();
    let all: Vec<_> = placements(&layout).collect();

    // Fifth label: row 1, col 1
    let p = &all[4];
    assert_eq!(p.x_mm, 10.0 + 50.0);
    assert_eq!(p.y_mm, 10.0 + 30.0);

    // Line baselines step by font size × line height
    assert_eq!(p.lines[0].y_mm, 40.0);
    assert_eq!(p.lines[1].y_mm, 50.0);
    assert_eq!(p.lines[0].x_mm, p.x_mm);
    assert_eq!(p.lines[0].text, "ABC");
}

#[test]
fn test_alignment_offsets() {
    for alignment in [Alignment::Left, Alignment::Center, Alignment::Right] {
        let spec = spec_with(1, alignment);
        let layout = compute_layout(&spec).unwrap();
        let p = placements(&layout).next().unwrap();
        let width = layout.line_widths_mm()[0];
        let line = p.lines[0];

        let expected = match alignment {
            Alignment::Left => p.x_mm,
            Alignment::Center => p.x_mm + (50.0 - width) / 2.0,
            Alignment::Right => p.x_mm + 50.0 - width,
        };
        assert!((line.x_mm - expected).abs() < 1e-4);
        assert_eq!(line.width_mm, width);
    }
}
