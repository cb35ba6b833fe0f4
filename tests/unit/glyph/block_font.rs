use super::*;

#[test]
fn letters_fold_case_and_whitespace_is_blank() {
    assert_eq!(glyph_rows('a'), glyph_rows('A'));
    assert!(glyph_rows(' ').is_none());
    assert_eq!(glyph_rows('\u{2603}'), Some(UNKNOWN));
}

#[test]
fn every_row_fits_the_cell() {
    for c in ('A'..='Z').chain('0'..='9') {
        for row in glyph_rows(c).unwrap() {
            assert!(u32::from(row) < (1 << GLYPH_W), "{c} overflows");
        }
    }
}

#[test]
fn svg_has_one_rect_per_dot() {
    let svg = block_text_svg("I", 200, 100).unwrap();
    let dots: u32 = glyph_rows('I')
        .unwrap()
        .iter()
        .map(|r| r.count_ones())
        .sum();
    assert_eq!(svg.matches("<rect").count() as u32, dots);
    assert!(svg.starts_with("<svg"));
}

#[test]
fn nothing_to_draw() {
    assert!(block_text_svg("", 100, 100).is_none());
    assert!(block_text_svg("   ", 100, 100).is_none());
    assert!(block_text_svg("HI", 0, 100).is_none());
}
