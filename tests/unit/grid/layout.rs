use super::*;

fn glyph(row: u32, col: u32, g: &str) -> Cell {
    Cell {
        row,
        col,
        content: CellContent::Glyph(g.to_string()),
    }
}

fn blank(row: u32, col: u32) -> Cell {
    Cell {
        row,
        col,
        content: CellContent::Blank,
    }
}

#[test]
fn newline_fills_the_row_and_last_row_is_padded() {
    let cells = layout("AB\nC", 3).unwrap();
    assert_eq!(
        cells,
        vec![
            glyph(0, 0, "A"),
            glyph(0, 1, "B"),
            blank(0, 2),
            glyph(1, 0, "C"),
            blank(1, 1),
            blank(1, 2),
        ]
    );
}

#[test]
fn long_lines_wrap_at_max_cols() {
    let cells = layout("abcdefg", 3).unwrap();
    assert_eq!(cells.len(), 9);
    assert_eq!(cells[3], glyph(1, 0, "d"));
    assert_eq!(cells[6], glyph(2, 0, "g"));
    assert_eq!(cells_to_lines(&cells), vec!["abc", "def", "g"]);
}

#[test]
fn break_after_full_row_leaves_an_empty_row() {
    let cells = layout("abc\nd", 3).unwrap();
    assert_eq!(rows_used(&cells), 3);
    assert_eq!(cells_to_lines(&cells), vec!["abc", "", "d"]);
}

#[test]
fn graphemes_stay_whole() {
    let text = "한글e\u{301}👍🏽";
    let cells = layout(text, 13).unwrap();
    let glyphs: Vec<&str> = cells.iter().filter_map(Cell::glyph).collect();
    assert_eq!(glyphs, vec!["한", "글", "e\u{301}", "👍🏽"]);
    assert_eq!(cells.len(), 13);
}

#[test]
fn crlf_is_one_break() {
    assert_eq!(layout("a\r\nb", 4).unwrap(), layout("a\nb", 4).unwrap());
}

#[test]
fn cell_count_is_a_whole_number_of_rows() {
    let text = "첫 줄\n둘째 줄은 좀 길어요\n\n끝";
    for cols in [1, 2, 5, 13] {
        let cells = layout(text, cols).unwrap();
        assert_eq!(cells.len() % cols as usize, 0, "cols={cols}");
        assert_eq!(layout(text, cols).unwrap(), cells);
    }
    let lines = cells_to_lines(&layout(text, 13).unwrap());
    assert_eq!(lines, vec!["첫 줄", "둘째 줄은 좀 길어요", "", "끝"]);
}

#[test]
fn empty_text_has_no_cells_and_zero_cols_is_rejected() {
    assert!(layout("", 13).unwrap().is_empty());
    assert_eq!(rows_used(&[]), 0);
    assert!(matches!(
        layout("x", 0).unwrap_err(),
        DiaryError::InvalidInput(_)
    ));
}
