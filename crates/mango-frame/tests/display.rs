use std::sync::Arc;

use mango_frame::{read_csv_str, CsvOptions, DataFrame, DisplayOptions, Series};
use pretty_assertions::assert_eq;

#[test]
fn renders_a_boxed_table_with_short_types() {
    let df = read_csv_str("col1,col2,col3\n1,a,1.1\n2,b,2.2\n3,c,3.3", CsvOptions::default())
        .unwrap();
    let expected = "\
+------+------+------+
| col1 | col2 | col3 |
| i64  | str  | f64  |
+------+------+------+
| 1    | a    | 1.1  |
+------+------+------+
| 2    | b    | 2.2  |
+------+------+------+
| 3    | c    | 3.3  |
+------+------+------+
";
    assert_eq!(df.to_string(), expected);
}

#[test]
fn nulls_and_booleans() {
    let df = DataFrame::new(vec![
        Series::from_options("flag", vec![Some(true), None]),
        Series::from_options::<i64>("n", vec![None, Some(12345)]),
    ])
    .unwrap();
    let expected = "\
+------+-------+
| flag | n     |
| bool | i64   |
+------+-------+
| true | null  |
+------+-------+
| null | 12345 |
+------+-------+
";
    assert_eq!(df.to_string(), expected);
}

#[test]
fn long_tables_and_cells_are_shortened() {
    let df = DataFrame::new(vec![
        Series::from_vec("n", (0..10i64).collect()),
        Series::from_vec(
            "s",
            (0..10)
                .map(|i| Arc::<str>::from(format!("value-{i}")))
                .collect(),
        ),
    ])
    .unwrap();
    let rendered = df
        .display_with(DisplayOptions {
            max_rows: 2,
            max_col_width: 4,
        })
        .to_string();
    // The type row is wider than the one-character name, so it sets the width.
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[1], "| n   | s    |");
    assert_eq!(lines[2], "| i64 | str  |");
    assert_eq!(lines[4], "| 0   | val… |");
    assert_eq!(lines[6], "| …   | …    |");
    assert_eq!(lines[8], "| 9   | val… |");
    assert_eq!(lines.len(), 10);
}

#[test]
fn empty_frame() {
    assert_eq!(DataFrame::empty().to_string(), "empty data frame\n");
}
