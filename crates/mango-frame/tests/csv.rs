use std::io::Write;

use mango_frame::{
    read_csv, read_csv_path, read_csv_str, ColumnType, CsvOptions, DataFrame, FrameError, Series,
    Value,
};
use pretty_assertions::assert_eq;

fn dtypes(df: &DataFrame) -> Vec<ColumnType> {
    df.columns().iter().map(Series::dtype).collect()
}

#[test]
fn integer_columns() {
    let df = read_csv_str("col1,col2,col3\n1,2,3\n4,5,6\n7,8,9", CsvOptions::default()).unwrap();
    assert_eq!(df.column_names(), vec!["col1", "col2", "col3"]);
    assert_eq!(dtypes(&df), vec![ColumnType::Int64; 3]);
    assert_eq!(
        df.column("col2").unwrap(),
        &Series::from_vec("col2", vec![2i64, 5, 8])
    );
}

#[test]
fn float_columns() {
    let df = read_csv_str(
        "col1,col2,col3\n1.1,2.2,3.3\n4.4,5.5,6.6\n7.7,8.8,9.9",
        CsvOptions::default(),
    )
    .unwrap();
    assert_eq!(dtypes(&df), vec![ColumnType::Float64; 3]);
    assert_eq!(
        df.column("col1").unwrap(),
        &Series::from_vec("col1", vec![1.1, 4.4, 7.7])
    );
}

#[test]
fn mixed_columns_stay_text() {
    let df = read_csv_str("col1,col2,col3\n1,2,3\na,b,c\ntrue,false,8.4", CsvOptions::default())
        .unwrap();
    assert_eq!(dtypes(&df), vec![ColumnType::String; 3]);
    assert_eq!(
        df.row_values(2).unwrap(),
        vec![
            Some(Value::from("true")),
            Some(Value::from("false")),
            Some(Value::from("8.4"))
        ]
    );
}

#[test]
fn boolean_and_mixed_numeric_columns() {
    let df = read_csv_str("flag,n\ntrue,1\nFALSE,2.5\n", CsvOptions::default()).unwrap();
    assert_eq!(dtypes(&df), vec![ColumnType::Boolean, ColumnType::Float64]);
}

#[test]
fn inference_can_be_disabled() {
    let options = CsvOptions {
        infer_types: false,
        ..CsvOptions::default()
    };
    let df = read_csv_str("a\n1\n2", options).unwrap();
    assert_eq!(dtypes(&df), vec![ColumnType::String]);
}

#[test]
fn null_spellings_become_nulls() {
    let options = CsvOptions {
        null_values: vec!["".to_owned(), "NA".to_owned()],
        ..CsvOptions::default()
    };
    let df = read_csv_str("a,b\n1,x\n,NA\n3,z", options).unwrap();
    assert_eq!(dtypes(&df), vec![ColumnType::Int64, ColumnType::String]);
    assert_eq!(df.column("a").unwrap().is_null(), vec![false, true, false]);
    assert_eq!(df.column("b").unwrap().null_count(), 1);
}

#[test]
fn headerless_input_gets_generated_names() {
    let options = CsvOptions {
        has_header: false,
        delimiter: b';',
        ..CsvOptions::default()
    };
    let df = read_csv_str("1;x\n2;y", options).unwrap();
    assert_eq!(df.column_names(), vec!["column_1", "column_2"]);
    assert_eq!(df.height(), 2);
}

#[test]
fn ragged_rows_are_padded_with_nulls() {
    let df = read_csv_str("a,b,c\n1,2,3\n4\n5,6,7,8", CsvOptions::default()).unwrap();
    assert_eq!(df.column_names(), vec!["a", "b", "c", "column_4"]);
    assert_eq!(df.height(), 3);
    assert_eq!(df.column("b").unwrap().is_null(), vec![false, true, false]);
    assert_eq!(
        df.column("column_4").unwrap().is_null(),
        vec![true, true, false]
    );
}

#[test]
fn trim_strips_whitespace() {
    let options = CsvOptions {
        trim: true,
        ..CsvOptions::default()
    };
    let df = read_csv_str(" a , b \n 2 , x \n 1 , y \n", options).unwrap();
    assert_eq!(df.column_names(), vec!["a", "b"]);
    assert_eq!(df.column("a").unwrap().dtype(), ColumnType::Int64);
    assert_eq!(df.column("a").unwrap().value(1).unwrap(), Some(Value::Int64(1)));
    assert_eq!(df.column("b").unwrap().value(0).unwrap(), Some(Value::from("x")));
}

#[test]
fn column_of_only_one_reads_as_boolean() {
    let options = CsvOptions {
        trim: true,
        ..CsvOptions::default()
    };
    let df = read_csv_str("a\n 1 \n", options).unwrap();
    assert_eq!(df.column("a").unwrap().dtype(), ColumnType::Boolean);
    assert_eq!(df.column("a").unwrap().value(0).unwrap(), Some(Value::Boolean(true)));
}

#[test]
fn empty_input_is_an_error() {
    assert!(matches!(
        read_csv_str("", CsvOptions::default()),
        Err(FrameError::EmptyInput)
    ));
}

#[test]
fn duplicate_headers_are_rejected() {
    assert!(matches!(
        read_csv_str("a,a\n1,2", CsvOptions::default()),
        Err(FrameError::DuplicateColumn(_))
    ));
}

#[test]
fn reads_from_files_and_readers() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "x,y\n1,true\n2,false\n").unwrap();
    file.flush().unwrap();

    let from_path = read_csv_path(file.path(), CsvOptions::default()).unwrap();
    let from_reader = read_csv(
        std::fs::File::open(file.path()).unwrap(),
        CsvOptions::default(),
    )
    .unwrap();
    assert_eq!(from_path, from_reader);
    assert_eq!(dtypes(&from_path), vec![ColumnType::Int64, ColumnType::Boolean]);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_csv_path(dir.path().join("missing.csv"), CsvOptions::default()).unwrap_err();
    assert!(matches!(err, FrameError::Io(_)));
}
