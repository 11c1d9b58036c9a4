use std::collections::BTreeMap;
use std::sync::Arc;

use mango_columnar::Chunk;

use mango_frame::{ColumnType, DataFrame, FrameError, Series, TypedSeries, Value};
use pretty_assertions::assert_eq;

fn people() -> DataFrame {
    DataFrame::new(vec![
        Series::from_vec(
            "name",
            vec![Arc::<str>::from("ann"), "bob".into(), "cy".into()],
        ),
        Series::from_options("age", vec![Some(31i64), None, Some(7)]),
        Series::from_vec("score", vec![1.5, 2.0, 3.25]),
    ])
    .unwrap()
}

#[test]
fn shape_and_names() {
    let df = people();
    assert_eq!(df.width(), 3);
    assert_eq!(df.height(), 3);
    assert_eq!(df.column_names(), vec!["name", "age", "score"]);
    assert_eq!(df.column("age").unwrap().dtype(), ColumnType::Int64);
    assert!(matches!(
        df.column("missing"),
        Err(FrameError::ColumnNotFound(name)) if name == "missing"
    ));
}

#[test]
fn select_reorders_and_rejects_unknown_names() {
    let df = people();
    let selected = df.select(&["score", "name"]).unwrap();
    assert_eq!(selected.column_names(), vec!["score", "name"]);
    assert_eq!(selected.height(), 3);

    let err = df.select(&["name", "nope"]).unwrap_err();
    assert!(matches!(err, FrameError::ColumnNotFound(name) if name == "nope"));

    assert!(matches!(
        df.select(&["name", "name"]),
        Err(FrameError::DuplicateColumn(_))
    ));
}

#[test]
fn rows_are_keyed_by_name() {
    let df = people();
    let row = df.row(1).unwrap();
    let expected: BTreeMap<String, Option<Value>> = [
        ("name".to_owned(), Some(Value::from("bob"))),
        ("age".to_owned(), None),
        ("score".to_owned(), Some(Value::Float64(2.0))),
    ]
    .into_iter()
    .collect();
    assert_eq!(row, expected);

    assert_eq!(
        df.row_values(0).unwrap(),
        vec![
            Some(Value::from("ann")),
            Some(Value::Int64(31)),
            Some(Value::Float64(1.5))
        ]
    );
}

#[test]
fn apply_builds_a_series_from_row_results() {
    let df = people();
    let doubled = df
        .apply(|row| match &row["age"] {
            Some(Value::Int64(age)) => Value::Int64(age * 2),
            _ => Value::Null,
        })
        .unwrap();
    assert_eq!(doubled.dtype(), ColumnType::Int64);
    let values: Vec<Option<i64>> = TypedSeries::<i64>::new(doubled).unwrap().iter().collect();
    assert_eq!(values, vec![Some(62), None, Some(14)]);
}

#[test]
fn apply_widens_mixed_numeric_results() {
    let df = people();
    let mut n = 0;
    let mixed = df
        .apply(|_| {
            n += 1;
            if n == 2 {
                Value::Float64(0.5)
            } else {
                Value::Int64(n)
            }
        })
        .unwrap();
    assert_eq!(mixed.dtype(), ColumnType::Float64);
    let values: Vec<Option<f64>> = TypedSeries::<f64>::new(mixed).unwrap().iter().collect();
    assert_eq!(values, vec![Some(1.0), Some(0.5), Some(3.0)]);
}

#[test]
fn apply_parses_numeric_looking_strings() {
    let df = people();
    let parsed = df.apply(|_| Value::from("7")).unwrap();
    assert_eq!(parsed.dtype(), ColumnType::Int64);
    assert_eq!(parsed.value(0).unwrap(), Some(Value::Int64(7)));

    let labels = df.apply(|_| Value::from("seven")).unwrap();
    assert_eq!(labels.dtype(), ColumnType::String);
}

#[test]
fn apply_with_mixed_result_types_fails() {
    let df = people();
    let mut n = 0;
    let err = df
        .apply(|_| {
            n += 1;
            if n == 2 {
                Value::from("two")
            } else {
                Value::Int64(n)
            }
        })
        .unwrap_err();
    assert!(matches!(err, FrameError::Columnar(_)));
}

#[test]
fn try_apply_stops_at_first_error() {
    let df = people();
    let mut seen = Vec::new();
    let err = df
        .try_apply(|row| {
            let name = row["name"].clone();
            seen.push(name.clone());
            match row["age"] {
                Some(_) => Ok(Value::Boolean(true)),
                None => Err(format!("{} has no age", name.unwrap_or(Value::Null))),
            }
        })
        .unwrap_err();

    match err {
        FrameError::Apply { row, source } => {
            assert_eq!(row, 1);
            assert_eq!(source.to_string(), "bob has no age");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(seen.len(), 2);
}

#[test]
fn with_columns_replaces_and_appends() {
    let df = people();
    let names_upper = df
        .apply(|row| match &row["name"] {
            Some(v) => Value::from(v.to_string().to_uppercase()),
            None => Value::Null,
        })
        .unwrap()
        .alias("name");
    let flag = Series::from_vec("adult", vec![true, false, false]);

    let df = df.with_columns([names_upper, flag]).unwrap();
    assert_eq!(df.column_names(), vec!["name", "age", "score", "adult"]);
    assert_eq!(
        df.column("name").unwrap().value(2).unwrap(),
        Some(Value::from("CY"))
    );
}

#[test]
fn with_columns_on_empty_frame_sets_height() {
    let df = DataFrame::empty()
        .with_columns([Series::from_vec("x", vec![1i64, 2])])
        .unwrap();
    assert_eq!(df.height(), 2);
}

#[test]
fn rechunk_every_column() {
    let a = Series::from_chunks(
        "a",
        ColumnType::Int64,
        vec![Chunk::from_vec(vec![1i64, 2]), Chunk::from_vec(vec![3i64])],
    )
    .unwrap();
    let b = Series::from_vec("b", vec![0.5, 1.5, 2.5]);
    let mut df = DataFrame::new(vec![a.clone(), b]).unwrap();
    df.rechunk();
    assert!(df.columns().iter().all(|c| c.num_chunks() == 1));
    assert_eq!(df.column("a").unwrap(), &a);
    assert_eq!(a.num_chunks(), 2);
}
