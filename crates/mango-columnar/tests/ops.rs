use mango_columnar::{Chunk, ColumnType, ColumnarError, Series, TypedSeries, Value};
use pretty_assertions::assert_eq;

fn five() -> Series {
    Series::from_chunks(
        "n",
        ColumnType::Int64,
        vec![
            Chunk::from_vec(vec![10i64, 11, 12]),
            Chunk::from_options(vec![None, Some(14i64)]),
        ],
    )
    .unwrap()
}

fn ints(s: &Series) -> Vec<Option<i64>> {
    TypedSeries::<i64>::new(s.clone()).unwrap().iter().collect()
}

#[test]
fn slice_with_negative_offset_counts_from_end() {
    let s = five();
    let last = s.slice(-1, 1).unwrap();
    assert_eq!(ints(&last), vec![Some(14)]);
    assert_eq!(last.name(), "n");
}

#[test]
fn slice_bounds() {
    let s = five();
    assert_eq!(ints(&s.slice(0, 5).unwrap()).len(), 5);
    assert_eq!(ints(&s.slice(3, 2).unwrap()), vec![None, Some(14)]);
    assert_eq!(ints(&s.slice(5, 0).unwrap()), vec![]);

    assert_eq!(
        s.slice(0, 6).unwrap_err(),
        ColumnarError::SliceOutOfRange {
            offset: 0,
            length: 6,
            len: 5
        }
    );
    assert!(s.slice(4, 2).is_err());
    assert!(s.slice(-6, 1).is_err());
}

#[test]
fn slice_does_not_copy_chunks() {
    let s = five();
    let sliced = s.slice(1, 3).unwrap();
    assert_eq!(sliced.chunk_lengths(), vec![2, 1]);
    assert!(std::sync::Arc::ptr_eq(
        sliced.chunks()[1].chunk(),
        s.chunks()[1].chunk()
    ));
}

#[test]
fn filter_keeps_masked_elements_in_order() {
    let values = Series::from_vec("f", vec![1.0, 2.0, 3.0]);
    let mask = Series::from_vec("m", vec![true, false, true]);
    let filtered = values.filter(&mask).unwrap();
    assert_eq!(filtered, Series::from_vec("f", vec![1.0, 3.0]));
}

#[test]
fn filter_treats_null_mask_entries_as_false() {
    let s = five();
    let mask = Series::from_options("m", vec![Some(true), None, Some(false), Some(true), Some(true)]);
    let filtered = s.filter(&mask).unwrap();
    assert_eq!(ints(&filtered), vec![Some(10), None, Some(14)]);
}

#[test]
fn filter_with_no_matches_keeps_type() {
    let s = five();
    let mask = Series::from_vec("m", vec![false; 5]);
    let filtered = s.filter(&mask).unwrap();
    assert_eq!(filtered.len(), 0);
    assert_eq!(filtered.dtype(), ColumnType::Int64);
}

#[test]
fn filter_rejects_bad_masks() {
    let s = five();
    let short = Series::from_vec("m", vec![true, false]);
    assert_eq!(
        s.filter(&short).unwrap_err(),
        ColumnarError::LengthMismatch {
            expected: 5,
            actual: 2
        }
    );
    let not_bool = Series::from_vec("m", vec![1i64, 0, 1, 0, 1]);
    assert_eq!(
        s.filter(&not_bool).unwrap_err(),
        ColumnarError::MaskNotBoolean(ColumnType::Int64)
    );
}

#[test]
fn take_gathers_in_index_order() {
    let s = five();
    let idx = Series::from_vec("i", vec![4i64, 0, 3]);
    let taken = s.take(&idx).unwrap();
    assert_eq!(ints(&taken), vec![Some(14), Some(10), None]);
}

#[test]
fn take_null_index_yields_null() {
    let s = five();
    let idx = Series::from_options::<i64>("i", vec![None]);
    let taken = s.take(&idx).unwrap();
    assert_eq!(taken.len(), 1);
    assert_eq!(taken.value(0).unwrap(), None);
    assert_eq!(taken.dtype(), ColumnType::Int64);
}

#[test]
fn take_checks_lengths_and_ranges() {
    let s = five();
    let too_many = Series::from_vec("i", vec![0i64; 6]);
    assert!(matches!(
        s.take(&too_many),
        Err(ColumnarError::LengthMismatch { .. })
    ));

    let out_of_range = Series::from_vec("i", vec![0i64, 5]);
    assert_eq!(
        s.take(&out_of_range).unwrap_err(),
        ColumnarError::OutOfRange { index: 5, len: 5 }
    );

    let negative = Series::from_vec("i", vec![-1i64]);
    assert_eq!(
        s.take(&negative).unwrap_err(),
        ColumnarError::OutOfRange { index: -1, len: 5 }
    );

    let wrong_type = Series::from_vec("i", vec![0.0]);
    assert!(matches!(
        s.take(&wrong_type),
        Err(ColumnarError::TypeMismatch { .. })
    ));
}

#[test]
fn take_every_strides_from_first_element() {
    let s = five();
    assert_eq!(ints(&s.take_every(2).unwrap()), vec![Some(10), Some(12), Some(14)]);
    assert_eq!(ints(&s.take_every(3).unwrap()), vec![Some(10), None]);
    let same = s.take_every(1).unwrap();
    assert_eq!(same.num_chunks(), 2);
    assert_eq!(same, s);
}

#[test]
fn any_and_all_on_booleans() {
    let mixed = Series::from_vec("b", vec![true, false, true]);
    assert!(mixed.any().unwrap());
    assert!(!mixed.all().unwrap());

    let trues = Series::from_vec("b", vec![true, true]);
    assert!(trues.all().unwrap());

    let nulls = Series::from_options::<bool>("b", vec![None, None]);
    assert!(!nulls.any().unwrap());
    assert!(!nulls.all().unwrap());

    let true_and_null = Series::from_options("b", vec![Some(true), None]);
    assert!(true_and_null.any().unwrap());
    assert!(!true_and_null.all().unwrap());
}

#[test]
fn any_and_all_reject_other_types() {
    let s = Series::from_vec("f", vec![1.0]);
    let expected = ColumnarError::TypeMismatch {
        expected: ColumnType::Boolean,
        actual: ColumnType::Float64,
    };
    assert_eq!(s.any().unwrap_err(), expected);
    assert_eq!(s.all().unwrap_err(), expected);
}

#[test]
fn operations_compose_across_chunks() {
    let s = five();
    let mask = Series::from_vec("m", vec![true, true, false, true]);
    let filtered = s.slice(1, 4).unwrap().filter(&mask).unwrap();
    assert_eq!(ints(&filtered), vec![Some(11), Some(12), Some(14)]);

    let values: Vec<Value> = filtered.iter().flatten().collect();
    assert_eq!(values, vec![Value::Int64(11), Value::Int64(12), Value::Int64(14)]);
}
