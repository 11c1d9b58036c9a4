#![no_main]

use libfuzzer_sys::fuzz_target;
use mango_columnar::{Series, Value};

/// Bound the batch so a single input cannot drive very large allocations.
const MAX_INPUT_BYTES: usize = 64 * 1024;
const MAX_VALUES: usize = 4_096;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let data = &data[..data.len().min(MAX_INPUT_BYTES)];
    let selector = data[0];

    // One value per line; a line reading `null` is a null.
    let input = String::from_utf8_lossy(&data[1..]);
    let values: Vec<Value> = input
        .split('\n')
        .take(MAX_VALUES)
        .map(|field| match field {
            "null" => Value::Null,
            other => Value::from(other),
        })
        .collect();

    let infer_types = selector & 0b1 == 0;
    let Ok(mut series) = Series::from_values("fuzz", &values, None, infer_types) else {
        return;
    };
    assert_eq!(series.len(), values.len());

    let len = series.len();
    let offset = i64::from(selector >> 4) - 8;
    let length = usize::from(selector & 0b1110).min(len);
    if let Ok(sliced) = series.slice(offset, length) {
        assert_eq!(sliced.len(), length);
    }

    let mask: Vec<bool> = (0..len).map(|i| (i + usize::from(selector)) % 3 != 0).collect();
    let kept = mask.iter().filter(|m| **m).count();
    let filtered = series
        .filter(&Series::from_vec("mask", mask))
        .expect("mask has the series length");
    assert_eq!(filtered.len(), kept);
    assert_eq!(filtered.dtype(), series.dtype());

    let step = usize::from(selector % 5) + 1;
    let every = series.take_every(step).expect("step is at least 1");
    assert_eq!(every.len(), len.div_ceil(step));

    let before: Vec<Option<Value>> = series.iter().collect();
    series.rechunk();
    assert_eq!(series.iter().collect::<Vec<_>>(), before);
});
