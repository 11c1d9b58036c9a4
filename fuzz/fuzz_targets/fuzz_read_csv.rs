#![no_main]

use libfuzzer_sys::fuzz_target;
use mango_frame::{read_csv, CsvOptions};

const MAX_INPUT_BYTES: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let data = &data[..data.len().min(MAX_INPUT_BYTES)];
    let selector = data[0];

    // Vary the reader options to reach header-less, trimming and null-spelling paths.
    let options = CsvOptions {
        delimiter: if selector & 0b1 == 0 { b',' } else { b';' },
        has_header: selector & 0b10 == 0,
        infer_types: selector & 0b100 == 0,
        null_values: if selector & 0b1000 == 0 {
            Vec::new()
        } else {
            vec![String::new(), "NA".to_owned()]
        },
        trim: selector & 0b1_0000 != 0,
    };

    let Ok(frame) = read_csv(&data[1..], options) else {
        return;
    };
    let height = frame.height();
    assert!(frame.columns().iter().all(|c| c.len() == height));
    let _ = frame.to_string();
    if height > 0 {
        let _ = frame.row(height - 1).expect("last row is in range");
    }
});
