#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate nmea_fix;

use std::io::Cursor;
use nmea_fix::FixReader;

fuzz_target!(|data: &[u8]| {
    let reader = FixReader::new(Cursor::new(data));

    for _ in reader {
        ();
    }
});
