//! Feeding a line source into a [`FixStateStore`].

use std::io::{self, BufRead, Read};

use crate::store::{FixSnapshot, FixStateStore};

/// Longest chunk read as one line. NMEA allows 82 characters, anything
/// longer is split and the pieces fail framing.
pub const MAX_LINE_LENGTH: u64 = 128;

/// Reads NMEA lines from `input` and yields a snapshot after every line
/// that updated the store.
///
/// Lines that are not valid UTF-8 are decoded lossily. The only error the
/// reader reports is an I/O error of the underlying source.
#[derive(Debug)]
pub struct FixReader<R> {
    input: R,
    store: FixStateStore,
    buf: Vec<u8>,
}

impl<R: BufRead> FixReader<R> {
    /// Create a new reader with an empty store.
    pub fn new(input: R) -> Self {
        Self::with_store(input, FixStateStore::new())
    }

    pub fn with_store(input: R, store: FixStateStore) -> Self {
        FixReader {
            input,
            store,
            buf: Vec::new(),
        }
    }

    pub fn store(&self) -> &FixStateStore {
        &self.store
    }

    pub fn into_store(self) -> FixStateStore {
        self.store
    }

    /// Read lines until one of them updates the store.
    /// Returns `None` once `input` is exhausted.
    pub fn read_fix(&mut self) -> io::Result<Option<FixSnapshot>> {
        loop {
            self.buf.clear();
            let read = (&mut self.input)
                .take(MAX_LINE_LENGTH)
                .read_until(b'\n', &mut self.buf)?;
            if read == 0 {
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&self.buf);
            if self.store.ingest(&line) {
                return Ok(Some(self.store.snapshot()));
            }
        }
    }
}

impl<R: BufRead> Iterator for FixReader<R> {
    type Item = io::Result<FixSnapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        let snapshot = try_some!(self.read_fix())?;
        Some(Ok(snapshot))
    }
}
