//! Framing of raw lines into comma separated fields.

use arrayvec::ArrayVec;

use crate::config::{ChecksumMode, ParserConfig};
use crate::err::FramingError;

/// Number of fields kept per sentence. Fields past this are dropped, no
/// supported sentence reads that far.
pub const MAX_FIELDS: usize = 32;

const START_DELIMITER: char = '$';
const CHECKSUM_DELIMITER: char = '*';
const FIELD_SEPARATOR: char = ',';

/// A line that passed the framing check.
///
/// Borrows from the raw line and must not outlive it.
#[derive(Clone, Debug, PartialEq)]
pub struct Sentence<'a> {
    payload: &'a str,
    fields: ArrayVec<[&'a str; MAX_FIELDS]>,
    checksum: &'a str,
}

impl<'a> Sentence<'a> {
    /// The identifier including the start delimiter, e.g. `$GPGGA`.
    #[inline]
    pub fn identifier(&self) -> &'a str {
        // splitting always yields at least one field
        self.fields[0]
    }

    /// All fields, the identifier included at index 0.
    #[inline]
    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }

    /// The raw field at `index`, `None` if the sentence is too short.
    /// An empty field is returned as `Some("")`.
    #[inline]
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).cloned()
    }

    /// The number of fields, the identifier included.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false`, a sentence carries at least its identifier.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The checksum text after `*`, exactly as received.
    #[inline]
    pub fn checksum(&self) -> &'a str {
        self.checksum
    }

    /// Checks the received checksum against the payload.
    pub fn checksum_matches(&self) -> bool {
        verify_checksum(self.payload, self.checksum).is_ok()
    }
}

/// Trims `line` and checks that it is framed by `$` and `*`.
///
/// The text in front of `*` is split on commas. The checksum is only
/// compared with the payload if `config` asks for it.
pub fn validate<'a>(line: &'a str, config: &ParserConfig) -> Result<Sentence<'a>, FramingError> {
    let line = line.trim();
    if !line.starts_with(START_DELIMITER) {
        return Err(FramingError::MissingStart);
    }

    let mut parts = line.split(CHECKSUM_DELIMITER);
    let payload = parts.next().unwrap_or_default();
    let checksum = parts
        .next()
        .ok_or(FramingError::MissingChecksumDelimiter)?;
    if parts.next().is_some() {
        return Err(FramingError::MultipleChecksumDelimiters);
    }

    let mut fields = ArrayVec::<[&str; MAX_FIELDS]>::new();
    fields.extend(payload.split(FIELD_SEPARATOR).take(MAX_FIELDS));

    if config.checksum == ChecksumMode::Verify {
        verify_checksum(payload, checksum)?;
    }

    Ok(Sentence {
        payload,
        fields,
        checksum,
    })
}

/// XOR of every byte between `$` and `*`.
pub fn compute_checksum(payload: &str) -> u8 {
    payload
        .trim_start_matches(START_DELIMITER)
        .bytes()
        .fold(0, |acc, b| acc ^ b)
}

fn verify_checksum(payload: &str, checksum: &str) -> Result<(), FramingError> {
    let expected = compute_checksum(payload);
    let invalid = || FramingError::InvalidChecksum(expected, checksum.to_owned());

    if checksum.len() != 2 || !checksum.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    match u8::from_str_radix(checksum, 16) {
        Ok(actual) if actual == expected => Ok(()),
        _ => Err(invalid()),
    }
}
