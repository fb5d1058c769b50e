//! Knobs that change how strictly sentences are accepted.

/// Whether the checksum after `*` is checked against the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChecksumMode {
    /// The checksum is split off and kept, but never compared.
    Ignore,
    /// The XOR of all payload bytes has to match the hex checksum.
    Verify,
}

impl Default for ChecksumMode {
    fn default() -> Self {
        ChecksumMode::Ignore
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParserConfig {
    pub checksum: ChecksumMode,
}

impl ParserConfig {
    /// A config that rejects sentences with a wrong checksum.
    pub fn verifying() -> Self {
        ParserConfig {
            checksum: ChecksumMode::Verify,
        }
    }
}
