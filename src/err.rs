use std::num;

quick_error! {
    /// Every way a sentence can fail at the sentence level.
    ///
    /// Neither variant is ever fatal to a reading session: the line is
    /// discarded and the store is left untouched.
    #[derive(Debug, PartialEq)]
    pub enum ParseError {
        Framing(err: FramingError) {
            from()
            description("Framing error")
            display("Could not parse due to a framing error: {}", err)
            cause(err)
        }
        UnsupportedSentence(identifier: String) {
            description("Unsupported sentence")
            display("Sentence \"{}\" is not supported", identifier)
        }
    }
}

quick_error! {
    #[derive(Debug, PartialEq)]
    pub enum FramingError {
        MissingStart {
            description("Missing start delimiter")
            display("Sentence does not start with \"$\"")
        }
        MissingChecksumDelimiter {
            description("Missing checksum delimiter")
            display("Sentence does not contain \"*\"")
        }
        MultipleChecksumDelimiters {
            description("Multiple checksum delimiters")
            display("Sentence contains more than one \"*\"")
        }
        InvalidChecksum(expected: u8, actual: String) {
            description("Invalid checksum")
            display("Expected checksum \"{:02X}\", found checksum \"{}\"", expected, actual)
        }
    }
}

quick_error! {
    /// Failure to read a single field. Only ever costs that one field.
    #[derive(Debug, PartialEq)]
    pub enum FieldError {
        Missing(index: usize) {
            description("Missing field")
            display("Field {} is absent or empty", index)
        }
        Int(index: usize, err: num::ParseIntError) {
            description("Integer field error")
            display("Field {} is not an integer: {}", index, err)
            cause(err)
        }
        Float(index: usize, err: num::ParseFloatError) {
            description("Float field error")
            display("Field {} is not a number: {}", index, err)
            cause(err)
        }
    }
}

quick_error! {
    #[derive(Debug, PartialEq)]
    pub enum CoordinateParseError {
        Empty {
            description("Empty coordinate")
            display("Coordinate value or hemisphere is empty")
        }
        InvalidHemisphere(hemisphere: String) {
            description("Invalid hemisphere")
            display("Invalid hemisphere \"{}\"", hemisphere)
        }
        TooShort(len: usize, required: usize) {
            description("Coordinate too short")
            display("Coordinate has {} characters, at least {} are required", len, required)
        }
        Degrees(err: num::ParseIntError) {
            from()
            description("Invalid degrees")
            display("{}", err)
            cause(err)
        }
        NonNumericDegrees {
            description("Non-numeric degrees")
            display("Degrees must consist of ASCII digits")
        }
        Minutes(err: num::ParseFloatError) {
            from()
            description("Invalid minutes")
            display("{}", err)
            cause(err)
        }
        NonFinite {
            description("Non-finite minutes")
            display("Minutes are not a finite number")
        }
    }
}
