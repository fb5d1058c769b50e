//! Tolerant parsing of the *GGA* and *RMC* sentences of the *NMEA 0183*
//! protocol, merged into a snapshot of the current fix.
//!
//! ```
//! use nmea_fix::FixStateStore;
//!
//! let mut store = FixStateStore::new();
//! store.ingest("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47");
//! store.ingest("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A");
//!
//! let snapshot = store.snapshot();
//! assert_eq!(snapshot.satellites(), Some(8));
//! assert_eq!(snapshot.speed_knots(), Some(22.4));
//! ```

#[cfg(test)]
#[macro_use]
extern crate approx;
#[cfg(test)]
#[macro_use]
extern crate assert_matches;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

#[macro_use]
mod macros;
pub mod config;
pub mod coord;
pub mod err;
pub mod lexer;
pub mod parser;
pub mod reader;
pub mod store;
pub mod time;

pub use crate::config::{ChecksumMode, ParserConfig};
pub use crate::coord::parse_coordinate;
pub use crate::err::{CoordinateParseError, FieldError, FramingError, ParseError};
pub use crate::lexer::{validate, Sentence};
pub use crate::parser::{
    parse_line, parse_line_with, parse_sentence, try_parse_line, Fix, FixQuality, PositionFix,
    RmcStatus, Talker, VelocityFix,
};
pub use crate::reader::FixReader;
pub use crate::store::{FixSnapshot, FixStateStore, SharedFixStore};
pub use crate::time::format_time;
