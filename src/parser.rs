//! This module turns the *GGA* and *RMC* sentences of the *NMEA 0183*
//! protocol into typed fix records.
//!
//! Parsing is tolerant: a field that is missing or malformed becomes `None`
//! without affecting its siblings.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};

use crate::config::ParserConfig;
use crate::coord::parse_coordinate;
use crate::err::{FieldError, ParseError};
use crate::lexer::{self, Sentence};
use crate::time;

const TALKER_LENGTH: usize = 2;

const GGA_TIME: usize = 1;
const GGA_LAT: usize = 2;
const GGA_LONG: usize = 4;
const GGA_QUALITY: usize = 6;
const GGA_SATELLITES: usize = 7;
const GGA_ALTITUDE: usize = 9;
const GGA_ALTITUDE_UNIT: usize = 10;

const RMC_TIME: usize = 1;
const RMC_STATUS: usize = 2;
const RMC_LAT: usize = 3;
const RMC_LONG: usize = 5;
const RMC_SPEED: usize = 7;
const RMC_COURSE: usize = 8;
const RMC_DATE: usize = 9;

const KNOTS_TO_KMH: f64 = 1.852;
const KNOTS_TO_MPH: f64 = 1.15078;

/// The source of a sentence, taken from the first two letters of its
/// identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Talker {
    /// `GP`, a GPS-only receiver.
    Gps,
    /// `GN`, a multi-constellation receiver.
    Gnss,
}

impl Talker {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "GP" => Some(Talker::Gps),
            "GN" => Some(Talker::Gnss),
            _ => None,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Talker::Gps => "GP",
            Talker::Gnss => "GN",
        }
    }
}

/// Indicator of the quality of gps data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FixQuality {
    NoFix,
    GpsFix,
    DgpsFix,
    PpsFix,
    RtkFix,
    FloatRtk,
    Estimated,
    /// Any other code, kept as received.
    Unknown(i64),
}

impl FixQuality {
    /// Maps `0..=6` to the known indicators, everything else to `Unknown`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => FixQuality::NoFix,
            1 => FixQuality::GpsFix,
            2 => FixQuality::DgpsFix,
            3 => FixQuality::PpsFix,
            4 => FixQuality::RtkFix,
            5 => FixQuality::FloatRtk,
            6 => FixQuality::Estimated,
            other => FixQuality::Unknown(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            FixQuality::NoFix => 0,
            FixQuality::GpsFix => 1,
            FixQuality::DgpsFix => 2,
            FixQuality::PpsFix => 3,
            FixQuality::RtkFix => 4,
            FixQuality::FloatRtk => 5,
            FixQuality::Estimated => 6,
            FixQuality::Unknown(code) => code,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FixQuality::NoFix => "No Fix",
            FixQuality::GpsFix => "GPS Fix",
            FixQuality::DgpsFix => "DGPS Fix",
            FixQuality::PpsFix => "PPS Fix",
            FixQuality::RtkFix => "RTK Fix",
            FixQuality::FloatRtk => "Float RTK",
            FixQuality::Estimated => "Estimated",
            FixQuality::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for FixQuality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.code())
    }
}

/// The status letter of an RMC sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RmcStatus {
    /// `A`
    Active,
    /// `V`, or anything that is not `A`.
    Void,
}

impl RmcStatus {
    fn from_field(field: Option<&str>) -> Self {
        match field {
            Some("A") => RmcStatus::Active,
            _ => RmcStatus::Void,
        }
    }

    #[inline]
    pub fn is_active(self) -> bool {
        self == RmcStatus::Active
    }
}

/// This represents a GGA sentence and is created by [`parse_sentence`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PositionFix {
    pub talker: Talker,
    /// Universal Time Coordinated as received, `hhmmss[.sss]`.
    pub time: Option<String>,
    /// Latitude in decimal degrees, negative in the southern hemisphere.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees, negative in the western hemisphere.
    pub longitude: Option<f64>,
    /// `NoFix` when the field is empty or missing, `None` if it is garbage.
    pub fix_quality: Option<FixQuality>,
    /// Number of satellites in use. `0` when the field is empty or missing.
    pub satellites: Option<u32>,
    /// Antenna altitude above/below mean-sea-level (geoid)
    pub altitude: Option<f64>,
    /// Unit of `altitude`, normally `M`.
    pub altitude_unit: Option<String>,
}

impl PositionFix {
    pub fn utc_time(&self) -> Option<NaiveTime> {
        self.time.as_ref().and_then(|t| time::parse_utc(t))
    }
}

/// This represents an RMC sentence and is created by [`parse_sentence`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VelocityFix {
    pub talker: Talker,
    /// Universal Time Coordinated as received, `hhmmss[.sss]`.
    pub time: Option<String>,
    pub status: RmcStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Speed over ground in knots.
    pub speed_knots: Option<f64>,
    /// Course over ground in degrees.
    pub course: Option<f64>,
    /// Date as received, `ddmmyy`.
    pub date: Option<String>,
}

impl VelocityFix {
    pub fn speed_kmh(&self) -> Option<f64> {
        self.speed_knots.map(|knots| knots * KNOTS_TO_KMH)
    }

    pub fn speed_mph(&self) -> Option<f64> {
        self.speed_knots.map(|knots| knots * KNOTS_TO_MPH)
    }

    pub fn utc_time(&self) -> Option<NaiveTime> {
        self.time.as_ref().and_then(|t| time::parse_utc(t))
    }

    pub fn utc_date(&self) -> Option<NaiveDate> {
        self.date.as_ref().and_then(|d| time::parse_date(d))
    }
}

/// A record from one of the two supported sentence families.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Fix {
    Position(PositionFix),
    Velocity(VelocityFix),
}

impl From<PositionFix> for Fix {
    fn from(fix: PositionFix) -> Self {
        Fix::Position(fix)
    }
}

impl From<VelocityFix> for Fix {
    fn from(fix: VelocityFix) -> Self {
        Fix::Velocity(fix)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SentenceType {
    Gga,
    Rmc,
}

/// Splits an identifier like `$GNRMC` into talker and sentence type.
fn identify(identifier: &str) -> Result<(Talker, SentenceType), ParseError> {
    let unsupported = || ParseError::UnsupportedSentence(identifier.to_owned());

    let name = match identifier.strip_prefix('$') {
        Some(name) => name,
        None => return Err(unsupported()),
    };
    let (prefix, suffix) = match (name.get(..TALKER_LENGTH), name.get(TALKER_LENGTH..)) {
        (Some(p), Some(s)) => (p, s),
        _ => return Err(unsupported()),
    };
    let talker = Talker::from_prefix(prefix).ok_or_else(unsupported)?;
    let sen_type = match suffix {
        "GGA" => SentenceType::Gga,
        "RMC" => SentenceType::Rmc,
        _ => return Err(unsupported()),
    };
    Ok((talker, sen_type))
}

/// Parse a line with the default configuration. Framing errors and
/// unsupported sentences yield `None`.
pub fn parse_line(line: &str) -> Option<Fix> {
    parse_line_with(line, &ParserConfig::default())
}

/// Parse a line, discarding it with a debug trace if it is not usable.
pub fn parse_line_with(line: &str, config: &ParserConfig) -> Option<Fix> {
    match try_parse_line(line, config) {
        Ok(fix) => Some(fix),
        Err(e) => {
            debug!("Discarding line {:?}: {}", line.trim(), e);
            None
        }
    }
}

/// Parse a line and report why it was discarded.
pub fn try_parse_line(line: &str, config: &ParserConfig) -> Result<Fix, ParseError> {
    let sentence = lexer::validate(line, config)?;
    parse_sentence(&sentence)
}

/// Dispatch a framed sentence by its identifier.
/// Returns `ParseError::UnsupportedSentence` for anything but GGA and RMC
/// from a `GP` or `GN` talker.
pub fn parse_sentence(sentence: &Sentence) -> Result<Fix, ParseError> {
    let (talker, sen_type) = identify(sentence.identifier())?;
    Ok(match sen_type {
        SentenceType::Gga => Fix::Position(parse_gga(sentence, talker)),
        SentenceType::Rmc => Fix::Velocity(parse_rmc(sentence, talker)),
    })
}

fn parse_gga(sentence: &Sentence, talker: Talker) -> PositionFix {
    let fix_quality = ok_or_trace!(
        int_or_zero::<i64>(sentence, GGA_QUALITY),
        "GGA fix quality"
    )
    .map(FixQuality::from_code);

    PositionFix {
        talker,
        time: string_field(sentence, GGA_TIME),
        latitude: coordinate(sentence, GGA_LAT),
        longitude: coordinate(sentence, GGA_LONG),
        fix_quality,
        satellites: ok_or_trace!(
            int_or_zero(sentence, GGA_SATELLITES),
            "GGA satellite count"
        ),
        altitude: ok_or_trace!(float_field(sentence, GGA_ALTITUDE), "GGA altitude"),
        altitude_unit: string_field(sentence, GGA_ALTITUDE_UNIT),
    }
}

fn parse_rmc(sentence: &Sentence, talker: Talker) -> VelocityFix {
    VelocityFix {
        talker,
        time: string_field(sentence, RMC_TIME),
        status: RmcStatus::from_field(sentence.field(RMC_STATUS)),
        latitude: coordinate(sentence, RMC_LAT),
        longitude: coordinate(sentence, RMC_LONG),
        speed_knots: ok_or_trace!(float_field(sentence, RMC_SPEED), "RMC speed"),
        course: ok_or_trace!(float_field(sentence, RMC_COURSE), "RMC course"),
        date: string_field(sentence, RMC_DATE),
    }
}

/// The field at `index`, `FieldError::Missing` if it is absent or empty.
#[inline]
fn text_field<'a>(sentence: &Sentence<'a>, index: usize) -> Result<&'a str, FieldError> {
    match sentence.field(index) {
        Some(f) if !f.is_empty() => Ok(f),
        _ => Err(FieldError::Missing(index)),
    }
}

#[inline]
fn string_field(sentence: &Sentence, index: usize) -> Option<String> {
    text_field(sentence, index).ok().map(str::to_owned)
}

#[inline]
fn float_field(sentence: &Sentence, index: usize) -> Result<f64, FieldError> {
    let field = text_field(sentence, index)?;
    f64::from_str(field).map_err(|e| FieldError::Float(index, e))
}

/// Integers that count something default to zero when not reported.
fn int_or_zero<T>(sentence: &Sentence, index: usize) -> Result<T, FieldError>
where
    T: FromStr<Err = ParseIntError> + Default,
{
    match text_field(sentence, index) {
        Ok(field) => T::from_str(field).map_err(|e| FieldError::Int(index, e)),
        Err(FieldError::Missing(_)) => Ok(T::default()),
        Err(e) => Err(e),
    }
}

/// The coordinate at `index`, paired with its hemisphere at `index + 1`.
/// Both have to be present for a conversion to be attempted.
fn coordinate(sentence: &Sentence, index: usize) -> Option<f64> {
    let hemisphere = index + 1;
    if sentence.len() <= hemisphere {
        trace!(
            "Discarding coordinate at {}: sentence has only {} fields",
            index,
            sentence.len()
        );
        return None;
    }
    parse_coordinate(sentence.field(index), sentence.field(hemisphere))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::err::FramingError;

    const GGA: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
    const RMC: &str = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";

    fn position(line: &str) -> PositionFix {
        match parse_line(line) {
            Some(Fix::Position(fix)) => fix,
            other => panic!("expected a position fix, got {:?}", other),
        }
    }

    fn velocity(line: &str) -> VelocityFix {
        match parse_line(line) {
            Some(Fix::Velocity(fix)) => fix,
            other => panic!("expected a velocity fix, got {:?}", other),
        }
    }

    #[test]
    fn parses_gga() {
        let fix = position(GGA);
        assert_eq!(fix.talker, Talker::Gps);
        assert_eq!(fix.time.as_ref().map(String::as_str), Some("123519"));
        assert_abs_diff_eq!(fix.latitude.unwrap(), 48.1173, epsilon = 1e-4);
        assert_abs_diff_eq!(fix.longitude.unwrap(), 11.51667, epsilon = 1e-4);
        assert_eq!(fix.fix_quality, Some(FixQuality::GpsFix));
        assert_eq!(fix.satellites, Some(8));
        assert_eq!(fix.altitude, Some(545.4));
        assert_eq!(fix.altitude_unit.as_ref().map(String::as_str), Some("M"));
        assert_eq!(fix.utc_time(), Some(NaiveTime::from_hms(12, 35, 19)));
    }

    #[test]
    fn parses_gnss_talker_in_southern_and_western_hemisphere() {
        let fix = position("$GNGGA,123600,3345.120,S,07030.500,W,2,11,0.8,12.0,M,46.9,M,,*65");
        assert_eq!(fix.talker, Talker::Gnss);
        assert_abs_diff_eq!(fix.latitude.unwrap(), -33.752, epsilon = 1e-6);
        assert_abs_diff_eq!(fix.longitude.unwrap(), -70.508333, epsilon = 1e-6);
        assert_eq!(fix.fix_quality, Some(FixQuality::DgpsFix));
        assert_eq!(fix.satellites, Some(11));
    }

    #[test]
    fn short_gga_keeps_what_is_there() {
        let fix = position("$GPGGA,123519,4807.038*00");
        assert_eq!(fix.time.as_ref().map(String::as_str), Some("123519"));
        assert_eq!(fix.latitude, None);
        assert_eq!(fix.longitude, None);
        assert_eq!(fix.fix_quality, Some(FixQuality::NoFix));
        assert_eq!(fix.satellites, Some(0));
        assert_eq!(fix.altitude, None);
        assert_eq!(fix.altitude_unit, None);
    }

    #[test]
    fn latitude_survives_missing_longitude_hemisphere() {
        let fix = position("$GPGGA,123519,4807.038,N,01131.000*00");
        assert!(fix.latitude.is_some());
        assert_eq!(fix.longitude, None);
    }

    #[test]
    fn empty_gga_fields_become_defaults() {
        let fix = position("$GPGGA,,,,,,,,,,,,,,*56");
        assert_eq!(fix.time, None);
        assert_eq!(fix.latitude, None);
        assert_eq!(fix.longitude, None);
        assert_eq!(fix.fix_quality, Some(FixQuality::NoFix));
        assert_eq!(fix.satellites, Some(0));
        assert_eq!(fix.altitude, None);
    }

    #[test]
    fn garbage_in_one_field_spares_its_siblings() {
        let fix = position("$GPGGA,123519,4807.038,N,01131.000,E,x,08,0.9,5a5.4,M,46.9,M,,*00");
        assert_eq!(fix.fix_quality, None);
        assert_eq!(fix.satellites, Some(8));
        assert_eq!(fix.altitude, None);
        assert_eq!(fix.altitude_unit.as_ref().map(String::as_str), Some("M"));
        assert!(fix.latitude.is_some());

        let fix = position("$GPGGA,123519,4807.038,N,01131.000,E,1,-3,0.9,545.4,M,46.9,M,,*00");
        assert_eq!(fix.satellites, None);
        assert_eq!(fix.fix_quality, Some(FixQuality::GpsFix));
    }

    #[test]
    fn keeps_unknown_fix_quality_code() {
        let fix = position("$GPGGA,123519,4807.038,N,01131.000,E,9,08,0.9,545.4,M,46.9,M,,*00");
        let quality = fix.fix_quality.unwrap();
        assert_eq!(quality, FixQuality::Unknown(9));
        assert_eq!(quality.code(), 9);
        assert_eq!(quality.label(), "Unknown");
        assert_eq!(FixQuality::from_code(4).to_string(), "RTK Fix (4)");
    }

    #[test]
    fn parses_rmc() {
        let fix = velocity(RMC);
        assert_eq!(fix.talker, Talker::Gps);
        assert_eq!(fix.status, RmcStatus::Active);
        assert_abs_diff_eq!(fix.latitude.unwrap(), 48.1173, epsilon = 1e-4);
        assert_abs_diff_eq!(fix.longitude.unwrap(), 11.51667, epsilon = 1e-4);
        assert_eq!(fix.speed_knots, Some(22.4));
        assert_eq!(fix.course, Some(84.4));
        assert_eq!(fix.date.as_ref().map(String::as_str), Some("230394"));
        assert_eq!(fix.utc_date(), Some(NaiveDate::from_ymd(1994, 3, 23)));
        assert_abs_diff_eq!(fix.speed_kmh().unwrap(), 41.4848, epsilon = 1e-4);
        assert_abs_diff_eq!(fix.speed_mph().unwrap(), 25.777472, epsilon = 1e-6);
    }

    #[test]
    fn empty_rmc_speed_leaves_course() {
        let fix = velocity("$GPRMC,123520,A,4807.038,N,01131.000,E,,084.4,230394,003.1,W*4A");
        assert_eq!(fix.speed_knots, None);
        assert_eq!(fix.speed_kmh(), None);
        assert_eq!(fix.course, Some(84.4));
        assert!(fix.latitude.is_some());
        assert_eq!(fix.date.as_ref().map(String::as_str), Some("230394"));
    }

    #[test]
    fn rmc_without_status_is_void() {
        let fix = velocity("$GNRMC,123519*00");
        assert_eq!(fix.talker, Talker::Gnss);
        assert_eq!(fix.status, RmcStatus::Void);
        assert!(!fix.status.is_active());
        assert_eq!(fix.latitude, None);
        assert_eq!(fix.speed_knots, None);
        assert_eq!(fix.date, None);

        assert_eq!(velocity("$GPRMC,123519,V*00").status, RmcStatus::Void);
    }

    #[test]
    fn ignores_other_sentences() {
        let gsv = "$GPGSV,2,1,08,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*75";
        assert_eq!(parse_line(gsv), None);
        assert_matches!(
            try_parse_line(gsv, &ParserConfig::default()),
            Err(ParseError::UnsupportedSentence(ref id)) if id == "$GPGSV"
        );
        assert_eq!(parse_line("$GLGGA,123519,4807.038,N*00"), None);
        assert_eq!(parse_line("$GGA,123519*00"), None);
        assert_eq!(parse_line("$*00"), None);
    }

    #[test]
    fn parses_gga_with_trailing_padding() {
        let line = format!(
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,{}*47",
            ",".repeat(20)
        );
        let fix = position(&line);
        assert_eq!(fix.satellites, Some(8));
        assert_eq!(fix.altitude, Some(545.4));
        assert!(fix.longitude.is_some());
    }

    #[test]
    fn rejects_doubled_start_delimiter() {
        assert_eq!(
            parse_line("$$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47"),
            None
        );
        assert_matches!(
            try_parse_line("$$GPRMC,123519,A*00", &ParserConfig::default()),
            Err(ParseError::UnsupportedSentence(ref id)) if id == "$$GPRMC"
        );
    }

    #[test]
    fn reports_framing_errors() {
        assert_eq!(parse_line("$GPGGA,123519,4807.038,N"), None);
        assert_matches!(
            try_parse_line("GPGGA,123519*47", &ParserConfig::default()),
            Err(ParseError::Framing(FramingError::MissingStart))
        );
    }

    #[test]
    fn verifying_config_rejects_bad_checksum() {
        let config = ParserConfig::verifying();
        assert!(parse_line_with(GGA, &config).is_some());
        assert!(parse_line_with(RMC, &config).is_some());
        assert_eq!(
            parse_line_with("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*00", &config),
            None
        );
    }
}
