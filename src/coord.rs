//! Conversion of `(d)ddmm.mmmm` coordinates into signed decimal degrees.

use std::str::FromStr;

use crate::err::CoordinateParseError;

const LAT_SPLIT: usize = 2;
const LONG_SPLIT: usize = 3;

/// The cardinal directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardDir {
    North,
    South,
    East,
    West,
}

impl CardDir {
    pub fn from_letter(letter: &str) -> Result<Self, CoordinateParseError> {
        match letter {
            "N" => Ok(CardDir::North),
            "S" => Ok(CardDir::South),
            "E" => Ok(CardDir::East),
            "W" => Ok(CardDir::West),
            "" => Err(CoordinateParseError::Empty),
            other => Err(CoordinateParseError::InvalidHemisphere(other.to_owned())),
        }
    }

    /// Number of leading digits that make up the degrees.
    #[inline]
    fn deg_split(self) -> usize {
        match self {
            CardDir::North | CardDir::South => LAT_SPLIT,
            CardDir::East | CardDir::West => LONG_SPLIT,
        }
    }

    #[inline]
    fn get_sign(self) -> f64 {
        match self {
            CardDir::North | CardDir::East => 1.0,
            CardDir::South | CardDir::West => -1.0,
        }
    }
}

/// Converts `coord` and its hemisphere letter into decimal degrees.
///
/// Returns `None` if either is absent or the conversion fails. Values
/// outside of the valid latitude or longitude range are passed through.
pub fn parse_coordinate(coord: Option<&str>, hemisphere: Option<&str>) -> Option<f64> {
    match try_parse_coordinate(coord.unwrap_or(""), hemisphere.unwrap_or("")) {
        Ok(deg) => Some(deg),
        Err(e) => {
            trace!("Discarding coordinate {:?}/{:?}: {}", coord, hemisphere, e);
            None
        }
    }
}

/// Like [`parse_coordinate`] but reports why the conversion failed.
pub fn try_parse_coordinate(coord: &str, hemisphere: &str) -> Result<f64, CoordinateParseError> {
    if coord.is_empty() {
        return Err(CoordinateParseError::Empty);
    }
    let dir = CardDir::from_letter(hemisphere)?;

    let deg_split = dir.deg_split();
    // This check is needed to ensure we don't panic
    if deg_split > coord.len() || !coord.is_char_boundary(deg_split) {
        return Err(CoordinateParseError::TooShort(coord.len(), deg_split));
    }

    let (deg, min) = coord.split_at(deg_split);
    if !deg.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoordinateParseError::NonNumericDegrees);
    }
    let degrees = f64::from(u16::from_str(deg)?);
    let minutes = f64::from_str(min)?;
    if !minutes.is_finite() {
        return Err(CoordinateParseError::NonFinite);
    }

    Ok((degrees + minutes / 60.0) * dir.get_sign())
}
