//! The most recent fix of each sentence family, combined into one view.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::ParserConfig;
use crate::parser::{self, Fix, FixQuality, PositionFix, RmcStatus, VelocityFix};
use crate::time::{format_time, NOT_AVAILABLE};

const RULE_WIDTH: usize = 60;
const DEFAULT_ALTITUDE_UNIT: &str = "M";

/// A copy of the store's slots at one point in time.
///
/// Position-type values prefer the GGA record and fall back to the RMC
/// record when no GGA has been received yet.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FixSnapshot {
    pub position: Option<PositionFix>,
    pub velocity: Option<VelocityFix>,
}

impl FixSnapshot {
    /// `true` until the first supported sentence has been stored.
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.velocity.is_none()
    }

    pub fn latitude(&self) -> Option<f64> {
        match (&self.position, &self.velocity) {
            (Some(p), _) => p.latitude,
            (None, Some(v)) => v.latitude,
            (None, None) => None,
        }
    }

    pub fn longitude(&self) -> Option<f64> {
        match (&self.position, &self.velocity) {
            (Some(p), _) => p.longitude,
            (None, Some(v)) => v.longitude,
            (None, None) => None,
        }
    }

    /// Time of day as received, `hhmmss[.sss]`.
    pub fn time(&self) -> Option<&str> {
        match (&self.position, &self.velocity) {
            (Some(p), _) => p.time.as_ref().map(String::as_str),
            (None, Some(v)) => v.time.as_ref().map(String::as_str),
            (None, None) => None,
        }
    }

    pub fn fix_quality(&self) -> Option<FixQuality> {
        self.position.as_ref().and_then(|p| p.fix_quality)
    }

    pub fn satellites(&self) -> Option<u32> {
        self.position.as_ref().and_then(|p| p.satellites)
    }

    pub fn altitude(&self) -> Option<f64> {
        self.position.as_ref().and_then(|p| p.altitude)
    }

    pub fn altitude_unit(&self) -> Option<&str> {
        self.position
            .as_ref()
            .and_then(|p| p.altitude_unit.as_ref())
            .map(String::as_str)
    }

    pub fn speed_knots(&self) -> Option<f64> {
        self.velocity.as_ref().and_then(|v| v.speed_knots)
    }

    pub fn course(&self) -> Option<f64> {
        self.velocity.as_ref().and_then(|v| v.course)
    }

    /// Date as received, `ddmmyy`.
    pub fn date(&self) -> Option<&str> {
        self.velocity
            .as_ref()
            .and_then(|v| v.date.as_ref())
            .map(String::as_str)
    }

    pub fn status(&self) -> Option<RmcStatus> {
        self.velocity.as_ref().map(|v| v.status)
    }

    fn fmt_coordinates(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.latitude(), self.longitude()) {
            (Some(lat), Some(long)) => {
                writeln!(f, "Latitude:    {:.6}°", lat)?;
                writeln!(f, "Longitude:   {:.6}°", long)
            }
            _ => {
                writeln!(f, "Latitude:    {}", NOT_AVAILABLE)?;
                writeln!(f, "Longitude:   {}", NOT_AVAILABLE)
            }
        }
    }
}

impl fmt::Display for FixSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rule = "-".repeat(RULE_WIDTH);

        writeln!(f, "POSITION DATA")?;
        writeln!(f, "{}", rule)?;
        match (&self.position, &self.velocity) {
            (Some(p), _) => {
                writeln!(f, "GPS Time:    {}", format_time(self.time()))?;
                self.fmt_coordinates(f)?;
                match p.fix_quality {
                    Some(q) => writeln!(f, "Fix Quality: {}", q)?,
                    None => writeln!(f, "Fix Quality: {}", NOT_AVAILABLE)?,
                }
                match p.satellites {
                    Some(n) => writeln!(f, "Satellites:  {}", n)?,
                    None => writeln!(f, "Satellites:  {}", NOT_AVAILABLE)?,
                }
                match p.altitude {
                    Some(alt) => writeln!(
                        f,
                        "Altitude:    {:.1} {}",
                        alt,
                        self.altitude_unit().unwrap_or(DEFAULT_ALTITUDE_UNIT)
                    )?,
                    None => writeln!(f, "Altitude:    {}", NOT_AVAILABLE)?,
                }
            }
            (None, Some(v)) => {
                writeln!(f, "GPS Time:    {}", format_time(self.time()))?;
                self.fmt_coordinates(f)?;
                let status = if v.status.is_active() {
                    "Active"
                } else {
                    "Void/Invalid"
                };
                writeln!(f, "Status:      {}", status)?;
            }
            (None, None) => writeln!(f, "Waiting for GPS data...")?,
        }

        if let Some(ref v) = self.velocity {
            writeln!(f)?;
            writeln!(f, "MOVEMENT DATA")?;
            writeln!(f, "{}", rule)?;
            match (v.speed_knots, v.speed_kmh(), v.speed_mph()) {
                (Some(knots), Some(kmh), Some(mph)) => writeln!(
                    f,
                    "Speed:       {:.2} knots ({:.2} km/h, {:.2} mph)",
                    knots, kmh, mph
                )?,
                _ => writeln!(f, "Speed:       {}", NOT_AVAILABLE)?,
            }
            match v.course {
                Some(course) => writeln!(f, "Course:      {:.1}°", course)?,
                None => writeln!(f, "Course:      {}", NOT_AVAILABLE)?,
            }
        }
        Ok(())
    }
}

/// Holds the latest [`PositionFix`] and the latest [`VelocityFix`].
///
/// Each update replaces the slot of its family wholesale, fields that are
/// `None` in the new record included. The other slot is never touched.
#[derive(Debug, Default)]
pub struct FixStateStore {
    config: ParserConfig,
    position: Option<PositionFix>,
    velocity: Option<VelocityFix>,
}

impl FixStateStore {
    /// Create an empty store that parses with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        FixStateStore {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Move `fix` into the slot of its family.
    pub fn update(&mut self, fix: Fix) {
        match fix {
            Fix::Position(p) => {
                trace!("Updating position slot: {:?}", p);
                self.position = Some(p);
            }
            Fix::Velocity(v) => {
                trace!("Updating velocity slot: {:?}", v);
                self.velocity = Some(v);
            }
        }
    }

    /// Parse `line` and store the result.
    /// Returns `false` if the line was discarded and nothing changed.
    pub fn ingest(&mut self, line: &str) -> bool {
        match parser::parse_line_with(line, &self.config) {
            Some(fix) => {
                self.update(fix);
                true
            }
            None => false,
        }
    }

    /// A copy of both slots. Later changes to the copy do not affect the store.
    pub fn snapshot(&self) -> FixSnapshot {
        FixSnapshot {
            position: self.position.clone(),
            velocity: self.velocity.clone(),
        }
    }

    pub fn position(&self) -> Option<&PositionFix> {
        self.position.as_ref()
    }

    pub fn velocity(&self) -> Option<&VelocityFix> {
        self.velocity.as_ref()
    }
}

/// A [`FixStateStore`] that can be shared between a producer and readers
/// on different threads. Every update and snapshot holds the lock for its
/// whole duration, so readers never see a half-written slot.
#[derive(Clone, Debug, Default)]
pub struct SharedFixStore {
    inner: Arc<Mutex<FixStateStore>>,
}

impl SharedFixStore {
    pub fn new(store: FixStateStore) -> Self {
        SharedFixStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn update(&self, fix: Fix) {
        self.lock().update(fix)
    }

    pub fn ingest(&self, line: &str) -> bool {
        self.lock().ingest(line)
    }

    pub fn snapshot(&self) -> FixSnapshot {
        self.lock().snapshot()
    }

    // A slot is replaced in one assignment, so a poisoned lock still
    // guards consistent state.
    fn lock(&self) -> std::sync::MutexGuard<FixStateStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
