//! The upstream AIS decoder's view of a message: a numeric message type, the
//! vessel's MMSI, and an ordered list of typed properties. Only the keys the
//! position report needs are modelled.
//!
//! A key that is missing from the list means "not available", and so does a
//! value equal to the decoder's own unknown marker (an AIS receiver reports
//! e.g. 360° for an unknown course). Both must end up as the protocol's
//! sentinel bit patterns on the bus, never as zero.

/// Longitude reported when the decoder has no fix (181°).
pub const LON_UNDEFINED: f64 = 181.0;

/// Latitude reported when the decoder has no fix (91°).
pub const LAT_UNDEFINED: f64 = 91.0;

/// Course over ground reported when unknown (360°).
pub const COG_UNDEFINED: f64 = 360.0;

/// Speed over ground reported when unknown (102.3 knots).
pub const SPEED_UNDEFINED: f64 = 102.3;

/// True heading reported when unknown (511°).
pub const HEADING_UNDEFINED: i32 = 511;

/// What the core needs to know about one decoded AIS message. The caller
/// owns the message; nothing is retained across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AisMessage {
    /// AIS message type, 1-27. Types 1-3 are class A position reports.
    pub message_type: u8,
    /// Mobile station identity of the sending vessel.
    pub mmsi: u32,
}

/// Keys the upstream decoder may attach to a position report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PropertyKey {
    Latitude,
    Longitude,
    Status,
    RateOfTurn,
    Heading,
    Second,
    Raim,
    Accuracy,
    Course,
    Speed,
}

/// A decoded property value, tagged with its type.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PropertyValue {
    Float(f64),
    Int(i32),
    Bool(bool),
}

impl PropertyValue {
    #[inline]
    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(value),
            Self::Int(value) => Some(value as f64),
            Self::Bool(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i32(self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Property {
    pub key: PropertyKey,
    pub value: PropertyValue,
}

impl Property {
    pub const fn new(key: PropertyKey, value: PropertyValue) -> Self {
        Self { key, value }
    }
}

/// One decoded message never carries more properties than there are keys.
pub type PropertyList = heapless::Vec<Property, 10>;

/// The position fields of one report, pulled out of the generic property
/// list up front so the rest of the crate deals in named fields only.
///
/// Fields that the protocol sentinels when unknown are `Option`s; the rest
/// default to the protocol's zero/false conventions (a turn rate of 0 is a
/// valid "not turning").
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionData {
    /// Degrees, positive north.
    pub latitude: Option<f64>,
    /// Degrees, positive east.
    pub longitude: Option<f64>,
    /// Course over ground in degrees.
    pub course: Option<f64>,
    /// Speed over ground in knots.
    pub speed: Option<f64>,
    /// True heading in degrees.
    pub heading: Option<i32>,
    /// Rate of turn in degrees per minute.
    pub rate_of_turn: f64,
    /// Navigation status, 0-15.
    pub status: u8,
    /// UTC second of the position fix, 0-59.
    pub second: u8,
    /// Receiver autonomous integrity monitoring flag.
    pub raim: bool,
    /// Position accuracy flag (true: < 10 m).
    pub accuracy: bool,
}

impl PositionData {
    /// Folds the property list into named fields, mapping the decoder's
    /// unknown markers to `None` as it goes. Unknown or ill-typed entries
    /// are skipped.
    #[must_use]
    pub fn from_properties(properties: &[Property]) -> Self {
        let mut data = Self::default();

        for property in properties {
            let value = property.value;

            match property.key {
                PropertyKey::Latitude => {
                    data.latitude = value.as_f64().filter(|&lat| lat != LAT_UNDEFINED);
                }
                PropertyKey::Longitude => {
                    data.longitude = value.as_f64().filter(|&lon| lon != LON_UNDEFINED);
                }
                PropertyKey::Course => {
                    data.course = value.as_f64().filter(|&cog| cog != COG_UNDEFINED);
                }
                PropertyKey::Speed => {
                    data.speed = value.as_f64().filter(|&sog| sog != SPEED_UNDEFINED);
                }
                PropertyKey::Heading => {
                    data.heading = value.as_i32().filter(|&hdg| hdg != HEADING_UNDEFINED);
                }
                PropertyKey::RateOfTurn => {
                    data.rate_of_turn = value.as_f64().unwrap_or(0.0);
                }
                PropertyKey::Status => {
                    data.status = value.as_i32().unwrap_or(0) as u8;
                }
                PropertyKey::Second => {
                    data.second = value.as_i32().unwrap_or(0) as u8;
                }
                PropertyKey::Raim => {
                    data.raim = value.as_bool().unwrap_or(false);
                }
                PropertyKey::Accuracy => {
                    data.accuracy = value.as_bool().unwrap_or(false);
                }
            }
        }

        data
    }
}
