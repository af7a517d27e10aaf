//! The class A position report, PGN 129038. This is the NMEA 2000 rendering
//! of AIS message types 1-3 and the only parameter group this crate speaks.

use core::f64::consts::PI;

use generic_array::typenum;

use crate::{
    ais::{AisMessage, PositionData, Property},
    buf::BufMut,
    Message,
};

fn deg_to_rad(degrees: f64) -> f64 {
    degrees * (2.0 * PI) / 360.0
}

fn knots_to_ms(knots: f64) -> f64 {
    knots * 1852.0 / 3600.0
}

/// A class A position report, ready to encode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClassAPositionReport {
    pub message_type: u8,
    pub mmsi: u32,
    pub position: PositionData,
}

impl ClassAPositionReport {
    /// Priority the report is transmitted with.
    pub const PRIORITY: u8 = 4;

    /// The gateway's source address on the bus.
    pub const SOURCE: u8 = 240;

    /// Builds a report from one decoded message and its properties. Returns
    /// `None` for message types other than 1-3; the constructor is the
    /// message filter, callers simply skip `None`.
    #[must_use]
    pub fn new(message: &AisMessage, properties: &[Property]) -> Option<Self> {
        match message.message_type {
            1..=3 => Some(Self {
                message_type: message.message_type,
                mmsi: message.mmsi,
                position: PositionData::from_properties(properties),
            }),
            _ => None,
        }
    }
}

impl Message for ClassAPositionReport {
    const PGN: u32 = 129_038;

    // 1 + 4 + 4 + 4 + 1 + 2 + 2 + 3 + 2 + 2 + 1 + 1 + 1
    type EncodedLen = typenum::U28;

    fn encode(&self, mut buf: &mut [u8]) {
        let position = &self.position;

        buf.put_u8(self.message_type);
        buf.put_u32(self.mmsi);

        match position.longitude {
            Some(longitude) => buf.put_fixed_i32(longitude, 1e-7),
            None => buf.put_u32_unavailable(),
        }
        match position.latitude {
            Some(latitude) => buf.put_fixed_i32(latitude, 1e-7),
            None => buf.put_u32_unavailable(),
        }

        buf.put_u8(position.second << 2 | (position.raim as u8) << 1 | position.accuracy as u8);

        match position.course {
            Some(course) => buf.put_fixed_u16(deg_to_rad(course), 1e-4),
            None => buf.put_u16_unavailable(),
        }
        match position.speed {
            Some(speed) => buf.put_fixed_u16(knots_to_ms(speed), 1e-2),
            None => buf.put_u16_unavailable(),
        }

        // reserved
        buf.put_u8(0);
        buf.put_u8(0);
        buf.put_u8(0);

        match position.heading {
            Some(heading) => buf.put_fixed_u16(deg_to_rad(heading as f64), 1e-4),
            None => buf.put_u16_unavailable(),
        }

        // Always written; 0 is the valid "not turning" value, so an absent
        // turn rate is not sentineled. Scaling inherited from the reference
        // gateways, still to be validated against a protocol analyzer.
        buf.put_fixed_i16(deg_to_rad(position.rate_of_turn) / 60.0, 3.125e-5);

        buf.put_u8(0xf0 | (position.status & 0x0f));
        buf.put_u8(0xf0);
        buf.put_u8(0xff);
    }
}
