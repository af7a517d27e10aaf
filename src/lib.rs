//! This crate turns AIS position reports, decoded upstream into a generic
//! key/value property model, into NMEA 2000 (N2K) fast packets so that
//! legacy AIS receiver software can feed chart plotters and other modern
//! marine electronics. It uses no heap allocation whatsoever and works in
//! embedded as well as hosted environments; the CAN channel itself stays
//! behind the [`gateway::Transport`] trait. The encoding recipe follows the
//! AK-Homberger NMEA2000-AIS-Gateway, and [the Canboat project's reverse
//! engineering documentation](https://canboat.github.io/canboat/canboat.html)
//! proved to be very helpful in understanding the protocol.
//!
//! Only the class A position report (PGN 129038, AIS message types 1-3) is
//! implemented; everything else the decoder produces is ignored.

#![no_std]

pub mod ais;
mod buf;
pub mod fast_packet;
mod frame;
mod id;
mod position;

#[cfg(feature = "gateway")]
pub mod gateway;

use generic_array::ArrayLength;

pub use ais::{AisMessage, PositionData, Property, PropertyKey, PropertyList, PropertyValue};
pub use buf::{Buf, BufMut, UNAVAILABLE_16, UNAVAILABLE_32};
pub use frame::NmeaFrame;
pub use generic_array::typenum;
pub use id::{Format, Id, DESTINATION_BROADCAST};
pub use position::ClassAPositionReport;

/// A NMEA 2000 message. This trait is very much inspired by [the gRPC library
/// Prost's trait with the same name](https://docs.rs/prost/latest/prost/trait.Message.html),
/// reduced to the transmit side.
pub trait Message {
    /// The parameter group number identifying the message on the bus.
    const PGN: u32;

    /// Total length of the encoded message in bytes.
    type EncodedLen: ArrayLength;

    /// Encode the message into `buf`, which must be exactly
    /// [`EncodedLen`](Self::EncodedLen) bytes long. Writing a field past the
    /// end of `buf` panics; that is a field-order bug, not a runtime
    /// condition.
    fn encode(&self, buf: &mut [u8]);
}
