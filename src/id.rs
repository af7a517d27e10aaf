use embedded_can::ExtendedId;

/// A NMEA 2000 message identifier. According to N2K specification, this is a
/// 29-bit extended CAN ID with a 3-bit priority, an 18-bit parameter group
/// number (PGN), and an 8-bit source address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Id(embedded_can::ExtendedId);

/// The two ISO 11783 addressing conventions, told apart by the PGN's PDU
/// format byte (bits 8-15).
pub enum Format {
    /// Peer-to-peer: the identifier carries a destination address in place
    /// of the PGN's low byte.
    Pdu1,
    /// Broadcast-only: the full PGN occupies the identifier and no
    /// destination is encoded.
    Pdu2,
}

impl Format {
    #[inline]
    #[must_use]
    pub const fn from_pgn(pgn: u32) -> Self {
        let id_pf = (pgn >> 8) & 0xff;

        if id_pf < 240 {
            Self::Pdu1
        } else {
            Self::Pdu2
        }
    }
}

pub const DESTINATION_BROADCAST: u8 = 0xff;

/// Extended frame format marker (bit 31), as SocketCAN-style interfaces
/// expect it. Bits 29-30 stay zero.
const EXTENDED_FLAG: u32 = 0x8000_0000;

impl Id {
    #[inline]
    #[must_use]
    pub const fn new(priority: u8, pgn: u32, source: u8, destination: u8) -> Self {
        debug_assert!(priority <= 7, "Priority must be in the range 0-7");
        debug_assert!(pgn <= 0x3ffff, "PGN must be at most 0x3ffff (18 bits)");

        // All inputs are caller-guaranteed in range; out-of-range values
        // wrap silently.
        let priority = (priority & 0x7) as u32;
        let pgn = pgn & 0x3ffff;

        let id = match Format::from_pgn(pgn) {
            // PDU1: the destination address takes the low byte of the PGN
            // field.
            Format::Pdu1 => {
                priority << 26 | (pgn & 0x3ff00) << 8 | (destination as u32) << 8 | source as u32
            }
            // PDU2: the PGN is in bits 8-25 and the destination is implied
            // global.
            Format::Pdu2 => priority << 26 | pgn << 8 | source as u32,
        };

        Self(ExtendedId::new(id).unwrap())
    }

    /// Create a new identifier from an extended CAN ID.
    #[inline]
    #[must_use]
    pub const fn from_can_id(can_id: embedded_can::ExtendedId) -> Self {
        Self(can_id)
    }

    #[inline]
    #[must_use]
    pub const fn as_can_id(self) -> embedded_can::ExtendedId {
        self.0
    }

    /// The raw identifier word with the extended frame marker (bit 31) set,
    /// ready for interfaces that take a flag-carrying 32-bit ID instead of
    /// [`embedded_can::Id`].
    #[inline]
    #[must_use]
    pub fn as_raw_extended(self) -> u32 {
        self.0.as_raw() | EXTENDED_FLAG
    }

    #[inline]
    #[must_use]
    pub fn priority(self) -> u8 {
        (self.0.as_raw() >> 26) as u8 & 0x7
    }

    #[inline]
    #[must_use]
    pub fn pgn(self) -> u32 {
        match self.format() {
            Format::Pdu1 => (self.0.as_raw() >> 8) & 0x3ff00,
            Format::Pdu2 => (self.0.as_raw() >> 8) & 0x3ffff,
        }
    }

    #[inline]
    #[must_use]
    pub fn source(self) -> u8 {
        self.0.as_raw() as u8
    }

    #[inline]
    #[must_use]
    pub fn format(self) -> Format {
        if ((self.0.as_raw() >> 16) & 0xff) < 240 {
            Format::Pdu1
        } else {
            Format::Pdu2
        }
    }

    #[inline]
    #[must_use]
    pub fn destination(self) -> u8 {
        match self.format() {
            Format::Pdu1 => (self.0.as_raw() >> 8) as u8,
            Format::Pdu2 => DESTINATION_BROADCAST, // implied global
        }
    }
}

impl From<embedded_can::ExtendedId> for Id {
    fn from(id: embedded_can::ExtendedId) -> Self {
        Self::from_can_id(id)
    }
}

impl From<Id> for embedded_can::Id {
    fn from(id: Id) -> Self {
        Self::Extended(id.as_can_id())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Id {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Id({:x})", self.0.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::{Format, Id, DESTINATION_BROADCAST};

    #[test]
    fn pdu2_never_encodes_a_destination() {
        // 129038 has PDU format byte 0xf8, i.e. broadcast-only.
        let to_all = Id::new(4, 129_038, 240, DESTINATION_BROADCAST);
        let to_one = Id::new(4, 129_038, 240, 0x42);

        assert_eq!(to_all, to_one);
        assert!(matches!(to_all.format(), Format::Pdu2));
        assert_eq!(to_all.destination(), DESTINATION_BROADCAST);
        assert_eq!(to_all.pgn(), 129_038);
    }

    #[test]
    fn pdu1_carries_the_destination() {
        // 59904 (ISO Request) has PDU format byte 0xea.
        let id = Id::new(6, 59_904, 7, 0x42);

        assert!(matches!(id.format(), Format::Pdu1));
        assert_eq!(id.destination(), 0x42);
        assert_eq!(id.pgn(), 59_904);
        assert_eq!(id.source(), 7);
        assert_eq!((id.as_can_id().as_raw() >> 8) as u8, 0x42);
    }

    #[test]
    fn field_placement() {
        let id = Id::new(4, 129_038, 240, DESTINATION_BROADCAST);
        let raw = id.as_can_id().as_raw();

        assert_eq!(raw >> 26, 4);
        assert_eq!((raw >> 8) & 0x3ffff, 129_038);
        assert_eq!(raw & 0xff, 240);
        assert_eq!(id.priority(), 4);
    }

    #[test]
    fn raw_extended_sets_bit_31() {
        let id = Id::new(4, 129_038, 240, DESTINATION_BROADCAST);

        assert_eq!(id.as_raw_extended() & 0x8000_0000, 0x8000_0000);
        assert_eq!(id.as_raw_extended() & 0x1fff_ffff, id.as_can_id().as_raw());
        // bits 29-30 unused
        assert_eq!(id.as_raw_extended() & 0x6000_0000, 0);
    }
}
