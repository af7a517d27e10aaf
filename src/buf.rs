//! Little-endian cursors over byte slices, with the fixed-point scaling and
//! "data not available" conventions used by NMEA 2000 fields.

/// 16-bit "data not available" bit pattern. The same pattern is used for
/// signed and unsigned fields.
pub const UNAVAILABLE_16: u16 = 0x7fff;

/// 32-bit "data not available" bit pattern.
pub const UNAVAILABLE_32: u32 = 0x7fff_ffff;

/// Round half away from zero. `f64::round` lives in `std`, not `core`.
fn scale(value: f64, precision: f64) -> i64 {
    let scaled = value / precision;

    if scaled >= 0.0 {
        (scaled + 0.5) as i64
    } else {
        (scaled - 0.5) as i64
    }
}

pub trait Buf {
    fn get_u8(&mut self) -> u8;

    fn get_u16(&mut self) -> u16;

    fn get_i16(&mut self) -> i16;

    fn get_u32(&mut self) -> u32;

    fn get_i32(&mut self) -> i32;

    /// Get a floating point number from an unsigned fixed point 2-byte
    /// representation.
    ///
    /// ```
    /// # use ais2k::Buf;
    /// let mut buf = &[0, 11][..];
    /// assert_eq!(buf.get_fixed_u16(0.01), Some(28.16)); // something something endianess
    /// ```
    #[inline]
    fn get_fixed_u16(&mut self, precision: f64) -> Option<f64> {
        match self.get_u16() {
            UNAVAILABLE_16 => None,
            value => Some(value as f64 * precision),
        }
    }

    /// Signed counterpart of [`Buf::get_fixed_u16`].
    #[inline]
    fn get_fixed_i16(&mut self, precision: f64) -> Option<f64> {
        match self.get_i16() {
            0x7fff => None,
            value => Some(value as f64 * precision),
        }
    }

    /// Get a floating point number from a signed fixed point 4-byte
    /// representation.
    #[inline]
    fn get_fixed_i32(&mut self, precision: f64) -> Option<f64> {
        match self.get_i32() {
            0x7fff_ffff => None,
            value => Some(value as f64 * precision),
        }
    }
}

impl Buf for &[u8] {
    #[inline]
    fn get_u8(&mut self) -> u8 {
        *self.split_off_first().unwrap()
    }

    #[inline]
    fn get_u16(&mut self) -> u16 {
        u16::from_le_bytes(self.split_off(..2).unwrap().try_into().unwrap())
    }

    #[inline]
    fn get_i16(&mut self) -> i16 {
        i16::from_le_bytes(self.split_off(..2).unwrap().try_into().unwrap())
    }

    #[inline]
    fn get_u32(&mut self) -> u32 {
        u32::from_le_bytes(self.split_off(..4).unwrap().try_into().unwrap())
    }

    #[inline]
    fn get_i32(&mut self) -> i32 {
        i32::from_le_bytes(self.split_off(..4).unwrap().try_into().unwrap())
    }
}

pub trait BufMut {
    fn put_u8(&mut self, value: u8);

    fn put_u16(&mut self, value: u16);

    fn put_i16(&mut self, value: i16);

    fn put_u32(&mut self, value: u32);

    fn put_i32(&mut self, value: i32);

    /// Put a floating point number into a signed fixed point 4-byte
    /// representation, rounding to the nearest scale unit.
    #[inline]
    fn put_fixed_i32(&mut self, value: f64, precision: f64) {
        self.put_i32(scale(value, precision) as i32);
    }

    /// Put a floating point number into a signed fixed point 2-byte
    /// representation.
    #[inline]
    fn put_fixed_i16(&mut self, value: f64, precision: f64) {
        self.put_i16(scale(value, precision) as i16);
    }

    /// Put a floating point number into an unsigned fixed point 2-byte
    /// representation.
    #[inline]
    fn put_fixed_u16(&mut self, value: f64, precision: f64) {
        self.put_u16(scale(value, precision) as u16);
    }

    /// Mark a 2-byte field as not available. Never write zero for that:
    /// zero is a valid field value.
    #[inline]
    fn put_u16_unavailable(&mut self) {
        self.put_u16(UNAVAILABLE_16);
    }

    /// Mark a 4-byte field as not available.
    #[inline]
    fn put_u32_unavailable(&mut self) {
        self.put_u32(UNAVAILABLE_32);
    }
}

impl BufMut for &mut [u8] {
    #[inline]
    fn put_u8(&mut self, value: u8) {
        *self.split_off_first_mut().unwrap() = value;
    }

    #[inline]
    fn put_u16(&mut self, value: u16) {
        self.split_off_mut(..2)
            .unwrap()
            .copy_from_slice(&value.to_le_bytes());
    }

    #[inline]
    fn put_i16(&mut self, value: i16) {
        self.split_off_mut(..2)
            .unwrap()
            .copy_from_slice(&value.to_le_bytes());
    }

    #[inline]
    fn put_u32(&mut self, value: u32) {
        self.split_off_mut(..4)
            .unwrap()
            .copy_from_slice(&value.to_le_bytes());
    }

    #[inline]
    fn put_i32(&mut self, value: i32) {
        self.split_off_mut(..4)
            .unwrap()
            .copy_from_slice(&value.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::{Buf, BufMut};

    #[test]
    fn sentinels() {
        let mut buf = [0u8; 6];

        let mut cursor = &mut buf[..];
        cursor.put_u16_unavailable();
        cursor.put_u32_unavailable();

        assert_eq!(buf, [0xff, 0x7f, 0xff, 0xff, 0xff, 0x7f]);

        let mut cursor = &buf[..];
        assert_eq!(cursor.get_fixed_u16(1e-4), None);
        assert_eq!(cursor.get_fixed_i32(1e-7), None);
    }

    #[test]
    fn fixed_point_rounds_to_nearest() {
        let mut buf = [0u8; 8];

        let mut cursor = &mut buf[..];
        // 4.4 / 1e-7 lands a hair off 44e6 in binary floating point
        cursor.put_fixed_i32(4.4, 1e-7);
        cursor.put_fixed_u16(3.14159265, 1e-4);
        cursor.put_fixed_i16(-0.25, 1e-2);

        let mut cursor = &buf[..];
        assert_eq!(cursor.get_i32(), 44_000_000);
        assert_eq!(cursor.get_u16(), 31_416);
        assert_eq!(cursor.get_i16(), -25);
    }

    #[test]
    fn little_endian_layout() {
        let mut buf = [0u8; 5];

        let mut cursor = &mut buf[..];
        cursor.put_u8(0x01);
        cursor.put_u32(123_456_789);

        assert_eq!(buf, [0x01, 0x15, 0xcd, 0x5b, 0x07]);
    }

    #[test]
    #[should_panic]
    fn overrun_panics() {
        let mut buf = [0u8; 3];

        let mut cursor = &mut buf[..];
        cursor.put_u32(1);
    }
}
