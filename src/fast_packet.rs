//! Because the maximum size of a frame is 8 bytes, NMEA 2000 splits larger
//! messages into multiple frames, so-called Fast Packets. The first frame
//! carries the sequence counter and the total length of the message; every
//! following frame carries its index within the sequence, so a receiver can
//! reassemble the message from the indices and arrival order alone.

use crate::{Id, NmeaFrame};

/// Payload bytes that fit in the first frame, next to the sequence counter
/// and the total length.
pub const FIRST_FRAME_DATA: usize = 6;

/// Payload bytes that fit in every following frame, next to the frame index.
pub const FRAME_DATA: usize = 7;

/// The frame index is five bits, which bounds a single fast packet to
/// 6 + 31 * 7 payload bytes.
pub const MAX_PAYLOAD: usize = FIRST_FRAME_DATA + 31 * FRAME_DATA;

/// Splits a message payload into bus frames, stamping each with `id`.
///
/// The first frame's data is `[counter, total_len, payload[0..6]]`; frame
/// `n` carries `[n, payload[6 + 7 * (n - 1)..][..7]]`. The last frame is cut
/// to the remaining payload, never padded. An empty payload still yields one
/// frame, `[0, 0]`.
pub struct Iter<'a> {
    id: Id,
    buf: &'a [u8],
    frame_no: u8,
}

impl<'a> Iter<'a> {
    pub fn new(id: Id, buf: &'a [u8]) -> Self {
        debug_assert!(buf.len() <= MAX_PAYLOAD, "payload too big");

        Self {
            id,
            buf,
            frame_no: 0,
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = NmeaFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let mut data = heapless::Vec::new();

        if self.frame_no == 0 {
            // sequence counter (restarted per message, so the upper bits of
            // the index byte stay zero) and total payload length
            data.push(self.frame_no).unwrap();
            data.push(self.buf.len() as u8).unwrap();
        } else if self.buf.is_empty() {
            // EOF
            return None;
        } else {
            data.push(self.frame_no).unwrap();
        }

        let len = self.buf.len().min(8 - data.len());
        data.extend_from_slice(self.buf.split_off(..len).unwrap())
            .unwrap();

        self.frame_no += 1;

        Some(NmeaFrame::new(self.id, data))
    }
}
