use std::convert::Infallible;

use ais2k::gateway::Transport;
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    pubsub::{PubSubChannel, Publisher},
};
use embedded_can::Id;

/// A frame as the CAN driver would see it, handed over by the gateway.
#[derive(Debug, Clone)]
pub struct Frame {
    id: Id,
    is_remote: bool,
    dlc: usize,
    data: [u8; 8],
}

impl Frame {
    /// The identifier as a SocketCAN-style driver would put it on the wire:
    /// 29 significant bits with the extended frame flag in bit 31.
    pub fn raw_id(&self) -> u32 {
        match self.id {
            Id::Extended(id) => ais2k::Id::from_can_id(id).as_raw_extended(),
            Id::Standard(_) => panic!("NMEA 2000 uses extended identifiers only"),
        }
    }
}

impl embedded_can::Frame for Frame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None; // Data length exceeds CAN frame limit
        }

        let mut d = [0; 8];
        d[..data.len()].copy_from_slice(data);

        Some(Self {
            id: id.into(),
            is_remote: false,
            dlc: data.len(),
            data: d,
        })
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        Some(Self {
            id: id.into(),
            is_remote: true,
            dlc,
            data: [0; 8],
        })
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        self.is_remote
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.dlc
    }

    fn data(&self) -> &[u8] {
        &self.data[..self.dlc]
    }
}

/// Publishes every sent frame to a pub/sub channel the test observes.
pub struct FakeCan<'a, const CAP: usize, const SUBS: usize, const PUBS: usize> {
    tx: Publisher<'a, CriticalSectionRawMutex, Frame, CAP, SUBS, PUBS>,
}

impl<'a, const CAP: usize, const SUBS: usize, const PUBS: usize> FakeCan<'a, CAP, SUBS, PUBS> {
    pub fn new(
        channel: &'a PubSubChannel<CriticalSectionRawMutex, Frame, CAP, SUBS, PUBS>,
    ) -> Self {
        Self {
            tx: channel.publisher().unwrap(),
        }
    }
}

impl<const CAP: usize, const SUBS: usize, const PUBS: usize> Transport
    for FakeCan<'_, CAP, SUBS, PUBS>
{
    type Error = Infallible;
    type Frame = Frame;

    async fn send(&mut self, frame: Self::Frame) -> Result<(), Self::Error> {
        self.tx.publish_immediate(frame);
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
pub struct SendIncomplete;

/// Collects sent frames, failing exactly one send (`fail_at`, counted from
/// zero over the transport's lifetime).
pub struct FlakyCan {
    pub frames: Vec<Frame>,
    fail_at: usize,
    sent: usize,
}

impl FlakyCan {
    pub fn new(fail_at: usize) -> Self {
        Self {
            frames: Vec::new(),
            fail_at,
            sent: 0,
        }
    }
}

impl Transport for FlakyCan {
    type Error = SendIncomplete;
    type Frame = Frame;

    async fn send(&mut self, frame: Self::Frame) -> Result<(), Self::Error> {
        let index = self.sent;
        self.sent += 1;

        if index == self.fail_at {
            return Err(SendIncomplete);
        }

        self.frames.push(frame);
        Ok(())
    }
}
