//! Drives the encoder: decoded AIS messages go in, ordered frame sequences
//! come out through a [`Transport`].
//!
//! Receivers reassemble a fast packet from the frame indices and arrival
//! order alone, so the frames of two messages must never interleave on the
//! bus. [`Gateway::forward`] holds the gateway exclusively for one message's
//! whole frame sequence; when several producers feed the gateway, route
//! their reports through the channel worker ([`GatewayRunner`]) instead and
//! let it be the only writer.

#[cfg(feature = "defmt")]
use defmt::info;
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    zerocopy_channel::{Channel, Receiver, Sender},
};
use generic_array::GenericArray;

use crate::{
    ais::{AisMessage, Property, PropertyList},
    fast_packet,
    id::DESTINATION_BROADCAST,
    position::ClassAPositionReport,
    Id, Message,
};

mod transport;

pub use transport::Transport;

/// One decoded message together with its property list, the unit the
/// upstream decoder's fan-out delivers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AisReport {
    pub message: AisMessage,
    pub properties: PropertyList,
}

impl AisReport {
    pub const DEFAULT: Self = Self {
        message: AisMessage {
            message_type: 0,
            mmsi: 0,
        },
        properties: PropertyList::new(),
    };

    pub fn new(message: AisMessage, properties: PropertyList) -> Self {
        Self {
            message,
            properties,
        }
    }
}

/// Per-message error. The gateway itself carries no state across messages,
/// so after an error the next report can be forwarded as if nothing
/// happened; a dropped position is superseded by the next periodic one
/// anyway.
pub enum Error<C: Transport> {
    /// The transport refused a frame; the remaining frames of the current
    /// message were dropped.
    Can(C::Error),
}

impl<C: Transport> core::fmt::Debug for Error<C>
where
    C::Error: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Can(e) => f.debug_tuple("Can").field(e).finish(),
        }
    }
}

/// Encodes position reports and puts them on the bus, one message at a
/// time.
pub struct Gateway<C: Transport> {
    can: C,
}

impl<C: Transport> Gateway<C> {
    pub fn new(can: C) -> Self {
        Self { can }
    }

    /// Forwards one decoded message: filter, extract, encode, fragment,
    /// send. Returns `Ok(false)` if the message type is not a class A
    /// position report; those are skipped silently.
    pub async fn forward(
        &mut self,
        message: &AisMessage,
        properties: &[Property],
    ) -> Result<bool, Error<C>> {
        let Some(report) = ClassAPositionReport::new(message, properties) else {
            return Ok(false);
        };

        #[cfg(feature = "defmt")]
        info!("forwarding position report for MMSI {}", report.mmsi);

        self.send_report(&report).await?;

        Ok(true)
    }

    /// Forwards a batch of decoded messages, each one independently. Stops
    /// at the first transport error; the caller may carry on with fresh
    /// reports, stale ones are not worth resending.
    pub async fn forward_batch(&mut self, batch: &[AisReport]) -> Result<(), Error<C>> {
        for report in batch {
            self.forward(&report.message, &report.properties).await?;
        }

        Ok(())
    }

    async fn send_report(&mut self, report: &ClassAPositionReport) -> Result<(), Error<C>> {
        let id = Id::new(
            ClassAPositionReport::PRIORITY,
            ClassAPositionReport::PGN,
            ClassAPositionReport::SOURCE,
            DESTINATION_BROADCAST,
        );

        // The scratch buffer lives and dies with this call; no state leaks
        // into the next message.
        let mut buf: GenericArray<u8, <ClassAPositionReport as Message>::EncodedLen> =
            GenericArray::default();
        report.encode(&mut buf);

        for frame in fast_packet::Iter::new(id, &buf) {
            self.can
                .send(frame.to_can_frame())
                .await
                .map_err(Error::Can)?;
        }

        Ok(())
    }
}

/// The worker half of a queued gateway: a single task that owns the
/// transport and drains a channel of reports, so encode and send are
/// serialized no matter how many producers there are.
pub struct GatewayRunner<'ch, C: Transport> {
    gateway: Gateway<C>,
    rx: Receiver<'ch, CriticalSectionRawMutex, AisReport>,
}

/// The producer half; hand this to wherever decoded messages appear.
pub struct GatewayHandle<'ch> {
    tx: Sender<'ch, CriticalSectionRawMutex, AisReport>,
}

impl<'ch, C: Transport> GatewayRunner<'ch, C> {
    pub fn new(
        can: C,
        channel: &'ch mut Channel<'_, CriticalSectionRawMutex, AisReport>,
    ) -> (Self, GatewayHandle<'ch>) {
        let (tx, rx) = channel.split();

        let runner = Self {
            gateway: Gateway::new(can),
            rx,
        };

        (runner, GatewayHandle { tx })
    }

    /// Waits for one queued report and forwards it. A transport error only
    /// concerns the report it occurred on; polling again continues with the
    /// next one.
    pub async fn poll(&mut self) -> Result<bool, Error<C>> {
        let report = self.rx.receive().await;
        let result = self
            .gateway
            .forward(&report.message, &report.properties)
            .await;
        self.rx.receive_done();

        result
    }
}

impl GatewayHandle<'_> {
    pub async fn send(&mut self, report: AisReport) {
        *self.tx.send().await = report;
        self.tx.send_done();
    }
}
