/// Until the [`embedded-can`] crate supports async, we need to define our own
/// trait. The gateway only ever transmits, so this is the whole capability:
/// one production implementation per platform (a SocketCAN wrapper on Linux,
/// a TWAI driver on ESP32, ...) and a mock for tests, picked when the
/// gateway is composed.
pub trait Transport {
    type Error;

    type Frame: embedded_can::Frame;

    /// Send one frame. A short or failed write must surface as `Err`; the
    /// gateway then abandons the remaining frames of the current message
    /// and reports the error, nothing more. Blocking on a full transmit
    /// queue is the implementation's own affair.
    async fn send(&mut self, frame: Self::Frame) -> Result<(), Self::Error>;
}

impl<T> Transport for &mut T
where
    T: Transport,
{
    type Error = T::Error;
    type Frame = T::Frame;

    async fn send(&mut self, frame: Self::Frame) -> Result<(), Self::Error> {
        (*self).send(frame).await
    }
}
