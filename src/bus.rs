use core::future::Future;

use embedded_hal::i2c::SevenBitAddress;

use crate::command::Command;
use crate::error::{Icp101xxError, Icp101xxResult};
use crate::response::{Response, MAX_RESPONSE_BYTES};

/// Fixed I2C address of every ICP-101xx device.
pub const DEVICE_ADDRESS: SevenBitAddress = 0x63;

/// Byte-level transport to a single ICP-101xx.
///
/// The driver only ever writes whole commands and reads whole responses, so a transport needs
/// nothing more than a plain write and a plain read. [`I2c`] covers the common case; implement
/// this trait directly for anything else.
pub trait Bus {
    type Error;

    /// Writes `data` to the device in a single transfer.
    fn write(&mut self, data: &[u8]) -> impl Future<Output = Result<(), Self::Error>>;

    /// Reads exactly `data.len()` bytes from the device in a single transfer.
    fn read(&mut self, data: &mut [u8]) -> impl Future<Output = Result<(), Self::Error>>;

    /// Encodes and sends `command`.
    fn send(&mut self, command: Command) -> impl Future<Output = Icp101xxResult<(), Self::Error>> {
        async move {
            trace!("send {:?}", command);
            self.write(&command.encode()).await.map_err(Icp101xxError::Bus)
        }
    }

    /// Reads and decodes a response of type `R`.
    fn fetch<R: Response>(&mut self) -> impl Future<Output = Icp101xxResult<R::Out, Self::Error>> {
        async move {
            let mut buf = [0u8; MAX_RESPONSE_BYTES];
            let data = &mut buf[..R::N];
            self.read(data).await.map_err(Icp101xxError::Bus)?;

            R::decode(data).map_err(Icp101xxError::UnexpectedResponseData)
        }
    }
}

/// [`Bus`] over an async I2C peripheral, always talking to [`DEVICE_ADDRESS`].
pub struct I2c<I2cType> {
    i2c: I2cType,
}

impl<I2cType> I2c<I2cType>
where
    I2cType: embedded_hal_async::i2c::I2c,
{
    pub fn new(i2c: I2cType) -> Self {
        Self { i2c }
    }

    /// Gives back the underlying peripheral.
    pub fn release(self) -> I2cType {
        self.i2c
    }
}

impl<I2cType> Bus for I2c<I2cType>
where
    I2cType: embedded_hal_async::i2c::I2c,
{
    type Error = <I2cType as embedded_hal_async::i2c::ErrorType>::Error;

    async fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(DEVICE_ADDRESS, data).await?;

        Ok(())
    }

    async fn read(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.read(DEVICE_ADDRESS, data).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use super::*;
    use crate::command::MeasurementMode;
    use crate::response::{ProductId, Sample};

    #[tokio::test]
    async fn send_writes_big_endian_opcode() {
        let i2c = I2cMock::new(&[I2cTransaction::write(0x63, vec![0x68, 0x25])]);
        let mut bus = I2c::new(i2c);

        bus.send(Command::Measure(MeasurementMode::Normal)).await.unwrap();

        bus.release().done();
    }

    #[tokio::test]
    async fn send_select_calibration_writes_payload() {
        let i2c = I2cMock::new(&[I2cTransaction::write(0x63, vec![0xC5, 0x95, 0x00, 0x66, 0x9C])]);
        let mut bus = I2c::new(i2c);

        bus.send(Command::SelectCalibration).await.unwrap();

        bus.release().done();
    }

    #[tokio::test]
    async fn fetch_reads_exact_response_length() {
        let i2c = I2cMock::new(&[
            I2cTransaction::read(0x63, vec![0x08, 0x48]),
            I2cTransaction::read(0x63, vec![0x65, 0x90, 0x9A, 0x81, 0xB3, 0xBA, 0x20, 0x00, 0x5D]),
        ]);
        let mut bus = I2c::new(i2c);

        assert_eq!(0x0848, bus.fetch::<ProductId>().await.unwrap());

        let raw = bus.fetch::<Sample>().await.unwrap();
        assert_eq!(26000, raw.temperature());
        assert_eq!(8_500_000, raw.pressure());

        bus.release().done();
    }
}
