//! Errors that can occur when using an ICP-101xx device.
//!
//! This module provides an error type that encapsulates all possible errors that can occur during communication with the sensor.
//! It is generic over the underlying bus error type.

use crate::response::InvalidChecksum;

/// This represents all possible errors that can occur when using an ICP-101xx device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Icp101xxError<BusError> {
    /// An error has occurred in the I2C driver while sending a command or reading a response
    Bus(BusError),

    /// The device did not answer the identity probe, or answered with an id that does not belong to the ICP-101xx family.
    ///
    /// Could possibly indicate an error with pin configuration and/or wiring.
    NotConnected,

    /// A response word did not match its checksum byte.
    ///
    /// Only produced when the `crc` feature is enabled. Could indicate interference on the bus.
    UnexpectedResponseData(InvalidChecksum),
}

/// Type alias used to simplify return types throughout the driver
pub type Icp101xxResult<T, BusError> = Result<T, Icp101xxError<BusError>>;
