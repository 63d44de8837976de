//! Persistent settings store trait
//!
//! Joint calibration is persisted as raw bytes at stable offsets
//! (EEPROM-style addressing). Implementations back this with on-chip
//! flash, an external EEPROM, or plain RAM for tests.

/// Errors from settings store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Address outside the reserved settings region
    OutOfRange,
    /// Underlying storage transaction failed
    Bus,
}

/// Byte-addressable persistent storage
///
/// Addresses are stable offsets into a small reserved region; the joint
/// engine computes them as `head_address + joint_id * record_size`.
/// Single writer from the main context only - implementations do not
/// need to be reentrant.
pub trait SettingsStore {
    /// Read one byte at the given address
    fn read(&mut self, address: u16) -> Result<u8, StoreError>;

    /// Stage one byte at the given address
    ///
    /// Durability may be deferred until [`flush`](Self::flush); callers
    /// writing a batch of records flush once at the end.
    fn write(&mut self, address: u16, value: u8) -> Result<(), StoreError>;

    /// Make staged writes durable
    ///
    /// Stores with immediate write durability keep the default no-op.
    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}
