//! Settings store over on-chip flash
//!
//! Implements the byte-addressable `SettingsStore` seam on the last
//! flash sector. The whole settings region fits one flash page; writes
//! stage into a RAM image and `flush` erases and reprograms the sector
//! only when the image actually changed, so a whole batch of record
//! writes costs at most one erase cycle.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE, PAGE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;

use bematist_core::traits::{SettingsStore, StoreError};

/// Total flash fitted on the base board
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// The settings partition is the last erase sector
pub const SETTINGS_PARTITION_START: usize = FLASH_SIZE - ERASE_SIZE;

/// Flash-backed settings store
pub struct FlashSettings<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
    image: [u8; PAGE_SIZE],
    dirty: bool,
}

impl<'d> FlashSettings<'d> {
    /// Open the settings partition, caching its first page
    pub fn new(flash: Peri<'d, FLASH>) -> Result<Self, StoreError> {
        let mut flash = Flash::new_blocking(flash);
        let mut image = [0u8; PAGE_SIZE];
        flash
            .blocking_read(SETTINGS_PARTITION_START as u32, &mut image)
            .map_err(|_| StoreError::Bus)?;
        Ok(Self {
            flash,
            image,
            dirty: false,
        })
    }
}

impl SettingsStore for FlashSettings<'_> {
    fn read(&mut self, address: u16) -> Result<u8, StoreError> {
        self.image
            .get(address as usize)
            .copied()
            .ok_or(StoreError::OutOfRange)
    }

    fn write(&mut self, address: u16, value: u8) -> Result<(), StoreError> {
        let slot = self
            .image
            .get_mut(address as usize)
            .ok_or(StoreError::OutOfRange)?;
        if *slot != value {
            *slot = value;
            self.dirty = true;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }
        let start = SETTINGS_PARTITION_START as u32;
        self.flash
            .blocking_erase(start, start + ERASE_SIZE as u32)
            .map_err(|_| StoreError::Bus)?;
        self.flash
            .blocking_write(start, &self.image)
            .map_err(|_| StoreError::Bus)?;
        self.dirty = false;
        Ok(())
    }
}
