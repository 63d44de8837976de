//! MPU-6050 accelerometer/gyro driver
//!
//! Register-level driver over a blocking I2C bus. Readings are sampled
//! as one 14-byte burst and cached; accessors return the cached sample.
//! Bus errors propagate untouched - there is no retry or recovery here.

use embedded_hal::i2c::I2c;

use bematist_core::telemetry::ImuSample;

/// 7-bit slave address with AD0 low
const SLAVE_ADDRESS: u8 = 0x68;

// Configuration register map
const REG_SMPLRT_DIV: u8 = 0x19;
const REG_CONFIG: u8 = 0x1A;
const REG_GYRO_CONFIG: u8 = 0x1B;
const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_FIFO_EN: u8 = 0x23;
const REG_INT_ENABLE: u8 = 0x38;
const REG_ACCEL_XOUT_H: u8 = 0x3B;
const REG_SIGNAL_PATH_RESET: u8 = 0x68;
const REG_USER_CTRL: u8 = 0x6A;
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_PWR_MGMT_2: u8 = 0x6C;

/// MPU-6050 over a shared I2C bus
///
/// Sensitivity at the configured full-scale settings: 16384 LSB/g for
/// the accelerometer (±2g), 131 LSB/°/s for the gyro (±250°/s). Raw
/// register values are cached; scaling is the consumer's concern.
pub struct Mpu6050<I2C> {
    i2c: I2C,
    sample: ImuSample,
}

impl<I2C: I2c> Mpu6050<I2C> {
    /// Driver over the given bus; call [`setup`](Self::setup) before sampling
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            sample: ImuSample::default(),
        }
    }

    /// Configure the sensor: wake from sleep, ±2g / ±250°/s full scale
    ///
    /// The head board powers up after the base board; callers must wait
    /// for the bus to settle before the first transaction (the stock
    /// bring-up sequence inserts a multi-second delay) and must never
    /// run this from interrupt context.
    pub fn setup(&mut self) -> Result<(), I2C::Error> {
        self.write_register(REG_SMPLRT_DIV, 0x07)?;
        self.write_register(REG_PWR_MGMT_1, 0x01)?;
        self.write_register(REG_PWR_MGMT_2, 0x00)?;
        self.write_register(REG_CONFIG, 0x00)?;
        self.write_register(REG_GYRO_CONFIG, 0x00)?;
        self.write_register(REG_ACCEL_CONFIG, 0x00)?;
        self.write_register(REG_FIFO_EN, 0x00)?;
        self.write_register(REG_INT_ENABLE, 0x01)?;
        self.write_register(REG_SIGNAL_PATH_RESET, 0x00)?;
        self.write_register(REG_USER_CTRL, 0x00)?;
        Ok(())
    }

    /// Sample all six axes in one burst and cache the result
    ///
    /// Reads the 14-byte block starting at ACCEL_XOUT_H; the embedded
    /// temperature registers are skipped.
    pub fn sample(&mut self) -> Result<ImuSample, I2C::Error> {
        let mut block = [0u8; 14];
        self.i2c
            .write_read(SLAVE_ADDRESS, &[REG_ACCEL_XOUT_H], &mut block)?;

        let word = |offset: usize| i16::from_be_bytes([block[offset], block[offset + 1]]);

        self.sample = ImuSample {
            acc_x: word(0),
            acc_y: word(2),
            acc_z: word(4),
            // block[6..8] is the die temperature
            gyro_roll: word(8),
            gyro_pitch: word(10),
            gyro_yaw: word(12),
        };
        Ok(self.sample)
    }

    /// Last cached sample
    pub fn cached(&self) -> &ImuSample {
        &self.sample
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(SLAVE_ADDRESS, &[register, value])
    }
}
