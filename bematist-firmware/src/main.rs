//! Bematist - Walking Robot Firmware
//!
//! Main firmware binary for RP2040-based base boards driving an
//! 18-servo biped. The control task owns all joint and interpreter
//! state; the pulse task is the only other context touching shared
//! state, and only through the pulse buffer's cycle handshake.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use bematist_core::interpreter::Interpreter;
use bematist_core::joint::{JointEngine, PulseBuffer};
use bematist_core::motion::{MotionPlayer, MOTION_SLOTS};

use crate::storage::FlashSettings;

mod channels;
mod storage;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// The interrupt-shared pulse buffer, sole cross-context state
static PULSE_BUFFER: PulseBuffer = PulseBuffer::new();

/// Frame counts of the built-in motion library, by slot
const MOTION_FRAMES: [u8; MOTION_SLOTS] = motion_library();

const fn motion_library() -> [u8; MOTION_SLOTS] {
    let mut frames = [0u8; MOTION_SLOTS];
    frames[0] = 2; // home
    frames[1] = 24; // walk forward
    frames[2] = 24; // walk backward
    frames[3] = 16; // turn left
    frames[4] = 16; // turn right
    frames[5] = 12; // bow
    frames
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Bematist firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Calibration store on the last flash sector
    let store = unwrap!(FlashSettings::new(p.FLASH));
    let mut engine = JointEngine::new(store, &PULSE_BUFFER);
    if let Err(e) = engine.load_settings() {
        warn!("Calibration load failed ({:?}), running on defaults", e);
    }
    engine.apply_home();
    info!("Joint engine initialized");

    let interpreter = Interpreter::new(MotionPlayer::new(MOTION_FRAMES));

    // Control UART to the command source (BLE bridge on the stock board)
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let (tx, rx) = uart.into_buffered(Irqs, tx_buf, rx_buf).split();
    info!("Command UART initialized");

    // Servo demultiplexer: 3 select lines, 3 bank pulse lines
    let select = [
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
    ];
    let banks = [
        Output::new(p.PIN_13, Level::Low),
        Output::new(p.PIN_14, Level::Low),
        Output::new(p.PIN_15, Level::Low),
    ];

    // Head-board IMU bus
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::Config::default());

    let led = Output::new(p.PIN_25, Level::Low);

    unwrap!(spawner.spawn(tasks::pulse_task(&PULSE_BUFFER, select, banks)));
    unwrap!(spawner.spawn(tasks::control_task(engine, interpreter, tx, led)));
    unwrap!(spawner.spawn(tasks::command_task(rx)));
    unwrap!(spawner.spawn(tasks::imu_task(i2c)));

    info!("All tasks started");
}
