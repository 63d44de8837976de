//! Servo pulse emission task
//!
//! The consumer side of the shared pulse buffer. Eighteen servos hang
//! off three demultiplexer banks of six channels each; within one
//! output cycle the six slots are emitted sequentially while the three
//! banks fire in parallel, so every servo gets one pulse per cycle.
//!
//! This task is the firmware's "interrupt context": nothing here may
//! touch the joint engine, the interpreter, or the settings store -
//! only the pulse buffer, through its cycle handshake.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker, Timer};

use bematist_core::joint::{PulseBuffer, JOINT_COUNT, PULSE_FREQ_HZ};

/// Demux banks driven in parallel
pub const BANKS: usize = 3;

/// Channel slots per bank, emitted sequentially
pub const SLOTS: usize = JOINT_COUNT / BANKS;

/// Emission timer tick in microseconds (pulse width unit)
const TICK_US: u64 = 4;

/// One slot of the output cycle
const SLOT_PERIOD: Duration =
    Duration::from_micros(1_000_000 / PULSE_FREQ_HZ as u64 / SLOTS as u64);

/// Pulse emission task - one full pass over all channels per cycle
#[embassy_executor::task]
pub async fn pulse_task(
    buffer: &'static PulseBuffer,
    mut select: [Output<'static>; 3],
    mut banks: [Output<'static>; BANKS],
) {
    info!("Pulse task started ({} Hz cycle)", PULSE_FREQ_HZ);

    let mut ticker = Ticker::every(SLOT_PERIOD);

    loop {
        // The inter-cycle wait runs with the cycle-complete flag set;
        // the producer's batch refresh lands in this window.
        ticker.next().await;
        buffer.begin_cycle();

        drive_slot(buffer, 0, &mut select, &mut banks).await;
        for slot in 1..SLOTS {
            ticker.next().await;
            drive_slot(buffer, slot, &mut select, &mut banks).await;
        }

        buffer.finish_cycle();
    }
}

/// Address one slot and emit the three bank pulses in parallel
async fn drive_slot(
    buffer: &PulseBuffer,
    slot: usize,
    select: &mut [Output<'static>; 3],
    banks: &mut [Output<'static>; BANKS],
) {
    for (bit, pin) in select.iter_mut().enumerate() {
        if slot & (1 << bit) != 0 {
            pin.set_high();
        } else {
            pin.set_low();
        }
    }

    // Bank b serves joint b * SLOTS + slot
    let mut widths = [0u64; BANKS];
    for (bank, width) in widths.iter_mut().enumerate() {
        *width = buffer.channel(bank * SLOTS + slot) as u64 * TICK_US;
    }

    for pin in banks.iter_mut() {
        pin.set_high();
    }

    // Drop each bank line as its width expires, shortest first
    let mut order = [0usize, 1, 2];
    order.sort_unstable_by_key(|&bank| widths[bank]);

    let mut elapsed = 0u64;
    for &bank in &order {
        let remaining = widths[bank] - elapsed;
        if remaining > 0 {
            Timer::after_micros(remaining).await;
        }
        banks[bank].set_low();
        elapsed = widths[bank];
    }
}
