//! Serial command ingestion task
//!
//! Reads line-oriented commands from the control UART and forwards the
//! parsed requests to the control task. Transport framing beyond
//! newline-terminated ASCII lines is out of scope here.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;
use heapless::String;

use crate::channels::COMMAND_CHANNEL;

/// Longest accepted command line
const LINE_MAX: usize = 32;

/// A parsed controller request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Queue a motion: `play <slot> <loop_count>`
    Play { slot: u8, loop_count: u8 },
    /// Discard queued motions and halt playback: `stop`
    Stop,
    /// Command a joint angle: `angle <joint> <tenths-deg>`
    SetAngle { joint: u8, angle: i16 },
    /// Command a joint relative to home: `diff <joint> <tenths-deg>`
    SetAngleDiff { joint: u8, diff: i16 },
    /// Persist a calibration bound: `min|max|home <joint> <tenths-deg>`
    SetMin { joint: u8, angle: i16 },
    SetMax { joint: u8, angle: i16 },
    SetHome { joint: u8, angle: i16 },
    /// Rewrite factory calibration: `resetcfg`
    ResetSettings,
    /// Dump the calibration table: `dumpj`
    DumpJoints,
    /// Dump the last sensor sample: `dumpi`
    DumpImu,
}

/// Parse one trimmed command line
pub fn parse_line(line: &str) -> Option<Command> {
    let mut words = line.split_ascii_whitespace();
    let verb = words.next()?;

    let command = match verb {
        "play" => Command::Play {
            slot: words.next()?.parse().ok()?,
            loop_count: words.next()?.parse().ok()?,
        },
        "stop" => Command::Stop,
        "angle" => Command::SetAngle {
            joint: words.next()?.parse().ok()?,
            angle: words.next()?.parse().ok()?,
        },
        "diff" => Command::SetAngleDiff {
            joint: words.next()?.parse().ok()?,
            diff: words.next()?.parse().ok()?,
        },
        "min" => Command::SetMin {
            joint: words.next()?.parse().ok()?,
            angle: words.next()?.parse().ok()?,
        },
        "max" => Command::SetMax {
            joint: words.next()?.parse().ok()?,
            angle: words.next()?.parse().ok()?,
        },
        "home" => Command::SetHome {
            joint: words.next()?.parse().ok()?,
            angle: words.next()?.parse().ok()?,
        },
        "resetcfg" => Command::ResetSettings,
        "dumpj" => Command::DumpJoints,
        "dumpi" => Command::DumpImu,
        _ => return None,
    };

    // Trailing junk invalidates the line
    if words.next().is_some() {
        return None;
    }
    Some(command)
}

/// Command RX task - accumulates lines and queues parsed commands
#[embassy_executor::task]
pub async fn command_task(mut rx: BufferedUartRx) {
    info!("Command task started");

    let mut line: String<LINE_MAX> = String::new();
    let mut buf = [0u8; 16];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    match byte {
                        b'\r' | b'\n' => {
                            if let Some(command) = parse_line(&line) {
                                // Backpressure policy: drop and warn
                                if COMMAND_CHANNEL.try_send(command).is_err() {
                                    warn!("Command channel full, dropping command");
                                }
                            } else if !line.is_empty() {
                                warn!("Unparseable command line");
                            }
                            line.clear();
                        }
                        _ => {
                            if line.push(byte as char).is_err() {
                                warn!("Command line too long, discarding");
                                line.clear();
                            }
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
