//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod playback;
pub mod store;

pub use playback::MotionPlayback;
pub use store::{SettingsStore, StoreError};
