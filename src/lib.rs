//! hearth - a weekly device schedule used as a reward oracle.
//!
//! A declarative on/off schedule for a fixed set of household devices
//! (lights, a boiler, ...) is loaded once into an immutable [`Policy`]. The
//! policy answers "which devices should be on right now?", and the [`rl`]
//! module turns that answer into a discrete action space, a toggle
//! transition, a bounded reward and random episode starts for a
//! reinforcement-learning loop.

pub mod policy;
pub mod rl;
pub mod state;
pub mod time;

pub use policy::{Policy, PolicyError};
pub use state::{ActionVector, DeviceFlags, StateError, StateVector};
pub use time::{PointInTime, TimeOfDay, TimeOfDayInterval};

/// Ordinal identity of a device: its index in the policy's device list.
pub type DeviceId = usize;
