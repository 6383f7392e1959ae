//! Agent trait and baseline implementations.

pub mod random;
pub mod schedule;
pub mod trait_;

pub use random::RandomAgent;
pub use schedule::ScheduleAgent;
pub use trait_::Agent;
