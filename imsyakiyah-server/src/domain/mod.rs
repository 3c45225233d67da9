//! Domain types for the imsyakiyah server.
//!
//! All entities are plain values: a city embeds a copy of its state rather
//! than referring to it, and nothing is updated once created.

mod region;
mod schedule;

pub use region::{City, State, matches_search};
pub use schedule::{ScheduleEntry, ScheduleMeta, ScheduleResult};
