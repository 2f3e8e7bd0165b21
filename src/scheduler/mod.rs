//! Repeated method execution.
//!
//! Types declare `(method, delay, count)` schedules through their
//! descriptors. Once an instance exists, [`RepeatScheduler::start_repeats`]
//! drives each schedule on its own Tokio task:
//!
//! ```text
//! Idle --start--> Waiting --delay--> Executed --more left--> Waiting
//!                                        |
//!                                        +--done--> Terminal
//! ```

mod machine;
mod runner;
mod schedule;

pub use machine::{RepeatMachine, RepeatProgress, RepeatState};
pub use runner::{RepeatHandle, RepeatScheduler};
pub use schedule::{Repeat, RepeatCount, RepeatDeclaration, RepeatSchedule};
