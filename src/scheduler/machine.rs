use crate::scheduler::RepeatCount;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RepeatState {
    /// Not started yet.
    Idle,
    /// A timer is pending.
    Waiting,
    /// The method has just run.
    Executed,
    /// No further timers will be scheduled.
    Terminal,
}

/// Snapshot of a running schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatProgress {
    pub state: RepeatState,
    pub executed: u64,
}

impl RepeatProgress {
    pub(crate) fn idle() -> Self {
        Self {
            state: RepeatState::Idle,
            executed: 0,
        }
    }
}

/// Timer-free state machine for one (instance, schedule) pair.
///
/// The driver sleeps for the schedule delay whenever the machine is
/// `Waiting` and calls [`fire`](Self::fire) when the timer elapses.
#[derive(Debug, Clone)]
pub struct RepeatMachine {
    count: RepeatCount,
    executed: u64,
    state: RepeatState,
}

impl RepeatMachine {
    /// Create an idle machine for `count` executions
    pub fn new(count: RepeatCount) -> Self {
        Self {
            count,
            executed: 0,
            state: RepeatState::Idle,
        }
    }

    pub fn state(&self) -> RepeatState {
        self.state
    }

    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// Current state and execution count
    pub fn progress(&self) -> RepeatProgress {
        RepeatProgress {
            state: self.state,
            executed: self.executed,
        }
    }

    /// Idle -> Waiting. The first timer is always armed, even for a count of zero.
    pub fn start(&mut self) -> RepeatState {
        if self.state == RepeatState::Idle {
            self.state = RepeatState::Waiting;
        }
        self.state
    }

    /// Handle an elapsed timer, running `method` if an execution is still due.
    pub fn fire(&mut self, method: impl FnOnce()) -> RepeatState {
        if self.state != RepeatState::Waiting {
            return self.state;
        }

        if self.count.allows(self.executed) {
            self.executed += 1;
            self.state = RepeatState::Executed;
            method();
        }

        self.state = if self.count.allows(self.executed) {
            RepeatState::Waiting
        } else {
            RepeatState::Terminal
        };
        self.state
    }

    /// Jump to `Terminal` from any state
    pub fn cancel(&mut self) {
        self.state = RepeatState::Terminal;
    }
}
