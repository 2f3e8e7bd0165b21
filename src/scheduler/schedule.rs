use crate::di::Instance;
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

/// How many times a repeat schedule runs its method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatCount {
    Times(u32),
    Forever,
}

impl RepeatCount {
    /// Interpret a signed count: `-1` repeats forever, any other negative
    /// value never runs.
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            -1 => RepeatCount::Forever,
            n if n < 0 => RepeatCount::Times(0),
            n => RepeatCount::Times(u32::try_from(n).unwrap_or(u32::MAX)),
        }
    }

    pub fn as_raw(&self) -> i64 {
        match self {
            RepeatCount::Times(n) => i64::from(*n),
            RepeatCount::Forever => -1,
        }
    }

    /// Whether another execution is due after `executed` runs.
    pub fn allows(&self, executed: u64) -> bool {
        match self {
            RepeatCount::Forever => true,
            RepeatCount::Times(n) => executed < u64::from(*n),
        }
    }
}

impl Default for RepeatCount {
    fn default() -> Self {
        RepeatCount::Times(1)
    }
}

/// Delay and count options for a repeated method.
///
/// ```
/// use ferrule::scheduler::{Repeat, RepeatCount};
/// use std::time::Duration;
///
/// let repeat = Repeat::every(Duration::from_millis(5000)).times(3);
/// assert_eq!(repeat.count(), RepeatCount::Times(3));
///
/// // Runs once unless told otherwise.
/// assert_eq!(Repeat::every_ms(250).count(), RepeatCount::Times(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeat {
    delay: Duration,
    count: RepeatCount,
}

impl Repeat {
    /// Run once after `delay`; chain `times` or `forever` for more
    pub fn every(delay: Duration) -> Self {
        Self {
            delay,
            count: RepeatCount::default(),
        }
    }

    /// Same as [`every`](Self::every) with a delay in milliseconds
    pub fn every_ms(ms: u64) -> Self {
        Self::every(Duration::from_millis(ms))
    }

    /// Set the count from a signed value, `-1` meaning forever.
    pub fn times(mut self, times: i64) -> Self {
        self.count = RepeatCount::from_raw(times);
        self
    }

    /// Repeat until cancelled
    pub fn forever(mut self) -> Self {
        self.count = RepeatCount::Forever;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn count(&self) -> RepeatCount {
        self.count
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatSchedule {
    pub method_name: String,
    pub delay: Duration,
    pub repeat_count: RepeatCount,
}

impl RepeatSchedule {
    pub fn delay_ms(&self) -> u128 {
        self.delay.as_millis()
    }
}

pub(crate) type RepeatTask = Arc<dyn Fn(&Instance) + Send + Sync>;

/// A schedule paired with the typed method it drives.
#[derive(Clone)]
pub struct RepeatDeclaration {
    pub(crate) schedule: RepeatSchedule,
    pub(crate) task: RepeatTask,
}

impl RepeatDeclaration {
    pub(crate) fn new<T, F>(method_name: &str, repeat: Repeat, method: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&T) + Send + Sync + 'static,
    {
        let task: RepeatTask = Arc::new(move |instance: &Instance| {
            let any: &(dyn Any + Send + Sync) = &**instance;
            if let Some(target) = any.downcast_ref::<T>() {
                method(target);
            }
        });
        Self {
            schedule: RepeatSchedule {
                method_name: method_name.to_string(),
                delay: repeat.delay(),
                repeat_count: repeat.count(),
            },
            task,
        }
    }

    pub fn schedule(&self) -> &RepeatSchedule {
        &self.schedule
    }
}

impl std::fmt::Debug for RepeatDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepeatDeclaration")
            .field("schedule", &self.schedule)
            .finish_non_exhaustive()
    }
}
