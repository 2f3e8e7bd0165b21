use crate::di::{ManagedInstance, ServiceIdentity};
use crate::error::{ConfigurationError, Result};
use crate::scheduler::{RepeatDeclaration, RepeatMachine, RepeatProgress, RepeatSchedule, RepeatState};
use std::collections::HashMap;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};

/// Caller-side view of one started schedule.
pub struct RepeatHandle {
    identity: ServiceIdentity,
    schedule: RepeatSchedule,
    abort: AbortHandle,
    progress: watch::Receiver<RepeatProgress>,
}

impl RepeatHandle {
    /// Identity of the instance the schedule runs on
    pub fn identity(&self) -> ServiceIdentity {
        self.identity
    }

    pub fn schedule(&self) -> &RepeatSchedule {
        &self.schedule
    }

    /// Latest published progress
    pub fn progress(&self) -> RepeatProgress {
        *self.progress.borrow()
    }

    /// Wait until the schedule stops on its own or is cancelled.
    pub async fn wait_terminal(&mut self) -> RepeatProgress {
        let reached = self
            .progress
            .wait_for(|progress| progress.state == RepeatState::Terminal)
            .await
            .map(|progress| *progress);
        // An error means the driver task went away early, i.e. it was cancelled.
        reached.unwrap_or_else(|_| *self.progress.borrow())
    }

    /// Stop the schedule. No further executions happen after the next
    /// suspension point of the driver task.
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Whether the driver task has exited
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

impl std::fmt::Debug for RepeatHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepeatHandle")
            .field("identity", &self.identity)
            .field("schedule", &self.schedule)
            .field("progress", &self.progress())
            .finish()
    }
}

/// Starts declared repeat schedules against live instances.
///
/// Every call to [`start_repeats`](Self::start_repeats) spawns one
/// independent Tokio task per declared schedule; calling it twice for the
/// same instance runs every schedule twice.
#[derive(Default)]
pub struct RepeatScheduler {
    declarations: HashMap<ServiceIdentity, Vec<RepeatDeclaration>>,
    running: Vec<JoinHandle<()>>,
}

impl RepeatScheduler {
    /// Create a scheduler with no declarations
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a schedule for instances of `identity`
    pub fn declare(&mut self, identity: ServiceIdentity, declaration: RepeatDeclaration) {
        self.declarations
            .entry(identity)
            .or_default()
            .push(declaration);
    }

    /// Declared schedules of `identity` in declaration order.
    pub fn schedules(&self, identity: &ServiceIdentity) -> Vec<RepeatSchedule> {
        self.declarations
            .get(identity)
            .map(|declarations| {
                declarations
                    .iter()
                    .map(|declaration| declaration.schedule.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Spawn one task per schedule declared for `instance`
    pub fn start_repeats(&mut self, instance: &ManagedInstance) -> Result<Vec<RepeatHandle>> {
        self.running.retain(|join| !join.is_finished());
        let identity = instance.identity();
        let Some(declarations) = self.declarations.get(&identity) else {
            return Ok(Vec::new());
        };

        let runtime = tokio::runtime::Handle::try_current().map_err(|_| {
            ConfigurationError::NoRuntime {
                type_name: identity.type_name().to_string(),
            }
        })?;

        let mut handles = Vec::with_capacity(declarations.len());
        for declaration in declarations {
            let (tx, rx) = watch::channel(RepeatProgress::idle());
            let schedule = declaration.schedule.clone();
            let task = declaration.task.clone();
            let target = instance.instance().clone();

            tracing::debug!(
                "Starting repeat {}::{} every {:?} ({} times)",
                identity.short_name(),
                schedule.method_name,
                schedule.delay,
                schedule.repeat_count.as_raw()
            );

            let join = runtime.spawn({
                let schedule = schedule.clone();
                async move {
                    let mut machine = RepeatMachine::new(schedule.repeat_count);
                    machine.start();
                    tx.send_replace(machine.progress());

                    while machine.state() == RepeatState::Waiting {
                        tokio::time::sleep(schedule.delay).await;
                        machine.fire(|| task(&target));
                        tx.send_replace(machine.progress());
                    }

                    tracing::debug!(
                        "Repeat {}::{} finished after {} executions",
                        identity.short_name(),
                        schedule.method_name,
                        machine.executed()
                    );
                }
            });

            handles.push(RepeatHandle {
                identity,
                schedule,
                abort: join.abort_handle(),
                progress: rx,
            });
            self.running.push(join);
        }

        Ok(handles)
    }

    /// Number of started schedules that have not stopped yet.
    pub fn running(&self) -> usize {
        self.running.iter().filter(|join| !join.is_finished()).count()
    }

    /// Abort every started schedule still tracked; returns how many were tracked.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.running.len();
        for join in self.running.drain(..) {
            join.abort();
        }
        cancelled
    }
}
