use std::time::Duration;

/// Side effects that should be executed outside the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hide the alert of this generation once `after` has elapsed.
    /// Supersedes any hide scheduled earlier.
    ScheduleAlertHide { generation: u64, after: Duration },
}
