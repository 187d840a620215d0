use std::future::Future;

/// Two-state toggle with a displayed count, updated before the server
/// confirms and rolled back if it refuses.
///
/// Only one request may be outstanding; clicks while one is pending are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimisticToggle {
    active: bool,
    count: i64,
    pending: bool,
}

/// The state to restore if the server rejects the change, plus the state
/// being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleTicket {
    /// The state the server is being asked to move to.
    pub target: bool,
    previous_active: bool,
    previous_count: i64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ToggleOutcome<E> {
    /// Another request was already pending.
    Busy,
    /// The server accepted the change; holds the new state.
    Committed(bool),
    /// The server rejected the change and the previous state is back.
    RolledBack(E),
}

impl OptimisticToggle {
    pub fn new(active: bool, count: i64) -> Self {
        Self {
            active,
            count,
            pending: false,
        }
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Flip the state locally and return what the server should be asked
    /// for, or `None` if a request is already pending.
    pub fn begin(&mut self) -> Option<ToggleTicket> {
        if self.pending {
            return None;
        }
        let ticket = ToggleTicket {
            target: !self.active,
            previous_active: self.active,
            previous_count: self.count,
        };
        self.pending = true;
        self.active = ticket.target;
        self.count += if ticket.target { 1 } else { -1 };
        Some(ticket)
    }

    /// Resolve the pending request. On error the pre-click state is restored.
    pub fn settle<E>(
        &mut self,
        ticket: ToggleTicket,
        result: Result<(), E>,
    ) -> ToggleOutcome<E> {
        self.pending = false;
        match result {
            Ok(()) => ToggleOutcome::Committed(ticket.target),
            Err(e) => {
                self.active = ticket.previous_active;
                self.count = ticket.previous_count;
                ToggleOutcome::RolledBack(e)
            }
        }
    }

    /// Run one full toggle. `apply` is called with the target state.
    pub async fn toggle<F, Fut, E>(&mut self, apply: F) -> ToggleOutcome<E>
    where
        F: FnOnce(bool) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let Some(ticket) = self.begin() else {
            return ToggleOutcome::Busy;
        };
        let result = apply(ticket.target).await;
        self.settle(ticket, result)
    }

    /// Adopt server-provided state, e.g. after a feed revalidation. Ignored
    /// while a request is pending so the optimistic value is not clobbered.
    pub fn rebase(&mut self, active: bool, count: i64) {
        if !self.pending {
            self.active = active;
            self.count = count;
        }
    }
}
