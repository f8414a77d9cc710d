//! Single-flight refresh coordination
//!
//! At most one session refresh runs at a time. The first caller to observe
//! the idle gate claims it and performs the refresh; callers arriving while
//! it runs enqueue a one-shot receiver and are settled, in arrival order,
//! with the leader's outcome. The gate is claimed and the queue mutated
//! inside a single lock acquisition, and the lock is never held across an
//! await point, so there is no window in which two callers can both see the
//! gate idle.

use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::types::SessionError;

type Outcome = Result<(), SessionError>;

/// Role handed to a caller entering recovery
#[derive(Debug)]
pub enum RefreshTicket<'a> {
    /// This caller claimed the refresh. It must perform it and settle the
    /// guard; dropping the guard unsettled rejects all waiters as
    /// interrupted.
    Leader(RefreshGuard<'a>),

    /// A refresh is already in flight; await the broadcast outcome
    Waiter(oneshot::Receiver<Outcome>),
}

#[derive(Debug, Default)]
struct CoordinatorState {
    refreshing: bool,
    waiters: Vec<oneshot::Sender<Outcome>>,
}

/// Gate serializing session refreshes
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    state: Mutex<CoordinatorState>,
}

impl RefreshCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the refresh if the gate is idle, otherwise enqueues the caller.
    pub fn begin_or_enqueue(&self) -> RefreshTicket<'_> {
        let mut state = self.state.lock();
        if state.refreshing {
            let (tx, rx) = oneshot::channel();
            state.waiters.push(tx);
            RefreshTicket::Waiter(rx)
        } else {
            state.refreshing = true;
            RefreshTicket::Leader(RefreshGuard { coordinator: self, settled: false })
        }
    }

    /// Whether a refresh is currently in flight
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.state.lock().refreshing
    }

    /// Number of callers waiting on the in-flight refresh
    #[must_use]
    pub fn pending_waiters(&self) -> usize {
        self.state.lock().waiters.len()
    }

    /// Reopens the gate and delivers `outcome` to every waiter in enqueue
    /// order.
    fn finish(&self, outcome: &Outcome) {
        let waiters = {
            let mut state = self.state.lock();
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };
        for waiter in waiters {
            // A waiter that gave up (dropped its receiver) is skipped
            let _ = waiter.send(outcome.clone());
        }
    }
}

/// Proof of refresh leadership, tied to the coordinator that issued it
///
/// The leader settles the guard with the refresh outcome. If the leading
/// task is cancelled mid-refresh the guard's drop settles with
/// [`SessionError::Interrupted`] so waiters are never stranded behind a
/// closed gate.
#[derive(Debug)]
pub struct RefreshGuard<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl RefreshGuard<'_> {
    /// Consumes the guard, reopening the gate and broadcasting `outcome`.
    pub fn settle(mut self, outcome: &Outcome) {
        self.settled = true;
        self.coordinator.finish(outcome);
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.coordinator.finish(&Err(SessionError::Interrupted));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_leader(ticket: RefreshTicket<'_>) -> RefreshGuard<'_> {
        match ticket {
            RefreshTicket::Leader(guard) => guard,
            RefreshTicket::Waiter(_) => panic!("expected leader ticket"),
        }
    }

    fn expect_waiter(ticket: RefreshTicket<'_>) -> oneshot::Receiver<Outcome> {
        match ticket {
            RefreshTicket::Waiter(rx) => rx,
            RefreshTicket::Leader(_) => panic!("expected waiter ticket"),
        }
    }

    #[test]
    fn first_caller_leads_later_callers_wait() {
        let coordinator = RefreshCoordinator::new();
        let guard = expect_leader(coordinator.begin_or_enqueue());
        assert!(coordinator.is_refreshing());

        let _rx = expect_waiter(coordinator.begin_or_enqueue());
        let _rx2 = expect_waiter(coordinator.begin_or_enqueue());
        assert_eq!(coordinator.pending_waiters(), 2);

        guard.settle(&Ok(()));
        assert!(!coordinator.is_refreshing());
    }

    #[tokio::test]
    async fn settle_broadcasts_success_to_every_waiter() {
        let coordinator = RefreshCoordinator::new();
        let guard = expect_leader(coordinator.begin_or_enqueue());
        let rxs: Vec<_> =
            (0..3).map(|_| expect_waiter(coordinator.begin_or_enqueue())).collect();

        guard.settle(&Ok(()));

        for rx in rxs {
            assert!(rx.await.unwrap().is_ok());
        }
        assert_eq!(coordinator.pending_waiters(), 0);
    }

    #[tokio::test]
    async fn settle_broadcasts_the_same_failure_to_every_waiter() {
        let coordinator = RefreshCoordinator::new();
        let guard = expect_leader(coordinator.begin_or_enqueue());
        let rx_a = expect_waiter(coordinator.begin_or_enqueue());
        let rx_b = expect_waiter(coordinator.begin_or_enqueue());

        guard.settle(&Err(SessionError::Refresh { status: 401, body: "expired".to_string() }));

        for rx in [rx_a, rx_b] {
            let err = rx.await.unwrap().unwrap_err();
            assert!(matches!(err, SessionError::Refresh { status: 401, .. }));
        }
    }

    #[test]
    fn gate_reopens_for_a_new_cycle_after_settle() {
        let coordinator = RefreshCoordinator::new();
        expect_leader(coordinator.begin_or_enqueue()).settle(&Ok(()));
        // Previous cycle fully settled; a new caller must lead again
        let guard = expect_leader(coordinator.begin_or_enqueue());
        guard.settle(&Ok(()));
    }

    #[tokio::test]
    async fn dropping_the_guard_unsettled_interrupts_waiters() {
        let coordinator = RefreshCoordinator::new();
        let guard = expect_leader(coordinator.begin_or_enqueue());
        let rx = expect_waiter(coordinator.begin_or_enqueue());

        drop(guard);

        let err = rx.await.unwrap().unwrap_err();
        assert!(matches!(err, SessionError::Interrupted));
        assert!(!coordinator.is_refreshing());
    }

    #[test]
    fn tickets_name_their_role_in_debug_output() {
        let coordinator = RefreshCoordinator::new();
        let leader = coordinator.begin_or_enqueue();
        let waiter = coordinator.begin_or_enqueue();

        assert!(format!("{leader:?}").contains("Leader"));
        assert!(format!("{waiter:?}").contains("Waiter"));
        assert!(format!("{coordinator:?}").contains("RefreshCoordinator"));

        expect_leader(leader).settle(&Ok(()));
    }
}
