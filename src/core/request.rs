//! # Simulated Request Tracking
//!
//! Every screen that talks to the (mock) backend owns a `PendingRequest`:
//! a one-in-flight state machine for a timer-delayed operation.
//!
//! ```text
//! Idle --start--> Pending --complete--> Idle
//!                    \----fail-------> Failed --start--> Pending
//! ```
//!
//! `start` hands out a `Ticket`; the completion action must present the same
//! ticket or delivery is refused. Tickets come from a monotonic counter owned
//! by the `App`, never reused, so a completion scheduled before a screen was
//! torn down (navigation resets the screen's state) can't land on the state
//! that replaced it.
//!
//! The mock backend never fails, but `Failed` is where a real backend's
//! timeout or rejection surfaces: the error text is kept, previously
//! displayed data is untouched, and a fresh `start` retries.

/// Identifies one `start` cycle. Allocated via [`Ticket::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    /// Allocate the next ticket from a monotonic counter.
    pub fn next(counter: &mut u64) -> Ticket {
        *counter += 1;
        Ticket(*counter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    /// A real backend's error, kept for display until the next `start`.
    Failed(String),
}

/// One in-flight simulated operation per invocation site.
#[derive(Debug, Default)]
pub struct PendingRequest {
    status: RequestStatus,
    active: Option<Ticket>,
}

impl PendingRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the request. Returns false (and changes nothing) if one is
    /// already pending for this site.
    pub fn start(&mut self, ticket: Ticket) -> bool {
        if self.is_pending() {
            return false;
        }
        self.status = RequestStatus::Pending;
        self.active = Some(ticket);
        true
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// True iff `ticket` belongs to the currently pending cycle.
    pub fn accepts(&self, ticket: Ticket) -> bool {
        self.is_pending() && self.active == Some(ticket)
    }

    /// Resolve the pending cycle. Returns false for stale or unknown
    /// tickets, leaving state untouched so the caller can drop the delivery.
    pub fn complete(&mut self, ticket: Ticket) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.status = RequestStatus::Idle;
        self.active = None;
        true
    }

    /// Mark the pending cycle failed with a displayable message.
    pub fn fail(&mut self, ticket: Ticket, message: String) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.status = RequestStatus::Failed(message);
        self.active = None;
        true
    }

    /// The last failure message, if the most recent cycle failed.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            RequestStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}
