//! Checkout submission state.

use crate::error::CommerceError;

/// Where a checkout submission currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    /// Nothing in flight. Holds the message of the last failed attempt.
    #[default]
    Idle,
    /// A submission is in flight.
    Submitting,
    /// The last submission placed an order.
    Succeeded,
}

/// Tracks one checkout's submission state and its last error.
///
/// At most one submission can be in flight; a second `begin` is refused
/// until the first one succeeds or fails.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
    error: Option<String>,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a submission, clearing the previous error.
    pub fn begin(&mut self) -> Result<(), CommerceError> {
        if self.state == CheckoutState::Submitting {
            return Err(CommerceError::CheckoutInProgress);
        }
        self.state = CheckoutState::Submitting;
        self.error = None;
        Ok(())
    }

    /// Mark the in-flight submission as done.
    pub fn succeed(&mut self) {
        self.state = CheckoutState::Succeeded;
        self.error = None;
    }

    /// Record a failure; the form becomes submittable again.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = CheckoutState::Idle;
        self.error = Some(message.into());
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == CheckoutState::Submitting
    }

    /// Message of the last failed attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
