//! Transfer dialog controller
//!
//! One [`TransferDialog`] backs both the deposit and the withdrawal forms. It owns
//! the draft, runs the amount validator on submit, hands a validated amount to a
//! [`TransferGateway`] and decides whether the dialog closes or stays open.
//!
//! Submission is split in two halves ([`TransferDialog::begin_submit`] and
//! [`TransferDialog::complete_submit`]) so an event loop can keep reading input
//! while the gateway call is pending. [`TransferDialog::submit`] awaits the
//! gateway in between for callers that do not need that.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::caisse::ApiError;
use crate::models::{PendingTransfer, TransferBounds, TransferDirection, TransferDraft};
use crate::services::validation_service::{self, ValidationError};

/// Failure reported by the operation performing the ledger mutation
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Transfer rejected: {0}")]
    Rejected(String),
}

/// Performs the actual balance mutation for a validated transfer.
///
/// `Ok(false)` and `Err(_)` are both treated as a recoverable failure.
#[async_trait]
pub trait TransferGateway: Send + Sync {
    async fn transfer(&self, amount: Decimal, description: &str) -> Result<bool, GatewayError>;
}

/// Where the dialog is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Open,
    Submitting,
}

/// Result of a submit event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The dialog is closed or already submitting; nothing happened
    Ignored,
    /// Validation failed, the dialog stays open with an error
    Invalid(ValidationError),
    /// Validation passed, the gateway must now be called
    Started(PendingTransfer),
}

/// Result of a gateway resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The transfer succeeded, the draft was cleared and the dialog closed
    Closed,
    /// The transfer failed, the dialog is open again with the draft kept
    Failed,
    /// No submission was in flight
    Ignored,
}

type CloseHook = Box<dyn FnMut() + Send>;

pub struct TransferDialog {
    direction: TransferDirection,
    bounds: TransferBounds,
    draft: TransferDraft,
    state: DialogState,
    on_close: Option<CloseHook>,
}

impl TransferDialog {
    pub fn new(direction: TransferDirection) -> Self {
        TransferDialog {
            direction,
            bounds: TransferBounds::default(),
            draft: TransferDraft::default(),
            state: DialogState::Closed,
            on_close: None,
        }
    }

    /// Register the callback run each time a submission or a cancel closes the dialog
    pub fn with_on_close<F>(mut self, on_close: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_close = Some(Box::new(on_close));
        self
    }

    pub fn direction(&self) -> TransferDirection {
        self.direction
    }

    pub fn bounds(&self) -> &TransferBounds {
        &self.bounds
    }

    pub fn draft(&self) -> &TransferDraft {
        &self.draft
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    /// Open the dialog with a fresh draft.
    ///
    /// For withdrawals `bounds.max_amount` is the balance snapshot used for the
    /// whole lifetime of this opening. Opening an already open dialog does nothing.
    pub fn open(&mut self, bounds: TransferBounds) {
        if self.is_open() {
            return;
        }
        self.bounds = bounds;
        self.draft.reset();
        self.state = DialogState::Open;
        debug!("{:?} dialog opened (max: {:?})", self.direction, self.bounds.max_amount);
    }

    pub fn set_amount(&mut self, text: &str) {
        if self.state == DialogState::Open {
            self.draft.amount_text = text.to_string();
        }
    }

    pub fn set_description(&mut self, text: &str) {
        if self.state == DialogState::Open {
            self.draft.description = text.to_string();
        }
    }

    /// Whether the submit action is currently enabled
    pub fn can_submit(&self) -> bool {
        if self.state != DialogState::Open {
            return false;
        }
        match (self.direction, self.bounds.max_amount) {
            (TransferDirection::Withdrawal, Some(balance)) => balance > Decimal::ZERO,
            _ => true,
        }
    }

    /// Validate the draft and, when valid, latch the dialog into `Submitting`.
    pub fn begin_submit(&mut self) -> SubmitOutcome {
        if self.state != DialogState::Open {
            debug!("{:?} submit ignored in state {:?}", self.direction, self.state);
            return SubmitOutcome::Ignored;
        }

        self.draft.error = None;

        match validation_service::validate(&self.draft.amount_text, self.direction, &self.bounds) {
            Err(e) => {
                debug!("{:?} draft rejected: {:?}", self.direction, e);
                self.draft.error = Some(e.to_string());
                SubmitOutcome::Invalid(e)
            }
            Ok(amount) => {
                self.draft.submitting = true;
                self.state = DialogState::Submitting;
                SubmitOutcome::Started(PendingTransfer {
                    direction: self.direction,
                    amount,
                    description: self.draft.description.clone(),
                })
            }
        }
    }

    /// Apply the gateway's answer to the submission started by [`Self::begin_submit`].
    pub fn complete_submit(&mut self, result: Result<bool, GatewayError>) -> Completion {
        if self.state != DialogState::Submitting {
            return Completion::Ignored;
        }

        match result {
            Ok(true) => {
                self.draft.reset();
                self.close();
                Completion::Closed
            }
            Ok(false) => {
                warn!("{:?} gateway reported failure", self.direction);
                self.fail();
                Completion::Failed
            }
            Err(e) => {
                warn!("{:?} gateway error: {}", self.direction, e);
                self.fail();
                Completion::Failed
            }
        }
    }

    /// Run a full submission against `gateway`.
    ///
    /// Returns the validation error, if any, or how the gateway call ended.
    pub async fn submit(
        &mut self,
        gateway: &dyn TransferGateway,
    ) -> Result<Completion, ValidationError> {
        let pending = match self.begin_submit() {
            SubmitOutcome::Started(pending) => pending,
            SubmitOutcome::Invalid(e) => return Err(e),
            SubmitOutcome::Ignored => return Ok(Completion::Ignored),
        };

        let result = gateway.transfer(pending.amount, &pending.description).await;
        Ok(self.complete_submit(result))
    }

    /// Discard the draft and close. Rejected while a submission is in flight.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            DialogState::Open => {
                self.draft.reset();
                self.close();
                true
            }
            DialogState::Submitting => {
                debug!("{:?} cancel rejected while submitting", self.direction);
                false
            }
            DialogState::Closed => false,
        }
    }

    fn fail(&mut self) {
        self.draft.submitting = false;
        self.draft.error = Some(self.direction.failure_message().to_string());
        self.state = DialogState::Open;
    }

    fn close(&mut self) {
        self.state = DialogState::Closed;
        debug!("{:?} dialog closed", self.direction);
        if let Some(on_close) = self.on_close.as_mut() {
            on_close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use rust_decimal_macros::dec;

    /// Records every call and answers with a fixed result
    struct RecordingGateway {
        calls: Mutex<Vec<(Decimal, String)>>,
        answer: fn() -> Result<bool, GatewayError>,
    }

    impl RecordingGateway {
        fn answering(answer: fn() -> Result<bool, GatewayError>) -> Self {
            RecordingGateway {
                calls: Mutex::new(Vec::new()),
                answer,
            }
        }

        fn calls(&self) -> Vec<(Decimal, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TransferGateway for RecordingGateway {
        async fn transfer(&self, amount: Decimal, description: &str) -> Result<bool, GatewayError> {
            self.calls.lock().unwrap().push((amount, description.to_string()));
            (self.answer)()
        }
    }

    fn counting_dialog(direction: TransferDirection) -> (TransferDialog, Arc<AtomicUsize>) {
        let closes = Arc::new(AtomicUsize::new(0));
        let counter = closes.clone();
        let dialog = TransferDialog::new(direction).with_on_close(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (dialog, closes)
    }

    #[tokio::test]
    async fn successful_deposit_closes_and_clears_draft() {
        let gateway = RecordingGateway::answering(|| Ok(true));
        let (mut dialog, closes) = counting_dialog(TransferDirection::Deposit);

        dialog.open(TransferBounds::unbounded());
        dialog.set_amount("50.5");
        dialog.set_description("restock");

        let outcome = dialog.submit(&gateway).await;

        assert_eq!(outcome, Ok(Completion::Closed));
        assert_eq!(gateway.calls(), vec![(dec!(50.5), "restock".to_string())]);
        assert_eq!(dialog.state(), DialogState::Closed);
        assert!(dialog.draft().is_empty());
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn withdrawal_over_balance_never_reaches_gateway() {
        let gateway = RecordingGateway::answering(|| Ok(true));
        let (mut dialog, closes) = counting_dialog(TransferDirection::Withdrawal);

        dialog.open(TransferBounds::up_to(dec!(100.00)));
        dialog.set_amount("150");

        let outcome = dialog.submit(&gateway).await;

        assert_eq!(outcome, Err(ValidationError::ExceedsBalance));
        assert!(gateway.calls().is_empty());
        assert_eq!(dialog.state(), DialogState::Open);
        assert_eq!(
            dialog.draft().error.as_deref(),
            Some("Withdrawal amount exceeds current balance")
        );
        assert!(!dialog.draft().submitting);
        assert_eq!(closes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn falsy_gateway_result_keeps_draft() {
        let gateway = RecordingGateway::answering(|| Ok(false));
        let mut dialog = TransferDialog::new(TransferDirection::Deposit);

        dialog.open(TransferBounds::unbounded());
        dialog.set_amount("50.5");
        dialog.set_description("restock");

        assert_eq!(dialog.submit(&gateway).await, Ok(Completion::Failed));
        assert_eq!(dialog.state(), DialogState::Open);
        assert_eq!(dialog.draft().amount_text, "50.5");
        assert_eq!(dialog.draft().description, "restock");
        assert_eq!(
            dialog.draft().error.as_deref(),
            Some("Failed to add funds. Please try again.")
        );
        assert!(!dialog.draft().submitting);
    }

    #[tokio::test]
    async fn gateway_error_keeps_draft_and_allows_retry() {
        let failing = RecordingGateway::answering(|| Err(GatewayError::Rejected("offline".into())));
        let working = RecordingGateway::answering(|| Ok(true));
        let mut dialog = TransferDialog::new(TransferDirection::Withdrawal);

        dialog.open(TransferBounds::up_to(dec!(80)));
        dialog.set_amount("20");

        assert_eq!(dialog.submit(&failing).await, Ok(Completion::Failed));
        assert_eq!(dialog.draft().amount_text, "20");
        assert_eq!(
            dialog.draft().error.as_deref(),
            Some("Failed to withdraw funds. Please try again.")
        );

        assert_eq!(dialog.submit(&working).await, Ok(Completion::Closed));
        assert_eq!(working.calls(), vec![(dec!(20), String::new())]);
    }

    #[test]
    fn second_submit_while_submitting_is_latched() {
        let mut dialog = TransferDialog::new(TransferDirection::Deposit);
        dialog.open(TransferBounds::unbounded());
        dialog.set_amount("10");

        assert!(matches!(dialog.begin_submit(), SubmitOutcome::Started(_)));
        assert_eq!(dialog.begin_submit(), SubmitOutcome::Ignored);
        assert_eq!(dialog.state(), DialogState::Submitting);
        assert!(dialog.draft().submitting);
        assert!(!dialog.can_submit());
    }

    #[test]
    fn edits_are_ignored_while_submitting() {
        let mut dialog = TransferDialog::new(TransferDirection::Deposit);
        dialog.open(TransferBounds::unbounded());
        dialog.set_amount("10");
        dialog.begin_submit();

        dialog.set_amount("999");
        assert_eq!(dialog.draft().amount_text, "10");
    }

    #[test]
    fn cancel_is_rejected_while_submitting() {
        let (mut dialog, closes) = counting_dialog(TransferDirection::Deposit);
        dialog.open(TransferBounds::unbounded());
        dialog.set_amount("10");
        dialog.begin_submit();

        assert!(!dialog.cancel());
        assert_eq!(dialog.state(), DialogState::Submitting);
        assert_eq!(closes.load(Ordering::SeqCst), 0);

        assert_eq!(dialog.complete_submit(Ok(true)), Completion::Closed);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancel_resets_and_closes_once() {
        let (mut dialog, closes) = counting_dialog(TransferDirection::Withdrawal);
        dialog.open(TransferBounds::up_to(dec!(5)));
        dialog.set_amount("abc");
        dialog.begin_submit();
        assert!(dialog.draft().error.is_some());

        assert!(dialog.cancel());
        assert!(!dialog.cancel());
        assert!(dialog.draft().is_empty());
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn new_attempt_clears_previous_error() {
        let mut dialog = TransferDialog::new(TransferDirection::Deposit);
        dialog.open(TransferBounds::unbounded());
        dialog.set_amount("-1");
        assert_eq!(
            dialog.begin_submit(),
            SubmitOutcome::Invalid(ValidationError::NotPositive)
        );

        dialog.set_amount("3");
        assert!(matches!(dialog.begin_submit(), SubmitOutcome::Started(_)));
        assert_eq!(dialog.draft().error, None);
    }

    #[test]
    fn completion_without_submission_is_ignored() {
        let mut dialog = TransferDialog::new(TransferDirection::Deposit);
        assert_eq!(dialog.complete_submit(Ok(true)), Completion::Ignored);

        dialog.open(TransferBounds::unbounded());
        assert_eq!(dialog.complete_submit(Ok(true)), Completion::Ignored);
        assert!(dialog.is_open());
    }

    #[test]
    fn empty_balance_disables_withdrawal() {
        let mut dialog = TransferDialog::new(TransferDirection::Withdrawal);
        dialog.open(TransferBounds::up_to(Decimal::ZERO));
        assert!(!dialog.can_submit());

        let mut deposit = TransferDialog::new(TransferDirection::Deposit);
        assert!(!deposit.can_submit());
        deposit.open(TransferBounds::unbounded());
        assert!(deposit.can_submit());
    }
}
