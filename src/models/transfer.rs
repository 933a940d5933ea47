//! Transfer dialog models

use rust_decimal::Decimal;

/// Direction of a cash register transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    /// Add funds to the caisse (no upper bound)
    Deposit,
    /// Take funds out of the caisse (bounded by the balance snapshot)
    Withdrawal,
}

impl TransferDirection {
    /// Verb used in console prompts and notifications
    pub fn label(&self) -> &'static str {
        match self {
            TransferDirection::Deposit => "Deposit",
            TransferDirection::Withdrawal => "Withdraw",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            TransferDirection::Deposit => "deposited",
            TransferDirection::Withdrawal => "withdrew",
        }
    }

    /// Generic retry message shown when the gateway fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            TransferDirection::Deposit => "Failed to add funds. Please try again.",
            TransferDirection::Withdrawal => "Failed to withdraw funds. Please try again.",
        }
    }
}

/// Amount limits for one dialog instance.
///
/// `max_amount` is a snapshot of the balance taken when the dialog opens and is
/// only consulted for withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferBounds {
    /// Input stepping hint, not a validation rule
    pub min_amount: Decimal,
    pub max_amount: Option<Decimal>,
}

impl TransferBounds {
    /// Bounds for a deposit: no upper limit
    pub fn unbounded() -> Self {
        TransferBounds {
            min_amount: Decimal::new(1, 2),
            max_amount: None,
        }
    }

    /// Bounds for a withdrawal against the given balance
    pub fn up_to(balance: Decimal) -> Self {
        TransferBounds {
            min_amount: Decimal::new(1, 2),
            max_amount: Some(balance),
        }
    }
}

impl Default for TransferBounds {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Editable state of a dialog that has not been submitted yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferDraft {
    /// Raw text as typed, parsed only on submit
    pub amount_text: String,
    pub description: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl TransferDraft {
    pub fn is_empty(&self) -> bool {
        self.amount_text.is_empty()
            && self.description.is_empty()
            && self.error.is_none()
            && !self.submitting
    }

    pub fn reset(&mut self) {
        *self = TransferDraft::default();
    }
}

/// A validated submission waiting for the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransfer {
    pub direction: TransferDirection,
    pub amount: Decimal,
    pub description: String,
}
