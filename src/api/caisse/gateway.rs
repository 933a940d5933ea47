use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;

use super::client::CaisseClient;
use crate::models::{TransferDirection, TransferRequest};
use crate::services::transfer_service::{GatewayError, TransferGateway};

/// Transfer gateway posting deposits/withdrawals for one caisse
pub struct CaisseGateway {
    client: Arc<CaisseClient>,
    caisse_id: i64,
    direction: TransferDirection,
}

impl CaisseGateway {
    pub fn new(client: Arc<CaisseClient>, caisse_id: i64, direction: TransferDirection) -> Self {
        Self {
            client,
            caisse_id,
            direction,
        }
    }
}

#[async_trait]
impl TransferGateway for CaisseGateway {
    async fn transfer(&self, amount: Decimal, description: &str) -> Result<bool, GatewayError> {
        let request = TransferRequest::new(amount, description);

        let response = match self.direction {
            TransferDirection::Deposit => self.client.deposit(self.caisse_id, &request).await?,
            TransferDirection::Withdrawal => self.client.withdraw(self.caisse_id, &request).await?,
        };

        if !response.is_success() {
            return Err(GatewayError::Rejected(response.message));
        }

        info!(
            "{} of {} on caisse {} accepted (balance now {:?})",
            self.direction.label(),
            amount,
            self.caisse_id,
            response.current_balance
        );
        Ok(true)
    }
}
