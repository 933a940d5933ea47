pub mod notification_service;
pub mod report_service;
pub mod transfer_service;
pub mod validation_service;

pub use notification_service::Notifier;
pub use transfer_service::{
    Completion, DialogState, GatewayError, SubmitOutcome, TransferDialog, TransferGateway,
};
pub use validation_service::{validate, ValidationError};
