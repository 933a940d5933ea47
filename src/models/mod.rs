//! Data models for the caisse console
//!
//! Transfer dialog state, the cash register shapes exchanged with the backend,
//! operations queries, report aggregates and notifications.

pub mod caisse;
pub mod notification;
pub mod query;
pub mod report;
pub mod transfer;

// Re-export commonly used types for convenience
pub use caisse::{
    Caisse, CaisseDetail, CaisseOperation, CreateCaisseRequest, OperationType, PaginatedResponse,
    TransferRequest, TransferResponse,
};
pub use notification::{Notification, NotificationKind};
pub use query::{OperationsQuery, OPERATIONS_PAGE_SIZE};
pub use report::ReportSummary;
pub use transfer::{PendingTransfer, TransferBounds, TransferDirection, TransferDraft};
