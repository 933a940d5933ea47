//! Report models

use std::collections::BTreeMap;
use rust_decimal::Decimal;

/// Aggregates computed over the currently loaded page of operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub total_deposits: Decimal,
    /// Always reported as a positive magnitude
    pub total_withdrawals: Decimal,
    pub today_operations: usize,
    pub weekly_operations: usize,
    pub operations_by_type: BTreeMap<String, usize>,
}
