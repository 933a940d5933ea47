//! Operations history query models

use chrono::{Duration, NaiveDate};
use super::caisse::OperationType;

/// Number of operations the backend returns per page
pub const OPERATIONS_PAGE_SIZE: u64 = 10;

/// Filters for `GET /caisse-operations/`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationsQuery {
    pub page: u32,
    /// `None` lists operations across every caisse
    pub caisse: Option<i64>,
    pub operation_type: Option<OperationType>,
    /// Restricts to a single calendar day
    pub date: Option<NaiveDate>,
    /// Matched against description and reference id by the backend
    pub search: Option<String>,
}

impl OperationsQuery {
    pub fn for_caisse(caisse: Option<i64>) -> Self {
        OperationsQuery {
            page: 1,
            caisse,
            ..Default::default()
        }
    }

    /// Query string pairs in the order the backend documents them.
    ///
    /// A day filter becomes `start_date=<day>` and `end_date=<day + 1>`.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.max(1).to_string())];

        if let Some(caisse) = self.caisse {
            params.push(("caisse", caisse.to_string()));
        }
        if let Some(operation_type) = &self.operation_type {
            params.push(("operation_type", operation_type.as_str().to_string()));
        }
        if let Some(date) = self.date {
            params.push(("start_date", date.format("%Y-%m-%d").to_string()));
            let next_day = date + Duration::days(1);
            params.push(("end_date", next_day.format("%Y-%m-%d").to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("search", search.trim().to_string()));
        }

        params
    }
}
