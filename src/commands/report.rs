use super::{operations, CommandError, Console};
use crate::services::report_service;

/// `$report` - summary of the loaded operations page, loading it first if needed
pub async fn execute(console: &mut Console) -> Result<String, CommandError> {
    if console.operations.is_none() {
        operations::reload(console).await?;
    }

    let items = console
        .operations
        .as_ref()
        .map(|page| page.items.as_slice())
        .unwrap_or_default();

    if items.is_empty() {
        return Ok("📊 No operations to report on".to_string());
    }

    let summary = report_service::summarize_now(items);
    Ok(format!("📊 Report\n{}", report_service::render_report(&summary).trim_end()))
}
