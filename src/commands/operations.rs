use chrono::NaiveDate;

use super::{CommandError, Console};
use crate::models::{CaisseOperation, OperationType, OperationsQuery};
use crate::services::report_service::format_money;
use crate::utils::{Page, Table};

/// `$ops [page] [all] [type=<TYPE>] [date=YYYY-MM-DD] [search=<text>]`
///
/// Without filters the previous filters are reset, matching the reset button of
/// the operations tab.
pub async fn execute(console: &mut Console, args: &[&str]) -> Result<String, CommandError> {
    console.query = parse_args(args, console.selected)?;
    reload(console).await?;
    Ok(render(console))
}

/// `$next`
pub async fn next(console: &mut Console) -> Result<String, CommandError> {
    let next = console
        .operations
        .as_ref()
        .and_then(Page::next)
        .ok_or_else(|| CommandError::usage("Already on the last page"))?;
    console.query.page = next;
    reload(console).await?;
    Ok(render(console))
}

/// `$prev`
pub async fn previous(console: &mut Console) -> Result<String, CommandError> {
    let previous = console
        .operations
        .as_ref()
        .and_then(Page::previous)
        .ok_or_else(|| CommandError::usage("Already on the first page"))?;
    console.query.page = previous;
    reload(console).await?;
    Ok(render(console))
}

/// Fetch the page described by the console's current query
pub async fn reload(console: &mut Console) -> Result<(), CommandError> {
    let query = console.query.clone();
    match console.client.list_operations(&query).await {
        Ok(response) => {
            console.operations = Some(Page::from_response(query.page, response));
            Ok(())
        }
        Err(e) => {
            console.operations = None;
            console.notifier.error("Failed to fetch operations");
            Err(e.into())
        }
    }
}

pub fn parse_args(args: &[&str], selected: Option<i64>) -> Result<OperationsQuery, CommandError> {
    let mut query = OperationsQuery::for_caisse(selected);

    for arg in args {
        if *arg == "all" {
            query.caisse = None;
        } else if let Some(value) = arg.strip_prefix("type=") {
            let operation_type = OperationType::parse(value)
                .ok_or_else(|| CommandError::usage(format!("Unknown operation type: {}", value)))?;
            query.operation_type = Some(operation_type);
        } else if let Some(value) = arg.strip_prefix("date=") {
            let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                CommandError::usage(format!("Invalid date (expected YYYY-MM-DD): {}", value))
            })?;
            query.date = Some(date);
        } else if let Some(value) = arg.strip_prefix("search=") {
            query.search = Some(value.to_string());
        } else if let Ok(page) = arg.parse::<u32>() {
            query.page = page.max(1);
        } else {
            return Err(CommandError::usage(format!("Unknown filter: {}", arg)));
        }
    }

    Ok(query)
}

fn render(console: &Console) -> String {
    let Some(page) = &console.operations else {
        return String::new();
    };

    let scope = match console.query.caisse {
        Some(id) => console
            .caisses
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("#{}", id)),
        None => "all cash registers".to_string(),
    };

    if page.items.is_empty() {
        return format!("📜 No operations found for {}", scope);
    }

    format!(
        "📜 Operations for {}\n{}\n{}",
        scope,
        render_table(&page.items).trim_end(),
        page.footer()
    )
}

pub fn render_table(operations: &[CaisseOperation]) -> String {
    let mut table = Table::new(vec!["Date", "Type", "Amount", "Balance after", "By", "Description"])
        .align_right(2)
        .align_right(3);

    for op in operations {
        table.add_row(vec![
            op.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            op.operation_type.as_str().to_string(),
            format_money(op.amount),
            format_money(op.balance_after),
            op.performed_by_username.clone().unwrap_or_else(|| "-".to_string()),
            op.description.clone().unwrap_or_default(),
        ]);
    }

    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_selected_caisse() {
        let query = parse_args(&[], Some(3)).unwrap();
        assert_eq!(query, OperationsQuery::for_caisse(Some(3)));
    }

    #[test]
    fn parses_every_filter() {
        let args = ["2", "all", "type=withdrawal", "date=2026-10-19", "search=float"];
        let query = parse_args(&args, Some(3)).unwrap();

        assert_eq!(query.page, 2);
        assert_eq!(query.caisse, None);
        assert_eq!(query.operation_type, Some(OperationType::Withdrawal));
        assert_eq!(query.date, NaiveDate::from_ymd_opt(2026, 10, 19));
        assert_eq!(query.search.as_deref(), Some("float"));
    }

    #[test]
    fn rejects_bad_filters() {
        assert!(parse_args(&["type=refund"], None).is_err());
        assert!(parse_args(&["date=19/10/2026"], None).is_err());
        assert!(parse_args(&["sideways"], None).is_err());
    }
}
