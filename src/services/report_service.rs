use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::models::{CaisseOperation, OperationType, ReportSummary};
use crate::utils::Table;

/// Aggregate a page of operations relative to `now` (local time)
pub fn summarize<Tz: TimeZone>(operations: &[CaisseOperation], now: DateTime<Tz>) -> ReportSummary {
    let mut summary = ReportSummary::default();

    let today_start = start_of_day(&now);
    let week_start = start_of_day(&(now.clone() - Duration::days(7)));

    for op in operations {
        match op.operation_type {
            OperationType::Deposit => summary.total_deposits += op.amount,
            OperationType::Withdrawal => summary.total_withdrawals += op.amount,
            _ => {}
        }

        if op.timestamp >= today_start {
            summary.today_operations += 1;
        }
        if op.timestamp >= week_start {
            summary.weekly_operations += 1;
        }

        let key = match op.operation_type {
            OperationType::Other if !op.operation_type_display.trim().is_empty() => {
                op.operation_type_display.trim()
            }
            _ => op.operation_type.as_str(),
        };
        *summary.operations_by_type.entry(key.to_string()).or_insert(0) += 1;
    }

    // Withdrawals are stored as negative amounts by some backends
    summary.total_withdrawals = summary.total_withdrawals.abs();
    summary
}

/// Convenience wrapper using the machine's local clock
pub fn summarize_now(operations: &[CaisseOperation]) -> ReportSummary {
    summarize(operations, Local::now())
}

/// Midnight of the given instant's calendar day, in its own time zone
fn start_of_day<Tz: TimeZone>(at: &DateTime<Tz>) -> DateTime<Utc> {
    let midnight = at.date_naive().and_time(NaiveTime::MIN);
    at.timezone()
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

pub fn render_report(summary: &ReportSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "📊 Total deposits:    {}\n",
        format_money(summary.total_deposits)
    ));
    output.push_str(&format!(
        "📊 Total withdrawals: {}\n",
        format_money(summary.total_withdrawals)
    ));
    output.push_str(&format!(
        "📅 Today: {} operation(s), last 7 days: {}\n",
        summary.today_operations, summary.weekly_operations
    ));

    if !summary.operations_by_type.is_empty() {
        let mut table = Table::new(vec!["Type", "Count"]);
        for (ty, count) in &summary.operations_by_type {
            table.add_row(vec![ty.clone(), count.to_string()]);
        }
        output.push_str(&table.render());
    }

    output
}

/// Two-decimal currency rendering
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}
