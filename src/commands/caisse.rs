use tracing::debug;

use super::{CommandError, Console};
use crate::models::Caisse;
use crate::services::report_service::format_money;
use crate::utils::Table;

/// `$caisses` - list cash registers and select the first one if none is selected
pub async fn list(console: &mut Console) -> Result<String, CommandError> {
    refresh(console).await?;

    if console.caisses.is_empty() {
        return Ok("No cash registers yet. Create one with `$create <name>`".to_string());
    }

    let mut table = Table::new(vec!["", "ID", "Name", "Balance", "Last updated"]).align_right(3);
    for caisse in &console.caisses {
        let marker = if Some(caisse.id) == console.selected { "*" } else { "" };
        table.add_row(vec![
            marker.to_string(),
            caisse.id.to_string(),
            caisse.name.clone(),
            format_money(caisse.current_balance),
            caisse.last_updated.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    Ok(format!("🏦 Cash Registers\n{}", table.render().trim_end()))
}

/// `$caisse <id>` - select a cash register and show its recent operations
pub async fn show(console: &mut Console, args: &[&str]) -> Result<String, CommandError> {
    let caisse_id = resolve_id(console, args)?;
    let detail = console.client.get_caisse(caisse_id).await?;

    remember(console, detail.caisse.clone());
    console.selected = Some(detail.caisse.id);
    console.query.caisse = Some(detail.caisse.id);
    console.query.page = 1;
    console.operations = None;

    let mut output = format!(
        "🏦 {} (#{})\nCurrent Balance: {}\nLast updated: {}",
        detail.caisse.name,
        detail.caisse.id,
        format_money(detail.caisse.current_balance),
        detail.caisse.last_updated.format("%Y-%m-%d %H:%M")
    );

    if !detail.operations.is_empty() {
        output.push_str("\nRecent operations:\n");
        output.push_str(super::operations::render_table(&detail.operations).trim_end());
    }

    Ok(output)
}

/// `$create <name>`
pub async fn create(console: &mut Console, args: &[&str]) -> Result<String, CommandError> {
    let name = args.join(" ");
    if name.trim().is_empty() {
        return Err(CommandError::usage("Please enter a name for the cash register"));
    }

    let caisse = console.client.create_caisse(&name).await?;
    debug!("Created caisse {} ({})", caisse.id, caisse.name);

    refresh(console).await?;
    console
        .notifier
        .success(format!("Successfully created cash register \"{}\"", caisse.name));

    Ok(format!("🏦 {} created with id {}", caisse.name, caisse.id))
}

/// Reload the cached cash register list
pub async fn refresh(console: &mut Console) -> Result<(), CommandError> {
    let caisses = console.client.list_caisses().await?;
    console.caisses = caisses;

    let still_exists = console
        .selected
        .is_some_and(|id| console.caisses.iter().any(|c| c.id == id));
    if !still_exists {
        console.selected = console.caisses.first().map(|c| c.id);
        console.query.caisse = console.selected;
    }
    Ok(())
}

/// Store a freshly fetched caisse in the cache
pub fn remember(console: &mut Console, caisse: Caisse) {
    match console.caisses.iter_mut().find(|c| c.id == caisse.id) {
        Some(cached) => *cached = caisse,
        None => console.caisses.push(caisse),
    }
}

/// Caisse id from the first argument, falling back to the selected caisse
pub fn resolve_id(console: &Console, args: &[&str]) -> Result<i64, CommandError> {
    match args.first() {
        Some(raw) => raw
            .trim_start_matches('#')
            .parse::<i64>()
            .map_err(|_| CommandError::usage(format!("Invalid cash register id: {}", raw))),
        None => console.selected.ok_or_else(|| {
            CommandError::usage("No cash register selected. Use `$caisses` or pass an id")
        }),
    }
}
