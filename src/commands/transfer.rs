use tracing::{info, warn};

use super::{caisse, operations, ActiveDialog, CommandError, Console, Step, TransferFuture};
use crate::api::caisse::CaisseGateway;
use crate::models::{TransferBounds, TransferDirection};
use crate::services::report_service::format_money;
use crate::services::{
    Completion, DialogState, GatewayError, SubmitOutcome, TransferDialog, TransferGateway,
};

const DIALOG_USAGE: &str =
    "In dialog: `amount <value>`, `desc <text>`, `show`, `submit` or `cancel`";

/// `$deposit [caisse id]` / `$withdraw [caisse id]`
///
/// The withdrawal limit is the balance fetched here and stays fixed until the
/// dialog closes.
pub async fn open(
    console: &mut Console,
    direction: TransferDirection,
    args: &[&str],
) -> Result<String, CommandError> {
    let caisse_id = caisse::resolve_id(console, args)?;
    let detail = console.client.get_caisse(caisse_id).await?;
    let caisse = detail.caisse;
    caisse::remember(console, caisse.clone());

    let bounds = match direction {
        TransferDirection::Deposit => TransferBounds::unbounded(),
        TransferDirection::Withdrawal => TransferBounds::up_to(caisse.current_balance),
    };

    let mut dialog = TransferDialog::new(direction);
    dialog.open(bounds);

    let active = ActiveDialog {
        caisse,
        dialog,
        pending: None,
    };
    let mut output = render(&active);
    if !active.dialog.can_submit() {
        output.push_str(
            "\n⚠️ The balance is empty, nothing can be withdrawn. Type `cancel` to close.",
        );
    }
    console.dialog = Some(active);

    Ok(output)
}

/// Input typed while a dialog is open
pub fn handle_dialog_input(
    console: &mut Console,
    command: &str,
    line: &str,
) -> Result<Step, CommandError> {
    let Some(active) = console.dialog.as_mut() else {
        return Err(CommandError::usage("No dialog is open"));
    };
    let rest = argument_text(line, command);

    match command.to_lowercase().as_str() {
        "amount" => {
            if active.dialog.state() == DialogState::Submitting {
                return Ok(Step::say("⏳ The transfer is being submitted"));
            }
            active.dialog.set_amount(rest);
            Ok(Step::say(format!("Amount: {}", rest)))
        }
        "desc" | "description" => {
            if active.dialog.state() == DialogState::Submitting {
                return Ok(Step::say("⏳ The transfer is being submitted"));
            }
            active.dialog.set_description(rest);
            Ok(Step::say(format!("Description: {}", rest)))
        }
        "show" => Ok(Step::say(render(active))),
        "submit" => {
            if active.dialog.state() == DialogState::Open && !active.dialog.can_submit() {
                return Err(CommandError::usage("The balance is empty, nothing can be withdrawn"));
            }

            match active.dialog.begin_submit() {
                SubmitOutcome::Ignored => Ok(Step::say("⏳ Submission already in progress")),
                SubmitOutcome::Invalid(_) => {
                    let error = active.dialog.draft().error.clone().unwrap_or_default();
                    Ok(Step::say(format!("❌ {}", error)))
                }
                SubmitOutcome::Started(pending) => {
                    let gateway = CaisseGateway::new(
                        console.client.clone(),
                        active.caisse.id,
                        pending.direction,
                    );
                    let amount = pending.amount;
                    let description = pending.description.clone();
                    let transfer: TransferFuture =
                        Box::pin(async move { gateway.transfer(amount, &description).await });

                    let output = format!(
                        "⏳ Submitting {} of {} on {}...",
                        pending.direction.label().to_lowercase(),
                        format_money(amount),
                        active.caisse.name
                    );
                    active.pending = Some(pending);

                    Ok(Step {
                        output,
                        transfer: Some(transfer),
                        quit: false,
                    })
                }
            }
        }
        "cancel" => {
            if active.dialog.cancel() {
                console.dialog = None;
                Ok(Step::say("Dialog closed"))
            } else {
                Ok(Step::say("⏳ Cannot cancel while the transfer is being submitted"))
            }
        }
        _ => Err(CommandError::usage(DIALOG_USAGE)),
    }
}

/// Apply the gateway result; on success refresh the cached balances
pub async fn finish(console: &mut Console, result: Result<bool, GatewayError>) -> String {
    let Some(active) = console.dialog.as_mut() else {
        warn!("Transfer finished with no open dialog");
        return String::new();
    };

    match active.dialog.complete_submit(result) {
        Completion::Closed => {
            let pending = active.pending.take();
            let caisse_name = active.caisse.name.clone();
            console.dialog = None;

            if let Some(pending) = pending {
                info!("{} {} on {}", pending.direction.label(), pending.amount, caisse_name);
                console.notifier.success(format!(
                    "Successfully {} {}",
                    pending.direction.past_tense(),
                    format_money(pending.amount)
                ));
            }
            // Shown now, the refreshes below may outlive the notification
            let confirmation = console
                .notifier
                .take()
                .map(|notification| notification.to_string())
                .unwrap_or_default();

            if let Err(e) = caisse::refresh(console).await {
                warn!("Failed to refresh cash registers: {}", e);
            }
            if console.operations.is_some() {
                if let Err(e) = operations::reload(console).await {
                    warn!("Failed to refresh operations: {}", e);
                }
            }
            confirmation
        }
        Completion::Failed => {
            active.pending = None;
            let error = active.dialog.draft().error.clone().unwrap_or_default();
            format!("❌ {}\nYour amount is kept: type `submit` to retry or `cancel`", error)
        }
        Completion::Ignored => String::new(),
    }
}

fn render(active: &ActiveDialog) -> String {
    let dialog = &active.dialog;
    let draft = dialog.draft();

    let mut output = match dialog.direction() {
        TransferDirection::Deposit => format!("💵 Deposit Funds into {}", active.caisse.name),
        TransferDirection::Withdrawal => format!("💸 Withdraw Funds from {}", active.caisse.name),
    };
    output.push_str(&format!(
        "\nCurrent Balance: {}",
        format_money(active.caisse.current_balance)
    ));
    let bounds = dialog.bounds();
    let limits = match bounds.max_amount {
        Some(max) => format!("{} to {}", format_money(bounds.min_amount), format_money(max)),
        None => format!("{} or more", format_money(bounds.min_amount)),
    };
    output.push_str(&format!("\nAllowed: {}", limits));
    output.push_str(&format!("\nAmount: {}", display_or_dash(&draft.amount_text)));
    output.push_str(&format!("\nDescription: {}", display_or_dash(&draft.description)));
    if let Some(error) = &draft.error {
        output.push_str(&format!("\n❌ {}", error));
    }
    if draft.submitting {
        output.push_str("\n⏳ Submitting...");
    }
    output.push('\n');
    output.push_str(DIALOG_USAGE);
    output
}

fn display_or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

/// Everything after the leading keyword, with surrounding whitespace removed
fn argument_text<'a>(line: &'a str, command: &str) -> &'a str {
    line.trim_start()
        .strip_prefix(command)
        .unwrap_or_default()
        .trim()
}
