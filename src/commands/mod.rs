pub mod caisse;
pub mod help;
pub mod operations;
pub mod report;
pub mod transfer;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error};

use crate::api::caisse::{ApiError, CaisseClient};
use crate::models::{Caisse, CaisseOperation, OperationsQuery, PendingTransfer, TransferDirection};
use crate::services::{GatewayError, Notifier, TransferDialog};
use crate::utils::Page;

/// Gateway call running while the dialog sits in `Submitting`
pub type TransferFuture = Pin<Box<dyn Future<Output = Result<bool, GatewayError>> + Send>>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CommandError {
    pub fn usage(msg: impl Into<String>) -> Self {
        CommandError::Usage(msg.into())
    }

    fn user_message(&self) -> String {
        match self {
            CommandError::Usage(msg) => msg.clone(),
            CommandError::Api(e) => e.user_message(),
        }
    }
}

/// What the event loop must do after a line was handled
#[derive(Default)]
pub struct Step {
    pub output: String,
    /// Gateway call to await alongside further input
    pub transfer: Option<TransferFuture>,
    pub quit: bool,
}

impl Step {
    fn say(output: impl Into<String>) -> Self {
        Step {
            output: output.into(),
            ..Default::default()
        }
    }
}

/// The transfer dialog currently shown, bound to one caisse
pub struct ActiveDialog {
    pub caisse: Caisse,
    pub dialog: TransferDialog,
    /// Submission handed to the gateway, kept for the success message
    pub pending: Option<PendingTransfer>,
}

/// Interactive cash register console state
pub struct Console {
    pub(crate) client: Arc<CaisseClient>,
    pub(crate) notifier: Notifier,
    pub(crate) caisses: Vec<Caisse>,
    pub(crate) selected: Option<i64>,
    pub(crate) dialog: Option<ActiveDialog>,
    pub(crate) query: OperationsQuery,
    pub(crate) operations: Option<Page<CaisseOperation>>,
}

impl Console {
    pub fn new(client: Arc<CaisseClient>, notifier: Notifier) -> Self {
        Console {
            client,
            notifier,
            caisses: Vec::new(),
            selected: None,
            dialog: None,
            query: OperationsQuery::for_caisse(None),
            operations: None,
        }
    }

    pub fn selected_caisse(&self) -> Option<&Caisse> {
        let id = self.selected?;
        self.caisses.iter().find(|c| c.id == id)
    }

    pub fn dialog(&self) -> Option<&ActiveDialog> {
        self.dialog.as_ref()
    }

    /// Handle one input line
    pub async fn handle_line(&mut self, line: &str) -> Step {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Step::default();
        };

        let result = if self.dialog.is_some() && !command.starts_with('$') {
            transfer::handle_dialog_input(self, command, line)
        } else {
            self.dispatch(command, args).await
        };

        let mut step = match result {
            Ok(step) => step,
            Err(e) => {
                error!("Error executing command {}: {}", command, e);
                Step::say(format!("❌ {}", e.user_message()))
            }
        };

        if let Some(notification) = self.notifier.take() {
            if !step.output.is_empty() {
                step.output.push('\n');
            }
            step.output.push_str(&notification.to_string());
        }

        step
    }

    async fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<Step, CommandError> {
        debug!("Dispatching {} {:?}", command, args);

        if self.dialog.is_some() && !matches!(command, "$help" | "$quit" | "$exit") {
            return Err(CommandError::usage(
                "Finish the open dialog first (`submit` or `cancel`)",
            ));
        }

        let output = match command {
            "$help" => help::execute(),
            "$caisses" | "$list" => caisse::list(self).await?,
            "$caisse" | "$select" => caisse::show(self, args).await?,
            "$create" => caisse::create(self, args).await?,
            "$deposit" => transfer::open(self, TransferDirection::Deposit, args).await?,
            "$withdraw" => transfer::open(self, TransferDirection::Withdrawal, args).await?,
            "$ops" | "$operations" => operations::execute(self, args).await?,
            "$next" => operations::next(self).await?,
            "$prev" => operations::previous(self).await?,
            "$report" => report::execute(self).await?,
            "$quit" | "$exit" => {
                return Ok(Step {
                    output: "👋 Bye".to_string(),
                    transfer: None,
                    quit: true,
                })
            }
            _ => {
                return Err(CommandError::usage(format!(
                    "Unknown command `{}`. Try `$help`",
                    command
                )))
            }
        };

        Ok(Step::say(output))
    }

    /// Apply a finished gateway call to the open dialog
    pub async fn finish_transfer(&mut self, result: Result<bool, GatewayError>) -> String {
        let output = transfer::finish(self, result).await;
        match self.notifier.take() {
            Some(notification) if output.is_empty() => notification.to_string(),
            Some(notification) => format!("{}\n{}", output, notification),
            None => output,
        }
    }
}

async fn wait_transfer(in_flight: &mut Option<TransferFuture>) -> Result<bool, GatewayError> {
    match in_flight.as_mut() {
        Some(transfer) => transfer.await,
        None => std::future::pending().await,
    }
}

/// Read commands line by line until EOF or `$quit`.
///
/// Input keeps being processed while a transfer is in flight, so a repeated
/// `submit` reaches the dialog's latch instead of queueing behind the request.
pub async fn run<R>(console: &mut Console, reader: R)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut in_flight: Option<TransferFuture> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        break;
                    }
                };

                let step = console.handle_line(&line).await;
                if !step.output.is_empty() {
                    println!("{}", step.output);
                }
                if let Some(transfer) = step.transfer {
                    in_flight = Some(transfer);
                }
                if step.quit {
                    break;
                }
            }
            result = wait_transfer(&mut in_flight) => {
                in_flight = None;
                let output = console.finish_transfer(result).await;
                if !output.is_empty() {
                    println!("{}", output);
                }
            }
        }
    }

    // Let a pending transfer settle so the ledger and the console agree
    if let Some(transfer) = in_flight {
        let output = console.finish_transfer(transfer.await).await;
        if !output.is_empty() {
            println!("{}", output);
        }
    }
}
