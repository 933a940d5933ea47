//! Cash register (caisse) console for the SmartStore point-of-sale backend.
//!
//! The heart of the crate is the bounded amount transfer dialog:
//! [`services::validation_service`] validates deposit/withdrawal amounts and
//! [`services::transfer_service::TransferDialog`] drives a draft through
//! validation, submission to a [`services::TransferGateway`] and reset/close.
//! [`api::caisse`] provides the REST client and the production gateway, and
//! [`commands`] exposes everything as a line-oriented console.

pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;
