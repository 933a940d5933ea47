pub mod client;
pub mod gateway;
pub mod models;

pub use client::CaisseClient;
pub use gateway::CaisseGateway;
pub use models::{ApiError, Listing};
