//! API request and response data models.
//!
//! This module contains the data structures used for HTTP request deserialization
//! and response serialization. These models define the public API contract.
//!
//! # Design Principles
//!
//! - **Separation of Concerns**: API models are distinct from database models,
//!   allowing independent evolution of API and storage representations
//! - **OpenAPI**: All models are annotated with `utoipa` for automatic API docs
//! - **Wire casing**: request bodies are camelCase; list and row responses
//!   keep their snake_case column names; the statistics totals are camelCase.
//!   Clients were built against this mix, so it is part of the contract.
//!
//! # Model Categories
//!
//! - [`students`]: student profiles and creation requests
//! - [`rooms`]: room inventory and availability annotations
//! - [`settlements`]: room assignment requests and listings
//! - [`payments`]: payment records and per-student history
//! - [`statistics`]: dashboard totals

pub mod payments;
pub mod rooms;
pub mod settlements;
pub mod statistics;
pub mod students;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform acknowledgement body for mutations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MutationResponse {
    /// Always true; failures use the error shape instead
    pub success: bool,
    /// Human-readable confirmation
    pub message: String,
}

impl MutationResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
