//! Axum handlers, one module per resource.
//!
//! A handler deserializes and validates the request, drives the matching
//! repository (opening a transaction when the operation mutates), and
//! serializes the response. Failures become [`crate::errors::Error`], which
//! renders as a JSON `{"error": ...}` body with the right status.
//!
//! - [`students`]: registration, listing, cascade deletion
//! - [`rooms`]: inventory and availability listings
//! - [`settlements`]: room assignment and eviction
//! - [`payments`]: payment recording and history
//! - [`statistics`]: dashboard totals
//! - [`static_assets`]: the embedded landing page

pub mod payments;
pub mod rooms;
pub mod settlements;
pub mod static_assets;
pub mod statistics;
pub mod students;
