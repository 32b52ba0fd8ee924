//! Row structs for query results and insert payloads.
//!
//! Each submodule mirrors one table ([`students`], [`rooms`], [`settlements`],
//! [`payments`]); [`statistics`] is the row shape of the dashboard aggregate
//! query rather than a table. Result structs derive `sqlx::FromRow`, and the
//! settlement listing additionally carries joined student and room columns.
//!
//! These stay separate from the wire types in [`crate::api::models`], with
//! `From` conversions where the two coincide, so the JSON contract can move
//! without a schema change and vice versa.

pub mod payments;
pub mod rooms;
pub mod settlements;
pub mod statistics;
pub mod students;
