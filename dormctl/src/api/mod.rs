//! HTTP surface: route handlers and the JSON types they speak.
//!
//! [`handlers`] holds the Axum handlers, grouped by resource; [`models`]
//! holds the request and response bodies. The routes themselves are wired
//! up in the crate root under the `/api` prefix:
//!
//! - `/api/students*`: registration, listing, cascade deletion
//! - `/api/rooms*`: inventory and availability
//! - `/api/settlements*`: room assignment and eviction
//! - `/api/payments*`: payment records and per-student history
//! - `/api/statistics`: dashboard totals
//!
//! Every endpoint carries `utoipa` annotations; the rendered documentation
//! is served at `/docs`.

pub mod handlers;
pub mod models;
