//! One repository per table, plus the read-only statistics queries.
//!
//! A repository is a thin struct over `&mut PgConnection` that owns every
//! query touching its table and hands back row models from
//! [`crate::db::models`]. Construction is free; scope one to the connection
//! or transaction you are already holding.
//!
//! - [`Students`]: the roster, including the cascade delete
//! - [`Rooms`]: room inventory and availability
//! - [`Settlements`]: room assignment and eviction (the one piece of real
//!   business logic, see [`settlements`])
//! - [`Payments`]: the append-only payment ledger
//! - [`Statistics`]: aggregate counts for the dashboard
//!
//! [`Repository`] names the uniform create / get / list / delete surface.
//! Only [`Students`] implements it in full; the other repositories have
//! bespoke shapes (rooms are immutable, settlements are created through the
//! assignment flow, payments are never deleted) and skip the trait rather
//! than stub out operations that must not exist.

pub mod payments;
pub mod repository;
pub mod rooms;
pub mod settlements;
pub mod statistics;
pub mod students;

pub use payments::Payments;
pub use repository::Repository;
pub use rooms::Rooms;
pub use settlements::Settlements;
pub use statistics::Statistics;
pub use students::Students;
