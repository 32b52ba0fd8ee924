//! Persistence layer: repositories, row models, and error classification.
//!
//! Everything below the HTTP handlers talks to PostgreSQL through SQLx. Each
//! table has a repository in [`handlers`] that owns its queries, the row
//! structs it returns live in [`models`], and [`errors`] classifies driver
//! errors into the constraint categories the API layer maps to responses.
//!
//! # Working with repositories
//!
//! A repository borrows a `&mut PgConnection`, so the caller decides the
//! transaction scope. Mutations go through a transaction; plain reads can run
//! on an acquired connection:
//!
//! ```ignore
//! use dormctl::db::handlers::{Repository, Students};
//!
//! async fn example(pool: &sqlx::PgPool) -> anyhow::Result<()> {
//!     let mut tx = pool.begin().await?;
//!     let student = Students::new(&mut tx).create(&request).await?;
//!     tx.commit().await?;
//!     println!("registered {}", student.name);
//!     Ok(())
//! }
//! ```
//!
//! Operations that must be atomic on their own (settling a student into a
//! room, the cascade delete of a student) open a transaction internally; when
//! the caller already holds one, that inner transaction nests as a savepoint.
//!
//! # Schema
//!
//! Migrations live in `migrations/` and run on startup via
//! [`crate::migrator`]. Four tables: `students`, `rooms`, `settlements`, and
//! `payments`, with the settlement and payment tables referencing students
//! and the settlement table additionally enforcing one row per student.

pub mod errors;
pub mod handlers;
pub mod models;
