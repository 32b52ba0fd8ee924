//! Shared repository surface for table-backed entities.

use crate::db::errors::Result;

/// Uniform create / fetch / list / delete surface over one table.
///
/// Listings take no filter and no pagination: every listing endpoint in this
/// API returns the whole table. Only entities with a full lifecycle implement
/// the trait; append-only and immutable tables expose bespoke methods
/// instead.
#[async_trait::async_trait]
pub trait Repository {
    /// Payload accepted when inserting a new row
    type CreateRequest;

    /// Row shape returned to callers
    type Response;

    /// Key used for point lookups and deletes
    type Id: Send + Sync;

    /// Insert a new entity and return the stored row
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Fetch one entity, or None when the id matches nothing
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// Fetch the whole table
    async fn list(&mut self) -> Result<Vec<Self::Response>>;

    /// Remove an entity, reporting whether it existed
    async fn delete(&mut self, id: Self::Id) -> Result<bool>;
}
