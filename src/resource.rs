//! Capability traits for the resources exposed over HTTP.
//!
//! Each resource type implements [`Resource`] plus one trait per operation
//! it supports. The HTTP layer builds its routes from these traits alone,
//! so both resources share one set of handlers.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::db::Store;
use crate::error::RosterResult;
use crate::models::UpdateMode;

/// A record type with a collection path and a request payload.
pub trait Resource: Send + Sync + Sized + 'static {
    /// Singular name used in errors and logs (e.g. `"employee"`).
    const NAME: &'static str;
    /// Collection path segment (e.g. `"employees"`).
    const PATH: &'static str;

    /// The serialized representation returned to clients.
    type Record: Serialize + Send;
    /// The request body accepted by create and update.
    type Payload: DeserializeOwned + Send;

    /// Returns the handle for this resource from the store.
    fn from_store(store: &Store) -> Self;
}

/// Lists every record of a resource.
#[async_trait]
pub trait Listable: Resource {
    /// Returns all records ordered by identifier.
    async fn list(&self) -> RosterResult<Vec<Self::Record>>;
}

/// Looks up a single record.
#[async_trait]
pub trait Retrievable: Resource {
    /// Returns the record with `id`, or `NotFound`.
    async fn retrieve(&self, id: i32) -> RosterResult<Self::Record>;
}

/// Creates records from a payload.
#[async_trait]
pub trait Creatable: Resource {
    /// Validates a full payload and stores a new record.
    async fn create(&self, payload: Self::Payload) -> RosterResult<Self::Record>;
}

/// Replaces or patches an existing record.
#[async_trait]
pub trait Updatable: Resource {
    /// Applies the payload to record `id`.
    ///
    /// With [`UpdateMode::Full`] every writable field is required; with
    /// [`UpdateMode::Partial`] only the fields present are replaced.
    async fn update(
        &self,
        id: i32,
        payload: Self::Payload,
        mode: UpdateMode,
    ) -> RosterResult<Self::Record>;
}

/// Removes records.
#[async_trait]
pub trait Deletable: Resource {
    /// Deletes record `id`, or returns `NotFound`.
    async fn delete(&self, id: i32) -> RosterResult<()>;
}
