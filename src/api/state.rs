//! Application state for the shift roster API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use crate::db::Store;

/// Shared application state.
///
/// Holds the store handle every resource operation goes through. Cloning
/// is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct AppState {
    store: Store,
}

impl AppState {
    /// Creates a new application state around a connected store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Returns the store.
    pub fn store(&self) -> &Store {
        &self.store
    }
}
