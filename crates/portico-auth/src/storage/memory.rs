//! In-memory client storage.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::AuthResult;
use crate::storage::ClientStorage;
use crate::types::{Client, ClientValidationError};

/// Client store backed by a concurrent map.
///
/// Lookups never block each other; registration is meant for startup
/// seeding and tests.
#[derive(Debug, Default)]
pub struct MemoryClientStorage {
    clients: DashMap<String, Client>,
}

impl MemoryClientStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given clients.
    ///
    /// # Errors
    ///
    /// Returns an error if any client fails validation.
    pub fn with_clients(
        clients: impl IntoIterator<Item = Client>,
    ) -> Result<Self, ClientValidationError> {
        let storage = Self::new();
        for client in clients {
            storage.register(client)?;
        }
        Ok(storage)
    }

    /// Registers (or replaces) a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client fails validation.
    pub fn register(&self, client: Client) -> Result<(), ClientValidationError> {
        client.validate()?;
        self.clients.insert(client.client_id.clone(), client);
        Ok(())
    }

    /// Returns the number of registered clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Returns `true` if no clients are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[async_trait]
impl ClientStorage for MemoryClientStorage {
    async fn find_by_client_id(&self, client_id: &str) -> AuthResult<Option<Client>> {
        Ok(self.clients.get(client_id).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_registered_client() {
        let storage =
            MemoryClientStorage::with_clients([Client::new("c1", ["https://app.example/cb"])])
                .unwrap();

        let client = storage.find_by_client_id("c1").await.unwrap().unwrap();
        assert_eq!(client.redirect_uris(), ["https://app.example/cb"]);
        assert!(storage.find_by_client_id("c2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_register_replaces() {
        let storage = MemoryClientStorage::new();
        storage
            .register(Client::new("c1", ["https://a.example/cb"]))
            .unwrap();
        storage
            .register(Client::new("c1", ["https://b.example/cb"]))
            .unwrap();

        assert_eq!(storage.len(), 1);
        let client = storage.find_by_client_id("c1").await.unwrap().unwrap();
        assert_eq!(client.redirect_uris(), ["https://b.example/cb"]);
    }

    #[test]
    fn test_register_rejects_invalid_client() {
        let storage = MemoryClientStorage::new();
        let result = storage.register(Client::new("", ["https://a.example/cb"]));
        assert_eq!(result, Err(ClientValidationError::EmptyClientId));
        assert!(storage.is_empty());
    }
}
