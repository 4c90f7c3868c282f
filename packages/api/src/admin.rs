//! # User administration
//!
//! [`UserDirectory`] holds the list shown on the admin screen. The list only
//! changes by re-fetching it from the backend; a failed fetch keeps the
//! previous list.
//!
//! Only users in the fetched list can be deleted; the list is re-fetched first
//! when `id` is not in it, so the protected account is always recognised.
//!
//! Deleting is a two-step operation when a secondary backend is configured:
//! the primary delete runs first and must succeed, then the secondary one. A
//! deletion cannot be undone through the API, so a failing secondary step is
//! reported as [`ApiError::PartialDelete`] instead of being rolled back.

use crate::client::BackendClient;
use crate::error::ApiError;
use crate::models::UserRecord;
use crate::transport::Transport;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDirectory {
    users: Vec<UserRecord>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn get(&self, id: u64) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Replace the list with the backend's. On error the old list stays.
    pub async fn refresh<T: Transport>(
        &mut self,
        client: &BackendClient<T>,
    ) -> Result<(), ApiError> {
        match client.fetch_users().await {
            Ok(users) => {
                tracing::debug!("Fetched {} users", users.len());
                self.users = users;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error fetching users: {}", e);
                Err(e)
            }
        }
    }

    /// Delete `id` and refresh the list.
    pub async fn delete<T: Transport>(
        &mut self,
        client: &BackendClient<T>,
        id: u64,
    ) -> Result<(), ApiError> {
        if self.get(id).is_none() {
            self.refresh(client).await?;
        }
        let Some(user) = self.get(id) else {
            tracing::warn!("Refusing to delete unknown user {}", id);
            return Err(ApiError::UnknownUser(id));
        };
        if !user.can_delete() {
            return Err(ApiError::Protected(user.username.clone()));
        }

        if let Err(e) = client.delete_user(id).await {
            tracing::error!("Error deleting user {}: {}", id, e);
            return Err(e);
        }
        tracing::info!("User {} deleted", id);

        let secondary = client.delete_secondary(id).await;
        let refreshed = self.refresh(client).await;

        if let Err(e) = secondary {
            tracing::error!("User {} left behind on the secondary backend: {}", id, e);
            return Err(ApiError::PartialDelete {
                id,
                reason: e.to_string(),
            });
        }
        refreshed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::transport::{Method, MemoryTransport};

    fn setup(secondary: bool) -> (MemoryTransport, BackendClient<MemoryTransport>) {
        let transport = MemoryTransport::new();
        let mut config = AppConfig::default();
        config.backend.url = "http://primary.test".to_string();
        if secondary {
            config.backend.secondary_url = "http://secondary.test".to_string();
        }
        let client = BackendClient::new(transport.clone(), &config);
        (transport, client)
    }

    #[tokio::test]
    async fn test_delete_refetches_list() {
        let (transport, client) = setup(false);
        transport.add_user("admin", "adminpass1");
        let bob = transport.add_user("bob", "bobpass12");
        transport.add_user("carol", "carolpass1");

        let mut directory = UserDirectory::new();
        directory.refresh(&client).await.unwrap();
        assert_eq!(directory.users().len(), 3);

        directory.delete(&client, bob.id).await.unwrap();
        assert_eq!(directory.users().len(), 2);
        assert!(directory.get(bob.id).is_none());

        let requests = transport.requests();
        assert_eq!(
            requests.last(),
            Some(&(Method::GET, "/users".to_string()))
        );
    }

    #[tokio::test]
    async fn test_admin_is_protected() {
        let (transport, client) = setup(false);
        let admin = transport.add_user("admin", "adminpass1");

        let mut directory = UserDirectory::new();
        directory.refresh(&client).await.unwrap();
        assert!(!directory.users()[0].can_delete());

        let err = directory.delete(&client, admin.id).await.unwrap_err();
        assert_eq!(err, ApiError::Protected("admin".to_string()));
        assert_eq!(transport.users().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let (transport, client) = setup(false);
        transport.add_user("bob", "bobpass12");

        let mut directory = UserDirectory::new();
        directory.refresh(&client).await.unwrap();

        transport.set_offline(true);
        assert!(matches!(
            directory.refresh(&client).await,
            Err(ApiError::Request(_))
        ));
        assert_eq!(directory.users().len(), 1);
    }

    #[tokio::test]
    async fn test_admin_is_protected_before_first_fetch() {
        let (transport, client) = setup(true);
        let admin = transport.add_user("admin", "adminpass1");

        let mut directory = UserDirectory::new();
        let err = directory.delete(&client, admin.id).await.unwrap_err();
        assert_eq!(err, ApiError::Protected("admin".to_string()));
        assert_eq!(transport.users(), vec![admin]);
        assert!(transport.secondary_deleted().is_empty());
        assert!(!transport
            .requests()
            .iter()
            .any(|(method, _)| *method == Method::DELETE));
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_deleted() {
        let (transport, client) = setup(true);
        transport.add_user("bob", "bobpass12");

        let mut directory = UserDirectory::new();
        let err = directory.delete(&client, 99).await.unwrap_err();
        assert_eq!(err, ApiError::UnknownUser(99));
        assert_eq!(directory.users().len(), 1);
        assert!(!transport
            .requests()
            .iter()
            .any(|(method, _)| *method == Method::DELETE));
    }

    #[tokio::test]
    async fn test_unreachable_backend_deletes_nothing() {
        let (transport, client) = setup(true);
        let admin = transport.add_user("admin", "adminpass1");
        transport.set_offline(true);

        let mut directory = UserDirectory::new();
        let err = directory.delete(&client, admin.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Request(_)));
        transport.set_offline(false);
        assert_eq!(transport.users().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_primary_delete_skips_secondary() {
        let (transport, client) = setup(true);
        let bob = transport.add_user("bob", "bobpass12");
        let mut directory = UserDirectory::new();
        directory.refresh(&client).await.unwrap();

        transport.set_offline(true);
        let err = directory.delete(&client, bob.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Request(_)));
        assert!(transport.secondary_deleted().is_empty());
        assert_eq!(directory.users().len(), 1);
    }

    #[tokio::test]
    async fn test_secondary_delete() {
        let (transport, client) = setup(true);
        let bob = transport.add_user("bob", "bobpass12");
        let carol = transport.add_user("carol", "carolpass1");
        let mut directory = UserDirectory::new();
        directory.refresh(&client).await.unwrap();

        directory.delete(&client, bob.id).await.unwrap();
        assert_eq!(transport.secondary_deleted(), vec![bob.id]);

        transport.set_secondary_offline(true);
        let err = directory.delete(&client, carol.id).await.unwrap_err();
        assert!(matches!(err, ApiError::PartialDelete { id, .. } if id == carol.id));
        // The primary delete went through and the list reflects it.
        assert!(directory.users().is_empty());
    }
}
