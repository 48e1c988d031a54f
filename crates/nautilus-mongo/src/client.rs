use crate::config::MongoConfig;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

struct Connection {
    client: Client,
    database: Database,
}

/// MongoDB store handle: owner of the connection and its health state.
///
/// Constructed once at startup and injected into every component that needs
/// it. `connect` performs a bounded connection attempt plus a liveness probe
/// and never raises past this boundary; callers observe only the boolean
/// connected state. The connection slot is written during the startup
/// connect and the shutdown close, and read everywhere else.
pub struct MongoStore {
    config: MongoConfig,
    connection: RwLock<Option<Connection>>,
}

impl MongoStore {
    /// Creates a disconnected handle; call [`MongoStore::connect`] to
    /// establish the client
    pub fn new(config: MongoConfig) -> Self {
        Self {
            config,
            connection: RwLock::new(None),
        }
    }

    /// Attempt to establish and probe a connection. Returns whether the store
    /// is now connected; any failure leaves the handle disconnected so the
    /// service runs in degraded mode.
    pub async fn connect(&self) -> bool {
        let timeout = Duration::from_secs(self.config.connect_timeout_secs);

        let mut options = match ClientOptions::parse(&self.config.url).await {
            Ok(options) => options,
            Err(e) => {
                warn!(error = %e, "invalid MongoDB connection string");
                return false;
            }
        };
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = match Client::with_options(options) {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "failed to build MongoDB client");
                return false;
            }
        };

        // Liveness probe before declaring the handle connected
        if let Err(e) = client.database("admin").run_command(doc! { "ping": 1 }).await {
            warn!(error = %e, "MongoDB ping failed, starting disconnected");
            return false;
        }

        let database = client.database(&self.config.database);
        *self.connection.write().await = Some(Connection { client, database });
        info!(database = %self.config.database, "connected to MongoDB");
        true
    }

    pub async fn is_connected(&self) -> bool {
        self.connection.read().await.is_some()
    }

    /// Collection reference by name, or `None` when disconnected
    pub async fn collection(&self, name: &str) -> Option<Collection<Document>> {
        self.connection
            .read()
            .await
            .as_ref()
            .map(|conn| conn.database.collection(name))
    }

    /// Release the client. Idempotent; a second close is a no-op.
    pub async fn close(&self) {
        let connection = self.connection.write().await.take();
        if let Some(conn) = connection {
            conn.client.shutdown().await;
            info!("MongoDB connection closed");
        } else {
            debug!("close called on a disconnected store");
        }
    }

    pub fn database_name(&self) -> &str {
        &self.config.database
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_starts_disconnected() {
        let store = MongoStore::new(MongoConfig::default());
        assert!(!store.is_connected().await);
        assert!(store.collection("dht_sensor_data").await.is_none());
    }

    #[tokio::test]
    async fn close_is_idempotent_on_a_disconnected_store() {
        let store = MongoStore::new(MongoConfig::default());
        store.close().await;
        store.close().await;
        assert!(!store.is_connected().await);
    }

    #[test]
    fn default_config_targets_local_development() {
        let config = MongoConfig::default();
        assert_eq!(config.url, "mongodb://localhost:27017");
        assert_eq!(config.database, "underwater_navigation");
        assert_eq!(config.connect_timeout_secs, 10);
    }
}
