use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    BugRegistry, CredentialStore, SeaOrmBugRegistry, SeaOrmCredentialStore, SessionAuthority,
};

/// Everything a request handler needs, built once at startup.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub credentials: Arc<dyn CredentialStore>,

    pub bugs: Arc<dyn BugRegistry>,

    pub sessions: SessionAuthority,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;

        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let credentials = Arc::new(
            SeaOrmCredentialStore::new(store.clone(), config.security.clone()).await?,
        ) as Arc<dyn CredentialStore + Send + Sync + 'static>;

        let bugs = Arc::new(SeaOrmBugRegistry::new(store.clone(), credentials.clone()))
            as Arc<dyn BugRegistry + Send + Sync + 'static>;

        let sessions = SessionAuthority::new(
            time::Duration::minutes(config.server.session_idle_minutes),
            config.server.secure_cookies,
        );

        Ok(Self {
            config: Arc::new(config),
            store,
            credentials,
            bugs,
            sessions,
        })
    }

    /// Closes the connection pool. Sessions die with the process.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        self.store.close().await
    }
}
