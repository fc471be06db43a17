//! Wiring. One context owns the stores and services and hands them to the
//! embedding surface (the CLI, a TUI, tests).

use std::sync::Arc;

use tracing::info;

use crate::access::AccessController;
use crate::api::ApiGateway;
use crate::auth::AuthSession;
use crate::config::ClientConfig;
use crate::contests::ContestDirectory;
use crate::error::ApiError;
use crate::preferences::PreferencesStore;
use crate::probe;
use crate::storage::{LocalStore, SessionStore};

pub struct ClientContext {
    pub config: ClientConfig,
    pub session: Arc<SessionStore>,
    pub local: Arc<LocalStore>,
    pub gateway: Arc<ApiGateway>,
    pub auth: Arc<AuthSession>,
    pub preferences: Arc<PreferencesStore>,
    pub access: Arc<AccessController>,
    pub contests: Arc<ContestDirectory>,
}

impl ClientContext {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let local = match config
            .local_store_path
            .clone()
            .or_else(LocalStore::default_path)
        {
            Some(path) => Arc::new(LocalStore::open(path)),
            None => Arc::new(LocalStore::in_memory()),
        };
        let session = Arc::new(SessionStore::new());
        let gateway = Arc::new(ApiGateway::new(&config.api, Arc::clone(&session))?);
        let auth = Arc::new(AuthSession::new(
            Arc::clone(&gateway),
            Arc::clone(&session),
        ));
        let preferences = Arc::new(PreferencesStore::new(
            Arc::clone(&gateway),
            Arc::clone(&local),
            Arc::clone(&session),
        ));
        let access = Arc::new(AccessController::new(
            Arc::clone(&gateway),
            Arc::clone(&session),
        ));
        let contests = Arc::new(ContestDirectory::new(
            Arc::clone(&gateway),
            Arc::clone(&session),
        ));
        Ok(Self {
            config,
            session,
            local,
            gateway,
            auth,
            preferences,
            access,
            contests,
        })
    }

    /// Hydrate the session, then merge server preferences when signed in.
    /// Route gates stay on placeholder until this settles.
    pub async fn start(&self) {
        self.auth.hydrate().await;
        if self.auth.current_user().is_some() {
            self.preferences.sync_from_server().await;
        }
    }

    /// Best-effort network-identity resolution for the auth audit header.
    pub async fn resolve_identity(&self) {
        if let Some(ip) = probe::resolve_public_ip(&self.config.probe).await {
            info!(%ip, "resolved public address");
            self.gateway.set_network_identity(ip.to_string());
        }
    }
}
