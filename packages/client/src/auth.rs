//! Session service. Holds the current user, drives login/logout, and makes
//! route-gate decisions. Hydration strictly precedes gating: while `loading`
//! the gate answers [`RouteDecision::Placeholder`] and never picks a branch.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::api::ApiGateway;
use crate::error::ApiError;
use crate::models::User;
use crate::models::auth::{ChangePasswordRequest, LoginRequest, RegisterRequest};
use crate::routes::Route;
use crate::storage::{KvStore, SessionStore, keys};

/// What a protected surface should do right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Hydration has not settled; render a placeholder, decide nothing.
    Placeholder,
    /// No session; go to `/login`.
    RedirectLogin,
    /// Signed in but not an admin on an admin-only surface.
    RedirectProblems,
    Allow,
}

#[derive(Default)]
struct AuthState {
    loading: bool,
    user: Option<User>,
}

pub struct AuthSession {
    gateway: Arc<ApiGateway>,
    session: Arc<SessionStore>,
    state: RwLock<AuthState>,
}

impl AuthSession {
    pub fn new(gateway: Arc<ApiGateway>, session: Arc<SessionStore>) -> Self {
        Self {
            gateway,
            session,
            state: RwLock::new(AuthState {
                loading: true,
                user: None,
            }),
        }
    }

    fn state(&self) -> std::sync::RwLockReadGuard<'_, AuthState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn state_mut(&self) -> std::sync::RwLockWriteGuard<'_, AuthState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Resolve the session once at startup. Failure is an anonymous
    /// session, not an error.
    pub async fn hydrate(&self) {
        let user = match self.gateway.me().await {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, "session hydration found no user");
                None
            }
        };
        let mut state = self.state_mut();
        state.user = user;
        state.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn current_user(&self) -> Option<User> {
        self.state().user.clone()
    }

    pub fn is_admin(&self) -> bool {
        self.state().user.as_ref().is_some_and(User::is_admin)
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
        cf_token: Option<String>,
    ) -> Result<User, ApiError> {
        let response = self
            .gateway
            .login(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
                cf_token,
            })
            .await?;
        if let Some(token) = &response.token {
            self.session.set(keys::AUTH_TOKEN, token);
        }
        let mut state = self.state_mut();
        state.user = Some(response.user.clone());
        state.loading = false;
        Ok(response.user)
    }

    /// Success redirects to login; the new account signs in explicitly.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: &str,
        cf_token: Option<String>,
    ) -> Result<(), ApiError> {
        self.gateway
            .register(&RegisterRequest {
                username: username.to_string(),
                password: password.to_string(),
                role: role.to_string(),
                cf_token,
            })
            .await
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        self.gateway
            .change_password(&ChangePasswordRequest {
                old_password: old_password.to_string(),
                new_password: new_password.to_string(),
            })
            .await
    }

    /// Server call plus local purge. The purge happens even when the server
    /// call fails; the session is gone either way.
    pub async fn logout(&self) {
        if let Err(e) = self.gateway.logout().await {
            warn!(error = %e, "logout request failed");
        }
        self.purge_local();
    }

    fn purge_local(&self) {
        self.session.remove(keys::AUTH_TOKEN);
        self.session.clear_prefix(keys::CONTEST_ACCESS_PREFIX);
        self.state_mut().user = None;
    }

    /// Gate for a protected route.
    pub fn gate(&self, admin_only: bool) -> RouteDecision {
        let state = self.state();
        if state.loading {
            return RouteDecision::Placeholder;
        }
        let Some(user) = &state.user else {
            return RouteDecision::RedirectLogin;
        };
        if admin_only && !user.is_admin() {
            return RouteDecision::RedirectProblems;
        }
        RouteDecision::Allow
    }

    /// Consume the gateway's one-shot 401 latch. Returns the login route
    /// exactly once after the session expires, after clearing local state.
    pub fn take_expired_redirect(&self) -> Option<Route> {
        if self.gateway.take_auth_expired() {
            self.purge_local();
            Some(Route::Login)
        } else {
            None
        }
    }
}

impl RouteDecision {
    pub fn redirect(self) -> Option<Route> {
        match self {
            RouteDecision::RedirectLogin => Some(Route::Login),
            RouteDecision::RedirectProblems => Some(Route::Problems),
            RouteDecision::Placeholder | RouteDecision::Allow => None,
        }
    }
}
