//! Preferences store. Local storage is the source of truth; the server is a
//! mirror that can lag or fail without rolling anything back.

use std::future::Future;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tracing::warn;

use crate::api::ApiGateway;
use crate::config::EditorConfigOptions;
use crate::debounce::Debouncer;
use crate::models::{Preferences, Theme};
use crate::storage::{KvStore, LocalStore, SessionStore, get_json, keys, set_json};

pub struct PreferencesStore {
    gateway: Arc<ApiGateway>,
    local: Arc<LocalStore>,
    session: Arc<SessionStore>,
    current: RwLock<Preferences>,
    /// Editor rebind trigger; poked on every mutation while an editor is
    /// attached.
    editor_rebind: Mutex<Option<Debouncer>>,
}

impl PreferencesStore {
    /// Initialize from local storage, falling back to defaults.
    pub fn new(
        gateway: Arc<ApiGateway>,
        local: Arc<LocalStore>,
        session: Arc<SessionStore>,
    ) -> Self {
        let current = get_json::<Preferences>(local.as_ref(), keys::PREFERENCES)
            .map(Preferences::normalized)
            .unwrap_or_default();
        Self {
            gateway,
            local,
            session,
            current: RwLock::new(current),
            editor_rebind: Mutex::new(None),
        }
    }

    pub fn current(&self) -> Preferences {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn theme(&self) -> Theme {
        self.current().theme
    }

    /// Effective dark flag given the OS preference reported by the embedder.
    pub fn is_dark(&self, system_dark: bool) -> bool {
        self.theme().is_dark(system_dark)
    }

    /// Merge server-side preferences after login. Precedence is
    /// `defaults ≺ local ≺ server`: server keys win, keys the server omits
    /// keep the local value.
    pub async fn sync_from_server(&self) {
        let server = match self.gateway.get_preferences().await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "server preferences fetch failed, keeping local");
                return;
            }
        };
        let merged = self.current().merged_with(&server);
        set_json(self.local.as_ref(), keys::PREFERENCES, &merged);
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = merged;
        self.poke_editor();
    }

    /// Apply a mutation. Writes local storage first, then mirrors to the
    /// server when a session exists; a failed mirror only logs.
    pub async fn update(&self, mutate: impl FnOnce(&mut Preferences)) -> Preferences {
        let updated = {
            let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
            let mut next = current.clone();
            mutate(&mut next);
            let next = next.normalized();
            *current = next.clone();
            next
        };
        set_json(self.local.as_ref(), keys::PREFERENCES, &updated);
        self.poke_editor();

        if self.session.get(keys::AUTH_TOKEN).is_some() {
            if let Err(e) = self.gateway.put_preferences(&updated).await {
                warn!(error = %e, "preferences mirror failed, local state kept");
            }
        }
        updated
    }

    pub async fn set_theme(&self, theme: Theme) -> Preferences {
        self.update(|p| p.theme = theme).await
    }

    /// Attach an editor. `on_rebind` runs once per burst of preference
    /// changes, `options.debounce_ms` after the last one.
    pub fn bind_editor<F, Fut>(&self, options: &EditorConfigOptions, on_rebind: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let quiet = Duration::from_millis(options.debounce_ms);
        self.attach_editor_rebind(Debouncer::new(quiet, on_rebind));
    }

    /// Attach the debouncer driving editor extension rebinds. Replaces any
    /// previous one; detaching drops it.
    pub fn attach_editor_rebind(&self, debouncer: Debouncer) {
        *self
            .editor_rebind
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(debouncer);
    }

    pub fn detach_editor_rebind(&self) {
        *self
            .editor_rebind
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = None;
    }

    fn poke_editor(&self) {
        if let Some(debouncer) = self
            .editor_rebind
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            debouncer.poke();
        }
    }
}
