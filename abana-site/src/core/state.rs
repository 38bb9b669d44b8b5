use std::sync::Arc;

use abana_client::{AuthService, DocumentStore, FirebaseBackend, MemoryBackend};

use crate::admin::AdminConsole;
use crate::cart::{CartStore, LocalStorage, MemoryLocalStorage, RedbLocalStorage};
use crate::core::Config;
use crate::gateway::SubmissionGateway;
use crate::notify::NotificationBus;
use crate::sync::ContentSync;
use crate::utils::{AppError, AppResult};

/// Shared handles for one storefront/admin session
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | Settings (immutable) |
/// | store | Arc<dyn DocumentStore> | Document database |
/// | auth | Arc<dyn AuthService> | Admin sign-in |
/// | notifications | NotificationBus | Toasts |
/// | local_storage | Arc<dyn LocalStorage> | Cart slot |
///
/// Cloning is cheap; components are built on demand from these handles.
#[derive(Clone)]
pub struct SiteState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub auth: Arc<dyn AuthService>,
    pub notifications: NotificationBus,
    pub local_storage: Arc<dyn LocalStorage>,
}

impl std::fmt::Debug for SiteState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SiteState {
    pub fn new(
        config: Config,
        store: Arc<dyn DocumentStore>,
        auth: Arc<dyn AuthService>,
        local_storage: Arc<dyn LocalStorage>,
    ) -> Self {
        Self {
            config,
            store,
            auth,
            notifications: NotificationBus::new(),
            local_storage,
        }
    }

    /// Connect to the configured backend and open the on-disk cart slot
    pub fn initialize(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            AppError::config(format!(
                "Cannot create work dir {}: {}",
                config.work_dir.display(),
                e
            ))
        })?;
        let local_storage = Arc::new(RedbLocalStorage::open(&config.cart_db_path)?);
        let backend = Arc::new(FirebaseBackend::new(config.client_config())?);
        tracing::info!(
            project = %config.project_id,
            cart_db = %config.cart_db_path.display(),
            "Site state initialized"
        );
        Ok(Self::new(
            config.clone(),
            backend.clone(),
            backend,
            local_storage,
        ))
    }

    /// Everything in process: the given memory backend and a memory slot
    pub fn in_memory(config: Config, backend: Arc<MemoryBackend>) -> Self {
        Self::new(
            config,
            backend.clone(),
            backend,
            Arc::new(MemoryLocalStorage::new()),
        )
    }

    pub fn content_sync(&self) -> ContentSync {
        ContentSync::new(self.store.clone(), self.notifications.clone())
            .with_currency_symbol(&self.config.currency_symbol)
            .with_testimonial_limit(self.config.testimonial_limit)
    }

    pub fn gateway(&self) -> SubmissionGateway {
        SubmissionGateway::new(self.store.clone(), self.notifications.clone())
            .with_currency_symbol(&self.config.currency_symbol)
    }

    pub fn admin_console(&self) -> AdminConsole {
        AdminConsole::new(
            self.store.clone(),
            self.auth.clone(),
            self.content_sync(),
            self.notifications.clone(),
        )
        .with_default_category(&self.config.default_menu_category)
        .with_message_limit(self.config.message_limit)
    }

    /// Cart as saved in the local slot
    pub fn restore_cart(&self) -> CartStore {
        CartStore::restore(self.local_storage.clone())
    }
}
