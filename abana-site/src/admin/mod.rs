//! Admin console
//!
//! The console shows a login screen until the auth service reports a
//! session, then a dashboard with the settings editor, counts, the menu
//! list and the message inbox. Screen changes come only from the session
//! stream; `login` and `logout` just call through to the auth service.

pub mod forms;
pub mod view;

use std::sync::Arc;

use abana_client::{
    AuthService, ClientError, Direction, DocumentStore, DocumentWrite, Query, Session,
};
use chrono::Utc;
use parking_lot::Mutex;
use shared::models::{
    CREATED_AT_FIELD, CatalogItemCreate, Message, SETTINGS_DOC_ID, collections,
};
use shared::util::{is_valid_price, parse_price};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::config::{DEFAULT_MENU_CATEGORY, DEFAULT_MESSAGE_LIMIT};
use crate::notify::NotificationBus;
use crate::sync::ContentSync;
use crate::utils::validation::{is_blank, optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};

pub use forms::{MenuItemForm, SettingsForm};
pub use view::{
    AdminView, Dashboard, DashboardStats, MenuItemRow, MessageRow, NO_MENU_ITEMS, NO_MESSAGES,
};

pub const SETTINGS_SAVED: &str = "Settings saved successfully!";
pub const MENU_ITEM_ADDED: &str = "Menu item added!";
pub const MENU_ITEM_DELETED: &str = "Menu item deleted!";
pub const MENU_ITEM_FIELDS_MISSING: &str = "Please enter name and price";
pub const DATA_LOAD_ERROR: &str = "Error loading data. Please refresh.";
pub const DELETE_PROMPT: &str = "Delete this menu item?";

/// Interactive yes/no before destructive actions
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Lists refreshed after menu edits
#[derive(Debug, Default)]
struct ConsoleState {
    login_error: Option<String>,
    menu_items: Vec<MenuItemRow>,
    stats: Option<DashboardStats>,
}

pub struct AdminConsole {
    store: Arc<dyn DocumentStore>,
    auth: Arc<dyn AuthService>,
    content: ContentSync,
    notifications: NotificationBus,
    default_category: String,
    message_limit: usize,
    state: Mutex<ConsoleState>,
}

impl std::fmt::Debug for AdminConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConsole")
            .field("default_category", &self.default_category)
            .field("message_limit", &self.message_limit)
            .finish_non_exhaustive()
    }
}

impl AdminConsole {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        auth: Arc<dyn AuthService>,
        content: ContentSync,
        notifications: NotificationBus,
    ) -> Self {
        Self {
            store,
            auth,
            content,
            notifications,
            default_category: DEFAULT_MENU_CATEGORY.to_string(),
            message_limit: DEFAULT_MESSAGE_LIMIT,
            state: Mutex::new(ConsoleState::default()),
        }
    }

    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    pub fn with_message_limit(mut self, limit: usize) -> Self {
        self.message_limit = limit;
        self
    }

    // ========== Session gate ==========

    /// Follow the auth service's session stream and publish the screen to
    /// show. Signing in loads the dashboard before it is published.
    ///
    /// The task ends when the auth service or every view receiver is gone.
    pub fn watch_sessions(self: &Arc<Self>) -> (watch::Receiver<AdminView>, JoinHandle<()>) {
        let (tx, rx) = watch::channel(self.login_view());
        let console = Arc::clone(self);
        let mut sessions = self.auth.subscribe();

        let handle = tokio::spawn(async move {
            loop {
                let session = sessions.borrow_and_update().clone();
                let view = console.view_for(session).await;
                if tx.send(view).is_err() {
                    break;
                }
                if sessions.changed().await.is_err() {
                    break;
                }
            }
            tracing::debug!("Admin session watcher stopped");
        });
        (rx, handle)
    }

    async fn view_for(&self, session: Option<Session>) -> AdminView {
        match session {
            Some(session) => {
                tracing::info!(email = %session.email, "Admin signed in");
                AdminView::Dashboard(Box::new(self.load_dashboard(&session).await))
            }
            None => self.login_view(),
        }
    }

    fn login_view(&self) -> AdminView {
        AdminView::Login {
            error: self.state.lock().login_error.clone(),
        }
    }

    pub fn login_error(&self) -> Option<String> {
        self.state.lock().login_error.clone()
    }

    /// Settings form and counts for a fresh dashboard
    pub async fn load_dashboard(&self, session: &Session) -> Dashboard {
        let settings = match self.load_settings_form().await {
            Ok(form) => form,
            Err(e) => {
                tracing::error!(error = %e, "Error loading admin data");
                self.notifications.error(DATA_LOAD_ERROR);
                SettingsForm::default()
            }
        };
        let stats = self.refresh_stats().await;
        Dashboard {
            email: session.email.clone(),
            settings,
            stats,
        }
    }

    // ========== Auth ==========

    /// Sign in. A failure is kept as the login screen's error text
    /// (`Login failed: ...`); success clears it.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        match self.auth.sign_in(email, password).await {
            Ok(session) => {
                self.state.lock().login_error = None;
                Ok(session)
            }
            Err(e) => {
                let reason = match &e {
                    ClientError::Auth(auth) => auth.to_string(),
                    other => other.to_string(),
                };
                let text = format!("Login failed: {}", reason);
                tracing::warn!(email, error = %e, "Login error");
                self.state.lock().login_error = Some(text.clone());
                let code = AppError::from(e).code;
                Err(AppError::with_message(code, text))
            }
        }
    }

    pub async fn logout(&self) -> AppResult<()> {
        self.auth.sign_out().await?;
        let mut state = self.state.lock();
        state.menu_items.clear();
        state.stats = None;
        Ok(())
    }

    fn require_session(&self) -> AppResult<Session> {
        self.auth
            .current_session()
            .ok_or_else(AppError::not_authenticated)
    }

    // ========== Settings ==========

    /// Current settings as editor fields; blank when never saved
    pub async fn load_settings_form(&self) -> AppResult<SettingsForm> {
        Ok(self
            .content
            .load_settings()
            .await?
            .map(|s| SettingsForm::from(&s))
            .unwrap_or_default())
    }

    /// Merge the editor fields into the settings record, stamping
    /// `updatedAt` with the local clock
    pub async fn save_settings(&self, form: &SettingsForm) -> AppResult<()> {
        let result = self.write_settings(form).await;
        match &result {
            Ok(()) => {
                tracing::info!("Settings saved");
                self.notifications.success(SETTINGS_SAVED);
            }
            Err(e) => {
                tracing::error!(error = %e, "Error saving settings");
                self.notifications
                    .error(format!("Error saving settings: {}", e.message));
            }
        }
        result
    }

    async fn write_settings(&self, form: &SettingsForm) -> AppResult<()> {
        self.require_session()?;
        let mut update = form.clone();
        update.updated_at = Some(Utc::now());
        let write = DocumentWrite::from_record(&update)?;
        self.store
            .set_document(collections::SETTINGS, SETTINGS_DOC_ID, write, true)
            .await?;
        Ok(())
    }

    // ========== Stats ==========

    pub async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        let total_messages = self.store.count_collection(collections::MESSAGES).await?;
        let total_menu_items = self.store.count_collection(collections::MENU_ITEMS).await?;
        Ok(DashboardStats {
            total_messages,
            total_menu_items,
        })
    }

    /// Last loaded counts
    pub fn stats(&self) -> Option<DashboardStats> {
        self.state.lock().stats
    }

    async fn refresh_stats(&self) -> Option<DashboardStats> {
        match self.dashboard_stats().await {
            Ok(stats) => {
                self.state.lock().stats = Some(stats);
                Some(stats)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading stats");
                None
            }
        }
    }

    // ========== Menu ==========

    pub async fn list_menu_items(&self) -> AppResult<Vec<MenuItemRow>> {
        let symbol = self.content.currency_symbol();
        let rows: Vec<MenuItemRow> = self
            .content
            .fetch_catalog()
            .await?
            .iter()
            .map(|(id, item)| MenuItemRow::from_item(id, item, symbol))
            .collect();
        self.state.lock().menu_items = rows.clone();
        Ok(rows)
    }

    /// Last loaded menu list
    pub fn menu_items(&self) -> Vec<MenuItemRow> {
        self.state.lock().menu_items.clone()
    }

    /// Create a menu item and return its id
    ///
    /// Name and price are required and the price must be a non-negative
    /// number. On success the form is cleared and the menu list and counts
    /// are reloaded.
    pub async fn add_menu_item(&self, form: &mut MenuItemForm) -> AppResult<String> {
        if is_blank(&form.name) || is_blank(&form.price) {
            let err = AppError::with_message(ErrorCode::RequiredField, MENU_ITEM_FIELDS_MISSING);
            self.notifications.error(MENU_ITEM_FIELDS_MISSING);
            return Err(err);
        }
        let price = match parse_price(&form.price).filter(|p| is_valid_price(*p)) {
            Some(price) => price,
            None => {
                let err = AppError::invalid_price(form.price.trim());
                self.notifications.error(err.message.clone());
                return Err(err);
            }
        };

        let item = CatalogItemCreate {
            name: form.name.trim().to_string(),
            description: form.description.trim().to_string(),
            price,
            category: optional_text(&form.category).unwrap_or_else(|| self.default_category.clone()),
            image_url: optional_text(&form.image_url),
            created_at: Utc::now(),
        };

        let id = match self.write_menu_item(&item).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(error = %e, "Error adding menu item");
                self.notifications.error(format!("Error: {}", e.message));
                return Err(e);
            }
        };
        tracing::info!(id = %id, name = %item.name, "Menu item added");

        form.clear();
        self.refresh_menu().await;
        self.notifications.success(MENU_ITEM_ADDED);
        Ok(id)
    }

    async fn write_menu_item(&self, item: &CatalogItemCreate) -> AppResult<String> {
        self.require_session()?;
        let write = DocumentWrite::from_record(item)?;
        Ok(self.store.add_document(collections::MENU_ITEMS, write).await?)
    }

    /// Delete a menu item after confirmation. Returns `false` when the
    /// admin declined; nothing is written then.
    pub async fn delete_menu_item<C>(&self, id: &str, confirm: &C) -> AppResult<bool>
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(DELETE_PROMPT) {
            tracing::debug!(id, "Menu item deletion declined");
            return Ok(false);
        }

        let result = match self.require_session() {
            Ok(_) => self
                .store
                .delete_document(collections::MENU_ITEMS, id)
                .await
                .map_err(AppError::from),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::error!(id, error = %e, "Error deleting menu item");
            self.notifications.error(format!("Error: {}", e.message));
            return Err(e);
        }
        tracing::info!(id, "Menu item deleted");

        self.refresh_menu().await;
        self.notifications.success(MENU_ITEM_DELETED);
        Ok(true)
    }

    async fn refresh_menu(&self) {
        if let Err(e) = self.list_menu_items().await {
            tracing::error!(error = %e, "Error loading menu items");
        }
        self.refresh_stats().await;
    }

    // ========== Messages ==========

    /// Newest messages first, at most the configured limit
    pub async fn list_messages(&self) -> AppResult<Vec<MessageRow>> {
        let query = Query::all()
            .order_by(CREATED_AT_FIELD, Direction::Descending)
            .limit(self.message_limit);
        let docs = self
            .store
            .query_collection(collections::MESSAGES, query)
            .await?;
        Ok(docs
            .iter()
            .filter_map(|doc| match doc.decode::<Message>() {
                Ok(msg) => Some(MessageRow::from_message(&doc.id, &msg)),
                Err(e) => {
                    tracing::warn!(id = %doc.id, error = %e, "Skipping unreadable message");
                    None
                }
            })
            .collect())
    }
}
