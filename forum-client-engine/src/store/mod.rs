//! Application state store.
//!
//! All UI state lives in one [`AppState`] value owned by the [`AppStore`].
//! Changes happen only through dispatched actions, and every change is
//! published to subscribers over a `watch` channel.
mod filter;
mod popup;
mod session;
mod sidebar;

pub use filter::{FilterAction, FilterState};
pub use popup::{DeleteTarget, PopupAction, PopupKind, PopupState};
pub use session::{SessionAction, SessionState};
pub use sidebar::{SidebarAction, SidebarState};

use tokio::sync::watch;
use tracing::debug;


use crate::notify::ErrorSurface;
use crate::session::LoginPrompt;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub popup: PopupState,
    pub filter: FilterState,
    pub sidebar: SidebarState,
    pub session: SessionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    Popup(PopupAction),
    Filter(FilterAction),
    Sidebar(SidebarAction),
    Session(SessionAction),
}

impl From<PopupAction> for AppAction {
    fn from(action: PopupAction) -> Self {
        AppAction::Popup(action)
    }
}

impl From<FilterAction> for AppAction {
    fn from(action: FilterAction) -> Self {
        AppAction::Filter(action)
    }
}

impl From<SidebarAction> for AppAction {
    fn from(action: SidebarAction) -> Self {
        AppAction::Sidebar(action)
    }
}

impl From<SessionAction> for AppAction {
    fn from(action: SessionAction) -> Self {
        AppAction::Session(action)
    }
}

impl AppState {
    pub fn apply(&mut self, action: AppAction) {
        match action {
            AppAction::Popup(action) => self.popup.apply(action),
            AppAction::Filter(action) => self.filter.apply(action),
            AppAction::Sidebar(action) => self.sidebar.apply(action),
            AppAction::Session(action) => self.session.apply(action),
        }
    }
}

pub struct AppStore {
    state: watch::Sender<AppState>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            state: watch::channel(state).0,
        }
    }

    pub fn dispatch(&self, action: impl Into<AppAction>) {
        let action = action.into();
        debug!(action = ?action, "Dispatching");
        self.state.send_modify(|state| state.apply(action));
    }

    /// Receiver notified after every dispatched action.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorSurface for AppStore {
    fn report_message(&self, message: &str) {
        self.dispatch(PopupAction::ErrorOccurred(message.to_string()));
    }
}

impl LoginPrompt for AppStore {
    fn prompt_login(&self) {
        self.dispatch(PopupAction::ClickedLogin);
    }
}
