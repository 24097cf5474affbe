/// Who the UI believes is logged in.
///
/// This is display state only. Access decisions go through the session gate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub authenticated: bool,
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    LoggedIn(String),
    LoggedOut,
}

impl SessionState {
    pub fn apply(&mut self, action: SessionAction) {
        match action {
            SessionAction::LoggedIn(username) => {
                self.authenticated = true;
                self.username = username;
            }
            SessionAction::LoggedOut => *self = Self::default(),
        }
    }
}
