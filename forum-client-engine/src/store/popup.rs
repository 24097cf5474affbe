use forum_client_backend::Mutation;

/// Which popup is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PopupKind {
    #[default]
    Closed,
    Login,
    Signup,
    Error,
    DeleteConfirmation,
}

/// Submission awaiting a delete confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteTarget {
    Post(String),
    Comment(String),
}

impl DeleteTarget {
    pub fn mutation(&self) -> Mutation {
        match self {
            DeleteTarget::Post(id) => Mutation::DeletePost(id.clone()),
            DeleteTarget::Comment(id) => Mutation::DeleteComment(id.clone()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PopupState {
    pub kind: PopupKind,
    /// Set while the popup's submit request is in flight.
    pub loading: bool,
    pub error: Option<String>,
    pub delete_target: Option<DeleteTarget>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopupAction {
    Closed,
    ClickedLogin,
    ClickedSignup,
    ClickedSubmit,
    ClickedDelete(DeleteTarget),
    ErrorOccurred(String),
}

impl PopupState {
    fn open(kind: PopupKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, action: PopupAction) {
        match action {
            PopupAction::Closed => *self = Self::default(),
            PopupAction::ClickedLogin => *self = Self::open(PopupKind::Login),
            PopupAction::ClickedSignup => *self = Self::open(PopupKind::Signup),
            PopupAction::ClickedSubmit => self.loading = true,
            PopupAction::ClickedDelete(target) => {
                *self = Self {
                    delete_target: Some(target),
                    ..Self::open(PopupKind::DeleteConfirmation)
                }
            }
            PopupAction::ErrorOccurred(message) => {
                // Login and signup forms show the error inline.
                if !matches!(self.kind, PopupKind::Login | PopupKind::Signup) {
                    self.kind = PopupKind::Error;
                    self.delete_target = None;
                }
                self.loading = false;
                self.error = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_stays_on_login_form() {
        let mut popup = PopupState::default();
        popup.apply(PopupAction::ClickedLogin);
        popup.apply(PopupAction::ClickedSubmit);
        assert!(popup.loading);

        popup.apply(PopupAction::ErrorOccurred("Invalid username or password".to_string()));
        assert_eq!(popup.kind, PopupKind::Login);
        assert!(!popup.loading);
        assert_eq!(popup.error.as_deref(), Some("Invalid username or password"));
    }

    #[test]
    fn test_error_opens_error_popup() {
        let mut popup = PopupState::default();
        popup.apply(PopupAction::ClickedDelete(DeleteTarget::Post("p1".to_string())));
        popup.apply(PopupAction::ErrorOccurred("server error".to_string()));
        assert_eq!(popup.kind, PopupKind::Error);
        assert_eq!(popup.delete_target, None);

        popup.apply(PopupAction::Closed);
        assert_eq!(popup, PopupState::default());
    }

    #[test]
    fn test_delete_target_mutation() {
        assert_eq!(
            DeleteTarget::Comment("c1".to_string()).mutation(),
            Mutation::DeleteComment("c1".to_string())
        );
    }
}
