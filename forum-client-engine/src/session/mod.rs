//! Session gate consulted before any vote or mutation.
//!
//! The gate only decides. Prompting the user to log in is a separate
//! collaborator ([`LoginPrompt`]) injected alongside it.
mod cookie;

pub use cookie::CookieSessionGate;

/// Decision returned by [`SessionGate::check`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Allowed,
    DenyWithPrompt,
}

/// Reports whether the user currently holds a session.
///
/// Presence is enough; the backend remains the authority on whether the
/// session is actually valid.
pub trait SessionGate: Send + Sync {
    fn is_authenticated(&self) -> bool;

    fn check(&self) -> Access {
        if self.is_authenticated() {
            Access::Allowed
        } else {
            Access::DenyWithPrompt
        }
    }
}

/// Side effect fired when an unauthenticated user attempts a write.
pub trait LoginPrompt: Send + Sync {
    fn prompt_login(&self);
}
