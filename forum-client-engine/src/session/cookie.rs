use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::Url;

use super::SessionGate;

/// Session gate backed by the cookie jar shared with the HTTP backend.
///
/// The user is authenticated while the jar holds a non-empty cookie named
/// `cookie_name` for the backend URL.
pub struct CookieSessionGate {
    jar: Arc<Jar>,
    url: Url,
    cookie_name: String,
}

impl CookieSessionGate {
    pub fn new(jar: Arc<Jar>, url: Url, cookie_name: impl Into<String>) -> Self {
        Self {
            jar,
            url,
            cookie_name: cookie_name.into(),
        }
    }
}

impl SessionGate for CookieSessionGate {
    fn is_authenticated(&self) -> bool {
        self.jar
            .cookies(&self.url)
            .and_then(|header| header.to_str().ok().map(|h| cookie_present(h, &self.cookie_name)))
            .unwrap_or(false)
    }
}

/// Returns true when a `Cookie` header carries `name` with a non-empty value.
fn cookie_present(header: &str, name: &str) -> bool {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(key, value)| key == name && !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Access;

    fn backend_url() -> Url {
        Url::parse("http://localhost:5000/api/v1").unwrap()
    }

    #[test]
    fn test_cookie_present() {
        assert!(cookie_present("theme=dark; auth=abc123", "auth"));
        assert!(!cookie_present("theme=dark", "auth"));
        assert!(!cookie_present("auth=", "auth"));
        assert!(!cookie_present("oauth=abc", "auth"));
    }

    #[test]
    fn test_gate_follows_jar() {
        let jar = Arc::new(Jar::default());
        let gate = CookieSessionGate::new(jar.clone(), backend_url(), "auth");
        assert_eq!(gate.check(), Access::DenyWithPrompt);

        jar.add_cookie_str("auth=abc123; Path=/", &backend_url());
        assert!(gate.is_authenticated());
        assert_eq!(gate.check(), Access::Allowed);
    }
}
