//! The single place failures are shown to the user.
use forum_client_backend::ApiError;

/// Receives every failure the engine does not hand back silently.
pub trait ErrorSurface: Send + Sync {
    /// Shows a failure message.
    fn report_message(&self, message: &str);

    /// Shows a backend failure through its `Display` output.
    fn report(&self, error: &ApiError) {
        self.report_message(&error.to_string());
    }
}
