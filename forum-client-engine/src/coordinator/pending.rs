use std::fmt;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::error;

use forum_client_shared::types::VoteTarget;

use crate::errors::CoordinatorError;
use crate::notify::ErrorSurface;
use crate::vote::BackendOp;

/// Handle on a vote call issued by the coordinator.
///
/// Dropping the handle does not cancel the call.
pub struct PendingVote {
    target: VoteTarget,
    op: BackendOp,
    handle: JoinHandle<Result<(), CoordinatorError>>,
    errors: Arc<dyn ErrorSurface>,
}

impl PendingVote {
    pub(crate) fn new(
        target: VoteTarget,
        op: BackendOp,
        handle: JoinHandle<Result<(), CoordinatorError>>,
        errors: Arc<dyn ErrorSurface>,
    ) -> Self {
        Self {
            target,
            op,
            handle,
            errors,
        }
    }

    pub fn target(&self) -> &VoteTarget {
        &self.target
    }

    /// The backend operation issued for the click.
    pub fn op(&self) -> BackendOp {
        self.op
    }

    pub fn is_settled(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the call to settle. Every failure returned here has been
    /// reported to the error surface.
    pub async fn outcome(self) -> Result<(), CoordinatorError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => {
                let aborted = CoordinatorError::Aborted(e.to_string());
                error!(target_id = %self.target, error = %aborted, "Vote task did not complete");
                self.errors.report_message(&aborted.to_string());
                Err(aborted)
            }
        }
    }
}

impl fmt::Debug for PendingVote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingVote")
            .field("target", &self.target)
            .field("op", &self.op)
            .field("settled", &self.is_settled())
            .finish()
    }
}
