mod coordinator;
mod mutation;

pub use coordinator::CoordinatorError;
pub use mutation::MutationError;
