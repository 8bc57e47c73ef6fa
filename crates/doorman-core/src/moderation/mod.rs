pub mod classify;
pub mod executor;
pub mod failure;
pub mod port;
pub mod types;

pub use classify::classify;
pub use executor::{Executor, Moderator};
pub use failure::{classify_failure, FailureKind};
pub use port::{ApiError, ApiErrorCategory, ModerationApi};
