//! Actor layer: a supervisor task owning every live chat session.

pub mod messages;
pub mod supervisor;
pub mod traits;

pub use supervisor::SupervisorHandle;
pub use traits::ReplyEngine;
