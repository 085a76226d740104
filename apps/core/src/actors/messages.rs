use tokio::sync::oneshot;

use crate::models::QuickReply;
use crate::session::{SessionSnapshot, TurnOutcome};

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the `SupervisorActor`.
#[derive(Debug)]
pub enum SupervisorMessage {
    /// Open a new chat session.
    OpenSession {
        responder: oneshot::Sender<Result<SessionSnapshot, AppError>>,
    },
    /// Free text typed by the customer.
    SendText {
        session_id: String,
        text: String,
        responder: oneshot::Sender<Result<TurnOutcome, AppError>>,
    },
    /// A quick reply button the customer clicked.
    SelectQuickReply {
        session_id: String,
        reply: QuickReply,
        responder: oneshot::Sender<Result<TurnOutcome, AppError>>,
    },
    /// A copy of the session's transcript and current quick replies.
    Transcript {
        session_id: String,
        responder: oneshot::Sender<Result<SessionSnapshot, AppError>>,
    },
    /// Drop a session and its transcript.
    CloseSession {
        session_id: String,
        responder: oneshot::Sender<Result<(), AppError>>,
    },
    /// Number of sessions currently held.
    SessionCount {
        responder: oneshot::Sender<Result<usize, AppError>>,
    },
    /// A command to shut down the supervisor.
    Shutdown,
}
