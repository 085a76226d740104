use crate::actors::messages::{AppError, SupervisorMessage};
use crate::actors::traits::ReplyEngine;
use crate::models::QuickReply;
use crate::session::{ChatSession, SessionSnapshot, TurnOutcome};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{debug, info, instrument, warn};

/// Default bound on how long a caller waits for the supervisor to answer.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// A handle to the `SupervisorActor`.
///
/// This is the entry point for chat sessions. The actor owns every session's
/// transcript; the reply engine is shared read-only between them.
///
/// Sessions are never expired: callers must `close_session` when a chat ends.
#[derive(Clone)]
pub struct SupervisorHandle {
    sender: mpsc::Sender<SupervisorMessage>,
    request_timeout: Duration,
}

impl SupervisorHandle {
    /// Spawns the supervisor with the default request timeout.
    pub fn new<E: ReplyEngine>(engine: Arc<E>) -> Self {
        Self::with_timeout(engine, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Spawns the supervisor and returns a handle to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_timeout<E: ReplyEngine>(engine: Arc<E>, request_timeout: Duration) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let runner = SupervisorRunner::new(receiver, engine);
        tokio::spawn(async move { runner.run().await });
        Self {
            sender,
            request_timeout,
        }
    }

    async fn request<T>(
        &self,
        msg: SupervisorMessage,
        recv: oneshot::Receiver<Result<T, AppError>>,
    ) -> Result<T, AppError> {
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(self.request_timeout, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }

    /// Opens a new session seeded with the welcome message.
    #[instrument(skip(self))]
    pub async fn open_session(&self) -> Result<SessionSnapshot, AppError> {
        let (send, recv) = oneshot::channel();
        self.request(SupervisorMessage::OpenSession { responder: send }, recv)
            .await
    }

    /// Answers text the customer typed in a session.
    #[instrument(skip(self, text))]
    pub async fn send_text(&self, session_id: &str, text: &str) -> Result<TurnOutcome, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = SupervisorMessage::SendText {
            session_id: session_id.to_string(),
            text: text.to_string(),
            responder: send,
        };
        self.request(msg, recv).await
    }

    /// Answers a quick reply the customer clicked in a session.
    #[instrument(skip(self, reply), fields(reply_id = %reply.id, tag = %reply.intent))]
    pub async fn select_quick_reply(
        &self,
        session_id: &str,
        reply: QuickReply,
    ) -> Result<TurnOutcome, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = SupervisorMessage::SelectQuickReply {
            session_id: session_id.to_string(),
            reply,
            responder: send,
        };
        self.request(msg, recv).await
    }

    /// Returns a copy of a session's transcript.
    #[instrument(skip(self))]
    pub async fn transcript(&self, session_id: &str) -> Result<SessionSnapshot, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = SupervisorMessage::Transcript {
            session_id: session_id.to_string(),
            responder: send,
        };
        self.request(msg, recv).await
    }

    /// Drops a session.
    #[instrument(skip(self))]
    pub async fn close_session(&self, session_id: &str) -> Result<(), AppError> {
        let (send, recv) = oneshot::channel();
        let msg = SupervisorMessage::CloseSession {
            session_id: session_id.to_string(),
            responder: send,
        };
        self.request(msg, recv).await
    }

    /// Number of open sessions.
    pub async fn session_count(&self) -> Result<usize, AppError> {
        let (send, recv) = oneshot::channel();
        self.request(SupervisorMessage::SessionCount { responder: send }, recv)
            .await
    }

    /// Asks the supervisor to stop. Pending sessions are discarded.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(SupervisorMessage::Shutdown)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))
    }
}

// --- Actor Runner ---
struct SupervisorRunner<E>
where
    E: ReplyEngine,
{
    receiver: mpsc::Receiver<SupervisorMessage>,
    engine: Arc<E>,
    sessions: HashMap<String, ChatSession>,
}

impl<E> SupervisorRunner<E>
where
    E: ReplyEngine,
{
    fn new(receiver: mpsc::Receiver<SupervisorMessage>, engine: Arc<E>) -> Self {
        Self {
            receiver,
            engine,
            sessions: HashMap::new(),
        }
    }

    async fn run(mut self) {
        info!("Supervisor started");
        while let Some(msg) = self.receiver.recv().await {
            if let SupervisorMessage::Shutdown = msg {
                info!(sessions = self.sessions.len(), "Supervisor shutting down");
                break;
            }
            self.handle_message(msg);
        }
        info!("Supervisor stopped");
    }

    fn handle_message(&mut self, msg: SupervisorMessage) {
        match msg {
            SupervisorMessage::OpenSession { responder } => {
                let session = ChatSession::new(self.engine.as_ref());
                let snapshot = session.snapshot();
                self.sessions.insert(snapshot.session_id.clone(), session);
                info!(
                    session_id = %snapshot.session_id,
                    live_sessions = self.sessions.len(),
                    "session opened"
                );
                let _ = responder.send(Ok(snapshot));
            }
            SupervisorMessage::SendText {
                session_id,
                text,
                responder,
            } => {
                let engine = Arc::clone(&self.engine);
                let result = self
                    .session_mut(&session_id)
                    .map(|session| session.send_text(engine.as_ref(), &text));
                log_outcome(&session_id, &result);
                let _ = responder.send(result);
            }
            SupervisorMessage::SelectQuickReply {
                session_id,
                reply,
                responder,
            } => {
                let engine = Arc::clone(&self.engine);
                let result = self
                    .session_mut(&session_id)
                    .map(|session| session.select_quick_reply(engine.as_ref(), &reply));
                log_outcome(&session_id, &result);
                let _ = responder.send(result);
            }
            SupervisorMessage::Transcript {
                session_id,
                responder,
            } => {
                let result = self
                    .session_mut(&session_id)
                    .map(|session| session.snapshot());
                let _ = responder.send(result);
            }
            SupervisorMessage::CloseSession {
                session_id,
                responder,
            } => {
                let result = match self.sessions.remove(&session_id) {
                    Some(_) => {
                        info!(
                            session_id = %session_id,
                            live_sessions = self.sessions.len(),
                            "session closed"
                        );
                        Ok(())
                    }
                    None => Err(AppError::SessionNotFound(session_id)),
                };
                let _ = responder.send(result);
            }
            SupervisorMessage::SessionCount { responder } => {
                let _ = responder.send(Ok(self.sessions.len()));
            }
            SupervisorMessage::Shutdown => {}
        }
    }

    fn session_mut(&mut self, session_id: &str) -> Result<&mut ChatSession, AppError> {
        self.sessions.get_mut(session_id).ok_or_else(|| {
            warn!(session_id = %session_id, "unknown session");
            AppError::SessionNotFound(session_id.to_string())
        })
    }
}

fn log_outcome(session_id: &str, result: &Result<TurnOutcome, AppError>) {
    match result {
        Ok(TurnOutcome::Replied { quick_replies, .. }) => {
            debug!(session_id, quick_replies = quick_replies.len(), "turn answered")
        }
        Ok(TurnOutcome::Navigate { route, .. }) => {
            debug!(session_id, route = %route, "turn navigates")
        }
        Ok(TurnOutcome::Ignored) => debug!(session_id, "blank turn ignored"),
        Err(_) => {}
    }
}
