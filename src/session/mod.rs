use std::collections::HashMap;
use std::sync::Arc;
use std::time::{ Duration, Instant };

use log::{ debug, info };
use thiserror::Error;
use tokio::sync::Mutex;

use crate::chain::ResponseChain;
use crate::llm::{ self, LlmConfig, LlmError };
use crate::models::chat::ChatMessage;

/// Synthetic assistant turn seeding every fresh session.
pub const WELCOME_MESSAGE: &str = "Hello! How can I assist you today?";

/// Sessions idle longer than this are dropped on the next store access.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unsupported model: {0}")]
    UnsupportedModel(String),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Empty or whitespace-only input: nothing appended, no network call.
    Ignored,
    /// The two turns this submission appended (user, then assistant).
    Answered(Vec<ChatMessage>),
}

/// Per-browser-session context: chat history, theme flag, and the active
/// response chain. Owned by one connection; never shared across sessions.
pub struct Session {
    config: LlmConfig,
    chain: ResponseChain,
    messages: Vec<ChatMessage>,
    dark_mode: bool,
    last_seen: Instant,
}

impl Session {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let chain = ResponseChain::from_config(&config)?;
        Ok(Self {
            config,
            chain,
            messages: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
            dark_mode: false,
            last_seen: Instant::now(),
        })
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn model(&self) -> &str {
        self.chain.model()
    }

    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_seen.elapsed()
    }

    /// Appends the user turn, invokes the chain, and appends the reply.
    /// Chain failures are folded into a synthetic assistant turn so the
    /// conversation always continues.
    pub async fn submit(&mut self, input: &str) -> SubmitOutcome {
        self.touch();
        let question = input.trim();
        if question.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.messages.push(ChatMessage::user(question));

        let chain = self.chain.clone();
        let reply = match chain.ask(question).await {
            Ok(answer) => ChatMessage::assistant(answer),
            Err(e) => ChatMessage::assistant(format!("Error: {}", e)),
        };
        self.messages.push(reply);

        let appended = self.messages[self.messages.len() - 2..].to_vec();
        SubmitOutcome::Answered(appended)
    }

    /// Swaps the chain for one bound to `model`. Prior chain is discarded;
    /// an in-flight request (there can be none within a session, submissions
    /// serialize) would be unaffected. History is never touched.
    pub fn update_model(&mut self, model: &str) -> Result<String, SessionError> {
        self.touch();
        if !llm::is_supported_model(model) {
            return Err(SessionError::UnsupportedModel(model.to_string()));
        }

        self.config = self.config.with_model(model);
        self.chain = ResponseChain::from_config(&self.config)?;
        Ok(format!("Model updated to {}", model))
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.touch();
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }
}

/// All live sessions, each behind its own lock so one session's blocking
/// model call cannot stall another's.
pub struct SessionStore {
    defaults: LlmConfig,
    idle_ttl: Duration,
    sessions: Mutex<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new(defaults: LlmConfig, idle_ttl: Duration) -> Self {
        Self {
            defaults,
            idle_ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Fetches the session for `id`, creating and welcome-seeding it on first
    /// contact. Expired sessions are swept on every access.
    pub async fn get_or_create(&self, id: &str) -> Result<Arc<Mutex<Session>>, LlmError> {
        let mut sessions = self.sessions.lock().await;

        sessions.retain(|sid, session| {
            // A locked session has a request in flight; it is live by definition.
            let expired = session
                .try_lock()
                .map(|s| s.idle_for() > self.idle_ttl)
                .unwrap_or(false);
            if expired {
                debug!("Dropping idle session {}", sid);
            }
            !expired
        });

        if let Some(session) = sessions.get(id) {
            return Ok(Arc::clone(session));
        }

        info!("Creating session {}", id);
        let session = Arc::new(Mutex::new(Session::new(self.defaults.clone())?));
        sessions.insert(id.to_string(), Arc::clone(&session));
        Ok(session)
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
