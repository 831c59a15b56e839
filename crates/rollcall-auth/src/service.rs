//! Session manager — login, resumption, logout, and idle-expiry
//! orchestration.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rollcall_core::Error;
use rollcall_core::models::session::Session;
use rollcall_core::repository::{CredentialRepository, SessionStore};
use tokio::sync::broadcast;
use tokio::time::{self, Instant};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::password;

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// Lifecycle notifications for the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The idle timeout elapsed with no observed activity. Emitted
    /// exactly once per expired session.
    Expired { user_id: Uuid },
}

struct ActiveState {
    session: Option<Session>,
    /// Bumped on every login/resume/logout; a watcher task whose epoch
    /// no longer matches is stale and exits without firing.
    epoch: u64,
    deadline: Instant,
}

struct Inner<C, S> {
    credentials: C,
    store: S,
    config: SessionConfig,
    state: Mutex<ActiveState>,
    events: broadcast::Sender<SessionEvent>,
}

/// Owns the single active faculty session.
///
/// Generic over the credential and persistence backends so the
/// lifecycle logic has no dependency on the database crate. Cloning is
/// cheap; all clones share the same session state.
pub struct SessionManager<C, S> {
    inner: Arc<Inner<C, S>>,
}

impl<C, S> Clone for SessionManager<C, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, S> SessionManager<C, S>
where
    C: CredentialRepository + 'static,
    S: SessionStore + 'static,
{
    pub fn new(credentials: C, store: S, config: SessionConfig) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            inner: Arc::new(Inner {
                credentials,
                store,
                config,
                state: Mutex::new(ActiveState {
                    session: None,
                    epoch: 0,
                    deadline: Instant::now(),
                }),
                events,
            }),
        }
    }

    /// Authenticate with email + password and install the session.
    ///
    /// A failed attempt has no side effects. A successful login while a
    /// session is already active simply replaces it. The session is
    /// persisted to durable storage only when `remember_me` is set.
    pub async fn login(&self, input: LoginInput) -> Result<Session, SessionError> {
        let account = match self.inner.credentials.get_by_email(&input.email).await {
            Ok(account) => account,
            Err(Error::NotFound { .. }) => return Err(SessionError::InvalidCredentials),
            Err(e) => return Err(e.into()),
        };

        if !password::verify_password(&input.password, &account.password_hash)? {
            return Err(SessionError::InvalidCredentials);
        }

        let session = Session {
            id: Uuid::new_v4(),
            user_id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
            department: account.department,
            remember_me: input.remember_me,
            idle_timeout_ms: self.inner.config.idle_timeout.as_millis() as u64,
            logged_in_at: Utc::now(),
        };

        if session.remember_me {
            self.inner.store.save(&session).await?;
        }

        self.install(session.clone());
        info!(user = %session.email, remember_me = session.remember_me, "login successful");
        Ok(session)
    }

    /// Restore a previously persisted session, if one exists and was
    /// saved with `remember_me`. Absence of stored data is not an
    /// error.
    pub async fn resume_session(&self) -> Result<Option<Session>, SessionError> {
        let Some(saved) = self.inner.store.load().await? else {
            return Ok(None);
        };
        if !saved.remember_me {
            return Ok(None);
        }

        self.install(saved.clone());
        info!(user = %saved.email, "session resumed from durable storage");
        Ok(Some(saved))
    }

    /// Clear the in-memory session and durable storage. Always
    /// succeeds, even when no session is active; any pending idle
    /// watcher is canceled with no residual firing.
    pub async fn logout(&self) -> Result<(), SessionError> {
        {
            let mut state = self.state();
            state.epoch += 1;
            state.session = None;
        }
        self.inner.store.clear().await?;
        info!("logged out");
        Ok(())
    }

    /// Record an observed user interaction: pushes the shared idle
    /// deadline forward. Only the latest call in a window matters.
    pub fn touch_activity(&self) {
        let mut state = self.state();
        if state.session.is_some() {
            state.deadline = Instant::now() + self.inner.config.idle_timeout;
        }
    }

    pub fn is_active(&self) -> bool {
        self.state().session.is_some()
    }

    pub fn current(&self) -> Option<Session> {
        self.state().session.clone()
    }

    /// Subscribe to session lifecycle notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Make `session` the active one and arm its idle watcher. Any
    /// previous watcher becomes stale through the epoch bump.
    fn install(&self, session: Session) {
        let epoch = {
            let mut state = self.state();
            state.epoch += 1;
            state.deadline = Instant::now() + self.inner.config.idle_timeout;
            state.session = Some(session);
            state.epoch
        };
        tokio::spawn(watch_idle(Arc::clone(&self.inner), epoch));
    }

    fn state(&self) -> MutexGuard<'_, ActiveState> {
        self.inner
            .state
            .lock()
            .expect("session state lock poisoned")
    }
}

/// Idle watcher for one session epoch: sleeps until the shared
/// deadline, re-sleeping whenever activity pushed it forward, and
/// performs the expiry transition when it genuinely passed.
async fn watch_idle<C, S>(inner: Arc<Inner<C, S>>, epoch: u64)
where
    C: CredentialRepository + 'static,
    S: SessionStore + 'static,
{
    loop {
        let deadline = {
            let state = inner.state.lock().expect("session state lock poisoned");
            if state.epoch != epoch {
                return;
            }
            state.deadline
        };

        time::sleep_until(deadline).await;

        let expired = {
            let mut state = inner.state.lock().expect("session state lock poisoned");
            if state.epoch != epoch {
                return;
            }
            if Instant::now() < state.deadline {
                // Activity arrived while we slept; go wait again.
                None
            } else {
                state.epoch += 1;
                state.session.take()
            }
        };

        let Some(session) = expired else {
            continue;
        };

        if let Err(e) = inner.store.clear().await {
            warn!(error = %e, "failed to clear persisted session on expiry");
        }
        let _ = inner.events.send(SessionEvent::Expired {
            user_id: session.user_id,
        });
        info!(user = %session.email, "session expired due to inactivity");
        return;
    }
}
