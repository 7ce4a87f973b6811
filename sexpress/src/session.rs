use std::{collections::HashMap, fmt, time::{Duration, Instant}};
use std::sync::{Arc, atomic::{AtomicU64, Ordering}};

use log::{debug, trace};
use parking_lot::Mutex;

use crate::{Error, env::Environment, interpreter::interpret, value::Value};

/// Opaque handle addressing one isolated interpreter environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Lifecycle policy knobs. Both default to unlimited.
#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    pub max_sessions: Option<usize>,
    pub idle_timeout: Option<Duration>,
}

#[derive(Debug)]
struct SessionState {
    env: Environment,
    last_access: Instant,
}

impl SessionState {
    fn new() -> Self {
        Self { env: Environment::new(), last_access: Instant::now() }
    }

    fn touch(&mut self) {
        self.last_access = Instant::now();
    }
}

/// Owns every live session and arbitrates access to them.
///
/// The session table has its own lock and each session has another, so
/// evaluations in different sessions run in parallel while two
/// evaluations addressed to the same session serialize on its lock.
/// Table and session locks are always taken in that order.
#[derive(Debug)]
pub struct SessionManager {
    config: SessionConfig,
    next_id: AtomicU64,
    sessions: Mutex<HashMap<SessionId, Arc<Mutex<SessionState>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self { config, next_id: AtomicU64::new(0), sessions: Mutex::new(HashMap::new()) }
    }

    /// Allocate a fresh empty environment under a new unique id.
    pub fn create_session(&self) -> Result<SessionId, Error> {
        let mut sessions = self.sessions.lock();
        if let Some(limit) = self.config.max_sessions {
            if sessions.len() >= limit {
                return Err(Error::SessionLimit { limit });
            }
        }
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        sessions.insert(id, Arc::new(Mutex::new(SessionState::new())));
        debug!("created {}", id);
        Ok(id)
    }

    /// Evaluate source text against the session's environment.
    pub fn evaluate(&self, id: SessionId, src: &str) -> Result<Value, Error> {
        let session = self.session(id)?;
        let mut state = session.lock();
        state.touch();
        trace!("{}: evaluating {:?}", id, src);
        interpret(src, &mut state.env)
    }

    /// A detached copy of the session's bindings; mutating it cannot
    /// touch the live environment.
    pub fn list_variables(&self, id: SessionId) -> Result<HashMap<Arc<str>, Value>, Error> {
        let session = self.session(id)?;
        let mut state = session.lock();
        state.touch();
        Ok(state.env.snapshot())
    }

    pub fn get_variable(&self, id: SessionId, name: &str) -> Result<Value, Error> {
        let session = self.session(id)?;
        let mut state = session.lock();
        state.touch();
        state.env.lookup(name)
    }

    /// Remove a session. Ending an id that is already gone is not an
    /// error; the return value reports whether anything was removed.
    pub fn end_session(&self, id: SessionId) -> bool {
        let removed = self.sessions.lock().remove(&id).is_some();
        if removed {
            debug!("ended {}", id);
        }
        removed
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Drop sessions idle longer than the configured timeout, returning
    /// how many were dropped. Each candidate's own lock is taken before
    /// removal, so an in-flight evaluation finishes first and its
    /// refreshed last_access keeps the session alive.
    pub fn evict_idle(&self) -> usize {
        let timeout = match self.config.idle_timeout {
            Some(t) => t,
            None => return 0,
        };
        let mut sessions = self.sessions.lock();
        let mut evicted = 0;
        sessions.retain(|id, session| {
            let state = session.lock();
            if state.last_access.elapsed() > timeout {
                debug!("evicting idle {}", id);
                evicted += 1;
                false
            } else {
                true
            }
        });
        evicted
    }

    fn session(&self, id: SessionId) -> Result<Arc<Mutex<SessionState>>, Error> {
        self.sessions.lock().get(&id).cloned().ok_or(Error::SessionNotFound { id })
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
