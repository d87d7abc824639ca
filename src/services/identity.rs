use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use actix_web::{web, FromRequest, HttpRequest};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::AppError;
use crate::view::DirectoryView;

pub const SESSION_HEADER: &str = "X-Session-Id";

struct SessionEntry {
    view: DirectoryView,
    last_seen: Instant,
}

/// Anonymous sessions, each owning its own directory view.
pub struct Sessions {
    entries: Mutex<HashMap<Uuid, SessionEntry>>,
    idle_ttl: Duration,
}

impl Sessions {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            idle_ttl,
        }
    }

    pub async fn sign_in_anonymously(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        entries.retain(|_, e| now.duration_since(e.last_seen) < self.idle_ttl);
        entries.insert(
            id,
            SessionEntry {
                view: DirectoryView::new(),
                last_seen: now,
            },
        );
        log::info!("Signed in anonymous session {}", id);
        id
    }

    /// Refreshes the session if it exists and has not gone idle.
    pub async fn touch(&self, id: Uuid) -> bool {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        match entries.get_mut(&id) {
            Some(entry) if now.duration_since(entry.last_seen) < self.idle_ttl => {
                entry.last_seen = now;
                true
            }
            Some(_) => {
                entries.remove(&id);
                log::info!("Session {} expired", id);
                false
            }
            None => false,
        }
    }

    pub async fn with_view<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut DirectoryView) -> R,
    ) -> Result<R, AppError> {
        let mut entries = self.entries.lock().await;
        let entry = entries
            .get_mut(&id)
            .ok_or_else(|| AppError::Unauthorized("session expired".into()))?;
        entry.last_seen = Instant::now();
        Ok(f(&mut entry.view))
    }
}

/// Extracts and checks the caller's anonymous session. Data routes take this
/// as an argument so they never run without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session(pub Uuid);

impl FromRequest for Session {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let sessions = req.app_data::<web::Data<Sessions>>().cloned();
        let header = req
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Box::pin(async move {
            let sessions = sessions
                .ok_or_else(|| AppError::Unauthorized("sessions are not configured".into()))?;
            let id = header
                .as_deref()
                .and_then(|h| Uuid::parse_str(h).ok())
                .ok_or_else(|| AppError::Unauthorized("missing or malformed session id".into()))?;

            if sessions.touch(id).await {
                Ok(Session(id))
            } else {
                Err(AppError::Unauthorized("unknown or expired session".into()))
            }
        })
    }
}
