//! Admin gate.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::admin::{
    AdminCapability, AdminGateError, AdminPassword, AdminSession, SessionSecret,
    SessionTokenVersion, format_session_token, parse_session_token,
};

/// Default lifetime of an admin session.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(12);

#[derive(Debug)]
struct SessionEntry {
    secret: SessionSecret,
    expires_at: Timestamp,
}

/// Admin gate keeping sessions in process memory.
///
/// Sessions do not survive a restart; admins log in again.
#[derive(Debug)]
pub struct MemoryAdminGate {
    password: AdminPassword,
    ttl: SignedDuration,
    sessions: Mutex<FxHashMap<Uuid, SessionEntry>>,
}

impl MemoryAdminGate {
    #[must_use]
    pub fn new(password: AdminPassword, ttl: SignedDuration) -> Self {
        Self {
            password,
            ttl,
            sessions: Mutex::new(FxHashMap::default()),
        }
    }

    fn sessions(&self) -> std::sync::MutexGuard<'_, FxHashMap<Uuid, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a session at `now`; split out so expiry can be tested.
    fn login_at(&self, password: &str, now: Timestamp) -> Result<AdminSession, AdminGateError> {
        if !self.password.verify(password) {
            return Err(AdminGateError::InvalidPassword);
        }

        let session_uuid = Uuid::now_v7();
        let secret = SessionSecret::generate();
        let token = format_session_token(session_uuid, SessionTokenVersion::V1, &secret);
        let expires_at = now + self.ttl;

        let mut sessions = self.sessions();

        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(session_uuid, SessionEntry { secret, expires_at });

        info!(session = %session_uuid, %expires_at, "admin session opened");

        Ok(AdminSession { token, expires_at })
    }

    fn authenticate_at(
        &self,
        token: &str,
        now: Timestamp,
    ) -> Result<AdminCapability, AdminGateError> {
        let parsed = parse_session_token(token)?;
        let mut sessions = self.sessions();

        let entry = sessions
            .get(&parsed.session_uuid)
            .ok_or(AdminGateError::NotFound)?;

        if !entry.secret.matches(&parsed.secret) {
            return Err(AdminGateError::NotFound);
        }

        if entry.expires_at <= now {
            sessions.remove(&parsed.session_uuid);

            debug!(session = %parsed.session_uuid, "admin session expired");

            return Err(AdminGateError::Expired);
        }

        Ok(AdminCapability::new(parsed.session_uuid))
    }
}

#[async_trait]
impl AdminGate for MemoryAdminGate {
    async fn login(&self, password: &str) -> Result<AdminSession, AdminGateError> {
        self.login_at(password, Timestamp::now())
    }

    async fn authenticate(&self, token: &str) -> Result<AdminCapability, AdminGateError> {
        self.authenticate_at(token, Timestamp::now())
    }

    async fn logout(&self, token: &str) -> Result<(), AdminGateError> {
        let capability = self.authenticate_at(token, Timestamp::now())?;

        self.sessions().remove(&capability.session());

        info!(session = %capability.session(), "admin session closed");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AdminGate: Send + Sync {
    /// Exchange the shared password for an expiring session.
    async fn login(&self, password: &str) -> Result<AdminSession, AdminGateError>;

    /// Verify a session token presented on an admin request.
    async fn authenticate(&self, token: &str) -> Result<AdminCapability, AdminGateError>;

    /// End the session the token belongs to.
    async fn logout(&self, token: &str) -> Result<(), AdminGateError>;
}
