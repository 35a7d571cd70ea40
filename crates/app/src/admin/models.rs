//! Admin Models

use std::fmt;

use jiff::Timestamp;
use uuid::Uuid;
use zeroize::Zeroize;

/// Shared admin password.
#[derive(Clone)]
pub struct AdminPassword(String);

impl AdminPassword {
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Compares without short-circuiting on the first differing byte.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        let expected = self.0.as_bytes();
        let candidate = candidate.as_bytes();

        let diff = expected
            .iter()
            .zip(candidate.iter())
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b));

        diff == 0 && expected.len() == candidate.len()
    }
}

impl fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminPassword(**redacted**)")
    }
}

impl Drop for AdminPassword {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Issued on a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    /// Bearer token to present on admin requests.
    pub token: String,
    pub expires_at: Timestamp,
}

/// Proof that an admin session was verified for the current request.
///
/// Every catalog mutation takes one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminCapability {
    session: Uuid,
}

impl AdminCapability {
    #[must_use]
    pub const fn new(session: Uuid) -> Self {
        Self { session }
    }

    #[must_use]
    pub const fn session(&self) -> Uuid {
        self.session
    }
}
