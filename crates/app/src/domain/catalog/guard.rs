//! Single-flight guard for form submissions.

use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashSet;

use crate::domain::catalog::WorkflowError;

/// Client-chosen identifier of one form instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormToken(String);

impl FormToken {
    /// `None` for blank values.
    #[must_use]
    pub fn new(value: &str) -> Option<Self> {
        let value = value.trim();

        (!value.is_empty()).then(|| Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Tracks form tokens whose submission is still running.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<Mutex<FxHashSet<FormToken>>>,
}

impl SubmissionGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `token` until the returned permit is dropped.
    ///
    /// Without a token nothing is claimed and concurrent submissions all proceed.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InFlight`] when the token is already claimed.
    pub fn acquire(&self, token: Option<FormToken>) -> Result<SubmissionPermit, WorkflowError> {
        let Some(token) = token else {
            return Ok(SubmissionPermit {
                guard: self.clone(),
                token: None,
            });
        };

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);

        if !in_flight.insert(token.clone()) {
            return Err(WorkflowError::InFlight);
        }

        Ok(SubmissionPermit {
            guard: self.clone(),
            token: Some(token),
        })
    }

    fn release(&self, token: &FormToken) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }
}

/// Releases its form token on drop.
#[derive(Debug)]
pub struct SubmissionPermit {
    guard: SubmissionGuard,
    token: Option<FormToken>,
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        if let Some(token) = &self.token {
            self.guard.release(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn token(value: &str) -> Option<FormToken> {
        FormToken::new(value)
    }

    #[test]
    fn blank_tokens_are_ignored() {
        assert_eq!(FormToken::new("  "), None);
        assert_eq!(FormToken::new(""), None);
    }

    #[test]
    fn same_token_is_rejected_while_in_flight() -> TestResult {
        let guard = SubmissionGuard::new();
        let _first = guard.acquire(token("form-1"))?;

        let second = guard.acquire(token("form-1"));

        assert!(
            matches!(second, Err(WorkflowError::InFlight)),
            "expected InFlight, got {second:?}"
        );

        Ok(())
    }

    #[test]
    fn token_is_released_when_permit_drops() -> TestResult {
        let guard = SubmissionGuard::new();

        drop(guard.acquire(token("form-1"))?);

        guard.acquire(token("form-1"))?;

        Ok(())
    }

    #[test]
    fn untokened_submissions_never_block() -> TestResult {
        let guard = SubmissionGuard::new();
        let _first = guard.acquire(None)?;
        let _second = guard.acquire(None)?;
        let _third = guard.acquire(token("form-2"))?;

        Ok(())
    }
}
