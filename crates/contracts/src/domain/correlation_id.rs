//! Request-scoped correlation identifier shared by logs and error envelopes.
//!
//! `CorrelationId` follows a request through the server. It lives in
//! task-local storage so error constructors can pick it up without explicit
//! parameter threading.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`CorrelationId::scope`] when spawning new tasks or moving work onto
//! blocking threads.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Header carrying the correlation identifier on HTTP responses.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

task_local! {
    static CORRELATION_ID: CorrelationId;
}

/// Per-request correlation identifier exposed via task-local storage.
///
/// # Examples
/// ```
/// use sitegen_contracts::domain::CorrelationId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: CorrelationId = "00000000-0000-0000-0000-000000000000"
///     .parse()
///     .expect("valid UUID");
/// let observed = CorrelationId::scope(id, async move { CorrelationId::current() }).await;
/// assert_eq!(observed, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the identifier in scope for the current task, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn current() -> Option<Self> { CORRELATION_ID.try_with(|id| *id).ok() }

    /// Run `fut` with `id` in scope.
    pub async fn scope<Fut>(id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CORRELATION_ID.scope(id, fut).await
    }

    /// Run the synchronous closure `f` with `id` in scope.
    pub fn sync_scope<F, R>(id: Self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        CORRELATION_ID.sync_scope(id, f)
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CorrelationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn current_reflects_scope() {
        let expected = CorrelationId::generate();
        let observed =
            CorrelationId::scope(expected, async move { CorrelationId::current() }).await;
        assert_eq!(observed, Some(expected));
    }

    #[tokio::test]
    async fn current_is_none_out_of_scope() {
        assert!(CorrelationId::current().is_none());
    }

    #[test]
    fn sync_scope_exposes_identifier() {
        let expected = CorrelationId::from_uuid(Uuid::nil());
        let observed = CorrelationId::sync_scope(expected, CorrelationId::current);
        assert_eq!(observed, Some(expected));
    }

    #[test]
    fn from_str_round_trips() {
        let uuid = Uuid::new_v4();
        let id: CorrelationId = uuid.to_string().parse().expect("parse uuid");
        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn from_str_rejects_garbage() {
        assert!("not-a-uuid".parse::<CorrelationId>().is_err());
    }
}
