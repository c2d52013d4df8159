//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: persisting the authenticated email, reading it
//! back, and clearing the session on logout.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::Error;

pub(crate) const EMAIL_KEY: &str = "email";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's email in the session cookie.
    pub fn persist_email(&self, email: &str) -> Result<(), Error> {
        self.0
            .insert(EMAIL_KEY, email)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current email from the session, if present.
    pub fn email(&self) -> Result<Option<String>, Error> {
        self.0
            .get::<String>(EMAIL_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Require an authenticated session or return `401 Unauthorized`.
    pub fn require_email(&self) -> Result<String, Error> {
        self.email()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop the session entirely, instructing the client to remove the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
