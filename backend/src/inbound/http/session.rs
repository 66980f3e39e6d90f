//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only deal with domain
//! operations: remembering who logged in and holding the CSRF token.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Username};
use crate::inbound::http::csrf;

pub(crate) const USERNAME_KEY: &str = "username";
pub(crate) const CSRF_TOKEN_KEY: &str = "csrf_token";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user in a freshly renewed session.
    pub fn persist_user(&self, username: &Username) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USERNAME_KEY, username.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the logged-in user, if any.
    pub fn username(&self) -> Result<Option<Username>, Error> {
        let raw = self
            .0
            .get::<String>(USERNAME_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match raw.map(Username::new) {
            Some(Ok(username)) => Ok(Some(username)),
            Some(Err(error)) => {
                tracing::warn!(%error, "invalid username in session cookie");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Require a logged-in user or return `401 Unauthorized`.
    pub fn require_user(&self) -> Result<Username, Error> {
        self.username()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop everything stored in the session.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Return the session's CSRF token, creating one on first use.
    pub fn csrf_token(&self) -> Result<String, Error> {
        let existing = self
            .0
            .get::<String>(CSRF_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        if let Some(token) = existing {
            return Ok(token);
        }
        let token = csrf::generate_token();
        self.0
            .insert(CSRF_TOKEN_KEY, &token)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        Ok(token)
    }

    /// Check a submitted CSRF token or return `403 Forbidden`.
    pub fn verify_csrf_token(&self, presented: &str) -> Result<(), Error> {
        let expected = self
            .0
            .get::<String>(CSRF_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?
            .ok_or_else(|| Error::forbidden("csrf token missing from session"))?;
        if csrf::tokens_match(&expected, presented) {
            Ok(())
        } else {
            Err(Error::forbidden("csrf token mismatch"))
        }
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
