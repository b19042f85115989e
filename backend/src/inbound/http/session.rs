//! Session access for handlers and the role gate.
//!
//! The cookie holds a single [`Principal`] under [`PRINCIPAL_KEY`]. A value
//! that fails to decode is treated as no session at all.

use actix_session::{Session, SessionExt};
use actix_web::dev::ServiceRequest;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Principal};

pub(crate) const PRINCIPAL_KEY: &str = "principal";

/// Read the principal from a raw session, logging and discarding bad values.
pub(crate) fn principal_from(session: &Session) -> Option<Principal> {
    match session.get::<Principal>(PRINCIPAL_KEY) {
        Ok(principal) => principal,
        Err(error) => {
            warn!(%error, "discarding undecodable session principal");
            None
        }
    }
}

/// Principal of the request behind `req`, used by middleware.
pub(crate) fn request_principal(req: &ServiceRequest) -> Option<Principal> {
    principal_from(&req.get_session())
}

/// Handler-facing wrapper around the Actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the principal after a successful login.
    ///
    /// The session id is renewed first so a pre-login cookie cannot be reused.
    pub fn persist_principal(&self, principal: &Principal) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(PRINCIPAL_KEY, principal)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Current principal, if the caller is logged in.
    pub fn principal(&self) -> Option<Principal> {
        principal_from(&self.0)
    }

    /// Current principal or `401 Unauthorized`.
    pub fn require_principal(&self) -> Result<Principal, Error> {
        self.principal()
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session entry and expire the cookie.
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
