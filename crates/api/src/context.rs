use learnhub_auth::Session;

/// Session resolved for the current request, if any.
///
/// Inserted by the session middleware on every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    session: Option<Session>,
}

impl SessionContext {
    pub fn new(session: Option<Session>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

/// Session that passed the access guard of the current page tree.
///
/// Only present inside guarded trees, so handlers there never deal with a
/// missing or mis-scoped identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedSession(pub Session);
