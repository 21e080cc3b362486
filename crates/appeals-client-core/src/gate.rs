use crate::session::TokenPair;

/// What the router should do with a protected view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Render,
    RedirectToLogin,
}

/// Presence check only. Token validity is the backend's call, surfaced as a
/// per-request 401; no signature or expiry inspection happens here and no
/// network call is made.
#[must_use]
pub fn is_authenticated(session: Option<&TokenPair>) -> bool {
    session.is_some_and(|pair| !pair.token.is_empty())
}

#[must_use]
pub fn guard(session: Option<&TokenPair>) -> GateDecision {
    if is_authenticated(session) {
        GateDecision::Render
    } else {
        GateDecision::RedirectToLogin
    }
}
