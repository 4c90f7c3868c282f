//! # Session state machine
//!
//! Which screen is showing and who is logged in.
//!
//! ```text
//!   LoggedOut(Login) <--ToggleSignup--> LoggedOut(Signup)
//!          |                                  |
//!          +---------AuthSucceeded------------+
//!                          |
//!                          v
//!   LoggedIn(DirectChat) <--OpenCommunity / OpenDirectMessages--> LoggedIn(Community)
//!
//!   LoggedIn(*) --Logout--> LoggedOut(Login)
//! ```
//!
//! Authentication always lands on direct messages. Transitions not drawn above
//! are rejected with [`InvalidTransition`] and leave the state untouched.

use std::fmt;

use crate::models::Identity;

/// Screen shown to a visitor who is not logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthView {
    #[default]
    Login,
    Signup,
}

/// Screen shown to a logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatView {
    #[default]
    DirectChat,
    Community,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    LoggedOut(AuthView),
    LoggedIn { identity: Identity, view: ChatView },
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::LoggedOut(AuthView::Login)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    ToggleSignup,
    AuthSucceeded(Identity),
    OpenCommunity,
    OpenDirectMessages,
    Logout,
}

impl Transition {
    fn name(&self) -> &'static str {
        match self {
            Transition::ToggleSignup => "toggle signup",
            Transition::AuthSucceeded(_) => "auth succeeded",
            Transition::OpenCommunity => "open community",
            Transition::OpenDirectMessages => "open direct messages",
            Transition::Logout => "logout",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot {transition} from {from}")]
pub struct InvalidTransition {
    pub from: &'static str,
    pub transition: &'static str,
}

impl SessionState {
    /// Document title for this state.
    pub fn title(&self) -> &'static str {
        match self {
            SessionState::LoggedOut(AuthView::Login) => "Login",
            SessionState::LoggedOut(AuthView::Signup) => "Sign up",
            SessionState::LoggedIn {
                view: ChatView::DirectChat,
                ..
            } => "Direct Messages",
            SessionState::LoggedIn {
                view: ChatView::Community,
                ..
            } => "Community Chat",
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::LoggedIn { identity, .. } => Some(identity),
            SessionState::LoggedOut(_) => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity().is_some()
    }

    /// The state reached by applying `transition`.
    pub fn next(&self, transition: Transition) -> Result<SessionState, InvalidTransition> {
        use SessionState::*;

        let next = match (self, &transition) {
            (LoggedOut(AuthView::Login), Transition::ToggleSignup) => LoggedOut(AuthView::Signup),
            (LoggedOut(AuthView::Signup), Transition::ToggleSignup) => LoggedOut(AuthView::Login),
            (LoggedOut(_), Transition::AuthSucceeded(identity)) => LoggedIn {
                identity: identity.clone(),
                view: ChatView::DirectChat,
            },
            (
                LoggedIn {
                    identity,
                    view: ChatView::DirectChat,
                },
                Transition::OpenCommunity,
            ) => LoggedIn {
                identity: identity.clone(),
                view: ChatView::Community,
            },
            (
                LoggedIn {
                    identity,
                    view: ChatView::Community,
                },
                Transition::OpenDirectMessages,
            ) => LoggedIn {
                identity: identity.clone(),
                view: ChatView::DirectChat,
            },
            (LoggedIn { .. }, Transition::Logout) => LoggedOut(AuthView::Login),
            _ => {
                return Err(InvalidTransition {
                    from: self.title(),
                    transition: transition.name(),
                })
            }
        };
        Ok(next)
    }

    /// Apply `transition` in place. On error the state is unchanged.
    pub fn apply(&mut self, transition: Transition) -> Result<(), InvalidTransition> {
        let next = self.next(transition)?;
        tracing::debug!("session: {} -> {}", self.title(), next.title());
        *self = next;
        Ok(())
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.identity() {
            Some(identity) => write!(f, "{} ({})", self.title(), identity.username),
            None => f.write_str(self.title()),
        }
    }
}
