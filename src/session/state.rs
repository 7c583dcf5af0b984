use serde::Serialize;

use crate::models::UserRecord;

/// The externally observable authentication state.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    LoggedIn,
    LoggedOut,
}

/// In-memory view of who is signed in.
///
/// `loading` is a hint for the UI (e.g. a spinner on the login form) and plays no
/// part in the authentication state.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<UserRecord>,
    pub is_logged_in: bool,
    pub loading: bool,
}

impl Default for Session {
    /// Starts optimistic: logged in until a token lookup says otherwise.
    fn default() -> Self {
        Session {
            user: None,
            is_logged_in: true,
            loading: false,
        }
    }
}

impl Session {
    pub fn auth_state(&self) -> AuthState {
        if self.is_logged_in {
            AuthState::LoggedIn
        } else {
            AuthState::LoggedOut
        }
    }

    pub(crate) fn log_in(&mut self, user: Option<UserRecord>) {
        if user.is_some() {
            self.user = user;
        }
        self.is_logged_in = true;
    }

    pub(crate) fn reset(&mut self) {
        self.user = None;
        self.is_logged_in = false;
        self.loading = false;
    }
}
