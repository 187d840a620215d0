use payloads::responses;
use yewdux::prelude::*;

#[derive(Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    Unknown,
    LoggedOut,
    LoggedIn(responses::UserProfile),
}

/// Global app state. Feed contents and the viewer context are
/// not stored here; each page fetches its own.
#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    pub auth_state: AuthState,
}

impl State {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth_state, AuthState::LoggedIn(_))
    }

    pub fn profile(&self) -> Option<&responses::UserProfile> {
        match &self.auth_state {
            AuthState::LoggedIn(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn set_profile(&mut self, profile: responses::UserProfile) {
        self.auth_state = AuthState::LoggedIn(profile);
    }

    pub fn logout(&mut self) {
        self.auth_state = AuthState::LoggedOut;
    }
}
