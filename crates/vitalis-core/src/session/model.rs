//! Session state types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::daily_log::DailyLog;
use crate::patient::Patient;

/// Which authentication form is showing while logged out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPage {
    #[default]
    Login,
    SignUp,
}

/// The authoritative in-memory copy of the active session.
///
/// Pipelines receive this explicitly instead of reading ambient state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub patient: Patient,
    pub daily_logs: Vec<DailyLog>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Uninitialized,
    LoggedOut { auth_page: AuthPage },
    LoggedIn(SessionContext),
}

impl SessionState {
    pub fn logged_out() -> Self {
        Self::LoggedOut {
            auth_page: AuthPage::Login,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }

    pub fn context(&self) -> Option<&SessionContext> {
        match self {
            Self::LoggedIn(context) => Some(context),
            _ => None,
        }
    }

    pub fn auth_page(&self) -> Option<AuthPage> {
        match self {
            Self::LoggedOut { auth_page } => Some(*auth_page),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// UI color scheme preference.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
