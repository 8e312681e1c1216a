//! Session controller: the single owner of profile and log state.
//!
//! ```text
//! Uninitialized --restore--> LoggedIn
//!       |                       |
//!       +------restore------> LoggedOut(Login <-> SignUp) <--log_out--+
//!                               |                                      |
//!                               +--------------log_in------------------+
//! ```
//!
//! Sign-up writes the profile and seed logs but lands back on the login
//! form; only `log_in` activates a session.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::model::{AuthPage, Credentials, SessionContext, SessionState, Theme};
use crate::clock::Clock;
use crate::daily_log::{DailyLog, normalize_recent_dates, seed_logs};
use crate::error::{Result, VitalisError};
use crate::patient::{Patient, SignUpInput};
use crate::store::{KeyValueStore, StoreKey};

const SESSION_ACTIVE: &str = "true";

pub struct SessionController {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    state: SessionState,
}

impl SessionController {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn context(&self) -> Option<&SessionContext> {
        self.state.context()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Restores a persisted session. Only the first call reads the store;
    /// later calls return the current state unchanged.
    ///
    /// Unparseable profile or log data wipes the three session keys and
    /// leaves the controller logged out.
    pub fn restore(&mut self) -> Result<&SessionState> {
        if !matches!(self.state, SessionState::Uninitialized) {
            return Ok(&self.state);
        }

        match self.read_persisted_session() {
            Ok(Some(context)) => {
                info!(patient_id = %context.patient.patient_id, "restored active session");
                self.state = SessionState::LoggedIn(context);
            }
            Ok(None) => {
                debug!("no active session to restore");
                self.state = SessionState::logged_out();
            }
            Err(err) if err.is_corruption() => {
                warn!(error = %err, "persisted session is corrupt; clearing session keys");
                self.state = SessionState::logged_out();
                self.clear_session_keys()?;
            }
            Err(err) => {
                self.state = SessionState::logged_out();
                return Err(err);
            }
        }

        Ok(&self.state)
    }

    fn read_persisted_session(&self) -> Result<Option<SessionContext>> {
        let active = self.store.get(StoreKey::SessionActive)?;
        let profile = self.store.get(StoreKey::PatientProfile)?;
        let logs = self.store.get(StoreKey::DailyLogs)?;

        // Present slots are always validated so corrupt data is caught even
        // when no session flag is set.
        let patient = profile.as_deref().map(parse_patient).transpose()?;
        let daily_logs = logs.as_deref().map(parse_logs).transpose()?;

        if active.as_deref() != Some(SESSION_ACTIVE) {
            return Ok(None);
        }

        match (patient, daily_logs) {
            (Some(patient), Some(daily_logs)) => {
                warn_on_foreign_logs(&patient, &daily_logs);
                Ok(Some(SessionContext {
                    patient,
                    daily_logs,
                }))
            }
            _ => Ok(None),
        }
    }

    pub fn show_sign_up(&mut self) {
        if let SessionState::LoggedOut { auth_page } = &mut self.state {
            *auth_page = AuthPage::SignUp;
        }
    }

    pub fn show_login(&mut self) {
        if let SessionState::LoggedOut { auth_page } = &mut self.state {
            *auth_page = AuthPage::Login;
        }
    }

    /// Creates the local account and its two seed logs, replacing any
    /// previous profile. Does not log in.
    pub fn sign_up(&mut self, input: SignUpInput) -> Result<Patient> {
        if self.state.is_logged_in() {
            return Err(VitalisError::validation(
                "Log out before creating a new account.",
            ));
        }

        let patient = input.into_patient(self.clock.now_millis())?;
        let logs = seed_logs(&patient.patient_id, self.clock.today());

        self.store
            .set(StoreKey::PatientProfile, &serde_json::to_string(&patient)?)?;
        self.store
            .set(StoreKey::DailyLogs, &serde_json::to_string(&logs)?)?;

        info!(patient_id = %patient.patient_id, "account created");
        self.state = SessionState::LoggedOut {
            auth_page: AuthPage::Login,
        };
        Ok(patient)
    }

    /// Matches credentials against the stored profile and activates the
    /// session. The two latest logs are re-dated to yesterday and today and
    /// written back before the session flag is set.
    pub fn log_in(&mut self, credentials: &Credentials) -> Result<&SessionContext> {
        let raw_profile = self
            .store
            .get(StoreKey::PatientProfile)?
            .ok_or_else(|| VitalisError::auth("No account found. Please sign up."))?;
        let patient = self.wipe_on_corruption(parse_patient(&raw_profile))?;

        if !patient.credentials_match(&credentials.username, &credentials.password) {
            info!("login rejected");
            return Err(VitalisError::auth("Invalid username or password."));
        }

        let mut daily_logs = match self.store.get(StoreKey::DailyLogs)? {
            Some(raw) => self.wipe_on_corruption(parse_logs(&raw))?,
            None => Vec::new(),
        };
        warn_on_foreign_logs(&patient, &daily_logs);

        normalize_recent_dates(&mut daily_logs, self.clock.today());
        self.store
            .set(StoreKey::DailyLogs, &serde_json::to_string(&daily_logs)?)?;
        self.store.set(StoreKey::SessionActive, SESSION_ACTIVE)?;

        info!(patient_id = %patient.patient_id, logs = daily_logs.len(), "logged in");
        self.state = SessionState::LoggedIn(SessionContext {
            patient,
            daily_logs,
        });

        self.state
            .context()
            .ok_or_else(|| VitalisError::internal("session missing after login"))
    }

    /// Drops the in-memory session and clears only the session flag; the
    /// profile and logs stay stored for the next login.
    pub fn log_out(&mut self) -> Result<()> {
        self.state = SessionState::logged_out();
        self.store.remove(StoreKey::SessionActive)?;
        info!("logged out");
        Ok(())
    }

    pub fn theme(&self) -> Result<Theme> {
        Ok(self
            .store
            .get(StoreKey::Theme)?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default())
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.store.set(StoreKey::Theme, &theme.to_string())
    }

    pub fn toggle_theme(&self) -> Result<Theme> {
        let next = self.theme()?.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    fn wipe_on_corruption<T>(&mut self, parsed: Result<T>) -> Result<T> {
        if let Err(err) = &parsed
            && err.is_corruption()
        {
            warn!(error = %err, "stored session data is corrupt; clearing session keys");
            self.state = SessionState::logged_out();
            self.clear_session_keys()?;
        }
        parsed
    }

    fn clear_session_keys(&self) -> Result<()> {
        for key in StoreKey::SESSION_KEYS {
            self.store.remove(key)?;
        }
        Ok(())
    }
}

fn parse_patient(raw: &str) -> Result<Patient> {
    serde_json::from_str(raw)
        .map_err(|e| VitalisError::corruption(format!("stored patient profile: {e}")))
}

fn parse_logs(raw: &str) -> Result<Vec<DailyLog>> {
    serde_json::from_str(raw)
        .map_err(|e| VitalisError::corruption(format!("stored daily logs: {e}")))
}

// Cross-patient logs are tolerated; the app only ever holds one profile.
fn warn_on_foreign_logs(patient: &Patient, logs: &[DailyLog]) {
    let foreign = logs
        .iter()
        .filter(|log| log.patient_id != patient.patient_id)
        .count();
    if foreign > 0 {
        warn!(
            patient_id = %patient.patient_id,
            foreign,
            "daily logs belong to a different patient id"
        );
    }
}
