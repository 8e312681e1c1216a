//! Authentication lifecycle and the active session.

pub mod controller;
pub mod model;

pub use controller::SessionController;
pub use model::{AuthPage, Credentials, SessionContext, SessionState, Theme};
